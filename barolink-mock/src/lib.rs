use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::registry::MockRegistry;
use crate::settings::Settings;

pub mod registry;
pub mod settings;

/// Serve a standalone mock registry for local development. Integration tests
/// use [`MockRegistry`] directly on an ephemeral port instead.
pub async fn run(settings: &Arc<Settings>) {
    let registry = MockRegistry::new();

    let ip_addr = settings.mock.host.parse::<IpAddr>().unwrap();

    let address = SocketAddr::from((ip_addr, settings.mock.port));

    let listener = TcpListener::bind(&address).await.unwrap();

    tracing::info!("mock registry listening on {:?}", address);

    axum::serve(listener, registry.router()).await.unwrap();
}
