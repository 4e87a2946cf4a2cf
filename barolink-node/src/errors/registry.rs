#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("registry request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("registry returned unexpected status {0}")]
    UnexpectedStatus(u16),

    #[error("malformed registry response: {0}")]
    MalformedResponse(String),
}
