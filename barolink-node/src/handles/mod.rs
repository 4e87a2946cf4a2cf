mod status_handle;

pub use status_handle::*;
