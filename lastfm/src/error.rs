use thiserror::Error;

/// Error.
#[derive(Debug, Error)]
pub enum Error {
    #[cfg(feature = "client")]
    #[error("could not construct http client: {0}")]
    BuildClient(#[source] reqwest::Error),
    #[cfg(feature = "client")]
    #[error("request error: {0}")]
    Request(#[source] reqwest::Error),
    #[cfg(feature = "client")]
    #[error("service error {code}: {message}")]
    Api {
        /// Numeric error code as defined by the service.
        code: u32,
        /// Human-readable message accompanying the code.
        message: String,
    },
    #[cfg(feature = "client")]
    #[error("could not decode response: {0}")]
    Json(#[source] serde_json::Error),
}
