use std::time::Duration;

/// The `User-Agent` header to send when issuing HTTP requests.
pub const HTTP_USER_AGENT: &str = concat!("npbot/", env!("CARGO_PKG_VERSION"));

/// The duration before a HTTP request times out.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// The default wall-clock deadline for one whole remote lookup.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(2);
