//! Client and response types for the Last.fm music-tracking web API.
//!
//! The [`Client`] covers the two user queries a now-playing announcer needs:
//! the currently playing track and the most played artist of the trailing
//! week. Responses are decoded into the narrow [`Track`] record rather than
//! the full wire shape.

#[cfg(feature = "client")]
pub mod client;
mod error;
pub mod types;

#[cfg(feature = "client")]
pub use client::Client;
pub use error::Error;
pub use types::Track;
