//! An IRC bot that announces what Last.fm says a user is listening to.

mod bot;
pub mod command;
pub mod config;
pub mod consts;
mod context;
mod error;
mod http;
mod plugin;
pub mod template;
pub mod tracing;

pub use bot::Bot;
pub use config::Config;
pub use context::Context;
pub use error::Error;
pub use plugin::{Plugin, Registry};
