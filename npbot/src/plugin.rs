use async_trait::async_trait;
use irc::client::Client;
use irc::proto::Message;
use tracing::debug;

use crate::Error;
use crate::context::Context;

/// The name of a plugin.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Name(&'static str);
/// The author of a plugin.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author(&'static str);
/// The version of a plugin.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Version(&'static str);

impl From<&'static str> for Name {
    fn from(name: &'static str) -> Self {
        Name(name)
    }
}

impl From<&'static str> for Author {
    fn from(author: &'static str) -> Self {
        Author(author)
    }
}

impl From<&'static str> for Version {
    fn from(version: &'static str) -> Self {
        Version(version)
    }
}

/// Last.fm now-playing announcements
#[cfg(feature = "plugin-lastfm")]
pub mod lastfm;

/// Common includes used in plugins.
#[allow(unused)]
mod prelude {
    pub use super::{Author, Name, Plugin, Version};
    pub use crate::Error as BotError;
    pub use crate::command::Command as BotCommand;
    pub use crate::context::Context;
    pub use async_trait::async_trait;
    pub use irc::client::Client;
    pub use irc::proto::{Command, Message};
}

/// The base trait that all plugins must implement.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Returns the name of the plugin.
    fn name() -> Name
    where
        Self: Sized;

    /// Returns the author of the plugin.
    fn author() -> Author
    where
        Self: Sized;

    /// Returns the version of the plugin.
    fn version() -> Version
    where
        Self: Sized;

    /// The constructor for a new plugin.
    fn new(ctx: &Context) -> Self
    where
        Self: Sized;

    /// Process an IRC protocol message.
    async fn handle_message(
        &self,
        _ctx: &Context,
        _client: &Client,
        _message: &Message,
    ) -> Result<(), Error> {
        Ok(())
    }
}

/// Plugin registry.
#[derive(Default)]
pub struct Registry {
    /// List of loaded plugins.
    pub plugins: Vec<Box<dyn Plugin>>,
}

impl Registry {
    /// Constructs and returns a new, empty plugin registry.
    #[must_use]
    pub fn new() -> Registry {
        Registry { plugins: vec![] }
    }

    /// Constructs and returns a new plugin registry with initialized plugins.
    #[must_use]
    pub fn preloaded(ctx: &Context) -> Registry {
        let mut registry = Self::new();
        debug!("registering plugins");

        #[cfg(feature = "plugin-lastfm")]
        registry.register::<lastfm::LastFm>(ctx);

        let num_plugins = registry.plugins.len();
        debug!(%num_plugins, "finished registering plugins");

        registry
    }

    /// Registers a new plugin based on its type.
    pub fn register<P: Plugin + 'static>(&mut self, ctx: &Context) -> bool {
        let plugin = Box::new(P::new(ctx));

        self.plugins.push(plugin);

        true
    }
}
