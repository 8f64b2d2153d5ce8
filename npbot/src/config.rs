use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// IRC client configuration
    pub irc: IrcConfig,
    /// Last.fm lookup configuration
    pub lastfm: LastfmConfig,
    /// Tracing configuration
    #[serde(default)]
    pub tracing: TracingConfig,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TracingConfig {
    /// Emit log records as JSON instead of human-readable lines.
    #[serde(default)]
    pub json: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct IrcTlsConfig {
    /// Enable TLS.
    pub enabled: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct IrcConfig {
    /// The client's nickname.
    pub nickname: String,
    /// Alternative nicknames for the client, if the default is taken.
    #[serde(default)]
    pub alt_nicks: Vec<String>,
    /// The client's username.
    pub username: Option<String>,
    /// The client's real name.
    pub realname: Option<String>,
    /// The hostname of the server to connect to.
    pub hostname: String,
    /// The password to connect to the server.
    pub password: Option<String>,
    /// The port number of the server to connect to.
    pub port: Option<u16>,
    /// TLS configuration.
    pub tls: Option<IrcTlsConfig>,
    /// List of channels to join.
    #[serde(default)]
    pub channels: Vec<String>,
}

impl IrcConfig {
    #[must_use]
    pub fn port(&self) -> u16 {
        match self.port {
            Some(port) => port,
            None => self.fallback_port(),
        }
    }

    /// Return the port number to use based on whether the connection requires TLS or not.
    fn fallback_port(&self) -> u16 {
        if self.tls.as_ref().map(|tls| tls.enabled) == Some(true) {
            6697
        } else {
            6667
        }
    }
}

impl From<IrcConfig> for irc::client::data::Config {
    fn from(config: IrcConfig) -> Self {
        let port = config.port();
        let use_tls = config.tls.map(|x| x.enabled);

        irc::client::data::Config {
            nickname: Some(config.nickname),
            username: config.username,
            realname: config.realname,
            server: Some(config.hostname),
            password: config.password,
            port: Some(port),
            use_tls,
            channels: config.channels,
            alt_nicks: config.alt_nicks,
            ..Default::default()
        }
    }
}

/// Options for the Last.fm lookups and the messages built from them.
///
/// Every recognized option is enumerated here with its default; nothing is
/// read from ad hoc key/value storage at render time.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LastfmConfig {
    /// Last.fm API key.
    pub api_key: String,
    /// Identity to look up when the command carries no username argument.
    pub user: String,
    /// `[who]` value used when no username argument is given.
    #[serde(default = "default_pronoun")]
    pub pronoun: String,
    /// Suppress the nothing-playing reply entirely.
    #[serde(default)]
    pub quiet: bool,
    /// Wall-clock deadline for one whole remote lookup.
    #[serde(default = "default_fetch_timeout", with = "humantime_serde")]
    pub timeout: Duration,
    /// Message templates, see [`Templates`].
    #[serde(default)]
    pub templates: Templates,
}

/// The operator-configurable message templates.
///
/// Templates substitute bracketed placeholders from the closed set described
/// in [`crate::template`]. The album-qualified variants are preferred over
/// their plain counterpart when the track carries an album and the variant is
/// configured.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Templates {
    /// Reply for a playing track.
    #[serde(default = "default_now_playing")]
    pub now_playing: String,
    /// Reply for a playing track with album information.
    #[serde(default = "default_now_playing_album")]
    pub now_playing_album: Option<String>,
    /// Reply when nothing is playing; only `[who]` is substituted.
    #[serde(default = "default_nothing")]
    pub nothing: String,
    /// Reply addressed to a named recipient.
    #[serde(default = "default_tell")]
    pub tell: String,
    /// Reply addressed to a named recipient, with album information.
    #[serde(default)]
    pub tell_album: Option<String>,
    /// Reply for the most played artist of the trailing week.
    #[serde(default = "default_weekly_artist")]
    pub weekly_artist: String,
}

impl Default for Templates {
    fn default() -> Self {
        Templates {
            now_playing: default_now_playing(),
            now_playing_album: default_now_playing_album(),
            nothing: default_nothing(),
            tell: default_tell(),
            tell_album: None,
            weekly_artist: default_weekly_artist(),
        }
    }
}

fn default_pronoun() -> String {
    String::from("/me")
}

#[must_use]
pub const fn default_fetch_timeout() -> Duration {
    crate::consts::DEFAULT_FETCH_TIMEOUT
}

fn default_now_playing() -> String {
    String::from("[who] is playing [artist] - [title]")
}

fn default_now_playing_album() -> Option<String> {
    Some(String::from("[who] is playing [artist] - [title] ([album])"))
}

fn default_nothing() -> String {
    String::from("[who] is not playing anything right now.")
}

fn default_tell() -> String {
    String::from("[addressee]: I'm playing [artist] - [title]")
}

fn default_weekly_artist() -> String {
    String::from("[who]'s favourite artist this week is [artist]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_defaults_match_the_documented_options() {
        let templates = Templates::default();

        assert_eq!(templates.now_playing, "[who] is playing [artist] - [title]");
        assert_eq!(
            templates.now_playing_album.as_deref(),
            Some("[who] is playing [artist] - [title] ([album])")
        );
        assert_eq!(
            templates.nothing,
            "[who] is not playing anything right now."
        );
        assert_eq!(templates.tell_album, None);
    }

    #[test]
    fn fallback_port_depends_on_tls() {
        let mut config = IrcConfig {
            hostname: String::from("irc.example.com"),
            ..IrcConfig::default()
        };

        assert_eq!(config.port(), 6667);

        config.tls = Some(IrcTlsConfig { enabled: true });
        assert_eq!(config.port(), 6697);

        config.port = Some(6660);
        assert_eq!(config.port(), 6660);
    }
}
