//! Last.fm now-playing plugin.
//!
//! Answers the `.lastfm` command by querying the Last.fm web API and saying
//! the result in the channel the command came from. Three queries are
//! understood:
//!
//! - `.lastfm` / `.lastfm np [user]`: the currently playing track,
//! - `.lastfm weekly artist [user]`: the most played artist of the week,
//! - `.lastfm tell <nick>`: the currently playing track of the configured
//!   identity, addressed to `<nick>`.
//!
//! Every lookup runs against a wall-clock deadline; an elapsed deadline is
//! reported separately from service failures and from the valid "nothing is
//! playing" answer. Failures go to the invoking user as a notice, never into
//! the conversation.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::LastfmConfig;
use crate::template::{Substitutions, render};
use crate::{http, plugin::prelude::*};

/// Plugin for announcing what Last.fm says a user is playing.
pub struct LastFm {
    /// Client for the Last.fm web API.
    client: lastfm::Client,
    /// Command handler for the `.lastfm` command.
    command: BotCommand,
}

/// Errors that can occur during a lookup.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The whole lookup did not finish before the configured deadline.
    #[error("the lookup did not finish in time")]
    Timeout,
    /// The underlying client failed.
    #[error(transparent)]
    Client(#[from] lastfm::Error),
}

/// A parsed `.lastfm` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Query {
    /// `np [user]`, or no arguments at all.
    NowPlaying { user: Option<String> },
    /// `weekly artist [user]`.
    WeeklyArtist { user: Option<String> },
    /// `tell <nick>`.
    Tell { recipient: String },
}

/// Errors produced while turning argument tokens into a [`Query`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
enum QueryError {
    /// The leading token matched no known sub-command.
    #[error("unrecognized subcommand '{0}'")]
    UnrecognizedSubcommand(String),
    /// A sub-command was missing a required token.
    #[error("expected '{0}'")]
    MissingToken(&'static str),
}

impl Query {
    /// Parses space-separated argument tokens into a typed query.
    ///
    /// The first token decides the branch; trailing tokens beyond a branch's
    /// arity are ignored.
    fn parse(args: &str) -> Result<Query, QueryError> {
        let mut tokens = args.split_whitespace();

        match tokens.next() {
            None => Ok(Query::NowPlaying { user: None }),
            Some("np") => Ok(Query::NowPlaying {
                user: tokens.next().map(String::from),
            }),
            Some("weekly") => match tokens.next() {
                Some("artist") => Ok(Query::WeeklyArtist {
                    user: tokens.next().map(String::from),
                }),
                Some(other) => Err(QueryError::UnrecognizedSubcommand(other.to_string())),
                None => Err(QueryError::MissingToken("artist")),
            },
            Some("tell") => match tokens.next() {
                Some(nick) => Ok(Query::Tell {
                    recipient: nick.to_string(),
                }),
                None => Err(QueryError::MissingToken("<nick>")),
            },
            Some(other) => Err(QueryError::UnrecognizedSubcommand(other.to_string())),
        }
    }
}

#[async_trait]
impl Plugin for LastFm {
    fn new(ctx: &Context) -> Self {
        let client =
            lastfm::Client::with_client(http::build_client(), ctx.config.lastfm.api_key.clone());
        let command = BotCommand::new(".lastfm");

        Self { client, command }
    }

    fn name() -> Name {
        Name::from("lastfm")
    }

    fn author() -> Author {
        Author::from("npbot contributors")
    }

    fn version() -> Version {
        Version::from("0.2")
    }

    async fn handle_message(
        &self,
        ctx: &Context,
        client: &Client,
        message: &Message,
    ) -> Result<(), BotError> {
        if let Command::PRIVMSG(ref channel, ref user_message) = message.command
            && let Some(args) = self.command.parse(user_message)
        {
            match Query::parse(args) {
                Ok(query) => self.run_query(ctx, client, message, channel, query).await?,
                Err(err) => {
                    notice(
                        client,
                        message,
                        channel,
                        &format!("{err} - usage: .lastfm [np [user] | weekly artist [user] | tell <nick>]"),
                    )?;
                }
            }
        }

        Ok(())
    }
}

impl LastFm {
    /// Runs one parsed query to completion and says or notices the outcome.
    async fn run_query(
        &self,
        ctx: &Context,
        client: &Client,
        message: &Message,
        channel: &str,
        query: Query,
    ) -> Result<(), BotError> {
        let config = &ctx.config.lastfm;

        match query {
            Query::NowPlaying { user } => {
                let identity = user.as_deref().unwrap_or(&config.user);
                let who = user.as_deref().unwrap_or(&config.pronoun);

                match self.fetch_now_playing(identity, config.timeout).await {
                    Ok(Some(track)) => {
                        let template = select_template(
                            &config.templates.now_playing,
                            config.templates.now_playing_album.as_deref(),
                            track.album.is_some(),
                        );
                        let message = render(template, &track_substitutions(&track, "who", who));

                        client.send_privmsg(channel, message)?;
                    }
                    Ok(None) => self.say_nothing(client, channel, config, who)?,
                    Err(err) => report_failure(client, message, channel, &err)?,
                }
            }
            Query::WeeklyArtist { user } => {
                let identity = user.as_deref().unwrap_or(&config.user);
                let who = user.as_deref().unwrap_or(&config.pronoun);

                match self.fetch_top_artist(identity, config.timeout).await {
                    Ok(Some(artist)) => {
                        let mut substitutions = Substitutions::new();
                        substitutions.set("who", who);
                        substitutions.set("artist", artist);

                        client.send_privmsg(
                            channel,
                            render(&config.templates.weekly_artist, &substitutions),
                        )?;
                    }
                    Ok(None) => self.say_nothing(client, channel, config, who)?,
                    Err(err) => report_failure(client, message, channel, &err)?,
                }
            }
            Query::Tell { recipient } => {
                match self.fetch_now_playing(&config.user, config.timeout).await {
                    Ok(Some(track)) => {
                        let template = select_template(
                            &config.templates.tell,
                            config.templates.tell_album.as_deref(),
                            track.album.is_some(),
                        );
                        let message =
                            render(template, &track_substitutions(&track, "addressee", &recipient));

                        client.send_privmsg(channel, message)?;
                    }
                    Ok(None) => self.say_nothing(client, channel, config, &config.pronoun)?,
                    Err(err) => report_failure(client, message, channel, &err)?,
                }
            }
        }

        Ok(())
    }

    /// Fetches the currently playing track of `user` against the deadline.
    async fn fetch_now_playing(
        &self,
        user: &str,
        deadline: Duration,
    ) -> Result<Option<lastfm::Track>, Error> {
        with_deadline(deadline, self.client.now_playing(user)).await
    }

    /// Fetches the week's most played artist of `user` against the deadline.
    async fn fetch_top_artist(
        &self,
        user: &str,
        deadline: Duration,
    ) -> Result<Option<String>, Error> {
        with_deadline(deadline, self.client.top_weekly_artist(user)).await
    }

    /// Says the nothing-playing reply, unless the quiet option suppresses it.
    fn say_nothing(
        &self,
        client: &Client,
        channel: &str,
        config: &LastfmConfig,
        who: &str,
    ) -> Result<(), BotError> {
        if config.quiet {
            debug!("suppressing nothing-playing reply");
            return Ok(());
        }

        let mut substitutions = Substitutions::new();
        substitutions.set("who", who);

        client.send_privmsg(channel, render(&config.templates.nothing, &substitutions))?;

        Ok(())
    }
}

/// Builds the substitutions for a track reply; `extra` carries the addressing
/// value (`who` or `addressee`) of the current sub-command.
fn track_substitutions(track: &lastfm::Track, extra: &'static str, value: &str) -> Substitutions {
    let mut substitutions = Substitutions::new();
    substitutions.set(extra, value);
    substitutions.set("artist", track.artist.as_str());
    substitutions.set("title", track.title.as_str());

    if let Some(album) = &track.album {
        substitutions.set("album", album.as_str());
    }

    substitutions
}

/// Prefers the album-qualified template when the track has an album and such
/// a template is configured.
fn select_template<'a>(
    plain: &'a str,
    album_qualified: Option<&'a str>,
    has_album: bool,
) -> &'a str {
    match album_qualified {
        Some(template) if has_album => template,
        _ => plain,
    }
}

/// Runs a lookup to completion or until the deadline elapses, whichever comes
/// first. An elapsed deadline aborts the lookup and reports [`Error::Timeout`],
/// distinct from the client's own failures and from an empty result.
async fn with_deadline<T, F>(deadline: Duration, lookup: F) -> Result<T, Error>
where
    F: Future<Output = Result<T, lastfm::Error>>,
{
    match tokio::time::timeout(deadline, lookup).await {
        Ok(result) => result.map_err(Error::from),
        Err(_elapsed) => Err(Error::Timeout),
    }
}

/// Reports a failed lookup to the log and to the invoking user.
fn report_failure(
    client: &Client,
    message: &Message,
    channel: &str,
    error: &Error,
) -> Result<(), BotError> {
    warn!(%error, "lastfm lookup failed");

    notice(client, message, channel, &format!("lastfm: {error}"))
}

/// Sends diagnostic text to the invoking user rather than the conversation.
fn notice(
    client: &Client,
    message: &Message,
    channel: &str,
    text: &str,
) -> Result<(), BotError> {
    let target = message.source_nickname().unwrap_or(channel);

    client.send_notice(target, text)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_is_a_now_playing_query() {
        assert_eq!(Query::parse(""), Ok(Query::NowPlaying { user: None }));
        assert_eq!(Query::parse("   "), Ok(Query::NowPlaying { user: None }));
    }

    #[test]
    fn np_takes_an_optional_user() {
        assert_eq!(Query::parse("np"), Ok(Query::NowPlaying { user: None }));
        assert_eq!(
            Query::parse("np iSevenC"),
            Ok(Query::NowPlaying {
                user: Some(String::from("iSevenC"))
            })
        );
    }

    #[test]
    fn weekly_artist_takes_an_optional_user() {
        assert_eq!(
            Query::parse("weekly artist"),
            Ok(Query::WeeklyArtist { user: None })
        );
        assert_eq!(
            Query::parse("weekly artist bob"),
            Ok(Query::WeeklyArtist {
                user: Some(String::from("bob"))
            })
        );
        assert_eq!(
            Query::parse("weekly album"),
            Err(QueryError::UnrecognizedSubcommand(String::from("album")))
        );
        assert_eq!(Query::parse("weekly"), Err(QueryError::MissingToken("artist")));
    }

    #[test]
    fn tell_requires_a_recipient() {
        assert_eq!(
            Query::parse("tell bob"),
            Ok(Query::Tell {
                recipient: String::from("bob")
            })
        );
        assert_eq!(Query::parse("tell"), Err(QueryError::MissingToken("<nick>")));
    }

    #[test]
    fn unknown_leading_token_is_an_error() {
        assert_eq!(
            Query::parse("bogus np"),
            Err(QueryError::UnrecognizedSubcommand(String::from("bogus")))
        );
    }

    #[test]
    fn album_template_is_preferred_when_the_track_has_an_album() {
        let template = select_template("plain", Some("with album"), true);

        assert_eq!(template, "with album");
    }

    #[test]
    fn plain_template_is_used_without_an_album() {
        assert_eq!(select_template("plain", Some("with album"), false), "plain");
    }

    #[test]
    fn plain_template_is_used_when_no_album_template_is_configured() {
        assert_eq!(select_template("plain", None, true), "plain");
    }

    #[tokio::test]
    async fn empty_result_within_deadline_is_not_a_timeout() {
        let result =
            with_deadline(Duration::from_secs(2), async { Ok(None::<lastfm::Track>) }).await;

        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test(start_paused = true)]
    async fn elapsed_deadline_is_a_timeout() {
        let lookup = async {
            tokio::time::sleep(Duration::from_secs(5)).await;

            Ok(Some(lastfm::Track {
                title: String::from("Dayvan Cowboy"),
                artist: String::from("Boards of Canada"),
                album: None,
            }))
        };

        let result = with_deadline(Duration::from_secs(2), lookup).await;

        assert!(matches!(result, Err(Error::Timeout)));
    }
}
