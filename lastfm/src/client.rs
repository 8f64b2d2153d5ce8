//! A client for querying the Last.fm web service (ws.audioscrobbler.com).
//!
//! This module provides a high-level async interface for the two user queries
//! the crate supports: the currently playing track and the most played artist
//! of the trailing week.

use std::time::Duration;

use reqwest::{ClientBuilder, redirect::Policy};
use serde::de::DeserializeOwned;

use crate::Error;
use crate::types::{
    ApiError, RecentTrack, RecentTracksResponse, TopArtistsResponse, Track,
};

/// The base URL of the service endpoint.
const BASE_URL: &str = "https://ws.audioscrobbler.com/2.0/";
/// The response format requested from the service.
const FORMAT: &str = "json";
/// The trailing window used for top-artist queries.
const TOP_ARTIST_PERIOD: &str = "7day";

/// An asynchronous client for the Last.fm web API.
///
/// This client handles construction of HTTP requests, authentication via the
/// operator-supplied API key, and decoding of the JSON responses.
#[derive(Debug)]
pub struct Client {
    /// The base URL of the service endpoint.
    base_url: String,
    /// The API key sent with every request.
    api_key: String,
    /// The underlying [`reqwest::Client`] used for making HTTP requests.
    client: reqwest::Client,
}

impl Client {
    /// Constructs a new `Client` with default settings.
    ///
    /// This method provides a convenient way to create a client. It configures
    /// default gzip support, a 30-second timeout, and disables redirects.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be built. This can happen
    /// in environments with misconfigured network or TLS dependencies. For a
    /// non-panicking version, see [`Client::try_new`].
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Client {
        Client::try_new(api_key).expect("could not construct http client")
    }

    /// Attempts to construct a new `Client` with default settings.
    ///
    /// This is the fallible version of [`Client::new`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error::BuildClient`] if the underlying `reqwest` client
    /// fails to build. See [`ClientBuilder::build`] for more details on
    /// potential failures.
    pub fn try_new(api_key: impl Into<String>) -> Result<Client, Error> {
        let client = ClientBuilder::new()
            .gzip(true)
            .redirect(Policy::none())
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(Error::BuildClient)?;

        Ok(Self::with_client(client, api_key))
    }

    /// Constructs a `Client` using a pre-configured `reqwest::Client`.
    ///
    /// This is useful if you want to share an HTTP client between multiple
    /// services or require custom configuration (e.g., proxies, custom
    /// headers).
    #[must_use]
    pub fn with_client(client: reqwest::Client, api_key: impl Into<String>) -> Client {
        let base_url = String::from(BASE_URL);

        Client {
            base_url,
            api_key: api_key.into(),
            client,
        }
    }

    /// Queries the track `user` is currently listening to.
    ///
    /// Returns `Ok(None)` when the user is not listening to anything right
    /// now. That is the service answering normally with an empty result, not
    /// a failure.
    ///
    /// # Errors
    ///
    /// - [`Error::Request`]: if the HTTP request fails due to network issues
    ///   or a transport-level timeout.
    /// - [`Error::Api`]: if the service rejects the request, e.g. for an
    ///   unknown user or an invalid API key.
    /// - [`Error::Json`]: if the response body does not match the expected
    ///   shape.
    pub async fn now_playing(&self, user: &str) -> Result<Option<Track>, Error> {
        let response: RecentTracksResponse = self
            .request("user.getrecenttracks", &[("user", user), ("limit", "1")])
            .await?;

        Ok(response
            .recenttracks
            .track
            .into_iter()
            .find(RecentTrack::is_now_playing)
            .map(Track::from))
    }

    /// Queries the artist `user` played the most over the trailing seven
    /// days.
    ///
    /// Returns `Ok(None)` when the user has no plays in that window.
    ///
    /// # Errors
    ///
    /// Fails in the same ways as [`Client::now_playing`].
    pub async fn top_weekly_artist(&self, user: &str) -> Result<Option<String>, Error> {
        let response: TopArtistsResponse = self
            .request(
                "user.gettopartists",
                &[("user", user), ("period", TOP_ARTIST_PERIOD), ("limit", "1")],
            )
            .await?;

        Ok(response
            .topartists
            .artist
            .into_iter()
            .next()
            .map(|artist| artist.name))
    }

    /// Issues one API request and decodes the response body.
    async fn request<T>(&self, method: &str, params: &[(&str, &str)]) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let request = self
            .client
            .get(&self.base_url)
            .query(&[
                ("method", method),
                ("api_key", self.api_key.as_str()),
                ("format", FORMAT),
            ])
            .query(params);
        let response = request.send().await.map_err(Error::Request)?;
        let body = response.text().await.map_err(Error::Request)?;

        // The service reports failures as an error envelope in the body; the
        // HTTP status does not always match.
        if let Ok(error) = serde_json::from_str::<ApiError>(&body) {
            return Err(Error::Api {
                code: error.error,
                message: error.message,
            });
        }

        serde_json::from_str(&body).map_err(Error::Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_client() {
        let http_client = reqwest::Client::new();
        let _ = Client::with_client(http_client, "29a8e2a9b57dd6b1b26e4fa3b5bba6c3");
    }
}
