//! # Spotify Integration Module
//!
//! This module is the only place that talks to Spotify. It wraps two remote
//! services behind one [`SpotifyClient`]:
//!
//! - the **accounts service** (authorization page and token endpoint), used for
//!   the OAuth 2.0 authorization-code flow and for refreshing access tokens
//! - the **Web API**, used for the pass-through calls the pages are built from
//!
//! ```text
//! Route Handlers (api)
//!          ↓
//! Token Lifecycle (management)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorize URL, code exchange, refresh)
//!     ├── User Data (profile, playlists, top tracks)
//!     └── Catalog (tracks, artists, recommendations)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Error Handling
//!
//! Nothing in here retries. Token endpoint failures come back as
//! [`AuthError`](crate::error::AuthError), Web API failures as
//! [`ApiError`](crate::error::ApiError) carrying the provider's status code and
//! body verbatim.
//!
//! ## Timeouts
//!
//! All requests share one `reqwest::Client` built with the configured request
//! timeout, so a hanging provider blocks a request for at most that long.

use std::collections::BTreeMap;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::{
    Res,
    config::{ConfigError, Credentials, Endpoints, Settings},
    error::ApiError,
};

pub mod auth;
pub mod catalog;
pub mod user;

/// Headers sent with every Web API request.
///
/// Fails with [`ConfigError::MissingCredentials`] when `CLIENT_ID` or
/// `CLIENT_SECRET` is not set in the environment, mirroring the startup check.
///
/// # Example
///
/// ```
/// let headers = spotify_headers("BQC...")?;
/// assert_eq!(headers["Authorization"], "Bearer BQC...");
/// ```
pub fn spotify_headers(token: &str) -> Result<BTreeMap<&'static str, String>, ConfigError> {
    Credentials::from_env()?;
    Ok(bearer_headers(token))
}

/// Bearer authorization and JSON content type for `token`.
pub fn bearer_headers(token: &str) -> BTreeMap<&'static str, String> {
    BTreeMap::from([
        ("Authorization", format!("Bearer {token}")),
        ("Content-Type", "application/json".to_string()),
    ])
}

/// Client for the Spotify accounts service and Web API.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    endpoints: Endpoints,
    auth_url: Url,
    credentials: Credentials,
    redirect_uri: String,
}

impl SpotifyClient {
    /// Builds the client from the server settings.
    ///
    /// # Errors
    ///
    /// Fails if the authorization URL cannot be parsed or the HTTP client
    /// cannot be constructed (e.g. no TLS backend).
    pub fn new(settings: &Settings) -> Res<Self> {
        let http = Client::builder().timeout(settings.http_timeout).build()?;
        let auth_url = Url::parse(&settings.endpoints.auth_url)?;

        Ok(Self {
            http,
            endpoints: settings.endpoints.clone(),
            auth_url,
            credentials: settings.credentials.clone(),
            redirect_uri: settings.redirect_uri.clone(),
        })
    }

    pub fn signup_url(&self) -> &str {
        &self.endpoints.signup_url
    }

    fn authorized_get(&self, token: &str, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.endpoints.api_url, path);
        bearer_headers(token)
            .into_iter()
            .fold(self.http.get(url), |request, (name, value)| {
                request.header(name, value)
            })
    }

    /// Issues an authenticated GET against the Web API and decodes the body.
    ///
    /// Any non-2xx answer becomes [`ApiError::Upstream`] with `context` as the
    /// message prefix; a body that does not decode becomes [`ApiError::Decode`].
    async fn get_json<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        query: &[(&str, String)],
        context: &'static str,
    ) -> Result<T, ApiError> {
        let response = self
            .authorized_get(token, path)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Upstream {
                context,
                status,
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Decode { source, body })
    }
}
