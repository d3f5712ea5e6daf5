//! Configuration management for the Spotify web front-end.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Everything the server needs is gathered once at
//! startup into [`Settings`]; request handlers never read the environment.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)
//!
//! Only the OAuth client credentials (`CLIENT_ID`, `CLIENT_SECRET`) are required.
//! Without them the server refuses to start.

use std::{
    env,
    path::PathBuf,
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use thiserror::Error;

/// Scope requested on every authorization request.
pub const SPOTIFY_SCOPE: &str = "user-read-private user-read-email playlist-read-private user-top-read playlist-modify-public playlist-modify-private";

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";
const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:5000/callback";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_SIGNUP_URL: &str = "https://www.spotify.com/signup/";
const DEFAULT_IMAGES_DIR: &str = "images";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Minimum length of `SESSION_SECRET` in bytes.
pub const MIN_SESSION_SECRET_LEN: usize = 32;

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Errors raised while reading the configuration.
///
/// All of them are fatal: the server is never started with a partial
/// configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("CLIENT_ID and CLIENT_SECRET must be set in environment variables")]
    MissingCredentials,

    #[error("{key} has an invalid value '{value}': {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("SESSION_SECRET must be at least {MIN_SESSION_SECRET_LEN} bytes long")]
    SessionSecretTooShort,
}

/// OAuth client credentials issued by the Spotify developer dashboard.
///
/// Immutable after load. Both fields are guaranteed to be non-blank.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        if client_id.trim().is_empty() || client_secret.trim().is_empty() {
            return Err(ConfigError::MissingCredentials);
        }

        Ok(Self {
            client_id,
            client_secret,
        })
    }

    /// Reads `CLIENT_ID` and `CLIENT_SECRET` through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match (lookup("CLIENT_ID"), lookup("CLIENT_SECRET")) {
            (Some(id), Some(secret)) => Self::new(id, secret),
            _ => Err(ConfigError::MissingCredentials),
        }
    }

    /// Reads `CLIENT_ID` and `CLIENT_SECRET` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

// The secret never ends up in logs, not even through `{:?}`.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Remote endpoints used by the Spotify client.
///
/// Defaults point at the real Spotify services; tests point them at a stub
/// server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub signup_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            signup_url: DEFAULT_SIGNUP_URL.to_string(),
        }
    }
}

/// The complete runtime configuration of the server.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server_addr: String,
    pub credentials: Credentials,
    pub redirect_uri: String,
    pub endpoints: Endpoints,
    pub session_secret: Option<String>,
    pub secure_cookies: bool,
    pub images_dir: PathBuf,
    pub http_timeout: Duration,
    pub debug: bool,
}

impl Settings {
    /// Builds settings with defaults for everything but the credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            server_addr: DEFAULT_SERVER_ADDRESS.to_string(),
            credentials,
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            endpoints: Endpoints::default(),
            session_secret: None,
            secure_cookies: false,
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            debug: false,
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the credentials are missing or any of the
    /// optional variables holds a value that cannot be used.
    ///
    /// # Example
    ///
    /// ```
    /// let settings = Settings::from_env()?;
    /// println!("binding {}", settings.server_addr);
    /// ```
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    ///
    /// Blank values are treated like unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut settings = Self::new(Credentials::from_lookup(&get)?);

        if let Some(addr) = get("SERVER_ADDRESS") {
            settings.server_addr = addr;
        }
        if let Some(uri) = get("SPOTIFY_REDIRECT_URI") {
            settings.redirect_uri = uri;
        }
        if let Some(url) = get("SPOTIFY_AUTH_URL") {
            settings.endpoints.auth_url = url;
        }
        if let Some(url) = get("SPOTIFY_TOKEN_URL") {
            settings.endpoints.token_url = url;
        }
        if let Some(url) = get("SPOTIFY_API_URL") {
            settings.endpoints.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = get("SPOTIFY_SIGNUP_URL") {
            settings.endpoints.signup_url = url;
        }
        if let Some(dir) = get("IMAGES_DIR") {
            settings.images_dir = PathBuf::from(dir);
        }

        if let Some(secret) = get("SESSION_SECRET") {
            if secret.len() < MIN_SESSION_SECRET_LEN {
                return Err(ConfigError::SessionSecretTooShort);
            }
            settings.session_secret = Some(secret);
        }

        if let Some(value) = get("SECURE_COOKIES") {
            settings.secure_cookies = parse_bool("SECURE_COOKIES", &value)?;
        }

        if let Some(value) = get("HTTP_TIMEOUT_SECS") {
            let secs = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: "HTTP_TIMEOUT_SECS",
                    value: value.clone(),
                    reason: "expected a positive number of seconds".to_string(),
                })?;
            settings.http_timeout = Duration::from_secs(secs);
        }

        if let Some(level) = get("LOG_LEVEL") {
            settings.debug = match level.trim().to_ascii_lowercase().as_str() {
                "debug" | "trace" => true,
                "info" | "warn" | "warning" | "error" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "LOG_LEVEL",
                        value: level,
                        reason: "expected one of debug, info, warn, error".to_string(),
                    });
                }
            };
        }

        Ok(settings)
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

/// Loads environment variables from `.env` files.
///
/// Looks for a `.env` file in the platform-specific local data directory under
/// `spotiweb/.env` first and then in the working directory. Variables that are
/// already set in the environment are never overridden, so the real environment
/// always wins.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/spotiweb/.env`
/// - macOS: `~/Library/Application Support/spotiweb/.env`
/// - Windows: `%LOCALAPPDATA%/spotiweb/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// `.env` file cannot be parsed. A missing file is not an error.
pub async fn load_env() -> crate::Res<()> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotiweb/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Enables or disables the [`debug!`](crate::debug) log lines.
pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::Relaxed);
}

/// Returns whether debug log lines are printed.
pub fn verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_credentials_are_fatal() {
        let err = Settings::from_lookup(lookup(&[("CLIENT_ID", "abc")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingCredentials);

        let err = Settings::from_lookup(lookup(&[("CLIENT_SECRET", "abc")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingCredentials);

        let err = Settings::from_lookup(lookup(&[("CLIENT_ID", "  "), ("CLIENT_SECRET", "s")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingCredentials);
    }

    #[test]
    fn defaults_apply_when_only_credentials_are_set() {
        let settings =
            Settings::from_lookup(lookup(&[("CLIENT_ID", "id"), ("CLIENT_SECRET", "secret")]))
                .unwrap();

        assert_eq!(settings.credentials.client_id(), "id");
        assert_eq!(settings.credentials.client_secret(), "secret");
        assert_eq!(settings.server_addr, "127.0.0.1:5000");
        assert_eq!(settings.redirect_uri, "http://127.0.0.1:5000/callback");
        assert_eq!(settings.endpoints, Endpoints::default());
        assert_eq!(settings.http_timeout, Duration::from_secs(10));
        assert!(settings.session_secret.is_none());
        assert!(!settings.secure_cookies);
        assert!(!settings.debug);
    }

    #[test]
    fn optional_values_are_parsed() {
        let settings = Settings::from_lookup(lookup(&[
            ("CLIENT_ID", "id"),
            ("CLIENT_SECRET", "secret"),
            ("SPOTIFY_API_URL", "http://localhost:9000/v1/"),
            ("HTTP_TIMEOUT_SECS", "3"),
            ("SECURE_COOKIES", "yes"),
            ("LOG_LEVEL", "DEBUG"),
        ]))
        .unwrap();

        assert_eq!(settings.endpoints.api_url, "http://localhost:9000/v1");
        assert_eq!(settings.http_timeout, Duration::from_secs(3));
        assert!(settings.secure_cookies);
        assert!(settings.debug);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let base = [("CLIENT_ID", "id"), ("CLIENT_SECRET", "secret")];

        let mut pairs = base.to_vec();
        pairs.push(("HTTP_TIMEOUT_SECS", "0"));
        assert!(matches!(
            Settings::from_lookup(lookup(&pairs)),
            Err(ConfigError::InvalidValue {
                key: "HTTP_TIMEOUT_SECS",
                ..
            })
        ));

        let mut pairs = base.to_vec();
        pairs.push(("SESSION_SECRET", "too-short"));
        assert_eq!(
            Settings::from_lookup(lookup(&pairs)).unwrap_err(),
            ConfigError::SessionSecretTooShort
        );
    }

    #[test]
    fn credentials_debug_hides_the_secret() {
        let credentials = Credentials::new("id", "hunter2").unwrap();
        let printed = format!("{:?}", credentials);
        assert!(printed.contains("id"));
        assert!(!printed.contains("hunter2"));
    }
}
