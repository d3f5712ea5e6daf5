use axum_extra::extract::{
    SignedCookieJar,
    cookie::{Cookie, SameSite},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use thiserror::Error;

use crate::{debug, types::Session};

/// Name of the signed cookie carrying the session.
pub const SESSION_COOKIE_NAME: &str = "spotiweb_session";

/// Why a session cookie value could not be turned back into a [`Session`].
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session cookie is not base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("session cookie is not valid JSON: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Encodes a session as the cookie value (base64 of the JSON form).
pub fn encode(session: &Session) -> Result<String, SessionError> {
    let json = serde_json::to_vec(session).map_err(SessionError::SerdeError)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decodes a cookie value produced by [`encode`].
pub fn decode(value: &str) -> Result<Session, SessionError> {
    let json = URL_SAFE_NO_PAD
        .decode(value)
        .map_err(SessionError::Base64)?;
    serde_json::from_slice(&json).map_err(SessionError::SerdeError)
}

/// Plain key-based access to the session of one browser.
///
/// The session travels in a single signed cookie. A cookie with a bad
/// signature never reaches this type (the jar drops it), and one that does not
/// decode is treated as an empty session.
pub struct SessionManager {
    session: Session,
    secure: bool,
}

impl SessionManager {
    pub fn new(session: Session, secure: bool) -> Self {
        Self { session, secure }
    }

    /// Loads the session carried by the request's cookies.
    pub fn from_jar(jar: &SignedCookieJar, secure: bool) -> Self {
        let session = match jar.get(SESSION_COOKIE_NAME) {
            Some(cookie) => decode(cookie.value()).unwrap_or_else(|e| {
                debug!("Ignoring session cookie: {}", e);
                Session::default()
            }),
            None => Session::default(),
        };

        Self::new(session, secure)
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.session.refresh_token.as_deref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.session.user_id.as_deref()
    }

    pub fn last_recommendations(&self) -> Option<&[String]> {
        self.session.last_recommendations.as_deref()
    }

    pub fn set_token(&mut self, token: String) {
        self.session.token = Some(token);
    }

    pub fn set_refresh_token(&mut self, refresh_token: String) {
        self.session.refresh_token = Some(refresh_token);
    }

    pub fn set_user_id(&mut self, user_id: String) {
        self.session.user_id = Some(user_id);
    }

    pub fn set_last_recommendations(&mut self, track_ids: Vec<String>) {
        self.session.last_recommendations = Some(track_ids);
    }

    /// Forgets everything, including the tokens.
    pub fn clear(&mut self) {
        self.session = Session::default();
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Writes the session back into the jar.
    ///
    /// An empty session removes the cookie instead of storing an empty one.
    pub fn persist(&self, jar: SignedCookieJar) -> SignedCookieJar {
        if self.session == Session::default() {
            return jar.remove(Cookie::build(SESSION_COOKIE_NAME).path("/"));
        }

        match encode(&self.session) {
            Ok(value) => jar.add(
                Cookie::build((SESSION_COOKIE_NAME, value))
                    .http_only(true)
                    .secure(self.secure)
                    .same_site(SameSite::Lax)
                    .path("/"),
            ),
            Err(e) => {
                crate::warning!("Failed to store session: {}", e);
                jar
            }
        }
    }
}
