//! # API Module
//!
//! HTTP route handlers of the web front-end. Every handler is thin glue: it
//! reads the session, makes sure there is a token the provider accepts, makes
//! one (or two, for recommendations) Web API calls and renders a page.
//!
//! ## Endpoints
//!
//! ### Public pages
//!
//! - [`landing`], [`home`] - static pages
//! - [`login`] - page linking to Spotify's authorization page
//! - [`signup`] - redirect to Spotify's signup page
//! - [`logout`] - forgets the session
//! - [`callback`] - completes the authorization-code flow
//! - [`health`] - status and version for monitoring
//!
//! ### Protected pages
//!
//! - [`profile`], [`playlists`], [`recommendations`], [`track`], [`artist`]
//!
//! A protected handler without a usable token redirects to `/login`. A
//! non-2xx answer from Spotify is passed to the browser verbatim as plain text
//! with Spotify's status code; see [`ApiError`].
//!
//! ## Sessions
//!
//! The session lives in a signed cookie. Handlers that may have refreshed the
//! token always write the session back, also when the page itself failed.

use askama::Template;
use axum::response::{Html, Redirect};
use axum_extra::extract::SignedCookieJar;

use crate::{
    error::ApiError,
    management::{SessionManager, TokenManager},
    server::AppState,
};

mod callback;
mod catalog;
mod health;
mod pages;
mod templates;
mod user;

pub use callback::callback;
pub use catalog::{artist, track};
pub use health::health;
pub use pages::{home, landing, login, logout, signup};
pub use user::{RecommendationParams, playlists, profile, recommendations};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/home";

fn load_session(state: &AppState, jar: &SignedCookieJar) -> SessionManager {
    SessionManager::from_jar(jar, state.settings.secure_cookies)
}

/// Returns a token the provider accepts, or the redirect to the login page.
async fn require_token(state: &AppState, session: &mut SessionManager) -> Result<String, Redirect> {
    TokenManager::new(&state.spotify)
        .get_valid_token(session)
        .await
        .ok_or_else(|| Redirect::to(LOGIN_PATH))
}

fn render<T: Template>(page: &T) -> Result<Html<String>, ApiError> {
    Ok(Html(page.render()?))
}
