use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect},
};
use axum_extra::extract::SignedCookieJar;

use super::{
    load_session, render,
    templates::{HomePage, LandingPage, LoginPage},
};
use crate::{error::ApiError, server::AppState};

pub async fn landing() -> Result<Html<String>, ApiError> {
    render(&LandingPage)
}

pub async fn home() -> Result<Html<String>, ApiError> {
    render(&HomePage)
}

/// Renders the login page with a link to Spotify's authorization page.
pub async fn login(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let auth_url = state.spotify.authorize_url();
    render(&LoginPage {
        auth_url: &auth_url,
        signup_url: state.spotify.signup_url(),
    })
}

pub async fn signup(State(state): State<AppState>) -> Redirect {
    Redirect::to(state.spotify.signup_url())
}

/// Drops the session cookie and goes back to the landing page.
pub async fn logout(State(state): State<AppState>, jar: SignedCookieJar) -> impl IntoResponse {
    let mut session = load_session(&state, &jar);
    session.clear();
    (session.persist(jar), Redirect::to("/"))
}
