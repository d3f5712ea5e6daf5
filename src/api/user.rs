use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;

use super::{
    load_session, render, require_token,
    templates::{PlaylistsPage, ProfilePage, RecommendationsPage},
};
use crate::{
    error::ApiError, management::SessionManager, server::AppState, spotify::catalog::choose_seeds,
};

/// Shows the current user's profile and remembers their id in the session.
pub async fn profile(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let mut session = load_session(&state, &jar);
    let token = match require_token(&state, &mut session).await {
        Ok(token) => token,
        Err(redirect) => return redirect.into_response(),
    };

    let page = match state.spotify.current_user(&token).await {
        Ok(user) => {
            session.set_user_id(user.id.clone());
            render(&ProfilePage { user: &user })
        }
        Err(e) => Err(e),
    };

    (session.persist(jar), page).into_response()
}

/// Shows the first page of the current user's playlists.
pub async fn playlists(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let mut session = load_session(&state, &jar);
    let token = match require_token(&state, &mut session).await {
        Ok(token) => token,
        Err(redirect) => return redirect.into_response(),
    };

    let page = match state.spotify.playlists(&token).await {
        Ok(playlists) => render(&PlaylistsPage {
            playlists: &playlists,
        }),
        Err(e) => Err(e),
    };

    (session.persist(jar), page).into_response()
}

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationParams {
    /// Market for genre-seeded recommendations (ISO 3166-1 alpha-2).
    pub location: Option<String>,
}

/// Shows ten recommendations seeded from the user's top track.
///
/// Users without top tracks get genre-seeded recommendations for the market
/// given as `location` (query string or form body). The recommended track ids
/// are kept in the session.
pub async fn recommendations(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(params): Form<RecommendationParams>,
) -> Response {
    let mut session = load_session(&state, &jar);
    let token = match require_token(&state, &mut session).await {
        Ok(token) => token,
        Err(redirect) => return redirect.into_response(),
    };

    let page = recommendations_page(&state, &token, &params, &mut session).await;
    (session.persist(jar), page).into_response()
}

async fn recommendations_page(
    state: &AppState,
    token: &str,
    params: &RecommendationParams,
    session: &mut SessionManager,
) -> Result<Html<String>, ApiError> {
    let top_tracks = state.spotify.top_tracks(token).await?;
    let seeds = choose_seeds(&top_tracks.items, params.location.as_deref());
    let recommendations = state.spotify.recommendations(token, &seeds).await?;

    session.set_last_recommendations(recommendations.track_ids());
    render(&RecommendationsPage {
        recommendations: &recommendations,
    })
}
