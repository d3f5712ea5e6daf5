use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::SignedCookieJar;

use super::{
    load_session, render, require_token,
    templates::{ArtistPage, TrackPage},
};
use crate::{server::AppState, spotify::catalog::is_valid_id};

/// Shows a single track.
///
/// The id is checked before the session is even looked at; anything that is
/// not a plain base-62 id answers 400.
pub async fn track(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(id): Path<String>,
) -> Response {
    if !is_valid_id(&id) {
        return (StatusCode::BAD_REQUEST, "Invalid track id").into_response();
    }

    let mut session = load_session(&state, &jar);
    let token = match require_token(&state, &mut session).await {
        Ok(token) => token,
        Err(redirect) => return redirect.into_response(),
    };

    let page = match state.spotify.track(&token, &id).await {
        Ok(track) => render(&TrackPage { track: &track }),
        Err(e) => Err(e),
    };

    (session.persist(jar), page).into_response()
}

/// Shows a single artist with genres, followers and popularity.
///
/// Same id rules as [`track`].
pub async fn artist(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(id): Path<String>,
) -> Response {
    if !is_valid_id(&id) {
        return (StatusCode::BAD_REQUEST, "Invalid artist id").into_response();
    }

    let mut session = load_session(&state, &jar);
    let token = match require_token(&state, &mut session).await {
        Ok(token) => token,
        Err(redirect) => return redirect.into_response(),
    };

    let page = match state.spotify.artist(&token, &id).await {
        Ok(artist) => render(&ArtistPage { artist: &artist }),
        Err(e) => Err(e),
    };

    (session.persist(jar), page).into_response()
}
