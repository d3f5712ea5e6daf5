use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;

use super::HOME_PATH;
use crate::{
    management::SessionManager, server::AppState, success, types::Session, warning,
};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
    error: Option<String>,
}

/// Completes the authorization-code flow.
///
/// Spotify redirects here with a one-time `code` (or an `error` if the user
/// declined). The code is exchanged for tokens which replace whatever the
/// session held before; the browser then goes on to the home page. Any failure
/// answers 400 with a plain text message.
pub async fn callback(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(params): Query<CallbackParams>,
) -> Response {
    if let Some(error) = params.error {
        warning!("Authorization was not granted: {}", error);
        return token_failure();
    }

    let Some(code) = params.code.filter(|code| !code.is_empty()) else {
        warning!("Callback without authorization code");
        return token_failure();
    };

    match state.spotify.exchange_code(&code).await {
        Ok(pair) => {
            let mut session = SessionManager::new(Session::default(), state.settings.secure_cookies);
            session.set_token(pair.access_token);
            if let Some(refresh_token) = pair.refresh_token {
                session.set_refresh_token(refresh_token);
            }

            success!("User logged in");
            (session.persist(jar), Redirect::to(HOME_PATH)).into_response()
        }
        Err(e) => {
            warning!("Failed to get token: {}", e);
            token_failure()
        }
    }
}

fn token_failure() -> Response {
    (StatusCode::BAD_REQUEST, "Failed to get token").into_response()
}
