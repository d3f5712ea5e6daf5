use reqwest::StatusCode;

use super::SessionManager;
use crate::{debug, spotify::SpotifyClient, warning};

/// Hands out access tokens that the provider currently accepts.
///
/// There is no local expiry tracking: every call probes the token with a live
/// "who am I" request and only refreshes when the provider answers 401.
pub struct TokenManager<'a> {
    client: &'a SpotifyClient,
}

impl<'a> TokenManager<'a> {
    pub fn new(client: &'a SpotifyClient) -> Self {
        TokenManager { client }
    }

    /// Returns a usable access token for the session, or `None` if the user
    /// has to log in again.
    ///
    /// 1. No token in the session: `None` without any network call.
    /// 2. Probe `GET /me` with the token.
    /// 3. Probe answered 401: refresh with the stored refresh token, store the
    ///    new access token (and a rotated refresh token, if any) and return it.
    ///    Without a refresh token, or if the refresh fails, `None`.
    /// 4. Any other probe answer: the token is returned unchanged.
    ///
    /// A failed refresh leaves the stored refresh token in place. Errors never
    /// escape; the caller just redirects to the login page.
    pub async fn get_valid_token(&self, session: &mut SessionManager) -> Option<String> {
        let token = session.token()?.to_string();

        let status = match self.client.probe(&token).await {
            Ok(status) => status,
            Err(e) => {
                warning!("Token probe failed: {}", e);
                return None;
            }
        };
        debug!("Token probe answered {}", status);

        if status != StatusCode::UNAUTHORIZED {
            return Some(token);
        }

        let refresh_token = match session.refresh_token() {
            Some(refresh_token) => refresh_token.to_string(),
            None => {
                debug!("Token rejected and no refresh token stored");
                return None;
            }
        };

        match self.client.refresh_token(&refresh_token).await {
            Ok(pair) => {
                session.set_token(pair.access_token.clone());
                if let Some(rotated) = pair.refresh_token {
                    session.set_refresh_token(rotated);
                }
                debug!("Access token refreshed");
                Some(pair.access_token)
            }
            Err(e) => {
                warning!("Failed to refresh token: {}", e);
                None
            }
        }
    }
}
