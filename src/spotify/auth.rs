use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{StatusCode, header::AUTHORIZATION};

use super::SpotifyClient;
use crate::{
    config::{Credentials, SPOTIFY_SCOPE},
    debug,
    error::AuthError,
    types::{TokenPair, TokenResponse},
};

/// Value of the `Authorization` header sent to the token endpoint.
///
/// HTTP Basic authentication with `base64(client_id ":" client_secret)`.
pub fn basic_auth_header(credentials: &Credentials) -> String {
    let raw = format!(
        "{}:{}",
        credentials.client_id(),
        credentials.client_secret()
    );
    format!("Basic {}", STANDARD.encode(raw))
}

impl SpotifyClient {
    /// Builds the URL of Spotify's authorization page.
    ///
    /// The user is sent there by the login page; after consenting, Spotify
    /// redirects back to the configured redirect URI with a one-time `code`.
    /// The consent dialog is always shown so users can switch accounts.
    pub fn authorize_url(&self) -> String {
        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", self.credentials.client_id())
            .append_pair("response_type", "code")
            .append_pair("scope", SPOTIFY_SCOPE)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("show_dialog", "true");
        url.into()
    }

    /// Exchanges an authorization code for an access and refresh token.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Rejected`] if the token endpoint answers anything but 200
    /// - [`AuthError::MissingAccessToken`] if the response has no `access_token`
    /// - [`AuthError::Request`] / [`AuthError::Decode`] for transport and JSON
    ///   problems
    ///
    /// Nothing is retried. The caller stores the result in the session.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenPair, AuthError> {
        let response = self
            .request_token(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .await?;

        into_token_pair(response)
    }

    /// Obtains a fresh access token with a refresh token.
    ///
    /// Spotify usually omits `refresh_token` from a refresh response; the
    /// returned pair then carries `None` and the stored refresh token must be
    /// kept as is.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let response = self
            .request_token(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .await?;

        into_token_pair(response)
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenResponse, AuthError> {
        let response = self
            .http
            .post(&self.endpoints.token_url)
            .header(AUTHORIZATION, basic_auth_header(&self.credentials))
            .form(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Token endpoint answered {}", status);

        if status != StatusCode::OK {
            return Err(AuthError::Rejected { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn into_token_pair(response: TokenResponse) -> Result<TokenPair, AuthError> {
    let access_token = response
        .access_token
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingAccessToken)?;

    Ok(TokenPair {
        access_token,
        refresh_token: response.refresh_token.filter(|token| !token.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_header_encodes_id_and_secret() {
        let credentials = Credentials::new("client", "secret").unwrap();
        // base64("client:secret")
        assert_eq!(basic_auth_header(&credentials), "Basic Y2xpZW50OnNlY3JldA==");
    }

    #[test]
    fn token_pair_requires_an_access_token() {
        let missing = TokenResponse {
            refresh_token: Some("RT".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            into_token_pair(missing),
            Err(AuthError::MissingAccessToken)
        ));

        let empty = TokenResponse {
            access_token: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            into_token_pair(empty),
            Err(AuthError::MissingAccessToken)
        ));
    }

    #[test]
    fn token_pair_keeps_absent_refresh_token_absent() {
        let response = TokenResponse {
            access_token: Some("AT".to_string()),
            ..Default::default()
        };
        assert_eq!(
            into_token_pair(response).unwrap(),
            TokenPair {
                access_token: "AT".to_string(),
                refresh_token: None,
            }
        );
    }
}
