use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failure of a token endpoint exchange (authorization code or refresh).
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("token endpoint answered {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("token response did not contain an access_token")]
    MissingAccessToken,

    #[error("token response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure of a Web API call made on behalf of a route handler.
///
/// Converts into a plain-text response: provider errors are passed through
/// with the provider's status code and body, nothing is retried or
/// translated.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{context}: {body}")]
    Upstream {
        context: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Error decoding JSON: {source}, Response content: {body}")]
    Decode {
        source: serde_json::Error,
        body: String,
    },

    #[error("Request to Spotify failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to render page: {0}")]
    Render(#[from] askama::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Upstream { status, .. } => *status,
            ApiError::Decode { .. } | ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Request(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Request(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        crate::warning!("{} ({})", self, status);
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}
