use reqwest::StatusCode;

use super::SpotifyClient;
use crate::{
    error::ApiError,
    types::{Paging, PlaylistSummary, Track, UserProfile},
};

/// Number of playlists shown on the playlists page.
pub const PLAYLIST_LIMIT: u32 = 20;

impl SpotifyClient {
    /// Cheap "who am I" call used to check whether `token` is still accepted.
    ///
    /// Returns the status code of `GET /me`; the body is discarded.
    pub async fn probe(&self, token: &str) -> Result<StatusCode, reqwest::Error> {
        let response = self.authorized_get(token, "/me").send().await?;
        Ok(response.status())
    }

    /// Fetches the profile of the current user (`GET /me`).
    pub async fn current_user(&self, token: &str) -> Result<UserProfile, ApiError> {
        self.get_json(token, "/me", &[], "Failed to retrieve user info")
            .await
    }

    /// Fetches the first page of the current user's playlists.
    pub async fn playlists(&self, token: &str) -> Result<Paging<PlaylistSummary>, ApiError> {
        self.get_json(
            token,
            "/me/playlists",
            &[("limit", PLAYLIST_LIMIT.to_string())],
            "Failed to retrieve playlists",
        )
        .await
    }

    /// Fetches the current user's top tracks.
    pub async fn top_tracks(&self, token: &str) -> Result<Paging<Track>, ApiError> {
        self.get_json(token, "/me/top/tracks", &[], "Failed to retrieve top tracks")
            .await
    }
}
