use super::SpotifyClient;
use crate::{
    error::ApiError,
    types::{Artist, RecommendationSeeds, Recommendations, Track},
};

/// Number of recommended tracks requested.
pub const RECOMMENDATION_LIMIT: u32 = 10;

/// Genres used when the user has no top tracks to seed from.
pub const FALLBACK_GENRES: &str = "pop,rock";

/// Market used for genre-seeded recommendations when none is given.
pub const DEFAULT_MARKET: &str = "ET";

/// Returns whether `id` looks like a Spotify base-62 id.
///
/// Ids end up in the request path, so anything else is rejected before a
/// request is made.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.len() <= 64 && id.chars().all(|c| c.is_ascii_alphanumeric())
}

impl SpotifyClient {
    /// Fetches a single track (`GET /tracks/{id}`).
    pub async fn track(&self, token: &str, id: &str) -> Result<Track, ApiError> {
        self.get_json(token, &format!("/tracks/{id}"), &[], "Error retrieving track")
            .await
    }

    /// Fetches a single artist (`GET /artists/{id}`).
    pub async fn artist(&self, token: &str, id: &str) -> Result<Artist, ApiError> {
        self.get_json(token, &format!("/artists/{id}"), &[], "Error retrieving artist")
            .await
    }

    /// Fetches recommendations for the given seeds (`GET /recommendations`).
    pub async fn recommendations(
        &self,
        token: &str,
        seeds: &RecommendationSeeds,
    ) -> Result<Recommendations, ApiError> {
        let mut query = vec![("limit", RECOMMENDATION_LIMIT.to_string())];
        match seeds {
            RecommendationSeeds::Track(id) => query.push(("seed_tracks", id.clone())),
            RecommendationSeeds::Genres { genres, market } => {
                query.push(("seed_genres", genres.clone()));
                query.push(("market", market.clone()));
            }
        }

        self.get_json(
            token,
            "/recommendations",
            &query,
            "Failed to retrieve recommendations",
        )
        .await
    }
}

/// Picks the recommendation seeds: the first top track if there is one,
/// otherwise the fallback genres limited to `market`.
///
/// A blank `market` falls back to [`DEFAULT_MARKET`].
pub fn choose_seeds(top_tracks: &[Track], market: Option<&str>) -> RecommendationSeeds {
    match top_tracks.first() {
        Some(track) => RecommendationSeeds::Track(track.id.clone()),
        None => RecommendationSeeds::Genres {
            genres: FALLBACK_GENRES.to_string(),
            market: market
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_MARKET)
                .to_string(),
        },
    }
}
