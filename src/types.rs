use serde::{Deserialize, Deserializer, Serialize};

/// Raw body of a token endpoint response.
///
/// Every field is optional: a refresh response usually omits `refresh_token`,
/// and a rejected exchange may omit `access_token` altogether.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

/// Tokens produced by an authorization-code or refresh exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// Per-browser session state, carried in the signed session cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Track ids of the last recommendations page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_recommendations: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Followers {
    pub total: u64,
}

fn first_image(images: &Option<Vec<Image>>) -> Option<&str> {
    images
        .as_ref()
        .and_then(|images| images.first())
        .map(|image| image.url.as_str())
}

/// Response of `GET /me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub product: Option<String>,
    pub followers: Option<Followers>,
    pub images: Option<Vec<Image>>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

impl UserProfile {
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }

    pub fn image_url(&self) -> Option<&str> {
        first_image(&self.images)
    }

    pub fn follower_count(&self) -> u64 {
        self.followers.as_ref().map_or(0, |f| f.total)
    }
}

/// A page of items as returned by the paging endpoints of the Web API.
///
/// Spotify sometimes sends `null` entries (e.g. playlists that are no longer
/// available); those are dropped while decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Paging<T> {
    #[serde(default, deserialize_with = "skip_null_items")]
    pub items: Vec<T>,
    pub total: Option<u64>,
    pub next: Option<String>,
}

fn skip_null_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items = Option::<Vec<Option<T>>>::deserialize(deserializer)?;
    Ok(items.unwrap_or_default().into_iter().flatten().collect())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksRef {
    pub total: u64,
}

/// Entry of `GET /me/playlists`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub public: Option<bool>,
    pub owner: Option<PlaylistOwner>,
    pub tracks: Option<PlaylistTracksRef>,
    pub images: Option<Vec<Image>>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

impl PlaylistSummary {
    pub fn image_url(&self) -> Option<&str> {
        first_image(&self.images)
    }

    pub fn track_count(&self) -> u64 {
        self.tracks.as_ref().map_or(0, |t| t.total)
    }

    pub fn owner_name(&self) -> &str {
        match &self.owner {
            Some(owner) => owner.display_name.as_deref().unwrap_or(&owner.id),
            None => "",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumRef {
    pub id: String,
    pub name: String,
    pub release_date: Option<String>,
    pub images: Option<Vec<Image>>,
}

/// Full track object, as returned by `GET /tracks/{id}`, top tracks and
/// recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub duration_ms: u64,
    pub popularity: Option<u32>,
    pub preview_url: Option<String>,
    pub album: Option<AlbumRef>,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

impl Track {
    pub fn image_url(&self) -> Option<&str> {
        self.album.as_ref().and_then(|album| first_image(&album.images))
    }

    /// Track length as `m:ss`.
    pub fn duration(&self) -> String {
        let secs = self.duration_ms / 1000;
        format!("{}:{:02}", secs / 60, secs % 60)
    }

    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Response of `GET /artists/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    pub popularity: Option<u32>,
    pub followers: Option<Followers>,
    pub images: Option<Vec<Image>>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

impl Artist {
    pub fn image_url(&self) -> Option<&str> {
        first_image(&self.images)
    }

    pub fn follower_count(&self) -> u64 {
        self.followers.as_ref().map_or(0, |f| f.total)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationSeed {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Response of `GET /recommendations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(default)]
    pub seeds: Vec<RecommendationSeed>,
    pub tracks: Vec<Track>,
}

impl Recommendations {
    pub fn track_ids(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.id.clone()).collect()
    }
}

/// How recommendations are seeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendationSeeds {
    /// Seed from a single track, usually the user's top track.
    Track(String),
    /// Seed from genres, limited to a market (ISO country code).
    Genres { genres: String, market: String },
}
