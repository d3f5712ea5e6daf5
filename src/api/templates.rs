use askama::Template;

use crate::types::{Artist, Paging, PlaylistSummary, Recommendations, Track, UserProfile};

#[derive(Template)]
#[template(path = "landingpage.html")]
pub struct LandingPage;

#[derive(Template)]
#[template(path = "homepage.html")]
pub struct HomePage;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage<'a> {
    pub auth_url: &'a str,
    pub signup_url: &'a str,
}

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfilePage<'a> {
    pub user: &'a UserProfile,
}

#[derive(Template)]
#[template(path = "playlists.html")]
pub struct PlaylistsPage<'a> {
    pub playlists: &'a Paging<PlaylistSummary>,
}

#[derive(Template)]
#[template(path = "recommendations.html")]
pub struct RecommendationsPage<'a> {
    pub recommendations: &'a Recommendations,
}

#[derive(Template)]
#[template(path = "track.html")]
pub struct TrackPage<'a> {
    pub track: &'a Track,
}

#[derive(Template)]
#[template(path = "artist.html")]
pub struct ArtistPage<'a> {
    pub artist: &'a Artist,
}
