use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Router, extract::FromRef, routing::get};
use axum_extra::extract::cookie::Key;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::{
    Res, api,
    config::{ConfigError, MIN_SESSION_SECRET_LEN, Settings},
    info,
    spotify::SpotifyClient,
    warning,
};

/// State shared by all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub spotify: Arc<SpotifyClient>,
    key: Key,
}

impl AppState {
    pub fn new(settings: Settings) -> Res<Self> {
        let key = session_key(&settings)?;
        let spotify = SpotifyClient::new(&settings)?;

        Ok(Self {
            settings: Arc::new(settings),
            spotify: Arc::new(spotify),
            key,
        })
    }
}

// The signed cookie jar pulls its key out of the state.
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

/// Key used to sign the session cookie.
///
/// Derived from `SESSION_SECRET` when configured, so sessions survive a
/// restart. Otherwise a random key is generated for this process only.
pub fn session_key(settings: &Settings) -> Result<Key, ConfigError> {
    match &settings.session_secret {
        Some(secret) if secret.len() < MIN_SESSION_SECRET_LEN => {
            Err(ConfigError::SessionSecretTooShort)
        }
        Some(secret) => Ok(Key::derive_from(secret.as_bytes())),
        None => {
            warning!("SESSION_SECRET is not set, sessions will not survive a restart");
            Ok(Key::generate())
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let images = ServeDir::new(&state.settings.images_dir);

    Router::new()
        .route("/", get(api::landing))
        .route("/home", get(api::home))
        .route("/login", get(api::login))
        .route("/signup", get(api::signup))
        .route("/logout", get(api::logout))
        .route("/callback", get(api::callback))
        .route("/profile", get(api::profile))
        .route("/playlists", get(api::playlists))
        .route(
            "/recommendations",
            get(api::recommendations).post(api::recommendations),
        )
        .route("/tracks/{id}", get(api::track))
        .route("/artists/{id}", get(api::artist))
        .route("/health", get(api::health))
        .nest_service("/images", images)
        .with_state(state)
}

/// A bound, not yet running HTTP server.
pub struct Server {
    listener: TcpListener,
    app: Router,
}

impl Server {
    /// Parses the listen address, builds the state and binds the socket.
    pub async fn bind(settings: Settings) -> Res<Self> {
        let addr = SocketAddr::from_str(&settings.server_addr)?;
        let state = AppState::new(settings)?;
        let listener = TcpListener::bind(&addr).await?;

        Ok(Self {
            listener,
            app: router(state),
        })
    }

    pub fn local_addr(&self) -> Res<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves requests until the process is stopped.
    pub async fn run(self) -> Res<()> {
        info!("Listening on http://{}", self.local_addr()?);
        axum::serve(self.listener, self.app).await?;
        Ok(())
    }
}

/// Binds the configured address and serves until the process is stopped.
pub async fn start_api_server(settings: Settings) -> Res<()> {
    Server::bind(settings).await?.run().await
}
