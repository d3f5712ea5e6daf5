#![allow(dead_code)]

use axum::{
    body::{Body, to_bytes},
    http::{HeaderMap, HeaderValue, Request, Response, header},
    response::IntoResponse,
};
use axum_extra::extract::{SignedCookieJar, cookie::Key};
use spotiweb::{
    config::{Credentials, Settings},
    management::SessionManager,
    server::{self, AppState},
    spotify::SpotifyClient,
    types::Session,
};
use tower::ServiceExt;
use wiremock::MockServer;

// base64("client:secret")
pub const BASIC_AUTH: &str = "Basic Y2xpZW50OnNlY3JldA==";

// Settings pointing every remote endpoint at the stub server
pub fn settings_for(server: &MockServer) -> Settings {
    let mut settings = Settings::new(Credentials::new("client", "secret").unwrap());
    settings.endpoints.api_url = format!("{}/v1", server.uri());
    settings.endpoints.token_url = format!("{}/api/token", server.uri());
    settings.session_secret = Some("a-test-session-secret-that-is-long-enough".to_string());
    settings.images_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/images").into();
    settings
}

// Nothing listens on port 1, so every call fails to connect.
pub fn unreachable_settings(server: &MockServer) -> Settings {
    let mut settings = settings_for(server);
    settings.endpoints.api_url = "http://127.0.0.1:1/v1".to_string();
    settings
}

pub fn client_for(server: &MockServer) -> SpotifyClient {
    SpotifyClient::new(&settings_for(server)).unwrap()
}

pub fn session_with(token: Option<&str>, refresh_token: Option<&str>) -> SessionManager {
    SessionManager::new(
        Session {
            token: token.map(str::to_string),
            refresh_token: refresh_token.map(str::to_string),
            ..Default::default()
        },
        false,
    )
}

pub struct TestApp {
    pub state: AppState,
    pub key: Key,
}

impl TestApp {
    pub fn new(server: &MockServer) -> Self {
        Self::with_settings(settings_for(server))
    }

    pub fn with_settings(settings: Settings) -> Self {
        let key = server::session_key(&settings).unwrap();
        let state = AppState::new(settings).unwrap();
        Self { state, key }
    }

    /// `Cookie` header value carrying `session`, signed like the server does.
    pub fn cookie_for(&self, session: Session) -> String {
        let jar = SessionManager::new(session, false).persist(SignedCookieJar::new(self.key.clone()));
        let response = (jar, "").into_response();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        server::router(self.state.clone())
            .oneshot(request)
            .await
            .unwrap()
    }

    /// Session stored by the response's `Set-Cookie` header, if any.
    pub fn session_from(&self, response: &Response<Body>) -> Option<Session> {
        let set_cookie = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
        let pair = set_cookie.split(';').next()?;

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(pair).ok()?);
        let jar = SignedCookieJar::from_headers(&headers, self.key.clone());
        jar.get(spotiweb::management::SESSION_COOKIE_NAME)?;

        Some(SessionManager::from_jar(&jar, false).session().clone())
    }
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn set_cookie(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}
