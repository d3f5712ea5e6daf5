mod auth;
mod session;

pub use auth::TokenManager;
pub use session::SESSION_COOKIE_NAME;
pub use session::SessionError;
pub use session::SessionManager;
