//! Spotify Web Front-End Library
//!
//! This library provides a small web application on top of the Spotify Web API.
//! Users log in through the OAuth 2.0 authorization-code flow and can then browse
//! their profile, playlists, recommendations and single tracks or artists. The
//! access token lives in a signed session cookie and is validated (and refreshed
//! when the provider rejects it) before every protected request.
//!
//! # Modules
//!
//! - `api` - HTTP route handlers rendering the HTML pages
//! - `config` - Configuration management and environment variables
//! - `error` - Error types shared by the client and the handlers
//! - `management` - Session storage and the token lifecycle
//! - `server` - Router construction and the HTTP listener
//! - `spotify` - Spotify Web API and token endpoint client
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use spotiweb::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> spotiweb::Res<()> {
//!     config::load_env().await?;
//!     let settings = config::Settings::from_env()?;
//!     server::start_api_server(settings).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;

/// A convenient Result type alias for operations that may fail.
///
/// Used for startup plumbing where any error is fatal anyway: loading the
/// environment, building the router and binding the listener. Request-level
/// code uses the typed errors from [`error`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on http://{}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for startup failures (missing credentials, unusable listen
/// address). Request handlers never call this; they answer with an error
/// response instead.
///
/// # Example
///
/// ```
/// error!("Cannot start server. Err: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems such as a failed token exchange or a
/// downstream API error that is reported back to the browser.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a dimmed debug line, but only when debug logging is enabled.
///
/// Debug logging is switched on with `LOG_LEVEL=debug` or `serve --verbose`,
/// see [`config::set_verbose`].
#[macro_export]
macro_rules! debug {
  ($($arg:tt)*) => ({
    if $crate::config::verbose() {
      use colored::Colorize;
      println!("[{}] {}", ".".dimmed(), std::format_args!($($arg)*));
    }
  })
}
