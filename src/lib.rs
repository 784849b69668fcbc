//! Spotify Cloud Server Library
//!
//! This library provides a thin HTTP façade over the Spotify Web API. It
//! exchanges a long-lived refresh token for short-lived access tokens and
//! forwards playback commands (play, pause, resume, skip, volume) as well as
//! search and device queries to Spotify, translating each remote answer into a
//! JSON response.
//!
//! # Modules
//!
//! - `api` - HTTP handlers, one per playback command
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration loading and validation
//! - `error` - Typed error kinds for every layer
//! - `management` - In-memory access token cache
//! - `server` - Router construction and the HTTP server loop
//! - `spotify` - Spotify Web API client and token provider
//! - `state` - Shared handler state
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use spotcloud::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> spotcloud::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     server::start_api_server(config).await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod state;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the process boundary (startup, CLI commands) where errors of
/// different kinds are reported the same way.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Access token obtained");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal errors: the process terminates with exit code 1 right
/// after the message is printed.
///
/// # Example
///
/// ```
/// error!("Invalid configuration: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("No devices available");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
