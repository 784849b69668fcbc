//! # CLI Module
//!
//! Command implementations behind the `spotcloud` binary:
//!
//! - [`serve`] - runs the HTTP server
//! - [`devices`] - prints the Spotify devices as a table
//! - [`token`] - checks the credentials with one token exchange
//!
//! Commands print through the crate's `info!`/`success!`/`warning!`/`error!`
//! macros; fatal failures exit the process with status 1.

mod auth;
mod devices;
mod serve;

pub use auth::token;
pub use devices::devices;
pub use serve::serve;
