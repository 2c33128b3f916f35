//! Error types for the Vasari publishing toolkit.
//!
//! This crate provides the foundation error types used throughout the Vasari workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use vasari_error::{ConfigError, VasariResult};
//!
//! fn load_token() -> VasariResult<String> {
//!     Err(ConfigError::new("INSTAGRAM_ACCESS_TOKEN not set"))?
//! }
//!
//! match load_token() {
//!     Ok(token) => println!("Got {} bytes of token", token.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod ledger;
mod publish;

pub use config::ConfigError;
pub use error::{VasariError, VasariErrorKind, VasariResult};
pub use ledger::{LedgerError, LedgerErrorKind, LedgerResult};
pub use publish::{PublishError, PublishErrorKind, PublishResult};
