//! Common types and utilities shared across Threadline crates.
//!
//! This crate holds the observability bootstrap and the workspace-level error
//! type. It stays dependency-light so every other crate can pull it in.
//!
//! # Overview
//!
//! - [`observability`]: centralised tracing/logging initialisation
//! - [`ThreadlineError`] and [`Result`]: errors surfaced to binaries
//! - [`LogFormat`]: log encoding shared with the config layer
//!
//! # Examples
//!
//! ```rust
//! use threadline_common::{LogFormat, ThreadlineError};
//!
//! let err = ThreadlineError::Config("apify.token is not set".into());
//! assert_eq!(err.to_string(), "Configuration error: apify.token is not set");
//! assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
//! ```

pub mod observability;

pub use observability::LogFormat;

/// Error types surfaced to Threadline binaries.
#[derive(thiserror::Error, Debug)]
pub enum ThreadlineError {
    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An upstream scraping provider failed (network, auth, actor run).
    #[error("Provider error: {0}")]
    Provider(#[from] anyhow::Error),

    /// A provider call exceeded its configured timeout.
    #[error("Timeout occurred")]
    Timeout,
}

/// Convenient alias for results that use [`ThreadlineError`].
pub type Result<T> = std::result::Result<T, ThreadlineError>;
