//! LinkedIn payloads: share/article posts and comment rows with inline replies.
//!
//! `types` holds the lenient raw shapes as delivered by scraping actors;
//! `normalize` maps them onto the canonical [`crate::model`] records.
pub mod normalize;
pub mod types;

pub use normalize::{normalize_comment, normalize_post};
pub use types::{LinkedInComment, LinkedInPost};

pub const DOMAIN: &str = "linkedin.com";
pub const PROFILE_BASE: &str = "https://www.linkedin.com/in/";
pub const DEFAULT_POST_TYPE: &str = "unknown";
