//! Instagram payloads.
//!
//! Two comment representations exist: the flat rows produced by the batch
//! scrape actor ([`InstagramComment`]) and the session-fetched live comments
//! ([`LiveComment`]) that carry a `replied_to_comment_id` back-reference and
//! feed the thread builder.
pub mod normalize;
pub mod types;

pub use normalize::{normalize_comment, normalize_live_comment, normalize_post};
pub use types::{InstagramComment, InstagramPost, LiveComment};

pub const DOMAIN: &str = "instagram.com";
pub const PROFILE_BASE: &str = "https://www.instagram.com/";
pub const DEFAULT_POST_TYPE: &str = "post";

pub(crate) fn profile_url(username: &str) -> String {
    format!("{PROFILE_BASE}{username}/")
}
