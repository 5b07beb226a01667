//! Social post and comment normalization for Threadline.
//!
//! Raw provider payloads flow one way:
//!
//! ```text
//! raw JSON -> Fields -> {post | comment} normalizer -> ThreadBuilder -> ResultEnvelope
//! ```
//!
//! Everything from [`extract`] through [`assemble`] is pure and synchronous.
//! Network access lives behind the [`provider`] traits, implemented by
//! [`apify::ApifyClient`], and every provider call takes an explicit
//! [`ProviderSession`].
//!
//! ```
//! use serde_json::json;
//! use threadline_social::{build_thread, normalize_comments, CommentFormat};
//!
//! let rows = vec![
//!     json!({ "pk": 1, "username": "ana", "text": "first", "created_at_utc": "2024-05-01T10:00:00Z" }),
//!     json!({ "pk": 2, "username": "bo", "text": "reply", "created_at_utc": "2024-05-01T10:01:00Z",
//!             "replied_to_comment_id": 1 }),
//! ];
//! let batch = normalize_comments(CommentFormat::InstagramLive, &rows);
//! let forest = build_thread(batch.comments);
//! assert_eq!(forest.len(), 1);
//! assert_eq!(forest[0].replies[0].id(), Some("2"));
//! ```
pub mod apify;
pub mod assemble;
pub mod error;
pub mod extract;
pub mod instagram;
pub mod linkedin;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod provider;
pub mod raw;
pub mod thread;
pub mod timestamp;

pub use assemble::{assemble_result, CommentSet, ResultEnvelope};
pub use error::NormalizeError;
pub use model::{extract_email, Comment, Post, Reply, ThreadedComment};
pub use normalize::{normalize_comment, normalize_comments, normalize_post, CommentBatch};
pub use provider::{
    CommentSource, InsightSource, PostSource, PostUrl, ProviderError, ProviderSession,
};
pub use raw::{CommentFormat, Platform, RawComment, RawPost, UnknownPlatform};
pub use thread::{build_thread, ThreadBuilder};
