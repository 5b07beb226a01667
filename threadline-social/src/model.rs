//! Canonical records every platform converges to.
//!
//! Defaults are uniform across platforms: descriptive text (author names,
//! headlines, profile URLs, content type) defaults to the empty string, while
//! identity and content fields that may legitimately be unknown (`id`,
//! `user`, `comment_link`, `text`, `display_url`, `replied_to_id`) are
//! `Option`s and serialize as `null`.
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

fn email_re() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+").expect("valid email regex")
    })
}

/// First e-mail address appearing in `text`, if any.
///
/// ```
/// use threadline_social::model::extract_email;
///
/// assert_eq!(
///     extract_email("Interested! reach me at jane.doe+jobs@example.co.uk").as_deref(),
///     Some("jane.doe+jobs@example.co.uk")
/// );
/// assert_eq!(extract_email("no contact here"), None);
/// ```
pub fn extract_email(text: &str) -> Option<String> {
    email_re().find(text).map(|m| m.as_str().to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub author: String,
    pub author_headline: String,
    pub author_profile_url: String,
    pub created_at: DateTime<Utc>,
    pub display_url: Option<String>,
    pub likes: u64,
    pub comments_count: u64,
}

/// Inline reply carried by LinkedIn comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub name: String,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Option<String>,
    pub user: Option<String>,
    pub headline: String,
    pub profile_url: String,
    pub comment_link: Option<String>,
    pub text: Option<String>,
    pub likes: u64,
    pub created_at: DateTime<Utc>,
    /// Only set for live-fetched comments, which carry a reply back-reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replied_to_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_liked: Option<bool>,
    pub replies_count: u64,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

impl Comment {
    /// First e-mail address in the comment body.
    pub fn email(&self) -> Option<String> {
        self.text.as_deref().and_then(extract_email)
    }
}

/// A comment together with the comments that replied to it.
///
/// Serializes as `{"comment": {...}, "replies": [...]}`; the comment's own
/// fields are nested, not flattened, since [`Comment::replies`] already names
/// the inline reply list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadedComment {
    pub comment: Comment,
    pub replies: Vec<ThreadedComment>,
}

impl ThreadedComment {
    pub fn id(&self) -> Option<&str> {
        self.comment.id.as_deref()
    }

    /// Number of comments in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self.replies.iter().map(ThreadedComment::subtree_len).sum::<usize>()
    }
}
