use serde::Deserialize;
use serde_json::Value;

use crate::extract::Fields;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct InstagramPost {
    pub post_id: Option<String>,
    pub product_type: Option<String>,
    pub user_posted: String,
    pub bio: String,
    /// ISO-8601, usually with a trailing `Z`.
    pub date_posted: Option<String>,
    pub thumbnail: Option<String>,
    pub likes: u64,
    pub num_comments: u64,
}

impl InstagramPost {
    pub fn from_value(raw: &Value) -> Self {
        let f = Fields::new(raw);
        Self {
            post_id: f.id("post_id"),
            product_type: f.string("product_type"),
            user_posted: f.string_or("user_posted", ""),
            bio: f.string_or("bio", ""),
            date_posted: f.string("date_posted"),
            thumbnail: f.string("thumbnail").filter(|t| !t.is_empty()),
            likes: f.count("likes"),
            num_comments: f.count("num_comments"),
        }
    }
}

impl From<Value> for InstagramPost {
    fn from(raw: Value) -> Self {
        Self::from_value(&raw)
    }
}

/// A row from the batch comment scrape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct InstagramComment {
    pub comment_id: Option<String>,
    pub user_commenting: Option<String>,
    pub comment: Option<String>,
    pub likes: u64,
    pub date_of_comment: Option<String>,
    pub num_replies: u64,
}

impl InstagramComment {
    pub fn from_value(raw: &Value) -> Self {
        let f = Fields::new(raw);
        Self {
            comment_id: f.id("comment_id"),
            user_commenting: f.string("user_commenting").filter(|u| !u.trim().is_empty()),
            comment: f.string("comment"),
            likes: f.count("likes"),
            date_of_comment: f.string("date_of_comment"),
            num_replies: f.count("num_replies"),
        }
    }

    /// Row identity used to filter placeholder rows. Older datasets carry no
    /// `comment_id`, so the commenter's handle stands in.
    pub fn identity(&self) -> Option<&str> {
        self.comment_id
            .as_deref()
            .or(self.user_commenting.as_deref())
    }
}

impl From<Value> for InstagramComment {
    fn from(raw: Value) -> Self {
        Self::from_value(&raw)
    }
}

/// A comment fetched through an authenticated session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct LiveComment {
    pub pk: Option<String>,
    pub username: Option<String>,
    pub text: Option<String>,
    pub created_at: Option<String>,
    pub like_count: u64,
    pub has_liked: Option<bool>,
    pub replied_to_comment_id: Option<String>,
}

impl LiveComment {
    pub fn from_value(raw: &Value) -> Self {
        let f = Fields::new(raw);
        Self {
            pk: f.id("pk"),
            username: f.string("user.username").or_else(|| f.string("username")),
            text: f.string("text"),
            created_at: f
                .string("created_at_utc")
                .or_else(|| f.string("created_at")),
            like_count: f.count("like_count"),
            has_liked: f.flag("has_liked"),
            replied_to_comment_id: f.id("replied_to_comment_id"),
        }
    }
}

impl From<Value> for LiveComment {
    fn from(raw: Value) -> Self {
        Self::from_value(&raw)
    }
}
