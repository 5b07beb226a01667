use serde::Deserialize;
use serde_json::Value;

use crate::extract::Fields;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct LinkedInPost {
    pub urn: Option<String>,
    pub kind: Option<String>,
    pub author: LinkedInPostAuthor,
    /// `postedAtTimestamp`, epoch milliseconds.
    pub posted_at_ms: Option<i64>,
    pub images: Vec<String>,
    pub num_likes: u64,
    pub num_comments: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkedInPostAuthor {
    pub first_name: String,
    pub last_name: String,
    pub occupation: String,
    pub public_id: String,
}

impl LinkedInPost {
    pub fn from_value(raw: &Value) -> Self {
        let f = Fields::new(raw);
        let author = f.object("author");
        Self {
            urn: f.id("urn"),
            kind: f.string("type"),
            author: LinkedInPostAuthor {
                first_name: author.string_or("firstName", ""),
                last_name: author.string_or("lastName", ""),
                occupation: author.string_or("occupation", ""),
                public_id: author.string_or("publicId", ""),
            },
            posted_at_ms: f.integer("postedAtTimestamp"),
            images: f
                .list("images")
                .iter()
                .filter_map(|img| match img {
                    Value::String(s) => Some(s.clone()),
                    Value::Object(_) => Fields::new(img).string("url"),
                    _ => None,
                })
                .collect(),
            num_likes: f.count("numLikes"),
            num_comments: f.count("numComments"),
        }
    }
}

impl From<Value> for LinkedInPost {
    fn from(raw: Value) -> Self {
        Self::from_value(&raw)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct LinkedInComment {
    pub comment_id: Option<String>,
    pub author: LinkedInCommentAuthor,
    pub comment_url: Option<String>,
    pub text: Option<String>,
    /// `stats.total_reactions`
    pub total_reactions: u64,
    /// `posted_at.timestamp`, epoch milliseconds.
    pub posted_at_ms: Option<i64>,
    pub replies: Vec<LinkedInReply>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkedInCommentAuthor {
    pub name: Option<String>,
    pub headline: String,
    pub profile_url: String,
}

/// Only the author name and body of a nested reply survive decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkedInReply {
    pub author_name: String,
    pub text: String,
}

impl LinkedInComment {
    pub fn from_value(raw: &Value) -> Self {
        let f = Fields::new(raw);
        let author = f.object("author");
        Self {
            comment_id: f.id("comment_id"),
            author: LinkedInCommentAuthor {
                name: author.string("name"),
                headline: author.string_or("headline", ""),
                profile_url: author.string_or("profile_url", ""),
            },
            comment_url: f.string("comment_url").filter(|u| !u.is_empty()),
            text: f.string("text"),
            total_reactions: f.count("stats.total_reactions"),
            posted_at_ms: f.integer("posted_at.timestamp"),
            replies: f
                .list("replies")
                .iter()
                .map(|reply| {
                    let r = Fields::new(reply);
                    LinkedInReply {
                        author_name: r.string_or("author.name", ""),
                        text: r.string_or("text", ""),
                    }
                })
                .collect(),
        }
    }
}

impl From<Value> for LinkedInComment {
    fn from(raw: Value) -> Self {
        Self::from_value(&raw)
    }
}
