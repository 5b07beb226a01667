//! Raw provider records as tagged unions over the known platform shapes.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::instagram::{self, InstagramComment, InstagramPost, LiveComment};
use crate::linkedin::{self, LinkedInComment, LinkedInPost};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    LinkedIn,
    Instagram,
}

impl Platform {
    /// Registrable domain every post URL for this platform must end with.
    pub fn domain(self) -> &'static str {
        match self {
            Platform::LinkedIn => linkedin::DOMAIN,
            Platform::Instagram => instagram::DOMAIN,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::LinkedIn => "linkedin",
            Platform::Instagram => "instagram",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown platform `{0}` (expected `linkedin` or `instagram`)")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linkedin" => Ok(Platform::LinkedIn),
            "instagram" => Ok(Platform::Instagram),
            _ => Err(UnknownPlatform(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawPost {
    LinkedIn(LinkedInPost),
    Instagram(InstagramPost),
}

impl RawPost {
    pub fn from_value(platform: Platform, raw: &Value) -> Self {
        match platform {
            Platform::LinkedIn => RawPost::LinkedIn(LinkedInPost::from_value(raw)),
            Platform::Instagram => RawPost::Instagram(InstagramPost::from_value(raw)),
        }
    }

    pub fn platform(&self) -> Platform {
        match self {
            RawPost::LinkedIn(_) => Platform::LinkedIn,
            RawPost::Instagram(_) => Platform::Instagram,
        }
    }
}

/// Which raw comment shape a list of provider rows carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentFormat {
    LinkedIn,
    /// Batch scrape rows.
    Instagram,
    /// Session-fetched comments with reply back-references.
    InstagramLive,
}

impl CommentFormat {
    /// Raw key whose absence marks a placeholder row.
    pub fn identity_field(self) -> &'static str {
        match self {
            CommentFormat::LinkedIn => "comment_id",
            CommentFormat::Instagram => "comment_id",
            CommentFormat::InstagramLive => "pk",
        }
    }
}

impl From<Platform> for CommentFormat {
    fn from(platform: Platform) -> Self {
        match platform {
            Platform::LinkedIn => CommentFormat::LinkedIn,
            Platform::Instagram => CommentFormat::Instagram,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawComment {
    LinkedIn(LinkedInComment),
    Instagram(InstagramComment),
    InstagramLive(LiveComment),
}

impl RawComment {
    pub fn from_value(format: CommentFormat, raw: &Value) -> Self {
        match format {
            CommentFormat::LinkedIn => RawComment::LinkedIn(LinkedInComment::from_value(raw)),
            CommentFormat::Instagram => RawComment::Instagram(InstagramComment::from_value(raw)),
            CommentFormat::InstagramLive => RawComment::InstagramLive(LiveComment::from_value(raw)),
        }
    }

    pub fn format(&self) -> CommentFormat {
        match self {
            RawComment::LinkedIn(_) => CommentFormat::LinkedIn,
            RawComment::Instagram(_) => CommentFormat::Instagram,
            RawComment::InstagramLive(_) => CommentFormat::InstagramLive,
        }
    }

    /// The row's identifying value. `None` marks a sentinel row (provider
    /// summaries and the like) that must be dropped before normalization.
    pub fn identity(&self) -> Option<&str> {
        match self {
            RawComment::LinkedIn(c) => c.comment_id.as_deref(),
            RawComment::Instagram(c) => c.identity(),
            RawComment::InstagramLive(c) => c.pk.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn platform_parses_case_insensitively() {
        assert_eq!("LinkedIn".parse::<Platform>().unwrap(), Platform::LinkedIn);
        assert_eq!(" instagram ".parse::<Platform>().unwrap(), Platform::Instagram);
        let err = "tiktok".parse::<Platform>().unwrap_err();
        assert_eq!(err, UnknownPlatform("tiktok".into()));
        assert_eq!(Platform::Instagram.to_string(), "instagram");
    }

    #[test]
    fn raw_comment_identity_per_format() {
        let row = json!({ "comment_id": "c9", "pk": 4, "user_commenting": "u" });
        assert_eq!(RawComment::from_value(CommentFormat::LinkedIn, &row).identity(), Some("c9"));
        assert_eq!(RawComment::from_value(CommentFormat::Instagram, &row).identity(), Some("c9"));
        assert_eq!(RawComment::from_value(CommentFormat::InstagramLive, &row).identity(), Some("4"));

        let summary = json!({ "total": 3 });
        assert_eq!(RawComment::from_value(CommentFormat::LinkedIn, &summary).identity(), None);
    }

    #[test]
    fn raw_post_remembers_its_platform() {
        let raw = RawPost::from_value(Platform::Instagram, &json!({}));
        assert_eq!(raw.platform(), Platform::Instagram);
        assert_eq!(CommentFormat::from(raw.platform()), CommentFormat::Instagram);
    }
}
