use crate::error::NormalizeError;
use crate::instagram::types::{InstagramComment, InstagramPost, LiveComment};
use crate::instagram::{profile_url, DEFAULT_POST_TYPE};
use crate::model::{Comment, Post};
use crate::timestamp;

/// Map an Instagram media payload onto the canonical [`Post`].
///
/// `date_posted` is required: a missing or unparsable value fails the post.
pub fn normalize_post(raw: &InstagramPost) -> Result<Post, NormalizeError> {
    Ok(Post {
        post_id: raw.post_id.clone().unwrap_or_default(),
        kind: raw
            .product_type
            .clone()
            .unwrap_or_else(|| DEFAULT_POST_TYPE.to_string()),
        author: raw.user_posted.clone(),
        author_headline: raw.bio.clone(),
        author_profile_url: profile_url(&raw.user_posted),
        created_at: timestamp::parse_iso8601("date_posted", raw.date_posted.as_deref())?,
        display_url: raw.thumbnail.clone(),
        likes: raw.likes,
        comments_count: raw.num_comments,
    })
}

/// Map a batch-scrape comment row onto the canonical [`Comment`].
///
/// Reply bodies are never available on this path, so `replies` is empty and
/// `replies_count` comes from the explicit `num_replies` field.
pub fn normalize_comment(raw: &InstagramComment) -> Result<Comment, NormalizeError> {
    let created_at = timestamp::parse_iso8601("date_of_comment", raw.date_of_comment.as_deref())?;
    Ok(Comment {
        id: raw.comment_id.clone(),
        profile_url: profile_url(raw.user_commenting.as_deref().unwrap_or_default()),
        user: raw.user_commenting.clone(),
        headline: String::new(),
        comment_link: None,
        text: raw.comment.clone(),
        likes: raw.likes,
        created_at,
        replied_to_id: None,
        has_liked: None,
        replies_count: raw.num_replies,
        replies: Vec::new(),
    })
}

/// Map a session-fetched comment onto the canonical [`Comment`], keeping
/// the reply back-reference for threading.
pub fn normalize_live_comment(raw: &LiveComment) -> Result<Comment, NormalizeError> {
    let Some(pk) = raw.pk.clone() else {
        return Err(NormalizeError::MissingIdentifier { field: "pk" });
    };
    Ok(Comment {
        id: Some(pk),
        profile_url: profile_url(raw.username.as_deref().unwrap_or_default()),
        user: raw.username.clone(),
        headline: String::new(),
        comment_link: None,
        text: raw.text.clone(),
        likes: raw.like_count,
        created_at: timestamp::parse_iso8601("created_at_utc", raw.created_at.as_deref())?,
        replied_to_id: raw.replied_to_comment_id.clone(),
        has_liked: raw.has_liked,
        replies_count: 0,
        replies: Vec::new(),
    })
}
