use crate::error::NormalizeError;
use crate::linkedin::types::{LinkedInComment, LinkedInPost};
use crate::linkedin::{DEFAULT_POST_TYPE, PROFILE_BASE};
use crate::model::{Comment, Post, Reply};
use crate::timestamp;

/// Map a LinkedIn share/article payload onto the canonical [`Post`].
///
/// The profile URL is always `PROFILE_BASE + publicId`. With no public id this
/// yields `https://www.linkedin.com/in/`, which downstream consumers rely on.
pub fn normalize_post(raw: &LinkedInPost) -> Result<Post, NormalizeError> {
    let author = &raw.author;
    Ok(Post {
        post_id: raw.urn.clone().unwrap_or_default(),
        kind: raw
            .kind
            .clone()
            .unwrap_or_else(|| DEFAULT_POST_TYPE.to_string()),
        author: format!("{} {}", author.first_name, author.last_name)
            .trim()
            .to_string(),
        author_headline: author.occupation.clone(),
        author_profile_url: format!("{PROFILE_BASE}{}", author.public_id),
        created_at: timestamp::from_epoch_millis("postedAtTimestamp", raw.posted_at_ms)?,
        display_url: raw.images.first().cloned(),
        likes: raw.num_likes,
        comments_count: raw.num_comments,
    })
}

/// Map a LinkedIn comment row onto the canonical [`Comment`].
///
/// `replies_count` is the number of raw replies, which always matches the
/// number of [`Reply`] entries produced.
pub fn normalize_comment(raw: &LinkedInComment) -> Result<Comment, NormalizeError> {
    let replies: Vec<Reply> = raw
        .replies
        .iter()
        .map(|r| Reply {
            name: r.author_name.clone(),
            comment: r.text.clone(),
        })
        .collect();

    Ok(Comment {
        id: raw.comment_id.clone(),
        user: raw.author.name.clone(),
        headline: raw.author.headline.clone(),
        profile_url: raw.author.profile_url.clone(),
        comment_link: raw.comment_url.clone(),
        text: raw.text.clone(),
        likes: raw.total_reactions,
        created_at: timestamp::from_epoch_millis("posted_at.timestamp", raw.posted_at_ms)?,
        replied_to_id: None,
        has_liked: None,
        replies_count: replies.len() as u64,
        replies,
    })
}
