//! Platform dispatch for the post and comment normalizers.
use serde_json::Value;
use tracing::debug;

use crate::error::NormalizeError;
use crate::model::{Comment, Post};
use crate::raw::{CommentFormat, RawComment, RawPost};
use crate::{instagram, linkedin};

/// Normalize one raw post. Pure: the same input always yields the same output.
pub fn normalize_post(raw: &RawPost) -> Result<Post, NormalizeError> {
    match raw {
        RawPost::LinkedIn(p) => linkedin::normalize_post(p),
        RawPost::Instagram(p) => instagram::normalize_post(p),
    }
}

/// Normalize one raw comment without any placeholder filtering.
pub fn normalize_comment(raw: &RawComment) -> Result<Comment, NormalizeError> {
    match raw {
        RawComment::LinkedIn(c) => linkedin::normalize_comment(c),
        RawComment::Instagram(c) => instagram::normalize_comment(c),
        RawComment::InstagramLive(c) => instagram::normalize_live_comment(c),
    }
}

/// Outcome of normalizing a provider's comment rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentBatch {
    /// Surviving comments in input order.
    pub comments: Vec<Comment>,
    /// Rows dropped for lacking their identifying field.
    pub filtered: usize,
    /// Rows whose transform failed.
    pub skipped: usize,
}

/// Normalize a list of raw rows of one format.
///
/// Placeholder rows are filtered and failing rows skipped; neither affects
/// their siblings.
pub fn normalize_comments<'a, I>(format: CommentFormat, rows: I) -> CommentBatch
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut batch = CommentBatch::default();
    for (position, row) in rows.into_iter().enumerate() {
        let raw = RawComment::from_value(format, row);
        if raw.identity().is_none() {
            debug!(
                position,
                field = format.identity_field(),
                "dropping comment row without identifier"
            );
            batch.filtered += 1;
            continue;
        }
        match normalize_comment(&raw) {
            Ok(comment) => batch.comments.push(comment),
            Err(err) => {
                debug!(position, error = %err, "skipping comment row");
                batch.skipped += 1;
            }
        }
    }
    debug!(
        format = ?format,
        kept = batch.comments.len(),
        filtered = batch.filtered,
        skipped = batch.skipped,
        "normalized comment batch"
    );
    batch
}
