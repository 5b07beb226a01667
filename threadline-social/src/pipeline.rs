//! Request-scoped compositions of providers and the pure core.
use serde_json::Value;
use tracing::{info, warn};

use crate::assemble::{assemble_result, ResultEnvelope};
use crate::error::NormalizeError;
use crate::normalize::{normalize_comments, normalize_post};
use crate::provider::{
    CommentSource, InsightSource, PostSource, PostUrl, ProviderError, ProviderSession,
};
use crate::raw::{CommentFormat, Platform, RawPost};
use crate::thread::build_thread;

/// Normalize an already-fetched post and its comment rows into `{post, comments}`.
///
/// The post must normalize; comment rows are filtered or skipped individually.
pub fn post_result(
    platform: Platform,
    raw_post: &Value,
    raw_comments: &[Value],
) -> Result<ResultEnvelope, NormalizeError> {
    let post = normalize_post(&RawPost::from_value(platform, raw_post))?;
    let batch = normalize_comments(CommentFormat::from(platform), raw_comments);
    if batch.skipped > 0 {
        warn!(
            post_id = %post.post_id,
            skipped = batch.skipped,
            "some comments failed to normalize"
        );
    }
    info!(
        %platform,
        post_id = %post.post_id,
        comments = batch.comments.len(),
        filtered = batch.filtered,
        skipped = batch.skipped,
        "post result assembled"
    );
    Ok(assemble_result(Some(post), batch.comments, None))
}

/// Fetch a post and its comments through `provider`, then normalize both.
pub async fn full_result<P>(
    session: &ProviderSession,
    provider: &P,
    target: &PostUrl,
) -> Result<ResultEnvelope, ProviderError>
where
    P: PostSource + CommentSource + ?Sized,
{
    let raw_post = provider.fetch_post(session, target).await?;
    let raw_comments = provider.fetch_comments(session, target).await?;
    tracing::debug!(url = %target, rows = raw_comments.len(), "raw payloads fetched");
    Ok(post_result(target.platform(), &raw_post, &raw_comments)?)
}

/// Thread live-fetched comments under their parents alongside raw insights.
pub fn summary_result(insights: Option<Value>, live_comments: &[Value]) -> ResultEnvelope {
    let batch = normalize_comments(CommentFormat::InstagramLive, live_comments);
    let total = batch.comments.len();
    let forest = build_thread(batch.comments);
    info!(
        comments = total,
        roots = forest.len(),
        filtered = batch.filtered,
        skipped = batch.skipped,
        "summary assembled"
    );
    assemble_result(None, forest, insights)
}

/// Fetch insights and live comments through `provider` and thread them.
pub async fn live_summary<P>(
    session: &ProviderSession,
    provider: &P,
    target: &PostUrl,
) -> Result<ResultEnvelope, ProviderError>
where
    P: InsightSource + CommentSource + ?Sized,
{
    let insights = provider.fetch_insights(session, target).await?;
    let live = provider.fetch_comments(session, target).await?;
    Ok(summary_result(Some(insights), &live))
}
