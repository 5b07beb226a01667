use std::borrow::Cow;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use threadline_config::ApifyConfig;
use threadline_http::RequestOpts;

use super::types::{
    ApiResponse, DatasetInfo, InstagramScraperInput, LinkedInCommentsInput, LinkedInPostInput,
    RunData, RunStatus,
};
use crate::provider::{CommentSource, PostSource, PostUrl, ProviderError, ProviderSession};
use crate::raw::Platform;

/// Seconds Apify holds a run-status request open before answering.
const WAIT_FOR_FINISH_SECS: u64 = 60;
/// Client-side slack on top of the long-poll window.
const POLL_SLACK: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApifyActors {
    pub linkedin_post: String,
    pub linkedin_comments: String,
    pub instagram_post: String,
    pub instagram_comments: String,
}

/// Runs Apify actors to completion and pages through their datasets.
#[derive(Debug, Clone)]
pub struct ApifyClient {
    actors: ApifyActors,
    page_size: u32,
    comment_limit: u32,
    run_timeout: Duration,
}

impl ApifyClient {
    pub fn new(cfg: &ApifyConfig) -> Self {
        Self {
            actors: ApifyActors {
                linkedin_post: cfg.linkedin_post_actor.clone(),
                linkedin_comments: cfg.linkedin_comments_actor.clone(),
                instagram_post: cfg.instagram_post_actor.clone(),
                instagram_comments: cfg.instagram_comments_actor.clone(),
            },
            page_size: cfg.page_size.max(1),
            comment_limit: cfg.comment_limit,
            run_timeout: Duration::from_secs(cfg.timeout_secs),
        }
    }

    pub fn actors(&self) -> &ApifyActors {
        &self.actors
    }

    /// Start a run, wait for it to succeed, and return its final metadata.
    pub async fn run_actor<I>(
        &self,
        session: &ProviderSession,
        actor_id: &str,
        input: &I,
    ) -> Result<RunData, ProviderError>
    where
        I: Serialize + Sync + ?Sized,
    {
        let path = format!("acts/{}/runs", actor_path(actor_id));
        let started: ApiResponse<RunData> = session
            .http()
            .post_json(
                &path,
                input,
                RequestOpts {
                    auth: Some(session.auth()),
                    ..Default::default()
                },
            )
            .await?;
        tracing::info!(actor_id, run_id = %started.data.id, "apify.run.started");

        let finished = self.wait_for_run(session, &started.data.id).await?;
        tracing::info!(
            run_id = %finished.id,
            dataset_id = %finished.default_dataset_id,
            "apify.run.succeeded"
        );
        Ok(finished)
    }

    /// Long-poll a run until it reaches a terminal status or the configured
    /// run timeout elapses.
    pub async fn wait_for_run(
        &self,
        session: &ProviderSession,
        run_id: &str,
    ) -> Result<RunData, ProviderError> {
        let deadline = Instant::now() + self.run_timeout;
        let path = format!("actor-runs/{run_id}");
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(ProviderError::Timeout(self.run_timeout));
            }
            let wait = remaining.as_secs().clamp(1, WAIT_FOR_FINISH_SECS);

            let polled: ApiResponse<RunData> = session
                .http()
                .get_json(
                    &path,
                    RequestOpts {
                        auth: Some(session.auth()),
                        timeout: Some(Duration::from_secs(wait) + POLL_SLACK),
                        query: Some(vec![("waitForFinish", Cow::Owned(wait.to_string()))]),
                        ..Default::default()
                    },
                )
                .await?;
            let run = polled.data;
            match run.status() {
                RunStatus::Succeeded => return Ok(run),
                RunStatus::Failed => {
                    return Err(ProviderError::RunFailed {
                        run_id: run.id,
                        status: run.status,
                    });
                }
                RunStatus::Pending => {
                    tracing::debug!(run_id, status = %run.status, "apify.run.pending");
                }
            }
        }
    }

    /// All items of a dataset, fetched in `page_size` pages until the
    /// reported item count is reached. An empty page ends the fetch early.
    pub async fn dataset_items(
        &self,
        session: &ProviderSession,
        dataset_id: &str,
    ) -> Result<Vec<Value>, ProviderError> {
        let info: ApiResponse<DatasetInfo> = session
            .http()
            .get_json(
                &format!("datasets/{dataset_id}"),
                RequestOpts {
                    auth: Some(session.auth()),
                    ..Default::default()
                },
            )
            .await?;
        let total = info.data.item_count;

        let path = format!("datasets/{dataset_id}/items");
        let mut items: Vec<Value> = Vec::with_capacity(total.min(10_000) as usize);
        while (items.len() as u64) < total {
            let offset = items.len();
            let page: Vec<Value> = session
                .http()
                .get_json(
                    &path,
                    RequestOpts {
                        auth: Some(session.auth()),
                        query: Some(vec![
                            ("format", Cow::Borrowed("json")),
                            ("clean", Cow::Borrowed("true")),
                            ("offset", Cow::Owned(offset.to_string())),
                            ("limit", Cow::Owned(self.page_size.to_string())),
                        ]),
                        ..Default::default()
                    },
                )
                .await?;
            tracing::debug!(dataset_id, offset, got = page.len(), total, "apify.dataset.page");
            if page.is_empty() {
                tracing::warn!(
                    dataset_id,
                    fetched = items.len(),
                    total,
                    "apify.dataset.short_read"
                );
                break;
            }
            items.extend(page);
        }
        Ok(items)
    }

    async fn run_and_collect<I>(
        &self,
        session: &ProviderSession,
        actor_id: &str,
        input: &I,
    ) -> Result<Vec<Value>, ProviderError>
    where
        I: Serialize + Sync + ?Sized,
    {
        let run = self.run_actor(session, actor_id, input).await?;
        self.dataset_items(session, &run.default_dataset_id).await
    }
}

/// Apify addresses `user/actor` names as `user~actor` in URL paths.
fn actor_path(actor_id: &str) -> String {
    actor_id.replace('/', "~")
}

#[async_trait]
impl PostSource for ApifyClient {
    async fn fetch_post(
        &self,
        session: &ProviderSession,
        target: &PostUrl,
    ) -> Result<Value, ProviderError> {
        let url = target.as_str().to_string();
        let items = match target.platform() {
            Platform::LinkedIn => {
                let input = LinkedInPostInput { urls: vec![url] };
                self.run_and_collect(session, &self.actors.linkedin_post, &input)
                    .await?
            }
            Platform::Instagram => {
                let input = InstagramScraperInput {
                    direct_urls: vec![url],
                    results_type: "posts",
                    results_limit: 1,
                };
                self.run_and_collect(session, &self.actors.instagram_post, &input)
                    .await?
            }
        };
        items
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Decode(format!("no post returned for {target}")))
    }
}

#[async_trait]
impl CommentSource for ApifyClient {
    async fn fetch_comments(
        &self,
        session: &ProviderSession,
        target: &PostUrl,
    ) -> Result<Vec<Value>, ProviderError> {
        let url = target.as_str().to_string();
        match target.platform() {
            Platform::LinkedIn => {
                let input = LinkedInCommentsInput {
                    post_ids: vec![url],
                    page_number: 1,
                    sort_order: "most recent",
                    limit: self.comment_limit,
                };
                self.run_and_collect(session, &self.actors.linkedin_comments, &input)
                    .await
            }
            Platform::Instagram => {
                let input = InstagramScraperInput {
                    direct_urls: vec![url],
                    results_type: "comments",
                    results_limit: self.comment_limit,
                };
                self.run_and_collect(session, &self.actors.instagram_comments, &input)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_names_are_path_safe() {
        assert_eq!(actor_path("apify/instagram-scraper"), "apify~instagram-scraper");
        assert_eq!(actor_path("nH2AHrwxeTRJoN5hX"), "nH2AHrwxeTRJoN5hX");
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let cfg = ApifyConfig {
            token: None,
            base_url: "https://api.apify.com/v2".into(),
            linkedin_post_actor: "a/b".into(),
            linkedin_comments_actor: "c".into(),
            instagram_post_actor: "d".into(),
            instagram_comments_actor: "e".into(),
            page_size: 0,
            comment_limit: 10,
            timeout_secs: 5,
        };
        let client = ApifyClient::new(&cfg);
        assert_eq!(client.page_size, 1);
        assert_eq!(client.actors().linkedin_post, "a/b");
        assert_eq!(client.run_timeout, Duration::from_secs(5));
    }
}
