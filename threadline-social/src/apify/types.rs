use serde::{Deserialize, Serialize};

/// Envelope around every Apify API object.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunData {
    pub id: String,
    pub status: String,
    #[serde(rename = "defaultDatasetId")]
    pub default_dataset_id: String,
}

impl RunData {
    pub fn status(&self) -> RunStatus {
        RunStatus::from(self.status.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Succeeded,
    Failed,
    /// READY, RUNNING, TIMING-OUT, ABORTING and anything unrecognized.
    Pending,
}

impl From<&str> for RunStatus {
    fn from(status: &str) -> Self {
        match status {
            "SUCCEEDED" => RunStatus::Succeeded,
            "FAILED" | "ABORTED" | "TIMED-OUT" => RunStatus::Failed,
            _ => RunStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetInfo {
    #[serde(rename = "itemCount", default)]
    pub item_count: u64,
}

/// Input for a LinkedIn post detail actor.
#[derive(Debug, Clone, Serialize)]
pub struct LinkedInPostInput {
    pub urls: Vec<String>,
}

/// Input for a LinkedIn post comments actor.
#[derive(Debug, Clone, Serialize)]
pub struct LinkedInCommentsInput {
    #[serde(rename = "postIds")]
    pub post_ids: Vec<String>,
    pub page_number: u32,
    #[serde(rename = "sortOrder")]
    pub sort_order: &'static str,
    pub limit: u32,
}

/// Input for the Instagram scraper actors (posts and comments share a shape).
#[derive(Debug, Clone, Serialize)]
pub struct InstagramScraperInput {
    #[serde(rename = "directUrls")]
    pub direct_urls: Vec<String>,
    #[serde(rename = "resultsType")]
    pub results_type: &'static str,
    #[serde(rename = "resultsLimit")]
    pub results_limit: u32,
}
