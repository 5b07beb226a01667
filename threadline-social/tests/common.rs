#![allow(dead_code)]

use std::sync::OnceLock;

use threadline_common::observability::{LogConfig, LogFormat};
use threadline_config::ApifyConfig;
use threadline_http::HttpClient;
use threadline_social::ProviderSession;

static INIT_PATH: OnceLock<std::path::PathBuf> = OnceLock::new();

pub fn init_test_tracing() {
    let _ = INIT_PATH.get_or_init(|| {
        let config = LogConfig {
            app_name: "threadline-tests",
            log_dir: Some(std::env::temp_dir().join("threadline-tests")),
            emit_stderr: true,
            format: if std::env::var("THREADLINE_LOG_FORMAT")
                .map(|raw| raw.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(false)
            {
                LogFormat::Json
            } else {
                LogFormat::Text
            },
            default_filter: "debug".to_string(),
        };

        threadline_common::observability::init_logging(config).unwrap_or_default()
    });
}

pub const TOKEN: &str = "test-token";
pub const COMMENT_LIMIT: u32 = 50;

pub fn apify_config(base_url: &str, page_size: u32, timeout_secs: u64) -> ApifyConfig {
    ApifyConfig {
        token: Some(TOKEN.to_string()),
        base_url: base_url.to_string(),
        linkedin_post_actor: "scrapers/li-post".to_string(),
        linkedin_comments_actor: "scrapers/li-comments".to_string(),
        instagram_post_actor: "scrapers/ig-post".to_string(),
        instagram_comments_actor: "scrapers/ig-comments".to_string(),
        page_size,
        comment_limit: COMMENT_LIMIT,
        timeout_secs,
    }
}

pub fn session(base_url: &str) -> ProviderSession {
    let http = HttpClient::new(base_url).expect("mock server url");
    ProviderSession::new(http, TOKEN)
}
