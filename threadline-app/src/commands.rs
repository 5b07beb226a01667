use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use threadline_common::ThreadlineError;
use threadline_config::ThreadlineConfig;
use threadline_social::apify::ApifyClient;
use threadline_social::pipeline::{full_result, post_result, summary_result};
use threadline_social::{Platform, PostUrl, ProviderSession, ResultEnvelope};

pub async fn full(cfg: &ThreadlineConfig, platform: Platform, url: &str) -> Result<ResultEnvelope> {
    let apify = cfg
        .apify
        .as_ref()
        .ok_or_else(|| ThreadlineError::Config("the `apify` section is missing".into()))?;
    let session = ProviderSession::from_apify_config(apify)?;
    let client = ApifyClient::new(apify);
    let target = PostUrl::parse(url, platform)?;

    tracing::info!(%platform, url = %target, "fetching full result");
    full_result(&session, &client, &target)
        .await
        .map_err(|err| {
            if err.is_timeout() {
                ThreadlineError::Timeout
            } else {
                ThreadlineError::Provider(err.into())
            }
        })
        .map_err(Into::into)
}

pub fn normalize(platform: Platform, post: &Path, comments: Option<&Path>) -> Result<ResultEnvelope> {
    let raw_post = read_json(post)?;
    let rows = match comments {
        Some(path) => read_rows(path)?,
        None => Vec::new(),
    };
    post_result(platform, &raw_post, &rows)
        .with_context(|| format!("normalizing post from {}", post.display()))
}

pub fn thread(comments: &Path, insights: Option<&Path>) -> Result<ResultEnvelope> {
    let rows = read_rows(comments)?;
    let insights = insights.map(read_json).transpose()?;
    Ok(summary_result(insights, &rows))
}

pub fn print_json(envelope: &ResultEnvelope) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, envelope)?;
    writeln!(out)?;
    Ok(())
}

fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {} as JSON", path.display()))
}

/// A JSON array of rows. Apify exports sometimes wrap it as `{"items": [...]}`.
fn read_rows(path: &Path) -> Result<Vec<Value>> {
    match read_json(path)? {
        Value::Array(rows) => Ok(rows),
        Value::Object(mut obj) => match obj.remove("items") {
            Some(Value::Array(rows)) => Ok(rows),
            _ => bail!("{} must contain a JSON array of rows", path.display()),
        },
        _ => bail!("{} must contain a JSON array of rows", path.display()),
    }
}
