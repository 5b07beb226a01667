//! Seams between the pure core and the scraping backends that feed it.
//!
//! Providers only fetch raw JSON. Every call receives the request's
//! [`ProviderSession`] explicitly; nothing here holds a shared, ambient client.
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use threadline_config::ApifyConfig;
use threadline_http::{Auth, HttpClient, HttpError};
use url::Url;

use crate::error::NormalizeError;
use crate::raw::Platform;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("actor run {run_id} finished with status {status}")]
    RunFailed { run_id: String, status: String },

    #[error("unexpected provider payload: {0}")]
    Decode(String),

    #[error("invalid post URL: {0}")]
    InvalidUrl(String),

    #[error("provider did not finish within {0:?}")]
    Timeout(Duration),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

impl ProviderError {
    pub fn is_timeout(&self) -> bool {
        match self {
            ProviderError::Timeout(_) => true,
            ProviderError::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}

/// Credential plus HTTP handle for one request.
///
/// Owned by the caller and lent to providers; cloning is cheap since the
/// underlying connection pool is shared.
#[derive(Clone)]
pub struct ProviderSession {
    http: HttpClient,
    token: String,
}

impl ProviderSession {
    pub fn new(http: HttpClient, token: impl Into<String>) -> Self {
        Self {
            http,
            token: token.into(),
        }
    }

    /// Session against the configured Apify endpoint. Fails when no token is set.
    pub fn from_apify_config(cfg: &ApifyConfig) -> Result<Self, ProviderError> {
        let token = cfg
            .require_token()
            .map_err(|e| ProviderError::Config(e.to_string()))?
            .to_string();
        let http = HttpClient::new(&cfg.base_url)?;
        Ok(Self::new(http, token))
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn auth(&self) -> Auth<'_> {
        Auth::Bearer(&self.token)
    }
}

impl fmt::Debug for ProviderSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSession")
            .field("base", &self.http.base().as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

/// A post URL checked against its platform's domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostUrl {
    platform: Platform,
    url: Url,
}

impl PostUrl {
    /// Accept only `http(s)` URLs on the platform's domain or a subdomain of it.
    ///
    /// ```
    /// use threadline_social::{Platform, PostUrl};
    ///
    /// let ok = PostUrl::parse("https://www.linkedin.com/posts/someone_activity-1", Platform::LinkedIn);
    /// assert!(ok.is_ok());
    /// assert!(PostUrl::parse("https://evil-linkedin.com/p/1", Platform::LinkedIn).is_err());
    /// assert!(PostUrl::parse("https://www.instagram.com/p/abc/", Platform::LinkedIn).is_err());
    /// ```
    pub fn parse(raw: &str, platform: Platform) -> Result<Self, ProviderError> {
        let url = Url::parse(raw.trim())
            .map_err(|e| ProviderError::InvalidUrl(format!("{raw}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ProviderError::InvalidUrl(format!(
                "{raw}: unsupported scheme `{}`",
                url.scheme()
            )));
        }
        let domain = platform.domain();
        let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
        let on_domain = host == domain || host.ends_with(&format!(".{domain}"));
        if !on_domain {
            return Err(ProviderError::InvalidUrl(format!(
                "{raw}: not a {platform} URL"
            )));
        }
        Ok(Self { platform, url })
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for PostUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supplies one raw post record for a URL.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch_post(
        &self,
        session: &ProviderSession,
        target: &PostUrl,
    ) -> Result<Value, ProviderError>;
}

/// Supplies the raw comment rows for a URL, in provider order.
#[async_trait]
pub trait CommentSource: Send + Sync {
    async fn fetch_comments(
        &self,
        session: &ProviderSession,
        target: &PostUrl,
    ) -> Result<Vec<Value>, ProviderError>;
}

/// Supplies opaque insight metrics, passed through unnormalized.
#[async_trait]
pub trait InsightSource: Send + Sync {
    async fn fetch_insights(
        &self,
        session: &ProviderSession,
        target: &PostUrl,
    ) -> Result<Value, ProviderError>;
}
