//! Loader for workspace configuration with YAML + environment overlays.
//!
//! Sources are merged in the order they are attached to the loader. The
//! `THREADLINE_` environment prefix is layered last, so it overrides files,
//! and uses `__` as the nesting separator (`THREADLINE_APIFY__TOKEN` sets
//! `apify.token`). String values may reference `${VAR}` placeholders, which
//! are expanded after the merge, up to eight levels deep.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use threadline_common::LogFormat;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Deserialize)]
pub struct ThreadlineConfig {
    pub version: Option<String>,
    #[serde(default)]
    pub apify: Option<ApifyConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Managed actor-execution service settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ApifyConfig {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_apify_base_url")]
    pub base_url: String,
    pub linkedin_post_actor: String,
    pub linkedin_comments_actor: String,
    pub instagram_post_actor: String,
    pub instagram_comments_actor: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Maximum comment rows requested from the comment actors.
    #[serde(default = "default_comment_limit")]
    pub comment_limit: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApifyConfig {
    /// The API token, or a configuration error naming the missing key.
    pub fn require_token(&self) -> threadline_common::Result<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| threadline_common::ThreadlineError::Config("apify.token is not set".into()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_true")]
    pub stderr: bool,
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default)]
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            stderr: true,
            filter: default_filter(),
            dir: None,
        }
    }
}

fn default_apify_base_url() -> String {
    "https://api.apify.com/v2".into()
}
fn default_page_size() -> u32 {
    100
}
fn default_comment_limit() -> u32 {
    1000
}
fn default_timeout_secs() -> u64 {
    120
}
fn default_true() -> bool {
    true
}
fn default_filter() -> String {
    "info".into()
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct ThreadlineConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for ThreadlineConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadlineConfigLoader {
    /// Start with no file sources; environment overrides are applied at load.
    ///
    /// ```
    /// use threadline_config::ThreadlineConfigLoader;
    ///
    /// let config = ThreadlineConfigLoader::new()
    ///     .with_yaml_str("version: '1'")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert!(config.apify.is_none());
    /// assert!(config.logging.stderr);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that may be absent, for env-only deployments.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use threadline_config::ThreadlineConfigLoader;
    ///
    /// let cfg = ThreadlineConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// apify:
    ///   token: "example"
    ///   linkedin_post_actor: "li-post"
    ///   linkedin_comments_actor: "li-comments"
    ///   instagram_post_actor: "ig-post"
    ///   instagram_comments_actor: "ig-comments"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// let apify = cfg.apify.unwrap();
    /// assert_eq!(apify.base_url, "https://api.apify.com/v2");
    /// assert_eq!(apify.page_size, 100);
    /// assert_eq!(apify.comment_limit, 1000);
    /// assert_eq!(apify.require_token().unwrap(), "example");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    ///
    /// `THREADLINE_`-prefixed variables are layered last so they override files.
    pub fn load(self) -> Result<ThreadlineConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("THREADLINE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        // Round-trip through `Config` so scalars coerce to the field type:
        // `THREADLINE_VERSION=2` parses as an integer but `version` is a string.
        Config::try_from(&v)?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("THREADLINE_TEST_FOO", Some("bar"), || {
            let mut v = json!("prefix-${THREADLINE_TEST_FOO}-suffix");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("prefix-bar-suffix"));
        });
    }

    #[test]
    fn expands_in_array_and_object() {
        temp_env::with_vars(
            [("TL_ACTOR", Some("abc123")), ("TL_OWNER", Some("apify"))],
            || {
                let mut v = json!(["run-$TL_ACTOR", { "id": "${TL_OWNER}~${TL_ACTOR}" }, 7, null]);
                expand_env_in_value(&mut v);
                assert_eq!(v, json!(["run-abc123", { "id": "apify~abc123" }, 7, null]));
            },
        );
    }

    #[test]
    fn stops_on_cycles() {
        temp_env::with_vars([("TL_A", Some("${TL_B}")), ("TL_B", Some("${TL_A}"))], || {
            let mut v = json!("x=${TL_A}-y");
            expand_env_in_value(&mut v);
            let s = v.as_str().unwrap();
            assert!(s.starts_with("x=") && s.ends_with("-y"));
            assert!(s.contains("${"));
        });
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${THREADLINE_DOES_NOT_EXIST}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("hi-${THREADLINE_DOES_NOT_EXIST}"));
    }

    #[test]
    fn blank_token_is_a_config_error() {
        let cfg: ApifyConfig = serde_json::from_value(json!({
            "token": "   ",
            "linkedin_post_actor": "a",
            "linkedin_comments_actor": "b",
            "instagram_post_actor": "c",
            "instagram_comments_actor": "d"
        }))
        .unwrap();
        assert!(cfg.require_token().is_err());
    }
}
