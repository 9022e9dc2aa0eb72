//! Loader for workspace configuration with YAML + environment overlays.
//!
//! Configuration lives in `crolens.yaml` and may be overridden by
//! `CROLENS_`-prefixed environment variables (`__` separates nesting
//! levels, e.g. `CROLENS_SERVER__LISTEN_ADDR`). String values support
//! `${VAR}` expansion so secrets such as the Gemini API key can stay out
//! of the file itself.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Top-level configuration for the analyzer service.
#[derive(Debug, Deserialize)]
pub struct CrolensConfig {
    pub version: Option<String>,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub scrape: ScrapeConfig,
    /// LLM provider block. Absent means the server starts but every
    /// analysis request is answered with a configuration error.
    #[serde(default)]
    pub llm: Option<LlmConfig>,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

/// Tuning knobs for the outbound page fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeConfig {
    /// Whole-request timeout in seconds. This is the only cancellation
    /// mechanism in the pipeline.
    #[serde(default = "default_fetch_timeout_secs")]
    pub timeout_secs: u64,
    /// Redirect cap for the page fetch.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    /// User-agent header sent to scrape targets.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout_secs(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
        }
    }
}

/// The tag is `provider`; only Gemini is supported today.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum LlmConfig {
    Gemini {
        api_key: String,
        #[serde(default = "default_gemini_model")]
        model: String,
    },
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}
fn default_fetch_timeout_secs() -> u64 {
    10
}
fn default_max_redirects() -> usize {
    5
}
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/91.0.4472.124 Safari/537.36"
        .into()
}
fn default_gemini_model() -> String {
    "gemini-1.5-flash".into()
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
pub struct CrolensConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for CrolensConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CrolensConfigLoader {
    /// Start with sensible defaults: YAML file + `CROLENS_` env overrides.
    ///
    /// ```
    /// use crolens_config::CrolensConfigLoader;
    ///
    /// let config = CrolensConfigLoader::new()
    ///     .with_yaml_str("version: '1'")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert!(config.llm.is_none());
    /// assert_eq!(config.scrape.timeout_secs, 10);
    /// assert_eq!(config.scrape.max_redirects, 5);
    /// ```
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("CROLENS").separator("__"));
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self.builder.add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use crolens_config::{CrolensConfigLoader, LlmConfig};
    ///
    /// let cfg = CrolensConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// llm:
    ///   provider: "gemini"
    ///   api_key: "example-key"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// match cfg.llm {
    ///     Some(LlmConfig::Gemini { api_key, model }) => {
    ///         assert_eq!(api_key, "example-key");
    ///         assert_eq!(model, "gemini-1.5-flash");
    ///     }
    ///     None => panic!("expected Gemini configuration"),
    /// }
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// The loader combines YAML with `CROLENS_`-prefixed environment
    /// variables and expands `${VAR}` placeholders before materialising
    /// the typed config.
    pub fn load(self) -> Result<CrolensConfig, ConfigError> {
        let cfg = self.builder.build()?;

        // Convert to serde_json::Value first so ${VAR} expansion can walk
        // the whole tree, then deserialize into the typed config.
        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: CrolensConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
