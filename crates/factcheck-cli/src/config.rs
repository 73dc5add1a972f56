//! Configuration management for the CLI.

use crate::cli::Cli;
use crate::error::{CliError, Result};
use factcheck_llm::{ProviderOptions, DEFAULT_TIMEOUT_SECS};
use factcheck_pipeline::{PipelineConfig, DEFAULT_OUTPUT_FILE};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service that generates facts
    #[serde(default = "ServiceConfig::openrouter", deserialize_with = "generation_service")]
    pub generation: ServiceConfig,

    /// Service that verifies facts
    #[serde(default = "ServiceConfig::perplexity", deserialize_with = "verification_service")]
    pub verification: ServiceConfig,

    /// Batching and retry settings
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// One OpenAI-compatible chat service.
///
/// Fields missing from a `[generation]` or `[verification]` table come from
/// that section's own defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// API base URL
    pub base_url: String,

    /// Model identifier
    pub model: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Optional `HTTP-Referer` header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,

    /// Optional `X-Title` header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
struct PartialServiceConfig {
    base_url: Option<String>,
    model: Option<String>,
    api_key_env: Option<String>,
    referer: Option<String>,
    site_name: Option<String>,
    timeout_secs: Option<u64>,
}

impl PartialServiceConfig {
    fn complete(self, base: ServiceConfig) -> ServiceConfig {
        ServiceConfig {
            base_url: self.base_url.unwrap_or(base.base_url),
            model: self.model.unwrap_or(base.model),
            api_key_env: self.api_key_env.unwrap_or(base.api_key_env),
            referer: self.referer.or(base.referer),
            site_name: self.site_name.or(base.site_name),
            timeout_secs: self.timeout_secs.unwrap_or(base.timeout_secs),
        }
    }
}

fn generation_service<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<ServiceConfig, D::Error> {
    Ok(PartialServiceConfig::deserialize(deserializer)?.complete(ServiceConfig::openrouter()))
}

fn verification_service<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<ServiceConfig, D::Error> {
    Ok(PartialServiceConfig::deserialize(deserializer)?.complete(ServiceConfig::perplexity()))
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Where results are written
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl ServiceConfig {
    /// OpenRouter defaults used for generation.
    pub fn openrouter() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_string(),
            model: "openai/gpt-4o-2024-11-20".to_string(),
            api_key_env: "OPENROUTER_API_KEY".to_string(),
            referer: Some("https://github.com/factcheck".to_string()),
            site_name: Some("factcheck".to_string()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Perplexity defaults used for verification.
    pub fn perplexity() -> Self {
        Self {
            base_url: "https://api.perplexity.ai".to_string(),
            model: "llama-3.1-sonar-large-128k-online".to_string(),
            api_key_env: "PERPLEXITY_API_KEY".to_string(),
            referer: None,
            site_name: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Build provider options, reading the API key from the environment.
    ///
    /// A missing key is not an error here; the service rejects the first
    /// request instead.
    pub fn provider_options(&self) -> ProviderOptions {
        ProviderOptions {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            api_key: std::env::var(&self.api_key_env).ok(),
            referer: self.referer.clone(),
            site_name: self.site_name.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| CliError::Config("Could not find config directory".into()))?;
        Ok(dir.join("factcheck").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// read when present and defaults are used otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::path() {
                Ok(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Read and validate a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&contents)?;
        config.pipeline.validate().map_err(CliError::Config)?;
        Ok(config)
    }

    /// Apply command-line overrides on top of file values.
    ///
    /// A preset replaces the whole pipeline section; `--batch-size` still
    /// applies on top of it.
    pub fn apply_overrides(&mut self, cli: &Cli) -> Result<()> {
        if let Some(preset) = cli.preset {
            self.pipeline = preset.into();
        }
        if let Some(batch_size) = cli.batch_size {
            self.pipeline.batch_size = batch_size;
        }
        if let Some(output) = &cli.output {
            self.settings.output = output.clone();
        }
        if let Some(model) = &cli.generation_model {
            self.generation.model = model.clone();
        }
        if let Some(model) = &cli.verification_model {
            self.verification.model = model.clone();
        }
        if cli.no_color {
            self.settings.color = false;
        }

        self.pipeline.validate().map_err(CliError::Config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generation: ServiceConfig::openrouter(),
            verification: ServiceConfig::perplexity(),
            pipeline: PipelineConfig::default(),
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            output: default_output(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
