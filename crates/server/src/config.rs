//! # Application Configuration
//!
//! This module defines the configuration structure for `quipster-server` and
//! the logic for loading it from an optional `config.yml` file and environment
//! variables.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use quipster::providers::ai::gemini::DEFAULT_GEMINI_MODEL;
use quipster::providers::speech::google::DEFAULT_TRANSLATE_BASE_URL;
use quipster::voice::{DEFAULT_MAX_CLIPS, DEFAULT_SPEECH_LANGUAGE};
use quipster_instagram::DEFAULT_INSTAGRAM_BASE_URL;
use quipster_youtube::DEFAULT_YOUTUBE_BASE_URL;
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

const DEFAULT_CONFIG_PATH: &str = "config.yml";

#[derive(Debug, Error)]
pub enum ConfigError {
    /// An error from the underlying `config` crate or from reading the file.
    #[error("Configuration error: {0}")]
    General(String),
    /// An explicitly requested configuration file does not exist.
    #[error("{0}")]
    NotFound(String),
    #[error("GEMINI_API_KEY is not set. Add it to your .env file or set `gemini_api_key` in config.yml.")]
    MissingApiKey,
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// Optional overrides for the comment-generation prompts.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PromptsConfig {
    #[serde(default)]
    pub comment_system_prompt: Option<String>,
    #[serde(default)]
    pub comment_user_prompt: Option<String>,
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Loaded from the `PORT` env var.
    pub port: u16,
    /// Loaded from the `GEMINI_API_KEY` env var. Must be non-empty.
    #[serde(default)]
    pub gemini_api_key: String,
    pub gemini_model: String,
    /// Full `generateContent` URL; derived from `gemini_model` when unset.
    #[serde(default)]
    pub gemini_api_url: Option<String>,
    pub youtube_base_url: String,
    pub instagram_base_url: String,
    pub speech_base_url: String,
    pub speech_language: String,
    /// Directory the generated clips are written to and served from.
    pub audio_dir: String,
    /// Oldest clips beyond this count are deleted; `0` keeps every clip.
    pub max_audio_clips: usize,
    #[serde(default)]
    pub prompts: PromptsConfig,
}

// Reads a file and substitutes `${VAR}` placeholders with environment values.
// Returns Ok(None) if the file does not exist.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(e.to_string()))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        env::var(&caps["var"]).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration.
///
/// Layers, lowest priority first:
/// - programmatic defaults;
/// - `config.yml` (or `config_path_override`), with `${VAR}` substitution;
/// - plain environment variables for top-level keys (`PORT`, `GEMINI_API_KEY`);
/// - `QUIPSTER_`-prefixed variables, `__` separating nested keys
///   (e.g., `QUIPSTER_PROMPTS__COMMENT_SYSTEM_PROMPT`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder()
        .set_default("port", 9090)?
        .set_default("gemini_model", DEFAULT_GEMINI_MODEL)?
        .set_default("youtube_base_url", DEFAULT_YOUTUBE_BASE_URL)?
        .set_default("instagram_base_url", DEFAULT_INSTAGRAM_BASE_URL)?
        .set_default("speech_base_url", DEFAULT_TRANSLATE_BASE_URL)?
        .set_default("speech_language", DEFAULT_SPEECH_LANGUAGE)?
        .set_default("audio_dir", "static")?
        .set_default("max_audio_clips", DEFAULT_MAX_CLIPS as u64)?;

    let config_path = config_path_override.unwrap_or(DEFAULT_CONFIG_PATH);
    match read_and_substitute(config_path)? {
        Some(content) => {
            info!("Loading configuration from '{config_path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None if config_path_override.is_some() => {
            return Err(ConfigError::NotFound(format!(
                "Config file not found at '{config_path}'."
            )));
        }
        None => info!("No '{config_path}' found, using defaults and environment."),
    }

    let settings = builder
        .add_source(Environment::default())
        .add_source(
            Environment::with_prefix("QUIPSTER")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    config.gemini_api_key = config.gemini_api_key.trim().to_string();
    if config.gemini_api_key.is_empty() {
        return Err(ConfigError::MissingApiKey);
    }

    Ok(config)
}
