//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::retrieval::{
    validate_threshold, EngineOptions, StopWordSet, DEFAULT_FALLBACK_MESSAGE, DEFAULT_THRESHOLD,
};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Corpus file (`.json` or `.toml`).
    pub corpus: PathBuf,
    /// Retrieval settings.
    pub retrieval: RetrievalConfig,
    /// Output configuration.
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus: PathBuf::from("faq.json"),
            retrieval: RetrievalConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit file path.
    ///
    /// Errors if the file does not exist. Use this for explicit `--config` flags.
    /// Env vars with `FAQBOT_` prefix override file values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(crate::core::Error::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        Self::extract(
            Figment::from(Serialized::defaults(Self::default()))
                .merge(Toml::file_exact(path))
                .merge(Env::prefixed("FAQBOT_").split("__")),
        )
    }

    /// Load configuration from directory, looking for faqbot.toml or .faqbot/faqbot.toml.
    ///
    /// Missing files are silently skipped (defaults are used).
    pub fn load_default(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        Self::extract(
            Figment::from(Serialized::defaults(Self::default()))
                .merge(Toml::file(dir.join("faqbot.toml")))
                .merge(Toml::file(dir.join(".faqbot/faqbot.toml")))
                .merge(Env::prefixed("FAQBOT_").split("__")),
        )
    }

    fn extract(figment: Figment) -> Result<Self> {
        let config: Self = figment
            .extract()
            .map_err(|e| crate::core::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.retrieval.threshold)
            .map_err(|e| crate::core::Error::config(format!("retrieval.threshold: {e}")))?;
        if self.retrieval.top_k == 0 {
            return Err(crate::core::Error::config("retrieval.top_k must be at least 1"));
        }
        Ok(())
    }

    /// Engine options derived from the retrieval settings.
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            stop_words: StopWordSet::builtin().with_extra(&self.retrieval.extra_stop_words),
            fallback_message: self.retrieval.fallback_message.clone(),
        }
    }

    /// Create default config file content.
    pub fn default_toml() -> &'static str {
        include_str!("default_config.toml")
    }
}

/// Retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Minimum cosine similarity (0.0-1.0) for an answer to be returned.
    pub threshold: f64,
    /// Number of candidates shown by `search`.
    pub top_k: usize,
    /// Reply when no question is similar enough.
    pub fallback_message: String,
    /// Stop words in addition to the built-in Russian and English lists.
    pub extra_stop_words: Vec<String>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            top_k: 5,
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
            extra_stop_words: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON format.
    Json,
    /// Markdown format.
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "md" | "markdown" => Ok(Self::Markdown),
            _ => Err(format!("Unknown format: {s}. Use 'text', 'json', or 'md'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.corpus, PathBuf::from("faq.json"));
        assert_eq!(config.retrieval.threshold, 0.2);
        assert_eq!(config.retrieval.top_k, 5);
        assert!(config.retrieval.extra_stop_words.is_empty());
    }

    #[test]
    fn test_config_from_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "faqbot.toml",
                "corpus = \"data/faq.toml\"\n[retrieval]\nthreshold = 0.35\nfallback_message = \"Не знаю\"",
            )?;
            let config = Config::from_file("faqbot.toml").unwrap();
            assert_eq!(config.corpus, PathBuf::from("data/faq.toml"));
            assert_eq!(config.retrieval.threshold, 0.35);
            assert_eq!(config.retrieval.fallback_message, "Не знаю");
            assert_eq!(config.retrieval.top_k, 5);
            Ok(())
        });
    }

    #[test]
    fn test_config_load_default_dot_faqbot() {
        Jail::expect_with(|jail| {
            std::fs::create_dir(jail.directory().join(".faqbot")).unwrap();
            jail.create_file(".faqbot/faqbot.toml", "[retrieval]\ntop_k = 3")?;
            let config = Config::load_default(".").unwrap();
            assert_eq!(config.retrieval.top_k, 3);
            Ok(())
        });
    }

    #[test]
    fn test_config_load_default_no_file() {
        Jail::expect_with(|_jail| {
            let config = Config::load_default(".").unwrap();
            assert_eq!(config.retrieval.threshold, DEFAULT_THRESHOLD);
            Ok(())
        });
    }

    #[test]
    fn test_from_file_errors_on_missing_file() {
        let result = Config::from_file("/nonexistent/path/faqbot.toml");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("not found"), "expected 'not found' in: {err}");
    }

    #[test]
    fn test_env_var_overrides_file_value() {
        Jail::expect_with(|jail| {
            jail.create_file("faqbot.toml", "[retrieval]\nthreshold = 0.3")?;
            jail.set_env("FAQBOT_RETRIEVAL__THRESHOLD", "0.5");
            let config = Config::from_file("faqbot.toml").unwrap();
            assert_eq!(config.retrieval.threshold, 0.5);
            Ok(())
        });
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("faqbot.toml", "[retrieval]\nthreshold = 1.5")?;
            let err = Config::from_file("faqbot.toml").unwrap_err().to_string();
            assert!(err.contains("retrieval.threshold"), "got: {err}");
            Ok(())
        });
    }

    #[test]
    fn test_zero_top_k_rejected() {
        let mut config = Config::default();
        config.retrieval.top_k = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_engine_options_include_extra_stop_words() {
        let mut config = Config::default();
        config.retrieval.extra_stop_words = vec!["Пожалуйста".to_string()];
        let options = config.engine_options();
        assert!(options.stop_words.contains("пожалуйста"));
        assert!(options.stop_words.contains("как"));
    }

    #[test]
    fn test_default_toml_parses() {
        let config: Config = toml::from_str(Config::default_toml()).unwrap();
        assert_eq!(config.retrieval.threshold, DEFAULT_THRESHOLD);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
