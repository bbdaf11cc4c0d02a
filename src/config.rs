use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::catalog::CatalogConfig;
use crate::error::TitleError;
use crate::generator::DEFAULT_TITLE_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentBackend {
    Lexicon,
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    pub backend: String,
    pub endpoint: String,
    pub timeout_ms: u64,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            backend: "lexicon".to_string(),
            endpoint: "http://localhost:8090".to_string(),
            timeout_ms: 3000,
        }
    }
}

impl SentimentConfig {
    pub fn to_backend(&self) -> Result<SentimentBackend, TitleError> {
        match self.backend.trim().to_lowercase().as_str() {
            "lexicon" | "lexical" => Ok(SentimentBackend::Lexicon),
            "remote" | "model" => Ok(SentimentBackend::Remote),
            other => Err(TitleError::Config(format!("unknown sentiment backend: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CtrConfig {
    pub model_path: Option<PathBuf>,
    pub vectorizer_path: Option<PathBuf>,
}

impl CtrConfig {
    pub fn artifacts(&self) -> Option<(&Path, &Path)> {
        let model = self.model_path.as_deref()?;
        let vectorizer = self.vectorizer_path.as_deref()?;
        if model.exists() && vectorizer.exists() {
            Some((model, vectorizer))
        } else {
            None
        }
    }

    pub fn is_configured(&self) -> bool {
        self.model_path.is_some() || self.vectorizer_path.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub count: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_TITLE_COUNT,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generation: GenerationConfig,
    pub sentiment: SentimentConfig,
    pub ctr: CtrConfig,
    pub catalog: Option<CatalogConfig>,
}

impl AppConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), TitleError> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| TitleError::Config(format!("failed to read config: {}", err)))?;
                Self::from_toml(&contents)?
            }
            _ => AppConfig::default(),
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn from_toml(contents: &str) -> Result<Self, TitleError> {
        toml::from_str(contents).map_err(|err| TitleError::Config(format!("failed to parse config: {}", err)))
    }

    pub fn write(&self, path: &Path) -> Result<(), TitleError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| TitleError::Config(format!("failed to create config dir: {}", err)))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| TitleError::Config(format!("failed to serialize config: {}", err)))?;
        std::fs::write(path, payload)
            .map_err(|err| TitleError::Config(format!("failed to write config: {}", err)))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(backend) = env::var("SENTIMENT_BACKEND") {
            if !backend.trim().is_empty() {
                self.sentiment.backend = backend;
            }
        }
        if let Ok(endpoint) = env::var("SENTIMENT_ENDPOINT") {
            if !endpoint.trim().is_empty() {
                self.sentiment.endpoint = endpoint;
            }
        }
        if let Ok(timeout) = env::var("SENTIMENT_TIMEOUT_MS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.sentiment.timeout_ms = value;
            }
        }
        if let Ok(path) = env::var("CTR_MODEL_PATH") {
            if !path.trim().is_empty() {
                self.ctr.model_path = Some(PathBuf::from(path));
            }
        }
        if let Ok(path) = env::var("CTR_VECTORIZER_PATH") {
            if !path.trim().is_empty() {
                self.ctr.vectorizer_path = Some(PathBuf::from(path));
            }
        }
        if let Ok(count) = env::var("TITLE_COUNT") {
            if let Ok(value) = count.parse::<usize>() {
                self.generation.count = value;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("TITLE_LAB_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/title_lab.toml")))
}
