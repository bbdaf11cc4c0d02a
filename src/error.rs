use thiserror::Error;

#[derive(Error, Debug)]
pub enum TitleError {
    #[error("invalid input: {0}")]
    Input(String),

    #[error("requested {requested} titles but the catalog only has {available} distinct templates")]
    GenerationCapacity { requested: usize, available: usize },

    #[error("{scorer} backend failed: {message}")]
    ScoringBackend { scorer: &'static str, message: String },

    #[error("invalid catalog: {0}")]
    Catalog(String),

    #[error("config error: {0}")]
    Config(String),
}

impl TitleError {
    pub fn sentiment_backend(message: impl Into<String>) -> Self {
        TitleError::ScoringBackend {
            scorer: "sentiment",
            message: message.into(),
        }
    }

    pub fn ctr_backend(message: impl Into<String>) -> Self {
        TitleError::ScoringBackend {
            scorer: "ctr",
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TitleError::Input(_) => "input",
            TitleError::GenerationCapacity { .. } => "generation_capacity",
            TitleError::ScoringBackend { .. } => "scoring_backend",
            TitleError::Catalog(_) => "catalog",
            TitleError::Config(_) => "config",
        }
    }
}
