pub mod lexicon;
pub mod remote;

use serde::{Serialize, Serializer};

use crate::error::TitleError;

pub use lexicon::LexiconSentiment;
pub use remote::RemoteSentiment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Other(String),
}

impl SentimentLabel {
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            SentimentLabel::Positive
        } else if polarity < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn from_backend(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "positive" | "pos" => SentimentLabel::Positive,
            "negative" | "neg" => SentimentLabel::Negative,
            "neutral" | "neu" => SentimentLabel::Neutral,
            _ => SentimentLabel::Other(label.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Other(label) => label,
        }
    }
}

impl Serialize for SentimentLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKind {
    /// Range [-1, 1].
    Polarity,
    /// Range [0, 1].
    Confidence,
}

#[derive(Debug, Clone, Serialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub score: f64,
    pub kind: ScoreKind,
}

pub trait SentimentScorer: Send + Sync {
    fn name(&self) -> &'static str;

    fn score(&self, text: &str) -> Result<SentimentResult, TitleError>;
}
