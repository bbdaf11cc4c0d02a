use std::collections::HashMap;

use crate::error::TitleError;
use crate::sentiment::{ScoreKind, SentimentLabel, SentimentResult, SentimentScorer};

const NEGATION_FACTOR: f64 = -0.5;
const INTENSIFIER_FACTOR: f64 = 1.3;

const NEGATIONS: [&str; 6] = ["not", "never", "no", "don't", "dont", "isn't"];
const INTENSIFIERS: [&str; 5] = ["very", "really", "super", "extremely", "so"];

const DEFAULT_LEXICON: &[(&str, f64)] = &[
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("brilliant", 0.9),
    ("easy", 0.43),
    ("effective", 0.6),
    ("essential", 0.3),
    ("excellent", 1.0),
    ("fun", 0.3),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("incredible", 0.9),
    ("love", 0.5),
    ("perfect", 1.0),
    ("powerful", 0.3),
    ("pro", 0.2),
    ("proven", 0.4),
    ("simple", 0.2),
    ("smart", 0.21),
    ("success", 0.3),
    ("ultimate", 0.2),
    ("win", 0.8),
    ("works", 0.2),
    ("advanced", 0.4),
    ("complete", 0.1),
    ("secret", -0.1),
    ("bad", -0.7),
    ("boring", -1.0),
    ("broken", -0.4),
    ("dangerous", -0.6),
    ("fail", -0.5),
    ("hard", -0.29),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("lose", -0.4),
    ("mistake", -0.5),
    ("mistakes", -0.5),
    ("shocking", -0.5),
    ("stop", -0.2),
    ("terrible", -1.0),
    ("worst", -1.0),
    ("wrong", -0.5),
];

/// Word-weight polarity: the mean weight of recognized words, with a
/// negation or intensifier scaling the word right after it.
#[derive(Debug, Clone)]
pub struct LexiconSentiment {
    weights: HashMap<String, f64>,
}

impl Default for LexiconSentiment {
    fn default() -> Self {
        Self::with_lexicon(DEFAULT_LEXICON.iter().map(|(word, weight)| (word.to_string(), *weight)))
    }
}

impl LexiconSentiment {
    pub fn with_lexicon(entries: impl IntoIterator<Item = (String, f64)>) -> Self {
        let weights = entries
            .into_iter()
            .map(|(word, weight)| (word.to_lowercase(), weight.clamp(-1.0, 1.0)))
            .collect();
        Self { weights }
    }

    pub fn polarity(&self, text: &str) -> f64 {
        let mut total = 0.0;
        let mut recognized = 0usize;
        let mut modifier = 1.0;

        for token in tokenize(text) {
            if NEGATIONS.contains(&token.as_str()) {
                modifier *= NEGATION_FACTOR;
                continue;
            }
            if INTENSIFIERS.contains(&token.as_str()) {
                modifier *= INTENSIFIER_FACTOR;
                continue;
            }
            if let Some(weight) = self.weights.get(&token) {
                total += weight * modifier;
                recognized += 1;
            }
            modifier = 1.0;
        }

        if recognized == 0 {
            return 0.0;
        }
        (total / recognized as f64).clamp(-1.0, 1.0)
    }
}

impl SentimentScorer for LexiconSentiment {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    fn score(&self, text: &str) -> Result<SentimentResult, TitleError> {
        let polarity = self.polarity(text);
        Ok(SentimentResult {
            label: SentimentLabel::from_polarity(polarity),
            score: polarity,
            kind: ScoreKind::Polarity,
        })
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|token| token.trim_matches('\''))
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
        .collect()
}
