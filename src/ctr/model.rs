use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::ctr::{round_one_decimal, CtrPredictor, CtrResult};
use crate::error::TitleError;

fn default_true() -> bool {
    true
}

fn default_ngram_max() -> usize {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default = "default_ngram_max")]
    pub ngram_max: usize,
    #[serde(default = "default_true")]
    pub l2_normalize: bool,
}

impl TfidfVectorizer {
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.idf.is_empty() {
            return Err("vectorizer has an empty idf table".to_string());
        }
        if self.ngram_max == 0 {
            return Err("vectorizer ngram_max must be at least 1".to_string());
        }
        if let Some((term, idx)) = self
            .vocabulary
            .iter()
            .find(|(_, idx)| **idx >= self.idf.len())
        {
            return Err(format!("vocabulary term {:?} maps to column {} outside idf table", term, idx));
        }
        Ok(())
    }

    /// Sparse (column, weight) pairs sorted by column.
    pub fn transform(&self, text: &str) -> Vec<(usize, f64)> {
        let source = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        let tokens = word_tokens(&source);

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for n in 1..=self.ngram_max {
            if tokens.len() < n {
                break;
            }
            for window in tokens.windows(n) {
                let term = window.join(" ");
                if let Some(&column) = self.vocabulary.get(&term) {
                    *counts.entry(column).or_insert(0.0) += 1.0;
                }
            }
        }

        let mut features: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(column, count)| (column, count * self.idf[column]))
            .collect();
        features.sort_by_key(|(column, _)| *column);

        if self.l2_normalize {
            let norm = features.iter().map(|(_, value)| value * value).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, value) in features.iter_mut() {
                    *value /= norm;
                }
            }
        }

        features
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearCtrModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearCtrModel {
    pub fn predict(&self, features: &[(usize, f64)]) -> f64 {
        features.iter().fold(self.intercept, |acc, (column, value)| {
            acc + self.coefficients.get(*column).copied().unwrap_or(0.0) * value
        })
    }
}

/// CTR from a fitted linear model over TF-IDF features. Output is not
/// clamped to the heuristic scale.
#[derive(Debug, Clone)]
pub struct TrainedCtr {
    vectorizer: TfidfVectorizer,
    model: LinearCtrModel,
}

impl TrainedCtr {
    pub fn new(vectorizer: TfidfVectorizer, model: LinearCtrModel) -> Result<Self, TitleError> {
        vectorizer.validate().map_err(TitleError::Config)?;
        if model.coefficients.len() != vectorizer.dimension() {
            return Err(TitleError::Config(format!(
                "ctr model has {} coefficients but vectorizer produces {} features",
                model.coefficients.len(),
                vectorizer.dimension()
            )));
        }
        if !model.intercept.is_finite() || model.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(TitleError::Config("ctr model contains non-finite weights".to_string()));
        }
        Ok(Self { vectorizer, model })
    }

    pub fn load(model_path: &Path, vectorizer_path: &Path) -> Result<Self, TitleError> {
        let vectorizer: TfidfVectorizer = read_json(vectorizer_path, "vectorizer")?;
        let model: LinearCtrModel = read_json(model_path, "ctr model")?;
        Self::new(vectorizer, model)
    }

    pub fn raw_score(&self, title: &str) -> f64 {
        self.model.predict(&self.vectorizer.transform(title))
    }
}

impl CtrPredictor for TrainedCtr {
    fn name(&self) -> &'static str {
        "trained"
    }

    fn predict(&self, title: &str) -> Result<CtrResult, TitleError> {
        let value = self.raw_score(title);
        if !value.is_finite() {
            return Err(TitleError::ctr_backend(format!("model produced {}", value)));
        }
        Ok(CtrResult::from_value(round_one_decimal(value)))
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path, what: &str) -> Result<T, TitleError> {
    let data = std::fs::read_to_string(path)
        .map_err(|err| TitleError::Config(format!("failed to read {} {}: {}", what, path.display(), err)))?;
    serde_json::from_str(&data)
        .map_err(|err| TitleError::Config(format!("failed to parse {} {}: {}", what, path.display(), err)))
}

/// Runs of two or more word characters.
fn word_tokens(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .collect()
}
