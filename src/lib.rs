pub mod catalog;
pub mod config;
pub mod ctr;
pub mod engine;
pub mod error;
pub mod generator;
pub mod length;
pub mod random;
pub mod sentiment;
pub mod variants;

use serde::{Deserialize, Serialize};

pub use crate::catalog::{Template, TemplateCatalog, TemplateSlot, WordList};
pub use crate::config::AppConfig;
pub use crate::ctr::{CtrPredictor, CtrRating, CtrResult};
pub use crate::engine::TitleEngine;
pub use crate::error::TitleError;
pub use crate::generator::{GenerationBatch, TitleGenerator};
pub use crate::length::{LengthOptimizer, LengthVerdict};
pub use crate::random::{Randomness, RngSource};
pub use crate::sentiment::{SentimentLabel, SentimentResult, SentimentScorer};
pub use crate::variants::VariantSynthesizer;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleRequest {
    pub competitor_title: String,
    pub keyword: String,
    pub count: Option<usize>,
}

impl TitleRequest {
    pub fn new(competitor_title: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            competitor_title: competitor_title.into(),
            keyword: keyword.into(),
            count: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn validate(&self) -> Result<(), TitleError> {
        if self.competitor_title.trim().is_empty() {
            return Err(TitleError::Input("competitor title is required".to_string()));
        }
        if self.keyword.trim().is_empty() {
            return Err(TitleError::Input("keyword is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompetitorAnalysis {
    pub title: String,
    pub sentiment: SentimentResult,
    pub ctr: CtrResult,
    pub length: usize,
    pub length_verdict: LengthVerdict,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedTitle {
    pub text: String,
    pub length: usize,
    pub ctr: CtrResult,
    pub sentiment: SentimentResult,
    pub template_index: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TitleVariant {
    pub text: String,
    pub length: usize,
    pub ctr: CtrResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub competitor: CompetitorAnalysis,
    pub titles: Vec<GeneratedTitle>,
    pub variants: Vec<TitleVariant>,
    pub warnings: Vec<String>,
    pub sentiment_backend: String,
    pub ctr_backend: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TitleScore {
    pub title: String,
    pub length: usize,
    pub length_verdict: LengthVerdict,
    pub sentiment: SentimentResult,
    pub ctr: CtrResult,
}

/// One-shot analysis with the default configuration and an unseeded
/// random source.
pub fn analyze(competitor_title: &str, keyword: &str) -> Result<AnalysisReport, TitleError> {
    let (config, _) = AppConfig::load(None)?;
    let engine = TitleEngine::from_config(&config)?;
    let mut rng = RngSource::from_entropy();
    engine.analyze(&TitleRequest::new(competitor_title, keyword), &mut rng)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
