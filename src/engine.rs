use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{info, warn};

use crate::catalog::TemplateCatalog;
use crate::config::{AppConfig, SentimentBackend};
use crate::ctr::{CtrPredictor, HeuristicCtr, TrainedCtr};
use crate::error::TitleError;
use crate::generator::{TitleGenerator, DEFAULT_TITLE_COUNT};
use crate::length::{char_len, LengthOptimizer, LengthVerdict};
use crate::random::Randomness;
use crate::sentiment::{LexiconSentiment, RemoteSentiment, SentimentScorer};
use crate::variants::VariantSynthesizer;
use crate::{AnalysisReport, CompetitorAnalysis, GeneratedTitle, TitleRequest, TitleScore, TitleVariant};

/// Scorers and catalog shared by every request. Built once at start-up and
/// only read afterwards.
#[derive(Clone)]
pub struct TitleEngine {
    catalog: Arc<TemplateCatalog>,
    sentiment: Arc<dyn SentimentScorer>,
    ctr: Arc<dyn CtrPredictor>,
    title_count: usize,
}

impl TitleEngine {
    pub fn new(
        catalog: Arc<TemplateCatalog>,
        sentiment: Arc<dyn SentimentScorer>,
        ctr: Arc<dyn CtrPredictor>,
        title_count: usize,
    ) -> Self {
        Self {
            catalog,
            sentiment,
            ctr,
            title_count,
        }
    }

    pub fn heuristic() -> Self {
        let catalog = Arc::new(TemplateCatalog::builtin().clone());
        let ctr = Arc::new(HeuristicCtr::new(catalog.clone()));
        Self::new(catalog, Arc::new(LexiconSentiment::default()), ctr, DEFAULT_TITLE_COUNT)
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, TitleError> {
        if config.generation.count == 0 {
            return Err(TitleError::Config("generation.count must be at least 1".to_string()));
        }
        let catalog = match config.catalog.as_ref() {
            Some(catalog) => Arc::new(TemplateCatalog::from_config(catalog)?),
            None => Arc::new(TemplateCatalog::builtin().clone()),
        };

        let sentiment: Arc<dyn SentimentScorer> = match config.sentiment.to_backend()? {
            SentimentBackend::Lexicon => Arc::new(LexiconSentiment::default()),
            SentimentBackend::Remote => Arc::new(RemoteSentiment::from_config(&config.sentiment)?),
        };

        let ctr: Arc<dyn CtrPredictor> = match config.ctr.artifacts() {
            Some((model_path, vectorizer_path)) => Arc::new(TrainedCtr::load(model_path, vectorizer_path)?),
            None => {
                if config.ctr.is_configured() {
                    warn!("ctr model artifacts incomplete or missing; using heuristic ctr");
                }
                Arc::new(HeuristicCtr::new(catalog.clone()))
            }
        };

        info!(
            sentiment = sentiment.name(),
            ctr = ctr.name(),
            templates = catalog.templates().len(),
            "title engine ready"
        );

        Ok(Self::new(catalog, sentiment, ctr, config.generation.count))
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn sentiment_backend(&self) -> &'static str {
        self.sentiment.name()
    }

    pub fn ctr_backend(&self) -> &'static str {
        self.ctr.name()
    }

    pub fn title_count(&self) -> usize {
        self.title_count
    }

    /// Full pass for one request. Any failure aborts the whole report.
    pub fn analyze(
        &self,
        request: &TitleRequest,
        rng: &mut dyn Randomness,
    ) -> Result<AnalysisReport, TitleError> {
        request.validate()?;
        let competitor_title = request.competitor_title.trim();
        let keyword = request.keyword.trim();
        let count = request.count.unwrap_or(self.title_count);

        let batch = TitleGenerator::new(&self.catalog).generate(keyword, count, rng)?;
        let optimizer = LengthOptimizer::new(&self.catalog);

        let mut titles = Vec::with_capacity(batch.drafts.len());
        for draft in &batch.drafts {
            let text = optimizer.optimize(&draft.text, rng);
            titles.push(GeneratedTitle {
                length: char_len(&text),
                ctr: self.ctr.predict(&text)?,
                sentiment: self.sentiment.score(&text)?,
                template_index: draft.template_index,
                text,
            });
        }

        let competitor = self.analyze_competitor(competitor_title)?;

        let variants = VariantSynthesizer::new(&self.catalog)
            .synthesize(competitor_title, rng)
            .into_iter()
            .map(|text| {
                Ok(TitleVariant {
                    length: char_len(&text),
                    ctr: self.ctr.predict(&text)?,
                    text,
                })
            })
            .collect::<Result<Vec<_>, TitleError>>()?;

        info!(
            request = %fingerprint(competitor_title, keyword),
            titles = titles.len(),
            variants = variants.len(),
            competitor_ctr = competitor.ctr.value,
            "analysis complete"
        );

        Ok(AnalysisReport {
            competitor,
            titles,
            variants,
            warnings: batch.warnings,
            sentiment_backend: self.sentiment.name().to_string(),
            ctr_backend: self.ctr.name().to_string(),
        })
    }

    pub fn score_title(&self, title: &str) -> Result<TitleScore, TitleError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TitleError::Input("title is required".to_string()));
        }
        let length = char_len(title);
        Ok(TitleScore {
            title: title.to_string(),
            length,
            length_verdict: LengthVerdict::from_length(length),
            sentiment: self.sentiment.score(title)?,
            ctr: self.ctr.predict(title)?,
        })
    }

    fn analyze_competitor(&self, title: &str) -> Result<CompetitorAnalysis, TitleError> {
        let length = char_len(title);
        Ok(CompetitorAnalysis {
            title: title.to_string(),
            sentiment: self.sentiment.score(title)?,
            ctr: self.ctr.predict(title)?,
            length,
            length_verdict: LengthVerdict::from_length(length),
        })
    }
}

/// Short stable id for log lines; raw titles stay out of the logs.
pub fn fingerprint(competitor_title: &str, keyword: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(competitor_title.as_bytes());
    hasher.update([0u8]);
    hasher.update(keyword.as_bytes());
    let digest = hasher.finalize();
    digest.iter().take(6).map(|byte| format!("{:02x}", byte)).collect()
}
