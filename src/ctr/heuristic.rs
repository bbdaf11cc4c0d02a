use serde::Serialize;
use std::sync::Arc;

use crate::catalog::TemplateCatalog;
use crate::ctr::{round_one_decimal, CtrPredictor, CtrResult};
use crate::error::TitleError;
use crate::length::char_len;

pub const CTR_MIN: f64 = 1.0;
pub const CTR_MAX: f64 = 12.0;

const BASE: f64 = 3.0;
const LENGTH_PEAK: f64 = 50.0;
const LENGTH_WEIGHT: f64 = 3.0;
const POWER_WORD_WEIGHT: f64 = 2.0;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CtrSignals {
    pub length_score: f64,
    pub power_word_score: f64,
    pub number_score: f64,
    pub question_score: f64,
}

impl CtrSignals {
    pub fn raw(&self) -> f64 {
        BASE + self.length_score * LENGTH_WEIGHT
            + self.power_word_score * POWER_WORD_WEIGHT
            + self.number_score
            + self.question_score
    }
}

#[derive(Debug, Clone)]
pub struct HeuristicCtr {
    catalog: Arc<TemplateCatalog>,
}

impl HeuristicCtr {
    pub fn new(catalog: Arc<TemplateCatalog>) -> Self {
        Self { catalog }
    }

    pub fn signals(&self, title: &str) -> CtrSignals {
        let length = char_len(title) as f64;
        let length_score = (1.0 - (length - LENGTH_PEAK).abs() / LENGTH_PEAK).max(0.0);

        let power_word_score = if self.catalog.contains_power_word(title) {
            0.5
        } else {
            0.0
        };

        let has_number = title.split_whitespace().any(is_numeric_token);
        let number_score = if has_number { 0.3 } else { 0.0 };

        let question_score = if title.ends_with('?') { 0.4 } else { 0.0 };

        CtrSignals {
            length_score,
            power_word_score,
            number_score,
            question_score,
        }
    }

    pub fn value(&self, title: &str) -> f64 {
        round_one_decimal(self.signals(title).raw().clamp(CTR_MIN, CTR_MAX))
    }
}

impl CtrPredictor for HeuristicCtr {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn predict(&self, title: &str) -> Result<CtrResult, TitleError> {
        Ok(CtrResult::from_value(self.value(title)))
    }
}

pub fn is_numeric_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}
