pub mod heuristic;
pub mod model;

use serde::{Deserialize, Serialize};

use crate::error::TitleError;

pub use heuristic::HeuristicCtr;
pub use model::{LinearCtrModel, TfidfVectorizer, TrainedCtr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CtrRating {
    Good,
    Avg,
    Bad,
}

impl CtrRating {
    pub fn from_value(value: f64) -> Self {
        if value > 7.0 {
            CtrRating::Good
        } else if value > 4.0 {
            CtrRating::Avg
        } else {
            CtrRating::Bad
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CtrRating::Good => "good",
            CtrRating::Avg => "avg",
            CtrRating::Bad => "bad",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CtrResult {
    pub value: f64,
    pub rating: CtrRating,
}

impl CtrResult {
    pub fn from_value(value: f64) -> Self {
        Self {
            value,
            rating: CtrRating::from_value(value),
        }
    }
}

pub trait CtrPredictor: Send + Sync {
    fn name(&self) -> &'static str;

    fn predict(&self, title: &str) -> Result<CtrResult, TitleError>;
}

pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
