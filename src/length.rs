use serde::{Deserialize, Serialize};

use crate::catalog::TemplateCatalog;
use crate::random::{choose, Randomness};

pub const MIN_LENGTH: usize = 40;
pub const MAX_LENGTH: usize = 65;
pub const TRIM_TARGET: usize = 60;
pub const IDEAL_MAX: usize = 60;
const MIN_WORDS_FOR_TRIM: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthVerdict {
    #[serde(rename = "ideal")]
    Ideal,
    #[serde(rename = "too short")]
    TooShort,
    #[serde(rename = "too long")]
    TooLong,
}

impl LengthVerdict {
    pub fn from_length(length: usize) -> Self {
        if length < MIN_LENGTH {
            LengthVerdict::TooShort
        } else if length > IDEAL_MAX {
            LengthVerdict::TooLong
        } else {
            LengthVerdict::Ideal
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LengthVerdict::Ideal => "ideal",
            LengthVerdict::TooShort => "too short",
            LengthVerdict::TooLong => "too long",
        }
    }
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

pub struct LengthOptimizer<'a> {
    catalog: &'a TemplateCatalog,
}

impl<'a> LengthOptimizer<'a> {
    pub fn new(catalog: &'a TemplateCatalog) -> Self {
        Self { catalog }
    }

    /// Single pass: short titles get one bracket suffix, long titles lose
    /// random interior words. A padded title is not re-checked.
    pub fn optimize(&self, title: &str, rng: &mut dyn Randomness) -> String {
        let length = char_len(title);
        if length < MIN_LENGTH {
            return match choose(rng, self.catalog.bracket_suffixes().items()) {
                Some(suffix) => format!("{} {}", title, suffix),
                None => title.to_string(),
            };
        }
        if length > MAX_LENGTH {
            return trim_interior_words(title, rng);
        }
        title.to_string()
    }
}

/// Removes words other than the first two and the last until the title fits
/// `TRIM_TARGET` or fewer than five words remain. Very long single words can
/// leave the result above the target.
fn trim_interior_words(title: &str, rng: &mut dyn Randomness) -> String {
    let mut words: Vec<&str> = title.split_whitespace().collect();
    while joined_len(&words) > TRIM_TARGET && words.len() >= MIN_WORDS_FOR_TRIM {
        let last_interior = words.len() as i64 - 2;
        let idx = rng.int_in_range(2, last_interior).clamp(2, last_interior) as usize;
        words.remove(idx);
    }
    words.join(" ")
}

fn joined_len(words: &[&str]) -> usize {
    if words.is_empty() {
        return 0;
    }
    words.iter().map(|word| char_len(word)).sum::<usize>() + words.len() - 1
}
