use tracing::debug;

use crate::catalog::TemplateCatalog;
use crate::ctr::heuristic::is_numeric_token;
use crate::random::{choose, Randomness};

pub const MAX_VARIANTS: usize = 4;

const NUMBER_DELTAS: [i64; 3] = [1, 2, -1];
const PREFIX_NUMBERS: [u32; 3] = [3, 5, 7];

/// A/B phrasings of one title. Each rule works on the original title, not on
/// the output of the previous rule.
pub struct VariantSynthesizer<'a> {
    catalog: &'a TemplateCatalog,
}

impl<'a> VariantSynthesizer<'a> {
    pub fn new(catalog: &'a TemplateCatalog) -> Self {
        Self { catalog }
    }

    pub fn synthesize(&self, title: &str, rng: &mut dyn Randomness) -> Vec<String> {
        let candidates = [
            Some(flip_question(title)),
            Some(nudge_numbers(title, rng)).filter(|nudged| nudged != title),
            self.swap_power_word(title, rng),
            Some(self.toggle_bracket(title, rng)),
        ];

        let mut variants: Vec<String> = Vec::with_capacity(MAX_VARIANTS);
        for candidate in candidates.into_iter().flatten() {
            if !variants.contains(&candidate) {
                variants.push(candidate);
            }
        }
        variants.truncate(MAX_VARIANTS);
        debug!(count = variants.len(), "synthesized variants");
        variants
    }

    pub fn swap_power_word(&self, title: &str, rng: &mut dyn Randomness) -> Option<String> {
        let (found, span) = self.catalog.find_power_word(title)?;
        let alternatives: Vec<&String> = self
            .catalog
            .power_words()
            .items()
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != found)
            .map(|(_, word)| word)
            .collect();
        let replacement = choose(rng, &alternatives)?;

        let mut swapped = String::with_capacity(title.len() + replacement.len());
        swapped.push_str(&title[..span.start]);
        swapped.push_str(replacement);
        swapped.push_str(&title[span.end..]);
        Some(swapped)
    }

    pub fn toggle_bracket(&self, title: &str, rng: &mut dyn Randomness) -> String {
        if let Some(stripped) = remove_first_bracket(title) {
            return stripped;
        }
        match choose(rng, self.catalog.bracket_suffixes().items()) {
            Some(suffix) => format!("{} {}", title, suffix),
            None => title.to_string(),
        }
    }
}

pub fn flip_question(title: &str) -> String {
    if title.contains('?') {
        title.replace('?', "!")
    } else {
        format!("{}?", title)
    }
}

pub fn nudge_numbers(title: &str, rng: &mut dyn Randomness) -> String {
    if !title.split_whitespace().any(is_numeric_token) {
        let prefix = choose(rng, &PREFIX_NUMBERS).copied().unwrap_or(PREFIX_NUMBERS[0]);
        return format!("{} {}", prefix, title);
    }

    let mut output = String::with_capacity(title.len() + 4);
    let mut digits = String::new();
    for ch in title.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        if !digits.is_empty() {
            output.push_str(&shift_digit_run(&digits, rng));
            digits.clear();
        }
        output.push(ch);
    }
    if !digits.is_empty() {
        output.push_str(&shift_digit_run(&digits, rng));
    }
    output
}

fn shift_digit_run(digits: &str, rng: &mut dyn Randomness) -> String {
    let delta = choose(rng, &NUMBER_DELTAS).copied().unwrap_or(1);
    digits
        .parse::<i128>()
        .ok()
        .and_then(|value| value.checked_add(i128::from(delta)))
        .map(|value| value.to_string())
        .unwrap_or_else(|| digits.to_string())
}

/// Drops the first `[...]` span (shortest match) and closes the gap.
pub fn remove_first_bracket(title: &str) -> Option<String> {
    let open = title.find('[')?;
    let close = open + title[open..].find(']')?;
    let before = title[..open].trim_end();
    let after = title[close + 1..].trim_start();
    let joined = match (before.is_empty(), after.is_empty()) {
        (true, _) => after.to_string(),
        (_, true) => before.to_string(),
        _ => format!("{} {}", before, after),
    };
    Some(joined.trim().to_string())
}
