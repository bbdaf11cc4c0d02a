use std::collections::HashSet;
use tracing::{debug, warn};

use crate::catalog::{Template, TemplateCatalog, TemplateSlot};
use crate::error::TitleError;
use crate::random::{choose, Randomness};

pub const DEFAULT_TITLE_COUNT: usize = 3;

#[derive(Debug, Clone)]
pub struct GeneratedDraft {
    pub text: String,
    pub template_index: usize,
}

#[derive(Debug, Clone, Default)]
pub struct GenerationBatch {
    pub drafts: Vec<GeneratedDraft>,
    pub warnings: Vec<String>,
}

impl GenerationBatch {
    pub fn titles(&self) -> Vec<String> {
        self.drafts.iter().map(|draft| draft.text.clone()).collect()
    }
}

pub struct TitleGenerator<'a> {
    catalog: &'a TemplateCatalog,
}

impl<'a> TitleGenerator<'a> {
    pub fn new(catalog: &'a TemplateCatalog) -> Self {
        Self { catalog }
    }

    pub fn generate(
        &self,
        keyword: &str,
        count: usize,
        rng: &mut dyn Randomness,
    ) -> Result<GenerationBatch, TitleError> {
        let templates = self.catalog.templates();
        if count > templates.len() {
            return Err(TitleError::GenerationCapacity {
                requested: count,
                available: templates.len(),
            });
        }

        let mut batch = GenerationBatch::default();
        if let Some(marker) = marker_in(keyword) {
            let message = format!(
                "keyword contains the literal marker {}; it is inserted verbatim",
                marker
            );
            warn!(marker, "keyword contains template marker text");
            batch.warnings.push(message);
        }

        let mut used: HashSet<usize> = HashSet::new();
        while batch.drafts.len() < count {
            let template_index = rng.pick_index(templates.len());
            if template_index >= templates.len() || !used.insert(template_index) {
                continue;
            }

            let text = self.fill(&templates[template_index], keyword, rng);
            debug!(template_index, chars = text.chars().count(), "generated title");
            batch.drafts.push(GeneratedDraft { text, template_index });
        }

        Ok(batch)
    }

    pub fn fill(&self, template: &Template, keyword: &str, rng: &mut dyn Randomness) -> String {
        let mut text = template.pattern().to_string();
        for slot in TemplateSlot::ALL {
            if !text.contains(slot.marker()) {
                continue;
            }
            let value = match slot {
                TemplateSlot::Number => choose(rng, self.catalog.numbers().items())
                    .map(|number| number.to_string())
                    .unwrap_or_default(),
                TemplateSlot::PowerWord => choose(rng, self.catalog.power_words().items())
                    .cloned()
                    .unwrap_or_default(),
                TemplateSlot::Keyword => keyword.to_string(),
            };
            text = text.replace(slot.marker(), &value);
        }
        text
    }
}

fn marker_in(value: &str) -> Option<&'static str> {
    TemplateSlot::ALL
        .iter()
        .map(|slot| slot.marker())
        .find(|marker| value.contains(marker))
}
