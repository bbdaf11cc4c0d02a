use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::error::TitleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSlot {
    Number,
    PowerWord,
    Keyword,
}

impl TemplateSlot {
    /// Substitution order. The keyword goes last so marker text inside a
    /// keyword is left literal.
    pub const ALL: [TemplateSlot; 3] = [TemplateSlot::Number, TemplateSlot::PowerWord, TemplateSlot::Keyword];

    pub fn marker(self) -> &'static str {
        match self {
            TemplateSlot::Number => "{number}",
            TemplateSlot::PowerWord => "{power_word}",
            TemplateSlot::Keyword => "{keyword}",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template(String);

impl Template {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    pub fn pattern(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList<T> {
    items: Vec<T>,
}

impl<T> WordList<T> {
    pub fn new(name: &str, items: Vec<T>) -> Result<Self, TitleError> {
        if items.is_empty() {
            return Err(TitleError::Catalog(format!("{} list is empty", name)));
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub templates: Vec<String>,
    pub power_words: Vec<String>,
    pub numbers: Vec<u32>,
    pub bracket_suffixes: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            templates: DEFAULT_TEMPLATES.iter().map(|s| s.to_string()).collect(),
            power_words: DEFAULT_POWER_WORDS.iter().map(|s| s.to_string()).collect(),
            numbers: DEFAULT_NUMBERS.to_vec(),
            bracket_suffixes: DEFAULT_BRACKET_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
    power_words: WordList<String>,
    numbers: WordList<u32>,
    bracket_suffixes: WordList<String>,
}

const DEFAULT_TEMPLATES: [&str; 5] = [
    "{number} {power_word} {keyword} Tips Nobody Tells You",
    "The {power_word} Guide to {keyword} [You Need This]",
    "How I {keyword} Like a Pro ({power_word} Method)",
    "{number} {keyword} Hacks That Actually Work",
    "This {power_word} {keyword} Trick Will Change Everything",
];

const DEFAULT_POWER_WORDS: [&str; 10] = [
    "Secret", "Ultimate", "Amazing", "Proven", "Shocking", "Essential", "Complete", "Perfect",
    "Advanced", "Insider",
];

const DEFAULT_NUMBERS: [u32; 4] = [3, 5, 7, 10];

const DEFAULT_BRACKET_SUFFIXES: [&str; 4] = ["[Pro Tip]", "[2024]", "[Must Watch]", "[Step by Step]"];

static BUILTIN: OnceLock<TemplateCatalog> = OnceLock::new();

impl TemplateCatalog {
    pub fn from_config(config: &CatalogConfig) -> Result<Self, TitleError> {
        if config.templates.is_empty() {
            return Err(TitleError::Catalog("template list is empty".to_string()));
        }
        if config.templates.iter().any(|template| template.trim().is_empty()) {
            return Err(TitleError::Catalog("templates must not be blank".to_string()));
        }
        if config.power_words.iter().any(|word| word.trim().is_empty()) {
            return Err(TitleError::Catalog("power words must not be blank".to_string()));
        }
        if config.bracket_suffixes.iter().any(|suffix| suffix.trim().is_empty()) {
            return Err(TitleError::Catalog("bracket suffixes must not be blank".to_string()));
        }

        Ok(Self {
            templates: config.templates.iter().cloned().map(Template::new).collect(),
            power_words: WordList::new("power word", config.power_words.clone())?,
            numbers: WordList::new("number", config.numbers.clone())?,
            bracket_suffixes: WordList::new("bracket suffix", config.bracket_suffixes.clone())?,
        })
    }

    pub fn builtin() -> &'static TemplateCatalog {
        BUILTIN.get_or_init(|| {
            let config = CatalogConfig::default();
            TemplateCatalog {
                templates: config.templates.into_iter().map(Template::new).collect(),
                power_words: WordList { items: config.power_words },
                numbers: WordList { items: config.numbers },
                bracket_suffixes: WordList { items: config.bracket_suffixes },
            }
        })
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn power_words(&self) -> &WordList<String> {
        &self.power_words
    }

    pub fn numbers(&self) -> &WordList<u32> {
        &self.numbers
    }

    pub fn bracket_suffixes(&self) -> &WordList<String> {
        &self.bracket_suffixes
    }

    pub fn contains_power_word(&self, title: &str) -> bool {
        self.find_power_word(title).is_some()
    }

    /// First power word, in catalog order, that appears anywhere in `title`
    /// ignoring ASCII case. Returns the catalog index and the byte span of
    /// the occurrence in `title`.
    pub fn find_power_word(&self, title: &str) -> Option<(usize, std::ops::Range<usize>)> {
        let haystack = title.to_ascii_lowercase();
        self.power_words
            .items()
            .iter()
            .enumerate()
            .find_map(|(idx, word)| {
                let needle = word.to_ascii_lowercase();
                haystack
                    .find(&needle)
                    .map(|start| (idx, start..start + needle.len()))
            })
    }
}
