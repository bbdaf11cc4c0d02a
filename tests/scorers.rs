use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;

use title_lab::catalog::CatalogConfig;
use title_lab::ctr::{CtrPredictor, CtrRating, LinearCtrModel, TfidfVectorizer, TrainedCtr};
use title_lab::sentiment::{LexiconSentiment, RemoteSentiment, ScoreKind};
use title_lab::{
    AppConfig, SentimentLabel, SentimentScorer, TemplateCatalog, TitleEngine, TitleError,
};

fn vectorizer(terms: &[&str], ngram_max: usize) -> TfidfVectorizer {
    let vocabulary: HashMap<String, usize> = terms
        .iter()
        .enumerate()
        .map(|(idx, term)| (term.to_string(), idx))
        .collect();
    TfidfVectorizer {
        vocabulary,
        idf: vec![1.0; terms.len()],
        lowercase: true,
        ngram_max,
        l2_normalize: true,
    }
}

#[test]
fn lexicon_labels_follow_polarity_sign() {
    let scorer = LexiconSentiment::default();

    let positive = scorer.score("The Best Guide to Perfect Pasta").unwrap();
    assert_eq!(positive.label, SentimentLabel::Positive);
    assert!((positive.score - 1.0).abs() < 1e-6);
    assert_eq!(positive.kind, ScoreKind::Polarity);

    let negative = scorer.score("The Worst Mistake Beginners Make").unwrap();
    assert_eq!(negative.label, SentimentLabel::Negative);
    assert!((negative.score + 0.75).abs() < 1e-6);

    let neutral = scorer.score("How I Edit Videos").unwrap();
    assert_eq!(neutral.label, SentimentLabel::Neutral);
    assert_eq!(neutral.score, 0.0);
}

#[test]
fn lexicon_applies_negation_and_intensifiers() {
    let scorer = LexiconSentiment::default();

    assert!((scorer.polarity("This is not good") + 0.35).abs() < 1e-6);
    assert!((scorer.polarity("very good") - 0.91).abs() < 1e-6);
    assert!((scorer.polarity("Great but boring") + 0.1).abs() < 1e-6);
    // modifier only reaches the next word
    assert!((scorer.polarity("not today, good news") - 0.7).abs() < 1e-6);
}

#[test]
fn lexicon_polarity_is_bounded() {
    let scorer = LexiconSentiment::with_lexicon(vec![("epic".to_string(), 4.0)]);
    let polarity = scorer.polarity("really really epic");
    assert!(polarity <= 1.0);
    assert!((polarity - 1.0).abs() < 1e-6);
}

#[test]
fn backend_labels_map_onto_known_set() {
    assert_eq!(SentimentLabel::from_backend("POSITIVE"), SentimentLabel::Positive);
    assert_eq!(SentimentLabel::from_backend("neg"), SentimentLabel::Negative);
    assert_eq!(SentimentLabel::from_backend("joy"), SentimentLabel::Other("joy".to_string()));
    assert_eq!(SentimentLabel::Other("joy".to_string()).as_str(), "joy");
}

#[test]
fn remote_sentiment_failure_is_a_backend_error() {
    let scorer = RemoteSentiment::new("http://127.0.0.1:9".to_string(), Duration::from_millis(500)).unwrap();

    let err = scorer.score("anything").unwrap_err();
    match err {
        TitleError::ScoringBackend { scorer, .. } => assert_eq!(scorer, "sentiment"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn remote_sentiment_requires_endpoint() {
    let result = RemoteSentiment::new("  ".to_string(), Duration::from_millis(500));
    assert!(matches!(result, Err(TitleError::Config(_))));
}

#[test]
fn trained_ctr_runs_linear_model_over_tfidf() {
    let model = LinearCtrModel {
        intercept: 5.0,
        coefficients: vec![4.0, 2.0, -6.0],
    };
    let ctr = TrainedCtr::new(vectorizer(&["secret", "tips", "boring"], 1), model).unwrap();

    let strong = ctr.predict("Secret Tips").unwrap();
    assert!((strong.value - 9.2).abs() < 1e-6);
    assert_eq!(strong.rating, CtrRating::Good);

    let weak = ctr.predict("So boring").unwrap();
    assert!((weak.value + 1.0).abs() < 1e-6);
    assert_eq!(weak.rating, CtrRating::Bad);

    let unknown = ctr.predict("hello world").unwrap();
    assert!((unknown.value - 5.0).abs() < 1e-6);
    assert_eq!(unknown.rating, CtrRating::Avg);
}

#[test]
fn vectorizer_counts_bigrams() {
    let vectorizer = vectorizer(&["pro", "pro tip"], 2);
    let mut features = vectorizer.transform("A Pro Tip");
    features.iter_mut().for_each(|(_, value)| *value = (*value * 1e6).round() / 1e6);

    let expected = (0.5f64).sqrt();
    assert_eq!(features.len(), 2);
    assert_eq!(features[0].0, 0);
    assert_eq!(features[1].0, 1);
    assert!((features[0].1 - expected).abs() < 1e-5);
}

#[test]
fn trained_ctr_rejects_mismatched_artifacts() {
    let model = LinearCtrModel {
        intercept: 0.0,
        coefficients: vec![1.0],
    };
    let result = TrainedCtr::new(vectorizer(&["a1", "b2"], 1), model);
    assert!(matches!(result, Err(TitleError::Config(_))));
}

#[test]
fn engine_loads_trained_ctr_from_artifacts() {
    let dir = TempDir::new().unwrap();
    let model_path = dir.path().join("model.json");
    let vectorizer_path = dir.path().join("vectorizer.json");
    std::fs::write(&model_path, r#"{"intercept": 6.0, "coefficients": [3.0]}"#).unwrap();
    std::fs::write(
        &vectorizer_path,
        r#"{"vocabulary": {"secret": 0}, "idf": [1.0]}"#,
    )
    .unwrap();

    let mut config = AppConfig::default();
    config.ctr.model_path = Some(model_path);
    config.ctr.vectorizer_path = Some(vectorizer_path);

    let engine = TitleEngine::from_config(&config).unwrap();
    assert_eq!(engine.ctr_backend(), "trained");
    let score = engine.score_title("The Secret").unwrap();
    assert!((score.ctr.value - 9.0).abs() < 1e-6);
}

#[test]
fn engine_falls_back_to_heuristic_without_artifacts() {
    let mut config = AppConfig::default();
    config.ctr.model_path = Some(PathBuf::from("/nonexistent/title-lab/model.json"));

    let engine = TitleEngine::from_config(&config).unwrap();
    assert_eq!(engine.ctr_backend(), "heuristic");
}

#[test]
fn engine_rejects_malformed_artifacts() {
    let dir = TempDir::new().unwrap();
    let model_path = dir.path().join("model.json");
    let vectorizer_path = dir.path().join("vectorizer.json");
    std::fs::write(&model_path, "not json").unwrap();
    std::fs::write(&vectorizer_path, r#"{"vocabulary": {}, "idf": [1.0]}"#).unwrap();

    let mut config = AppConfig::default();
    config.ctr.model_path = Some(model_path);
    config.ctr.vectorizer_path = Some(vectorizer_path);

    let result = TitleEngine::from_config(&config);
    assert!(matches!(result, Err(TitleError::Config(_))));
}

#[test]
fn config_parses_partial_toml() {
    let config = AppConfig::from_toml(
        r#"
[generation]
count = 2

[sentiment]
backend = "remote"
endpoint = "http://classifier:9000"
"#,
    )
    .unwrap();

    assert_eq!(config.generation.count, 2);
    assert_eq!(config.sentiment.endpoint, "http://classifier:9000");
    assert_eq!(config.sentiment.timeout_ms, 3000);
    assert!(config.ctr.model_path.is_none());
    assert!(config.catalog.is_none());

    let engine = TitleEngine::from_config(&config).unwrap();
    assert_eq!(engine.sentiment_backend(), "remote");
    assert_eq!(engine.title_count(), 2);
}

#[test]
fn config_rejects_zero_title_count() {
    let config = AppConfig::from_toml("[generation]\ncount = 0\n").unwrap();
    let result = TitleEngine::from_config(&config);
    assert!(matches!(result, Err(TitleError::Config(_))));
}

#[test]
fn config_rejects_unknown_sentiment_backend() {
    let mut config = AppConfig::default();
    config.sentiment.backend = "crystal-ball".to_string();
    assert!(matches!(TitleEngine::from_config(&config), Err(TitleError::Config(_))));
}

#[test]
fn catalog_override_is_validated() {
    let mut catalog = CatalogConfig::default();
    catalog.power_words.clear();
    assert!(matches!(TemplateCatalog::from_config(&catalog), Err(TitleError::Catalog(_))));

    let custom = CatalogConfig {
        templates: vec!["{keyword} explained".to_string()],
        power_words: vec!["Bold".to_string()],
        numbers: vec![1],
        bracket_suffixes: vec!["[New]".to_string()],
    };
    let mut config = AppConfig::default();
    config.catalog = Some(custom);
    let engine = TitleEngine::from_config(&config).unwrap();
    assert_eq!(engine.catalog().templates().len(), 1);
}

#[test]
fn catalog_finds_first_power_word_in_catalog_order() {
    let catalog = TemplateCatalog::builtin();
    let (idx, span) = catalog.find_power_word("An ADVANCED and secret plan").unwrap();
    assert_eq!(idx, 0);
    assert_eq!(&"An ADVANCED and secret plan"[span], "secret");
    assert!(!catalog.contains_power_word("plain words only"));
}
