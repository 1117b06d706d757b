//! Sentiment classification over article summaries.
//!
//! The classifier is an injected collaborator so the aggregation layer
//! can run against a stub in tests or a model-backed implementation in
//! production. The shipped default is a small keyword lexicon that works
//! offline.

use reel_models::Sentiment;

/// Labels a piece of text with a sentiment.
pub trait SentimentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Sentiment;
}

const POSITIVE_WORDS: &[&str] = &[
    "growth", "success", "breakthrough", "record", "surge", "win", "wins",
    "gain", "gains", "profit", "soar", "soars", "strong", "launch", "boost",
    "innovative", "partnership", "expand", "expands", "improve", "improves",
];

const NEGATIVE_WORDS: &[&str] = &[
    "loss", "losses", "decline", "drop", "drops", "fail", "fails", "failure",
    "lawsuit", "fraud", "crash", "layoff", "layoffs", "scandal", "weak",
    "plunge", "plunges", "risk", "warning", "cut", "cuts", "breach",
];

/// Keyword-count classifier; ties and no-matches come out neutral.
#[derive(Debug, Clone, Default)]
pub struct LexiconClassifier;

impl LexiconClassifier {
    pub fn new() -> Self {
        Self
    }

    fn count_matches(text: &str, words: &[&str]) -> usize {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .filter(|token| words.contains(&token.to_lowercase().as_str()))
            .count()
    }
}

impl SentimentClassifier for LexiconClassifier {
    fn classify(&self, text: &str) -> Sentiment {
        let positive = Self::count_matches(text, POSITIVE_WORDS);
        let negative = Self::count_matches(text, NEGATIVE_WORDS);

        match positive.cmp(&negative) {
            std::cmp::Ordering::Greater => Sentiment::Positive,
            std::cmp::Ordering::Less => Sentiment::Negative,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        }
    }
}
