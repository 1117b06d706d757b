//! Scraped news articles and sentiment labels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentiment label attached to an article summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        };
        write!(f, "{}", s)
    }
}

/// One scraped news article, as returned by a news source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Headline.
    pub title: String,
    /// Short summary used for narration and classification.
    pub summary: String,
    /// Link to the full article.
    pub link: String,
    /// Detected topic labels (never empty; "General" when nothing matched).
    #[serde(default)]
    pub topics: Vec<String>,
    /// Sentiment of the summary.
    #[serde(default)]
    pub sentiment: Sentiment,
    /// When the article was fetched.
    #[serde(default = "Utc::now")]
    pub fetched_at: DateTime<Utc>,
}

impl Article {
    /// Create an article with a neutral sentiment and no topics.
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            link: link.into(),
            topics: Vec::new(),
            sentiment: Sentiment::Neutral,
            fetched_at: Utc::now(),
        }
    }

    /// Whether the article carries a usable summary.
    pub fn has_summary(&self) -> bool {
        !self.summary.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_display() {
        assert_eq!(Sentiment::Positive.to_string(), "Positive");
        assert_eq!(Sentiment::default(), Sentiment::Neutral);
    }

    #[test]
    fn test_article_summary_check() {
        let mut article = Article::new("Title", "A summary.", "https://example.com/a");
        assert!(article.has_summary());
        article.summary = "  ".to_string();
        assert!(!article.has_summary());
    }

    #[test]
    fn test_article_serde_defaults() {
        let json = r#"{"title":"T","summary":"S","link":"L"}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert!(article.topics.is_empty());
        assert_eq!(article.sentiment, Sentiment::Neutral);
    }
}
