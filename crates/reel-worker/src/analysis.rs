//! Comparative analysis over a set of scraped articles.
//!
//! Aggregates sentiment counts and topic overlap across articles for a
//! query term and produces the narration text and one-line outlook
//! summary shown alongside a reel.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use reel_models::{Article, Sentiment};

use crate::classifier::SentimentClassifier;

/// Sentiment counts across a set of articles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentDistribution {
    /// The sentiment with the highest count. Ties resolve in order:
    /// positive, then negative, then neutral.
    pub fn dominant(&self) -> Sentiment {
        if self.positive >= self.negative && self.positive >= self.neutral {
            Sentiment::Positive
        } else if self.negative >= self.neutral {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

/// Aggregated view of one query's article set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparativeAnalysis {
    pub distribution: SentimentDistribution,
    /// Topics present in every article (sorted, deduplicated).
    pub common_topics: Vec<String>,
    /// All topics seen across the set (sorted, deduplicated).
    pub all_topics: Vec<String>,
}

/// Classify and aggregate a set of articles.
///
/// Each article's sentiment is (re)computed from its summary with the
/// injected classifier.
pub fn analyze_articles(
    articles: &mut [Article],
    classifier: &dyn SentimentClassifier,
) -> ComparativeAnalysis {
    let mut distribution = SentimentDistribution::default();

    for article in articles.iter_mut() {
        article.sentiment = classifier.classify(&article.summary);
        match article.sentiment {
            Sentiment::Positive => distribution.positive += 1,
            Sentiment::Negative => distribution.negative += 1,
            Sentiment::Neutral => distribution.neutral += 1,
        }
    }

    let mut common: Option<BTreeSet<String>> = None;
    let mut all = BTreeSet::new();
    for article in articles.iter() {
        let topics: BTreeSet<String> = article.topics.iter().cloned().collect();
        all.extend(topics.iter().cloned());
        common = Some(match common {
            Some(c) => c.intersection(&topics).cloned().collect(),
            None => topics,
        });
    }

    ComparativeAnalysis {
        distribution,
        common_topics: common.unwrap_or_default().into_iter().collect(),
        all_topics: all.into_iter().collect(),
    }
}

/// One-line outlook summary for the query term.
pub fn final_summary(query: &str, analysis: &ComparativeAnalysis) -> String {
    let dominant = analysis.distribution.dominant();
    let mut summary = format!(
        "{}'s latest news coverage is mostly {}.",
        query,
        dominant.to_string().to_lowercase()
    );
    summary.push_str(match dominant {
        Sentiment::Positive => " Potential stock growth expected.",
        Sentiment::Negative => " Potential challenges ahead.",
        Sentiment::Neutral => " Market outlook remains neutral.",
    });
    summary
}

/// Join non-empty article summaries into one narration string.
pub fn reel_text(articles: &[Article]) -> String {
    articles
        .iter()
        .filter(|a| a.has_summary())
        .map(|a| a.summary.trim())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::LexiconClassifier;

    fn articles() -> Vec<Article> {
        let mut a = Article::new("A", "Record growth and a strong launch", "https://e.com/a");
        a.topics = vec!["AI".to_string(), "Technology".to_string()];
        let mut b = Article::new("B", "Shares plunge after layoffs", "https://e.com/b");
        b.topics = vec!["Technology".to_string(), "Finance".to_string()];
        let mut c = Article::new("C", "Quarterly report published", "https://e.com/c");
        c.topics = vec!["Technology".to_string()];
        vec![a, b, c]
    }

    #[test]
    fn test_distribution_and_common_topics() {
        let mut set = articles();
        let analysis = analyze_articles(&mut set, &LexiconClassifier::new());

        assert_eq!(analysis.distribution.positive, 1);
        assert_eq!(analysis.distribution.negative, 1);
        assert_eq!(analysis.distribution.neutral, 1);
        assert_eq!(analysis.common_topics, vec!["Technology".to_string()]);
        assert_eq!(
            analysis.all_topics,
            vec!["AI".to_string(), "Finance".to_string(), "Technology".to_string()]
        );
        // Sentiments were written back onto the articles.
        assert_eq!(set[0].sentiment, Sentiment::Positive);
        assert_eq!(set[1].sentiment, Sentiment::Negative);
    }

    #[test]
    fn test_empty_set() {
        let analysis = analyze_articles(&mut [], &LexiconClassifier::new());
        assert_eq!(analysis.distribution, SentimentDistribution::default());
        assert!(analysis.common_topics.is_empty());
    }

    #[test]
    fn test_dominant_tie_order() {
        let even = SentimentDistribution {
            positive: 1,
            negative: 1,
            neutral: 1,
        };
        assert_eq!(even.dominant(), Sentiment::Positive);

        let no_positive = SentimentDistribution {
            positive: 0,
            negative: 2,
            neutral: 2,
        };
        assert_eq!(no_positive.dominant(), Sentiment::Negative);
    }

    #[test]
    fn test_final_summary_phrasing() {
        let analysis = ComparativeAnalysis {
            distribution: SentimentDistribution {
                positive: 3,
                negative: 1,
                neutral: 0,
            },
            common_topics: vec![],
            all_topics: vec![],
        };
        let summary = final_summary("Acme", &analysis);
        assert_eq!(
            summary,
            "Acme's latest news coverage is mostly positive. Potential stock growth expected."
        );
    }

    #[test]
    fn test_reel_text_skips_blank_summaries() {
        let mut set = articles();
        set[1].summary = "  ".to_string();
        let text = reel_text(&set);
        assert!(text.contains("Record growth"));
        assert!(text.contains("Quarterly report"));
        assert!(!text.contains("plunge"));
    }
}
