//! News sources.
//!
//! Scraping itself is a collaborator outside this core: a source is any
//! implementation returning a list of articles for a query. The fixture
//! source reads pre-scraped articles from a JSON file, which backs the
//! CLI and tests.

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

use reel_models::Article;

use crate::error::{WorkerError, WorkerResult};

/// Returns articles for a query term.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch(&self, query: &str) -> WorkerResult<Vec<Article>>;
}

/// Source reading a JSON array of articles from disk.
pub struct FixtureSource {
    path: PathBuf,
}

impl FixtureSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl NewsSource for FixtureSource {
    async fn fetch(&self, query: &str) -> WorkerResult<Vec<Article>> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            WorkerError::source_failed(format!("reading {}: {}", self.path.display(), e))
        })?;
        let articles: Vec<Article> = serde_json::from_slice(&bytes).map_err(|e| {
            WorkerError::source_failed(format!("parsing {}: {}", self.path.display(), e))
        })?;
        info!(
            query = query,
            count = articles.len(),
            fixture = %self.path.display(),
            "Loaded articles from fixture"
        );
        Ok(articles)
    }
}
