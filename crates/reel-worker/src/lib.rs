//! News reel generation pipeline.
//!
//! Sequences translation, speech synthesis, caption scheduling, visual
//! track rendering and muxing into one blocking pipeline per request,
//! with scoped temporary assets and typed failure reporting. Also hosts
//! the news aggregation supplements (sentiment classification and
//! comparative analysis over scraped articles).

pub mod analysis;
pub mod classifier;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod source;

pub use analysis::{analyze_articles, final_summary, reel_text, ComparativeAnalysis};
pub use classifier::{LexiconClassifier, SentimentClassifier};
pub use config::WorkerConfig;
pub use error::{Stage, WorkerError, WorkerResult};
pub use pipeline::ReelPipeline;
pub use source::{FixtureSource, NewsSource};
