//! News reel worker binary.
//!
//! Generates one narrated, captioned reel from either literal text or a
//! JSON fixture of scraped articles.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reel_models::{LanguageCode, ReelRequest};
use reel_speech::{GoogleSpeech, GoogleTranslator};
use reel_worker::{
    analyze_articles, final_summary, reel_text, FixtureSource, LexiconClassifier, NewsSource,
    ReelPipeline, WorkerConfig,
};

#[derive(Debug, Default)]
struct Args {
    text: Option<String>,
    articles: Option<PathBuf>,
    query: Option<String>,
    lang: Option<String>,
    out: Option<PathBuf>,
    image: Option<PathBuf>,
    font_size: Option<u32>,
    color: Option<String>,
}

const USAGE: &str = "Usage: reel-worker (--text TEXT | --articles FILE --query TERM) \
--out PATH [--lang CODE] [--image PATH] [--font-size N] [--color COLOR]";

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);

    while let Some(flag) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .with_context(|| format!("missing value for {}", name))
        };
        match flag.as_str() {
            "--text" => args.text = Some(value("--text")?),
            "--articles" => args.articles = Some(PathBuf::from(value("--articles")?)),
            "--query" => args.query = Some(value("--query")?),
            "--lang" => args.lang = Some(value("--lang")?),
            "--out" => args.out = Some(PathBuf::from(value("--out")?)),
            "--image" => args.image = Some(PathBuf::from(value("--image")?)),
            "--font-size" => {
                args.font_size = Some(value("--font-size")?.parse().context("bad --font-size")?)
            }
            "--color" => args.color = Some(value("--color")?),
            "--help" | "-h" => bail!("{}", USAGE),
            other => bail!("unknown flag {:?}\n{}", other, USAGE),
        }
    }

    Ok(args)
}

fn init_tracing() {
    // Colored output for dev, JSON for production.
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("reel_worker=info".parse().expect("static directive"))
        .add_directive("reel_media=info".parse().expect("static directive"))
        .add_directive("reel_speech=info".parse().expect("static directive"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = parse_args()?;
    let out = args.out.clone().with_context(|| USAGE.to_string())?;

    // Assemble narration text from either the fixture or the literal flag.
    let text = match (&args.text, &args.articles) {
        (Some(text), None) => text.clone(),
        (None, Some(fixture)) => {
            let query = args.query.clone().unwrap_or_default();
            let mut articles = FixtureSource::new(fixture).fetch(&query).await?;
            let analysis = analyze_articles(&mut articles, &LexiconClassifier::new());
            info!(
                summary = %final_summary(&query, &analysis),
                common_topics = ?analysis.common_topics,
                "Comparative analysis"
            );
            println!("{}", serde_json::to_string_pretty(&analysis)?);
            reel_text(&articles)
        }
        _ => bail!("exactly one of --text or --articles is required\n{}", USAGE),
    };

    let lang = LanguageCode::new(args.lang.as_deref().unwrap_or("en"))
        .context("invalid --lang code")?;

    let mut request = ReelRequest::new(text, lang, out);
    if let Some(size) = args.font_size {
        request = request.with_font_size(size);
    }
    if let Some(color) = args.color {
        request = request.with_background_color(color);
    }
    if let Some(image) = args.image {
        request = request.with_background_image(image);
    }

    let config = WorkerConfig::from_env();
    info!("Worker config: {:?}", config);

    let pipeline = ReelPipeline::new(
        Arc::new(GoogleTranslator::with_source(config.source_language.clone())),
        Arc::new(GoogleSpeech::new()),
        config,
    );

    let path = pipeline.generate(&request).await?;
    println!("{}", path.display());
    Ok(())
}
