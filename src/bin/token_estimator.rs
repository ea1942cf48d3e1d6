//! token-estimator — 估算一组文件或清单条目提交给 Gemini 模型时的输入 Token 数量
//!
//! Usage:
//!   token-estimator [OPTIONS] [PATHS]...
//!   token-estimator --manifest items.yaml --model gemini-2.5 --json

use std::path::{Path, PathBuf};

use ai_token_estimator::config::CONFIG_ENV_VAR;
use ai_token_estimator::extract::{FsExtractor, RawItem};
use ai_token_estimator::tokens::{Bucket, CostEstimate, ItemContribution, TokenBreakdown};
use ai_token_estimator::types::{ExtractionState, Item, ModelVersion, ResolutionTier};
use ai_token_estimator::{CalculatorSession, Configuration};
use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "token-estimator", version, about = "Estimate Gemini input tokens for text, code, images, video, audio and PDF")]
struct Cli {
    /// Files to estimate
    paths: Vec<PathBuf>,

    /// Model generation: gemini-2.5 or gemini-3.0
    #[arg(long)]
    model: Option<ModelVersion>,

    /// Default image / PDF page resolution tier (gemini-3.0): low, medium, high
    #[arg(long)]
    tier: Option<ResolutionTier>,

    /// Video frame sampling rate (gemini-3.0)
    #[arg(long)]
    fps: Option<f64>,

    /// YAML configuration file
    #[arg(long, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// YAML list of items with declared metadata
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    model: ModelVersion,
    breakdown: &'a TokenBreakdown,
    context_share_percent: f64,
    cost: CostEstimate,
    items: Vec<ItemReport<'a>>,
}

#[derive(Debug, Serialize)]
struct ItemReport<'a> {
    #[serde(flatten)]
    item: &'a Item,
    contribution: Option<ItemContribution>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let mut raws = Vec::new();
    if let Some(manifest) = &cli.manifest {
        raws.extend(load_manifest(manifest).await?);
    }
    for path in &cli.paths {
        raws.push(raw_from_path(path).await);
    }
    if raws.is_empty() {
        bail!("no inputs: pass file paths or --manifest <file>");
    }

    let mut session = CalculatorSession::with_config(config);
    session.ingest(raws, &FsExtractor::new()).await;

    if cli.json {
        let report = Report {
            model: session.model_version(),
            breakdown: session.breakdown(),
            context_share_percent: session.context_share(),
            cost: session.cost_estimate(),
            items: session
                .items()
                .iter()
                .map(|item| ItemReport {
                    item,
                    contribution: session.item_contribution(item.id),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&session);
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> anyhow::Result<Configuration> {
    let mut config = match &cli.config {
        Some(path) => Configuration::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Configuration::default(),
    };
    if let Some(model) = cli.model {
        config.set_model_version(model);
    }
    if let Some(tier) = cli.tier {
        config.set_default_resolution_tier(tier);
    }
    if let Some(fps) = cli.fps {
        config.set_video_fps(fps)?;
    }
    Ok(config)
}

async fn load_manifest(path: &Path) -> anyhow::Result<Vec<RawItem>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading manifest {}", path.display()))?;
    let items: Vec<RawItem> = serde_yaml::from_str(&content)
        .with_context(|| format!("parsing manifest {}", path.display()))?;
    Ok(items)
}

// An unreadable path still becomes an item so that it shows up as failed.
async fn raw_from_path(path: &Path) -> RawItem {
    match RawItem::from_path(path).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot stat input");
            RawItem::new(path.display().to_string(), "", 0).with_path(path)
        }
    }
}

fn print_report(session: &CalculatorSession) {
    let breakdown = session.breakdown();
    println!("Model: {}", session.model_version());
    if session.model_version().uses_resolution_tiers() {
        println!(
            "Default tier: {}  Video sampling: {} fps",
            session.default_resolution_tier(),
            session.video_fps()
        );
    }
    println!();
    println!("Total input tokens: {}", breakdown.total);
    println!(
        "  ≈ {:.2}% of 128k context, estimated cost {}",
        session.context_share(),
        session.cost_estimate().format()
    );
    println!();
    for bucket in Bucket::ALL {
        let n = breakdown.per_category.get(bucket);
        if n > 0 {
            println!("  {:<14} {:>10}", bucket.label(), n);
        }
    }
    println!();
    println!("=== Items ===");
    for item in session.items() {
        let tokens = session
            .item_contribution(item.id)
            .map(|c| c.tokens.to_string())
            .unwrap_or_else(|| "-".to_string());
        let state = match &item.state {
            ExtractionState::Failed { reason } => format!("failed: {reason}"),
            other => other.label().to_string(),
        };
        println!(
            "  {:<32} {:<6} {:>10} {:>10}  {}",
            item.name,
            item.category.as_str(),
            item.display_size(),
            tokens,
            state
        );
    }
}
