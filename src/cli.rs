//! Headless command-line front end over the orchestrator.
//!
//! Parsing lives in [`Cli`]; [`build_orchestrator`] wires config, source,
//! dataset and favorites together; [`run`] executes one subcommand and
//! writes its output to any `Write`, so harnesses can capture it.

use anyhow::Context;
use clap::{Parser, Subcommand};
use pantry_core::config::Config;
use pantry_core::dataset;
use pantry_core::favorites::JsonFileStore;
use pantry_core::source::{OfflineSource, SourceHandle};
use pantry_core::types::{category_labels, CategoryFilter, DifficultyFilter, FilterCriteria, Recipe, RecordId};
use pantry_core::{CatalogView, Settings, SourceOrchestrator};
use pantry_sources::HttpSource;
use std::io::Write;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "pantry", about = "Browse and search a recipe catalog")]
pub struct Cli {
    /// Recipe API base URL (overrides `[source] base_url`).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Skip the probe and work from the local dataset.
    #[arg(long, global = true)]
    pub offline: bool,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Write debug logs to $TMPDIR/pantry-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List recipes matching the given filters.
    List {
        #[arg(long, short, default_value = "")]
        search: String,
        #[arg(long, short, default_value = "All Categories")]
        category: CategoryFilter,
        #[arg(long, short, default_value = "All")]
        difficulty: DifficultyFilter,
        /// Maximum cooking time in minutes, inclusive.
        #[arg(long, short)]
        max_time: Option<u32>,
    },
    /// Incremental search, as a search box would issue it.
    Live { query: String },
    /// Query completions.
    Suggest { query: String },
    /// Toggle a recipe's favorite state.
    Favorite { id: String },
    /// Catalog statistics.
    Stats,
    /// Category picker labels.
    Categories,
}

/// Build an orchestrator from the command line and the loaded config.
pub fn build_orchestrator(cli: &Cli, config: &Config) -> anyhow::Result<SourceOrchestrator> {
    let source: SourceHandle = if cli.offline {
        Arc::new(OfflineSource)
    } else {
        match cli.api_url.as_deref() {
            Some(url) => Arc::new(HttpSource::with_timeout(url, config.source.request_timeout())),
            None => Arc::new(HttpSource::from_config(&config.source)),
        }
    };

    let records = dataset::resolve(config.dataset.path.as_deref()).context("loading local dataset")?;
    let favorites = JsonFileStore::with_key(config.favorites.resolved_path(), config.favorites.key.clone());

    Ok(SourceOrchestrator::builder(source)
        .dataset(records)
        .favorites(Box::new(favorites))
        .settings(Settings::from(config))
        .build())
}

/// Run one subcommand against `orchestrator`.
pub async fn run(cli: &Cli, orchestrator: &SourceOrchestrator, out: &mut dyn Write) -> anyhow::Result<()> {
    if !matches!(cli.command, Command::Categories) {
        orchestrator.initialize().await;
    }

    match &cli.command {
        Command::List {
            search,
            category,
            difficulty,
            max_time,
        } => {
            let criteria = FilterCriteria {
                search: search.clone(),
                category: *category,
                difficulty: *difficulty,
                max_time: max_time.unwrap_or(orchestrator.criteria().max_time),
            };
            let records = orchestrator.fetch_records(&criteria).await;
            print_records(cli, out, &records, &orchestrator.snapshot())?;
        }
        Command::Live { query } => {
            let records = orchestrator.live_search_now(query).await;
            print_records(cli, out, &records, &orchestrator.snapshot())?;
        }
        Command::Suggest { query } => {
            let suggestions = orchestrator.suggestions_for(query).await;
            if cli.json {
                serde_json::to_writer_pretty(&mut *out, &suggestions)?;
                writeln!(out)?;
            } else {
                for s in &suggestions {
                    writeln!(out, "{s}")?;
                }
            }
        }
        Command::Favorite { id } => {
            let id = RecordId::from(id.as_str());
            let favorite = orchestrator.toggle_favorite(&id);
            if cli.json {
                serde_json::to_writer(&mut *out, &serde_json::json!({ "id": id, "favorite": favorite }))?;
                writeln!(out)?;
            } else {
                let verb = if favorite { "added to" } else { "removed from" };
                writeln!(out, "{id} {verb} favorites")?;
                print_warning(out, &orchestrator.snapshot())?;
            }
        }
        Command::Stats => {
            let stats = orchestrator.stats();
            if cli.json {
                serde_json::to_writer_pretty(&mut *out, &stats)?;
                writeln!(out)?;
            } else {
                writeln!(out, "total:          {}", stats.total)?;
                writeln!(out, "average rating: {:.2}", stats.average_rating)?;
                for (category, n) in &stats.categories {
                    writeln!(out, "  {:<12} {n}", category.as_str())?;
                }
                for (difficulty, n) in &stats.difficulties {
                    writeln!(out, "  {:<12} {n}", difficulty.as_str())?;
                }
            }
        }
        Command::Categories => {
            let labels = category_labels();
            if cli.json {
                serde_json::to_writer(&mut *out, &labels)?;
                writeln!(out)?;
            } else {
                for label in labels {
                    writeln!(out, "{label}")?;
                }
            }
        }
    }
    Ok(())
}

fn print_records(cli: &Cli, out: &mut dyn Write, records: &[Recipe], view: &CatalogView) -> anyhow::Result<()> {
    if cli.json {
        // isFavorite is never part of the record wire shape; add it for display.
        let rows = records
            .iter()
            .map(|r| {
                let mut row = serde_json::to_value(r)?;
                row["isFavorite"] = serde_json::Value::Bool(r.is_favorite);
                Ok(row)
            })
            .collect::<Result<Vec<_>, serde_json::Error>>()?;
        serde_json::to_writer_pretty(&mut *out, &rows)?;
        writeln!(out)?;
        return Ok(());
    }

    for r in records {
        let star = if r.is_favorite { '*' } else { ' ' };
        writeln!(
            out,
            "{star}{:>6}  {:<32} {:<11} {:<6} {:>3} min  {:.1}",
            r.id.as_str(),
            r.title,
            r.category.as_str(),
            r.difficulty.as_str(),
            r.cooking_time,
            r.rating
        )?;
    }
    let mode = view.mode().map(|m| m.to_string()).unwrap_or_else(|| "probing".to_string());
    writeln!(out, "{} recipes ({mode})", records.len())?;
    print_warning(out, view)
}

fn print_warning(out: &mut dyn Write, view: &CatalogView) -> anyhow::Result<()> {
    if let Some(error) = &view.error {
        writeln!(out, "warning: {error}")?;
    }
    Ok(())
}
