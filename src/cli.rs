//! Command-line front end.
//!
//! Reads an events file, lays it out over a date range and prints the result
//! either as a text listing or as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::models::event::Event;
use crate::models::layout::Segment;
use crate::models::range::ViewRange;
use crate::models::resource::{Resource, ResourceSet};
use crate::models::settings::LayoutConfig;
use crate::services::engine::{LayoutEngine, LayoutPass};
use crate::services::header::HeaderColumn;
use crate::services::render::TextRenderer;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Command-line arguments for the calendar layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the events file (JSON)
    #[arg(short, long)]
    pub events: PathBuf,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// First day of the view
    #[arg(long)]
    pub from: NaiveDate,

    /// Number of consecutive days shown
    #[arg(long, default_value_t = 1)]
    pub days: usize,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Contents of an events file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventsFile {
    #[serde(default)]
    pub resources: Vec<Resource>,
    pub events: Vec<Event>,
}

impl EventsFile {
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read events file {}", path.display()))?;
        serde_json::from_str(&source)
            .with_context(|| format!("Failed to parse events file {}", path.display()))
    }
}

#[derive(Serialize)]
struct JsonPass<'a> {
    columns: &'a [HeaderColumn],
    segments: &'a [Segment],
    issues: Vec<String>,
}

impl<'a> From<&'a LayoutPass> for JsonPass<'a> {
    fn from(pass: &'a LayoutPass) -> Self {
        Self {
            columns: &pass.columns,
            segments: &pass.segments,
            issues: pass.issues.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Run one layout pass and return the formatted output.
pub fn run(args: &Args) -> Result<String> {
    let config = match &args.config {
        Some(path) => LayoutConfig::load(path)?,
        None => LayoutConfig::by_day(),
    };
    let file = EventsFile::load(&args.events)?;
    log::info!(
        "Laying out {} events over {} day(s) from {}",
        file.events.len(),
        args.days,
        args.from
    );

    let range = ViewRange::consecutive(args.from, args.days).context("Invalid date range")?;
    let engine = LayoutEngine::new(config, ResourceSet::new(file.resources))
        .context("Invalid layout configuration")?;
    let pass = engine.layout(&file.events, &range);

    for issue in &pass.issues {
        log::warn!("{}", issue);
    }

    match args.format {
        OutputFormat::Text => {
            let mut renderer = TextRenderer::new();
            pass.render_into(&mut renderer);
            Ok(renderer.finish())
        }
        OutputFormat::Json => serde_json::to_string_pretty(&JsonPass::from(&pass))
            .context("Failed to serialize layout"),
    }
}
