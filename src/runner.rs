//! Killfeed row analysis over image files using killfeed-cv

use anyhow::{Context, Result};
use killfeed_core::{FrameContext, KillfeedEvent};
use killfeed_cv::{AnalyzerConfig, TemplateLoader, analyze_rows, utils::ImageUtils};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Result for one input row image
#[derive(Debug, Serialize)]
pub struct RowReport {
    pub path: PathBuf,
    pub event: Option<KillfeedEvent>,
}

impl RowReport {
    pub fn render(&self, json: bool) -> String {
        if json {
            return serde_json::to_string(self)
                .unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e));
        }
        match &self.event {
            Some(event) => format!("{}: {}", self.path.display(), event),
            None => format!("{}: no event", self.path.display()),
        }
    }
}

/// Load templates, configuration and rows, then analyze every row
pub fn analyze_files(
    rows: &[PathBuf],
    template_dirs: &[PathBuf],
    config_path: Option<&Path>,
    context: &FrameContext,
) -> Result<Vec<RowReport>> {
    let config = match config_path {
        Some(path) => AnalyzerConfig::from_json_file(path)?,
        None => AnalyzerConfig::default(),
    };

    let loader = template_dirs
        .iter()
        .fold(TemplateLoader::new(), |loader, dir| loader.add_template_dir(dir));
    let library = loader.load_library()?;
    info!(
        templates = library.len(),
        width = library.width(),
        height = library.height(),
        "loaded icon templates"
    );

    let images = rows
        .iter()
        .map(|path| {
            ImageUtils::load_rgb(path).with_context(|| format!("Failed to load row: {:?}", path))
        })
        .collect::<Result<Vec<_>>>()?;

    let events = analyze_rows(&images, &config, &library, context)?;

    let detected = events.iter().flatten().count();
    info!(rows = images.len(), detected, "analysis completed");

    Ok(rows
        .iter()
        .cloned()
        .zip(events)
        .map(|(path, event)| RowReport { path, event })
        .collect())
}
