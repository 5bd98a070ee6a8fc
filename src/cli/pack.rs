use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use console::style;
use serde_json::Value;

use obs_pack_core::{load_document, walk, Staging, MARKER};

#[derive(Debug)]
pub struct PackReport {
    pub archive: PathBuf,
    pub references: usize,
    /// File names of the staged assets, sorted.
    pub assets: Vec<String>,
}

pub fn run(scenes: &Path, output_dir: &Path) -> Result<PackReport> {
    let mut document = load_document(scenes)
        .with_context(|| format!("failed to load scene collection {}", scenes.display()))?;
    let archive = output_dir.join(archive_name(scenes)?);

    let mut staging = Staging::new()?;
    let references = stage_references(&mut document, &mut staging)?;
    staging.write_document(&document)?;

    let entries = staging
        .archive(&archive)
        .with_context(|| format!("failed to write {}", archive.display()))?;
    tracing::info!("wrote {entries} entries to {}", archive.display());

    let assets = staging
        .entries()
        .map(|(name, source)| {
            tracing::debug!("packed {} from {}", name, source.display());
            name.to_string()
        })
        .collect();

    eprintln!(
        "{} Zipped and exported as '{}'",
        style("✓").green(),
        archive
            .file_name()
            .map_or_else(|| archive.display().to_string(), |n| n.to_string_lossy().into_owned())
    );

    Ok(PackReport {
        archive,
        references,
        assets,
    })
}

/// Copy every referenced asset into `staging`, replacing each reference with its placeholder.
pub fn stage_references(document: &mut Value, staging: &mut Staging) -> Result<usize> {
    let references = walk(document, &mut |key: &str, value: &mut String| -> Result<()> {
        let placeholder = staging
            .stage(value)
            .with_context(|| format!("failed to pack {key} '{value}'"))?;
        eprintln!(
            "{} Made relative: {}",
            style("→").cyan(),
            placeholder.trim_start_matches(MARKER)
        );
        *value = placeholder;
        Ok(())
    })?;
    Ok(references)
}

/// `<stem>__packaged.zip` for a scene file named `<stem>.<ext>`.
pub fn archive_name(scenes: &Path) -> Result<String> {
    let stem = scenes
        .file_stem()
        .ok_or_else(|| anyhow!("not a file path: {}", scenes.display()))?;
    Ok(format!("{}__packaged.zip", stem.to_string_lossy()))
}
