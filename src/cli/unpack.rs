use std::convert::Infallible;
use std::path::{self, Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use console::style;
use serde_json::Value;

use obs_pack_core::codec::{decode, is_placeholder};
use obs_pack_core::{extract_archive, load_document, save_document, walk};

#[derive(Debug)]
pub struct UnpackReport {
    pub directory: PathBuf,
    pub restored: usize,
}

pub fn run(archive: &Path, output_dir: &Path) -> Result<UnpackReport> {
    let directory = output_dir.join(unpack_dir_name(archive)?);
    let document_path = extract_archive(archive, &directory)
        .with_context(|| format!("failed to unpack {}", archive.display()))?;

    let root = path::absolute(&directory)
        .with_context(|| format!("failed to resolve {}", directory.display()))?;
    let mut document = load_document(&document_path)?;
    let restored = restore_references(&mut document, &root);
    save_document(&document_path, &document)?;

    eprintln!(
        "{} Unzipped and exported to {}/",
        style("✓").green(),
        directory.display()
    );

    Ok(UnpackReport {
        directory,
        restored,
    })
}

/// Point every placeholder reference at its file under `root`. Returns how many were rewritten.
pub fn restore_references(document: &mut Value, root: &Path) -> usize {
    let mut restored = 0;
    walk(document, &mut |_: &str, value: &mut String| {
        if !is_placeholder(value) {
            return Ok::<_, Infallible>(());
        }
        let resolved = decode(value, root).into_owned();
        tracing::debug!("{value} -> {resolved}");
        eprintln!(
            "{} Made absolute: {}",
            style("→").cyan(),
            Path::new(&resolved)
                .file_name()
                .map_or_else(|| resolved.clone(), |n| n.to_string_lossy().into_owned())
        );
        *value = resolved;
        restored += 1;
        Ok(())
    })
    .unwrap_or_else(|never| match never {});
    restored
}

/// `<archive file name>__unpack`, extension included.
pub fn unpack_dir_name(archive: &Path) -> Result<String> {
    let name = archive
        .file_name()
        .ok_or_else(|| anyhow!("not a file path: {}", archive.display()))?;
    Ok(format!("{}__unpack", name.to_string_lossy()))
}
