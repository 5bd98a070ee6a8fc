use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{Error, Result};

/// Name of the rewritten document at the archive root.
pub const DOCUMENT_NAME: &str = "scenes.json";

/// Zip the regular files directly inside `dir` into `out`, flat and sorted by name.
///
/// A half-written archive is removed if anything fails.
pub fn write_archive(dir: &Path, out: &Path) -> Result<usize> {
    let files = list_files(dir)?;
    let result = write_entries(&files, out);
    if result.is_err() {
        let _ = fs::remove_file(out);
    }
    result
}

fn list_files(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        if path.is_file() {
            files.push((entry.file_name().to_string_lossy().into_owned(), path));
        }
    }
    files.sort();
    Ok(files)
}

fn write_entries(files: &[(String, PathBuf)], out: &Path) -> Result<usize> {
    let file = File::create(out).map_err(|e| Error::io(out, e))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .large_file(true);

    for (name, path) in files {
        zip.start_file(name.as_str(), options)?;
        let mut source = File::open(path).map_err(|e| Error::io(path, e))?;
        io::copy(&mut source, &mut zip).map_err(|e| Error::io(path, e))?;
        tracing::debug!("archived {name}");
    }

    zip.finish()?.flush().map_err(|e| Error::io(out, e))?;
    Ok(files.len())
}

/// Extract every entry of `archive` into `dest`, creating it if needed.
///
/// Returns the path of the extracted document, which must be present.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<PathBuf> {
    let file = File::open(archive).map_err(|e| Error::io(archive, e))?;
    let mut zip = ZipArchive::new(BufReader::new(file))?;

    fs::create_dir_all(dest).map_err(|e| Error::io(dest, e))?;
    zip.extract(dest)?;
    tracing::info!("extracted {} entries into {}", zip.len(), dest.display());

    let document = dest.join(DOCUMENT_NAME);
    if !document.is_file() {
        return Err(Error::MissingDocument {
            archive: archive.to_path_buf(),
            name: DOCUMENT_NAME.to_string(),
        });
    }
    Ok(document)
}

#[cfg(test)]
pub(crate) fn entry_names(archive: &Path) -> Result<Vec<String>> {
    let file = File::open(archive).map_err(|e| Error::io(archive, e))?;
    let zip = ZipArchive::new(BufReader::new(file))?;
    Ok(zip.file_names().map(str::to_string).collect())
}
