use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

use crate::archive::{self, DOCUMENT_NAME};
use crate::codec;
use crate::document;
use crate::error::{Error, Result};

/// Scratch directory collecting assets and the rewritten document before archiving.
///
/// The directory and everything copied into it is deleted on drop.
#[derive(Debug)]
pub struct Staging {
    dir: TempDir,
    entries: BTreeMap<String, PathBuf>,
}

impl Staging {
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("obs-pack-")
            .tempdir()
            .map_err(|e| Error::io(std::env::temp_dir(), e))?;
        Ok(Self {
            dir,
            entries: BTreeMap::new(),
        })
    }

    #[cfg(test)]
    fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Copy the asset at `source` into staging and return its placeholder.
    ///
    /// Staging the same source twice copies it once. A different source with
    /// an already staged file name is a collision.
    pub fn stage(&mut self, source: &str) -> Result<String> {
        let encoded = codec::encode(source, self.dir.path())?;

        if encoded.basename == DOCUMENT_NAME {
            return Err(Error::ReservedName {
                name: encoded.basename,
                path: encoded.copy.source,
            });
        }

        if let Some(first) = self.entries.get(&encoded.basename) {
            if *first == encoded.copy.source {
                tracing::debug!("{} already staged", first.display());
                return Ok(encoded.placeholder);
            }
            return Err(Error::BasenameCollision {
                name: encoded.basename,
                first: first.clone(),
                second: encoded.copy.source,
            });
        }

        let codec::CopyInstruction {
            source,
            destination,
        } = encoded.copy;
        fs::copy(&source, &destination).map_err(|e| Error::io(&source, e))?;
        tracing::debug!("staged {} as {}", source.display(), encoded.basename);

        self.entries.insert(encoded.basename, source);
        Ok(encoded.placeholder)
    }

    /// Staged file names with the source each was copied from.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries
            .iter()
            .map(|(name, source)| (name.as_str(), source.as_path()))
    }

    pub fn write_document(&self, document: &Value) -> Result<PathBuf> {
        let path = self.dir.path().join(DOCUMENT_NAME);
        document::save_document(&path, document)?;
        Ok(path)
    }

    /// Zip everything staged so far into `out`. Returns the number of archive entries.
    pub fn archive(&self, out: &Path) -> Result<usize> {
        archive::write_archive(self.dir.path(), out)
    }
}
