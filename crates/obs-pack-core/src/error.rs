use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scene document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Reference has no file name: {0}")]
    NoFileName(String),

    #[error("Assets {} and {} both pack as '{name}'", first.display(), second.display())]
    BasenameCollision {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Asset {} would overwrite the packed document '{name}'", path.display())]
    ReservedName { name: String, path: PathBuf },

    #[error("Archive {} does not contain '{name}'", archive.display())]
    MissingDocument { archive: PathBuf, name: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
