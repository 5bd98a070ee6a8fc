use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Prefix marking a packed reference. Everything after it is a bare file name.
pub const MARKER: &str = "[REPLACE]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyInstruction {
    pub source: PathBuf,
    pub destination: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub basename: String,
    pub placeholder: String,
    pub copy: CopyInstruction,
}

/// Final component of a referenced path.
pub fn basename(path: &str) -> Result<String> {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Error::NoFileName(path.to_string()))
}

#[must_use]
pub fn placeholder(basename: &str) -> String {
    format!("{MARKER}{basename}")
}

/// Turn an absolute asset path into its placeholder and the copy that stages it.
pub fn encode(absolute_path: &str, staging_root: &Path) -> Result<Encoded> {
    let basename = basename(absolute_path)?;
    Ok(Encoded {
        placeholder: placeholder(&basename),
        copy: CopyInstruction {
            source: PathBuf::from(absolute_path),
            destination: staging_root.join(&basename),
        },
        basename,
    })
}

#[must_use]
pub fn is_placeholder(value: &str) -> bool {
    value.contains(MARKER)
}

/// Resolve a placeholder to a path under `root`. Unmarked values come back untouched.
#[must_use]
pub fn decode<'a>(value: &'a str, root: &Path) -> Cow<'a, str> {
    if !is_placeholder(value) {
        return Cow::Borrowed(value);
    }
    let name = value.replace(MARKER, "");
    Cow::Owned(root.join(name).to_string_lossy().into_owned())
}
