use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};

pub fn read_document<R: Read>(reader: R) -> Result<Value> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_document(path: &Path) -> Result<Value> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    read_document(BufReader::new(file))
}

/// Serialize compactly; key order is whatever the document was loaded with.
pub fn write_document<W: Write>(writer: W, document: &Value) -> Result<()> {
    serde_json::to_writer(writer, document)?;
    Ok(())
}

pub fn save_document(path: &Path, document: &Value) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_document(&mut writer, document)?;
    writer.flush().map_err(|e| Error::io(path, e))
}
