pub mod archive;
pub mod codec;
pub mod document;
pub mod error;
pub mod staging;
pub mod walker;

pub use archive::{extract_archive, write_archive, DOCUMENT_NAME};
pub use codec::{decode, encode, CopyInstruction, Encoded, MARKER};
pub use document::{load_document, read_document, save_document, write_document};
pub use error::{Error, Result};
pub use staging::Staging;
pub use walker::{walk, ReferenceVisitor, REFERENCE_KEYS};
