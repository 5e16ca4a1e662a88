use crate::error::EngineError;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One record of the external document source: a JSON array of
/// `{ "name": ..., "content": ... }` objects. Missing fields default to
/// empty strings and are rejected as invalid when added to the collection.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content: String,
}

/// Load the document source from a JSON file.
///
/// A missing or unreadable file and a structurally invalid file are both
/// reported, non-fatal outcomes; the caller's collection is left untouched
/// either way.
pub fn load_source<P: AsRef<Path>>(path: P) -> Result<Vec<SourceRecord>, EngineError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|_| EngineError::SourceNotFound(path.display().to_string()))?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|e| EngineError::SourceMalformed(e.to_string()))
}
