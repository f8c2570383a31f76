//! Store serialization and deserialization using JSON.
//!
//! The edition and version are read and checked before the body is parsed,
//! so a document from a newer release is reported as incompatible rather
//! than as a parse failure.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use andson_foundation::{Error, ErrorContext, ErrorKind, Result};
use andson_storage::{Document, DocumentHeader, Store};
use log::{info, warn};

use crate::config::DocumentConfig;

/// Serializes a store to JSON text.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(store: &Store, config: &DocumentConfig) -> Result<String> {
    let doc = store.to_document();
    let text = if config.pretty {
        serde_json::to_string_pretty(&doc)
    } else {
        serde_json::to_string(&doc)
    };
    text.map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Deserializes a store from JSON text.
///
/// # Errors
///
/// Returns `IncompatibleVersion` for an unsupported edition or version,
/// `SerializationError` if the text is not a document, and any error of
/// [`Store::from_document`].
pub fn from_json(text: &str) -> Result<Store> {
    let result = parse(text);
    if let Err(err) = &result {
        warn!("event=document_rejected kind={}", kind_name(&err.kind));
    }
    result
}

fn parse(text: &str) -> Result<Store> {
    let header: DocumentHeader = serde_json::from_str(text)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))?;
    header.check()?;
    let doc: Document = serde_json::from_str(text)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))?;
    Store::from_document(doc)
}

/// Saves a store to a file as JSON.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to,
/// or if serialization fails.
pub fn save_to_file<P: AsRef<Path>>(store: &Store, path: P, config: &DocumentConfig) -> Result<()> {
    let path = path.as_ref();
    let text = to_json(store, config).map_err(|e| at(e, path, "save"))?;

    let file = File::create(path).map_err(|e| {
        at(
            Error::new(ErrorKind::IoError(format!("failed to create file: {e}"))),
            path,
            "save",
        )
    })?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(text.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| {
            at(
                Error::new(ErrorKind::IoError(format!("failed to write file: {e}"))),
                path,
                "save",
            )
        })?;

    info!(
        "event=document_saved animes={} bytes={}",
        store.anime_count(),
        text.len()
    );
    Ok(())
}

/// Loads a store from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, and any error of
/// [`from_json`] with the path attached as context.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Store> {
    let path = path.as_ref();
    let mut text = String::new();
    File::open(path)
        .and_then(|mut file| file.read_to_string(&mut text))
        .map_err(|e| {
            at(
                Error::new(ErrorKind::IoError(format!("failed to read file: {e}"))),
                path,
                "load",
            )
        })?;

    let store = from_json(&text).map_err(|e| at(e, path, "load"))?;
    info!(
        "event=document_loaded animes={} bytes={}",
        store.anime_count(),
        text.len()
    );
    Ok(store)
}

fn at(err: Error, path: &Path, frame: &str) -> Error {
    err.with_context(
        ErrorContext::new()
            .with_source(path.display().to_string())
            .with_frame(frame),
    )
}

fn kind_name(kind: &ErrorKind) -> &'static str {
    match kind {
        ErrorKind::InvalidArgumentType { .. } => "invalid_argument_type",
        ErrorKind::InvalidFormat { .. } => "invalid_format",
        ErrorKind::OutOfRange { .. } => "out_of_range",
        ErrorKind::DuplicateName { .. } => "duplicate_name",
        ErrorKind::NameNotFound { .. } => "name_not_found",
        ErrorKind::EntityRemoved { .. } => "entity_removed",
        ErrorKind::IncompatibleVersion { .. } => "incompatible_version",
        ErrorKind::MalformedDocument(_) => "malformed_document",
        ErrorKind::SerializationError(_) => "serialization",
        ErrorKind::IoError(_) => "io",
        ErrorKind::LoggingError(_) => "logging",
        ErrorKind::IdsExhausted { .. } => "ids_exhausted",
    }
}
