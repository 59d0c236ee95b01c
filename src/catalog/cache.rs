//! Reading and writing the JSON format cache.
//!
//! The cache is a JSON array with one record per handler, in catalog order. A record is
//! either a `[name, [format, ...]]` pair or an object `{ "name": ..., "formats": [...] }`.
//! The `category` field of a format may be a single string or an array of strings.

use super::conversion::IntoCatalog;
use super::{Catalog, FormatEntry, HandlerDescriptor};
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawCategory {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawFormat {
    #[serde(default)]
    name: String,
    #[serde(default)]
    format: String,
    #[serde(default)]
    extension: String,
    #[serde(default)]
    mime: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<RawCategory>,
    #[serde(default)]
    from: bool,
    #[serde(default)]
    to: bool,
    #[serde(default)]
    internal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lossless: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawHandler {
    Pair(String, Vec<RawFormat>),
    Named { name: String, formats: Vec<RawFormat> },
}

/// The deserialized form of a format cache file, before validation.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct FormatCache(Vec<RawHandler>);

impl FormatCache {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(json).map_err(|e| CatalogError::JsonParseError(e.to_string()))
    }
}

impl From<RawFormat> for FormatEntry {
    fn from(raw: RawFormat) -> Self {
        let categories = match raw.category {
            Some(RawCategory::One(category)) => vec![category],
            Some(RawCategory::Many(categories)) => categories,
            None => Vec::new(),
        };
        FormatEntry {
            name: raw.name,
            format: raw.format,
            extension: raw.extension,
            mime: raw.mime,
            categories,
            accepts_input: raw.from,
            produces_output: raw.to,
            internal: raw.internal,
            lossless: raw.lossless.unwrap_or(false),
        }
    }
}

impl From<&FormatEntry> for RawFormat {
    fn from(entry: &FormatEntry) -> Self {
        let category = match entry.categories.as_slice() {
            [] => None,
            [single] => Some(RawCategory::One(single.clone())),
            many => Some(RawCategory::Many(many.to_vec())),
        };
        RawFormat {
            name: entry.name.clone(),
            format: entry.format.clone(),
            extension: entry.extension.clone(),
            mime: entry.mime.clone(),
            category,
            from: entry.accepts_input,
            to: entry.produces_output,
            internal: entry.internal.clone(),
            lossless: entry.lossless.then_some(true),
        }
    }
}

impl IntoCatalog for FormatCache {
    fn into_catalog(self) -> Result<Catalog, CatalogError> {
        let handlers = self
            .0
            .into_iter()
            .map(|raw| {
                let (name, formats) = match raw {
                    RawHandler::Pair(name, formats) => (name, formats),
                    RawHandler::Named { name, formats } => (name, formats),
                };
                HandlerDescriptor {
                    name,
                    formats: formats.into_iter().map(FormatEntry::from).collect(),
                }
            })
            .collect::<Vec<_>>();
        handlers.into_catalog()
    }
}

impl Catalog {
    /// Parses and validates a catalog from format cache JSON.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        FormatCache::from_json(json)?.into_catalog()
    }

    /// Loads a catalog from a format cache file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| CatalogError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    /// Serializes the catalog as format cache JSON, using the `[name, formats]` record shape.
    pub fn to_json_pretty(&self) -> Result<String, CatalogError> {
        let records: Vec<(&str, Vec<RawFormat>)> = self
            .handlers()
            .iter()
            .map(|h| (h.name.as_str(), h.formats.iter().map(RawFormat::from).collect()))
            .collect();
        serde_json::to_string_pretty(&records)
            .map_err(|e| CatalogError::JsonParseError(e.to_string()))
    }
}
