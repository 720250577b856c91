//! Raw index document parsing and record normalization.
//!
//! The remote index is a JSON object with a `files` array. Parsing is
//! deliberately lenient: a document that cannot be decoded (or has no
//! `files` field) yields an empty record set rather than an error, and a
//! malformed element is skipped without aborting the load. Both paths are
//! logged so the leniency stays auditable.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use schemdex_core::record::{Dimensions, Record, UNKNOWN_AUTHOR};

use super::{names, urls};

#[derive(Debug, Deserialize)]
struct RawIndexDocument {
    files: Vec<Value>,
}

/// One index element as it appears on the wire. Numeric fields tolerate
/// numbers or numeric strings; anything else decodes to 0.
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    file: Option<String>,

    #[serde(default, rename = "fileSizeBytes", deserialize_with = "lenient_u64")]
    file_size_bytes: u64,

    #[serde(default, deserialize_with = "lenient_dimensions")]
    dimensions: RawDimensions,

    #[serde(default)]
    size: Option<String>,

    #[serde(default)]
    version: Option<String>,

    #[serde(default, rename = "timeCreated", deserialize_with = "lenient_i64")]
    time_created: i64,

    #[serde(default)]
    author: Option<String>,

    #[serde(default)]
    has_image: bool,
}

#[derive(Debug, Default, Deserialize)]
struct RawDimensions {
    #[serde(default, deserialize_with = "lenient_u32")]
    x: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    y: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    z: u32,
}

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    lenient_u64(deserializer).map(|n| u32::try_from(n).unwrap_or(0))
}

fn lenient_dimensions<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RawDimensions, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
        _ => RawDimensions::default(),
    })
}

/// Parse a raw index document into normalized records.
///
/// Never fails: document-level decode problems yield an empty sequence and
/// element-level problems skip that element. Records without a usable file
/// name, and duplicates of an already-seen file name, are dropped so ids
/// stay unique within one load.
pub fn parse_document(bytes: &[u8], files_base_url: &str) -> Vec<Record> {
    let doc: RawIndexDocument = match serde_json::from_slice(bytes) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!("index document undecodable, treating as empty: {}", e);
            return Vec::new();
        }
    };

    let base = files_base_url.trim_end_matches('/');
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(doc.files.len());
    for (idx, value) in doc.files.into_iter().enumerate() {
        let entry: RawEntry = match serde_json::from_value(value) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("skipping malformed index entry #{}: {}", idx, e);
                continue;
            }
        };
        let Some(record) = entry.into_record(base) else {
            tracing::debug!("skipping index entry #{} with no usable file name", idx);
            continue;
        };
        if !seen.insert(record.id.clone()) {
            tracing::warn!("skipping duplicate index entry for {}", record.id);
            continue;
        }
        records.push(record);
    }
    records
}

impl RawEntry {
    fn into_record(self, files_base_url: &str) -> Option<Record> {
        let file_name = self.file.map(|f| f.trim().to_string()).filter(|f| !f.is_empty())?;

        let author = self
            .author
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

        let display_name = names::display_name(&file_name);
        let download_url = urls::download_url(files_base_url, &file_name);
        let preview_url = self.has_image.then(|| urls::preview_url(files_base_url, &file_name));

        Some(Record {
            id: file_name.clone(),
            file_name,
            display_name,
            author,
            time_created: self.time_created,
            file_size_bytes: self.file_size_bytes,
            size_label: self.size.unwrap_or_default(),
            version: self.version.unwrap_or_default(),
            dimensions: Dimensions { x: self.dimensions.x, y: self.dimensions.y, z: self.dimensions.z },
            has_preview: self.has_image,
            preview_url,
            download_url,
        })
    }
}
