//! Catalog record types.

use serde::Serialize;

/// Author sentinel for records whose source entry carries no usable author.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Schematic dimensions in blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}

/// One archived schematic.
///
/// Produced by the index parser in `schemdex-client`; everything here is
/// already normalized: `display_name` is never empty, `author` falls back to
/// [`UNKNOWN_AUTHOR`], and the URLs are fully derived.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Stable identifier, unique within one load (the raw file name).
    pub id: String,
    /// Raw file name as listed in the index document.
    pub file_name: String,
    /// Human-cleaned name (extension and snowflake suffix stripped).
    pub display_name: String,
    pub author: String,
    /// Creation time in epoch milliseconds; 0 when the source value was
    /// unparsable.
    pub time_created: i64,
    pub file_size_bytes: u64,
    /// Free-form size label from the index (may be empty).
    pub size_label: String,
    /// Game/data version string from the index (may be empty).
    pub version: String,
    pub dimensions: Dimensions,
    pub has_preview: bool,
    /// Present only when `has_preview` is true.
    pub preview_url: Option<String>,
    pub download_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_display() {
        let dims = Dimensions { x: 128, y: 64, z: 96 };
        assert_eq!(dims.to_string(), "128x64x96");
        assert_eq!(Dimensions::default().to_string(), "0x0x0");
    }
}
