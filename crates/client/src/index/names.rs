//! Display-name derivation from raw file names.

use std::sync::LazyLock;

use regex::Regex;

/// File extension of archived schematics.
pub const LITEMATIC_EXT: &str = ".litematic";

/// A trailing snowflake-style id: 8+ digits, optionally preceded by a
/// separator, anchored at the end of the stem.
static SNOWFLAKE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_]?\d{8,}$").unwrap());

/// Derive the human-readable display name from a raw file name.
///
/// Steps: strip the schematic extension (case-insensitive), strip one
/// trailing snowflake id run plus any separators it leaves behind, replace
/// underscores with spaces, trim. Each destructive step falls back to its
/// input when it would empty the string, so the result is never empty for a
/// non-empty file name.
pub fn display_name(file_name: &str) -> String {
    let stem = match strip_suffix_ci(file_name, LITEMATIC_EXT) {
        Some(stem) if !stem.is_empty() => stem,
        _ => file_name,
    };

    let cleaned = strip_snowflake_suffix(stem).replace('_', " ").trim().to_string();
    if cleaned.is_empty() { file_name.to_string() } else { cleaned }
}

/// Case-insensitive `strip_suffix` for ASCII suffixes.
pub(crate) fn strip_suffix_ci<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let n = s.len();
    let k = suffix.len();
    if n >= k && s.is_char_boundary(n - k) && s[n - k..].eq_ignore_ascii_case(suffix) {
        Some(&s[..n - k])
    } else {
        None
    }
}

fn strip_snowflake_suffix(stem: &str) -> &str {
    let Some(m) = SNOWFLAKE_SUFFIX.find(stem) else {
        return stem;
    };
    let stripped = stem[..m.start()].trim_end_matches(['-', '_']);
    if stripped.is_empty() { stem } else { stripped }
}
