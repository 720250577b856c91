//! Derived download and preview URL construction.
//!
//! The hosting layout serves each archived file under a fixed base path
//! plus its percent-encoded file name, so these derivations must stay
//! bit-exact: file names are form-encoded with literal `+` rewritten to
//! `%20` so names containing spaces resolve correctly.

use url::form_urlencoded;

use super::names::{LITEMATIC_EXT, strip_suffix_ci};

/// Percent-encode one path segment.
///
/// Spaces come out of form-encoding as `+`, which static file hosts do not
/// decode inside a path, so they are rewritten to `%20`. A literal `+` in
/// the file name is already `%2B` at this point and survives the rewrite.
fn encode_segment(name: &str) -> String {
    form_urlencoded::byte_serialize(name.as_bytes()).collect::<String>().replace('+', "%20")
}

/// URL an archived file is downloadable from.
pub fn download_url(files_base_url: &str, file_name: &str) -> String {
    format!("{}/{}", files_base_url, encode_segment(file_name))
}

/// URL of the `.png` preview rendered next to an archived file.
pub fn preview_url(files_base_url: &str, file_name: &str) -> String {
    format!("{}/{}", files_base_url, encode_segment(&preview_file_name(file_name)))
}

/// Rewrite the schematic extension (case-insensitive) to `.png`. Unknown
/// extensions are replaced from the last dot; extensionless names gain one.
fn preview_file_name(file_name: &str) -> String {
    if let Some(stem) = strip_suffix_ci(file_name, LITEMATIC_EXT) {
        return format!("{stem}.png");
    }
    match file_name.rfind('.') {
        Some(idx) => format!("{}.png", &file_name[..idx]),
        None => format!("{file_name}.png"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://archive.test/schematics";

    #[test]
    fn test_download_url_encodes_spaces_as_percent20() {
        assert_eq!(
            download_url(BASE, "My Build.litematic"),
            "https://archive.test/schematics/My%20Build.litematic"
        );
    }

    #[test]
    fn test_preview_url_rewrites_extension() {
        assert_eq!(preview_url(BASE, "My Build.litematic"), "https://archive.test/schematics/My%20Build.png");
    }

    #[test]
    fn test_preview_extension_rewrite_is_case_insensitive() {
        assert_eq!(preview_url(BASE, "Tower.LITEMATIC"), "https://archive.test/schematics/Tower.png");
    }

    #[test]
    fn test_literal_plus_is_preserved_as_percent2b() {
        assert_eq!(
            download_url(BASE, "a+b.litematic"),
            "https://archive.test/schematics/a%2Bb.litematic"
        );
    }

    #[test]
    fn test_reserved_characters_are_encoded() {
        assert_eq!(
            download_url(BASE, "farm&tower.litematic"),
            "https://archive.test/schematics/farm%26tower.litematic"
        );
    }

    #[test]
    fn test_unreserved_characters_pass_through() {
        assert_eq!(
            download_url(BASE, "a-b_c.d.litematic"),
            "https://archive.test/schematics/a-b_c.d.litematic"
        );
    }

    #[test]
    fn test_preview_of_extensionless_name() {
        assert_eq!(preview_url(BASE, "noext"), "https://archive.test/schematics/noext.png");
    }

    #[test]
    fn test_preview_of_unknown_extension() {
        assert_eq!(preview_url(BASE, "thing.schem"), "https://archive.test/schematics/thing.png");
    }
}
