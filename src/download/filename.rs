//! Destination filenames derived from post titles and image URLs.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::title::compile_static_regex;

/// Maximum length of the title-derived stem, in characters.
pub const MAX_STEM_CHARS: usize = 50;

static NON_WORD_RUN_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r"\W+"));

/// Collapses every run of non-word characters into `_` and truncates the result.
#[must_use]
pub fn sanitize_title(title: &str) -> String {
    NON_WORD_RUN_RE
        .replace_all(title, "_")
        .chars()
        .take(MAX_STEM_CHARS)
        .collect()
}

/// Returns the extension (with leading dot) of the last URL path segment.
///
/// Query strings and fragments are ignored. Dotfiles (`/.jpg`) and trailing
/// dots (`/image.`) have no extension.
#[must_use]
pub fn extension_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let last_segment = parsed.path_segments()?.next_back()?;
    let dot_index = last_segment.rfind('.')?;
    if dot_index == 0 || dot_index + 1 == last_segment.len() {
        return None;
    }
    Some(last_segment[dot_index..].to_string())
}

/// Builds the destination filename for an accepted post.
///
/// Returns `None` when the URL has no file extension, which means it points at
/// a page rather than an image.
#[must_use]
pub fn destination_filename(title: &str, url: &str) -> Option<String> {
    let extension = extension_from_url(url)?;
    Some(format!("{}{extension}", sanitize_title(title)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_title_collapses_non_word_runs() {
        assert_eq!(
            sanitize_title("Sunset over hills [1920x1080]"),
            "Sunset_over_hills_1920x1080_"
        );
        assert_eq!(sanitize_title("a -- b!!!c"), "a_b_c");
    }

    #[test]
    fn test_sanitize_title_keeps_unicode_letters() {
        assert_eq!(sanitize_title("Fjällräven, Sverige"), "Fjällräven_Sverige");
    }

    #[test]
    fn test_sanitize_title_truncates_to_fifty_chars() {
        let title = "word ".repeat(30);
        let stem = sanitize_title(&title);
        assert_eq!(stem.chars().count(), MAX_STEM_CHARS);
        assert!(stem.starts_with("word_word_"));
    }

    #[test]
    fn test_sanitize_title_truncates_by_chars_not_bytes() {
        let title = "é".repeat(80);
        assert_eq!(sanitize_title(&title), "é".repeat(50));
    }

    #[test]
    fn test_extension_from_url_preserves_case() {
        assert_eq!(
            extension_from_url("https://i.example.com/a/b/photo.JPG"),
            Some(".JPG".to_string())
        );
    }

    #[test]
    fn test_extension_from_url_ignores_query() {
        assert_eq!(
            extension_from_url("https://i.example.com/photo.png?width=640#top"),
            Some(".png".to_string())
        );
    }

    #[test]
    fn test_extension_from_url_none_for_pages() {
        assert_eq!(extension_from_url("https://example.com/gallery/abc123"), None);
        assert_eq!(extension_from_url("https://example.com/"), None);
        assert_eq!(extension_from_url("https://example.com/.jpg"), None);
        assert_eq!(extension_from_url("https://example.com/photo."), None);
        assert_eq!(extension_from_url("not a url"), None);
    }

    #[test]
    fn test_extension_from_url_uses_last_dot() {
        assert_eq!(
            extension_from_url("https://example.com/archive.tar.gz"),
            Some(".gz".to_string())
        );
    }

    #[test]
    fn test_destination_filename() {
        assert_eq!(
            destination_filename(
                "Sunset over hills [1920x1080]",
                "https://i.example.com/sunset.jpg"
            ),
            Some("Sunset_over_hills_1920x1080_.jpg".to_string())
        );
        assert_eq!(
            destination_filename("Sunset [1920x1080]", "https://example.com/a/sunset"),
            None
        );
    }
}
