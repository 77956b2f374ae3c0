//! Extension and MIME type inference from file names.

/// Extension used when a name has none.
pub const DEFAULT_EXTENSION: &str = "bin";

/// MIME type used when nothing else matches.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Suffix table, checked in order against the lower-cased name.
const SUFFIX_TABLE: &[(&str, &str)] = &[
    (".txt", "text/plain"),
    (".json", "application/json"),
    (".csv", "text/csv"),
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
    (".jpeg", "image/jpeg"),
    (".gif", "image/gif"),
    (".webp", "image/webp"),
    (".mp3", "audio/mpeg"),
    (".mp4", "video/mp4"),
];

/// Extension of `name`: the text after the last `.`, lower-cased.
///
/// Returns `"bin"` when there is no dot or nothing follows it.
pub fn extension_of(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_lowercase(),
        _ => DEFAULT_EXTENSION.to_string(),
    }
}

/// Effective MIME type of `name`.
///
/// A non-empty `declared` type is returned verbatim; otherwise the type is
/// looked up from the name's suffix.
pub fn mime_of(name: &str, declared: Option<&str>) -> String {
    if let Some(declared) = declared.filter(|d| !d.is_empty()) {
        return declared.to_string();
    }

    let lower = name.to_lowercase();
    SUFFIX_TABLE
        .iter()
        .find(|(suffix, _)| lower.ends_with(suffix))
        .map(|(_, mime)| *mime)
        .unwrap_or(DEFAULT_MIME_TYPE)
        .to_string()
}

/// Whether a MIME type denotes text content.
pub fn is_text(mime_type: &str) -> bool {
    mime_type.starts_with("text/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("notes.txt"), "txt");
        assert_eq!(extension_of("Photo.JPEG"), "jpeg");
        assert_eq!(extension_of("archive.tar.gz"), "gz");
        assert_eq!(extension_of(".bashrc"), "bashrc");
    }

    #[test]
    fn test_extension_of_defaults() {
        assert_eq!(extension_of("README"), "bin");
        assert_eq!(extension_of("trailing."), "bin");
        assert_eq!(extension_of(""), "bin");
    }

    #[test]
    fn test_mime_of_declared_wins() {
        assert_eq!(mime_of("notes.txt", Some("text/markdown")), "text/markdown");
        assert_eq!(mime_of("notes.txt", Some("")), "text/plain");
        assert_eq!(mime_of("notes.txt", None), "text/plain");
    }

    #[test]
    fn test_mime_of_table() {
        assert_eq!(mime_of("data.json", None), "application/json");
        assert_eq!(mime_of("table.CSV", None), "text/csv");
        assert_eq!(mime_of("a.png", None), "image/png");
        assert_eq!(mime_of("a.jpg", None), "image/jpeg");
        assert_eq!(mime_of("a.jpeg", None), "image/jpeg");
        assert_eq!(mime_of("a.gif", None), "image/gif");
        assert_eq!(mime_of("a.webp", None), "image/webp");
        assert_eq!(mime_of("song.mp3", None), "audio/mpeg");
        assert_eq!(mime_of("clip.mp4", None), "video/mp4");
    }

    #[test]
    fn test_mime_of_fallback() {
        assert_eq!(mime_of("binary", None), "application/octet-stream");
        assert_eq!(mime_of("doc.pdf", None), "application/octet-stream");
    }

    #[test]
    fn test_is_text() {
        assert!(is_text("text/plain"));
        assert!(is_text("text/csv"));
        assert!(!is_text("application/json"));
        assert!(!is_text(""));
    }
}
