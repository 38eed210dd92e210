/// Get the filter pattern for rich-text documents
///
/// Returns a multi-line filter string where each line is a separate filter option.
/// FLTK format: "Description\tPattern\nDescription2\tPattern2"
pub fn rich_text_filter() -> String {
    vec!["Rich Text Files\t*.html", "All Files\t*"].join("\n")
}

/// The extension appended to save paths that carry none
pub const RICH_TEXT_EXTENSION: &str = "html";

/// Append the rich-text extension when the chosen save path has none
pub fn ensure_rich_text_extension(path: &str) -> String {
    let has_extension = std::path::Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some();
    if has_extension {
        path.to_string()
    } else {
        format!("{}.{}", path, RICH_TEXT_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_lists_rich_text_first() {
        let filter = rich_text_filter();
        let mut lines = filter.lines();
        assert_eq!(lines.next(), Some("Rich Text Files\t*.html"));
        assert_eq!(lines.next(), Some("All Files\t*"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_extension_appended_when_missing() {
        assert_eq!(ensure_rich_text_extension("/tmp/notes"), "/tmp/notes.html");
    }

    #[test]
    fn test_existing_extension_kept() {
        assert_eq!(ensure_rich_text_extension("/tmp/notes.html"), "/tmp/notes.html");
        assert_eq!(ensure_rich_text_extension("/tmp/notes.htm"), "/tmp/notes.htm");
    }
}
