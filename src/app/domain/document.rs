use std::path::Path;

/// Lifecycle state of the single open document: where it lives on disk (if
/// anywhere) and whether it has unsaved changes. The content itself is owned
/// by the editing surface and never stored here.
#[derive(Debug, Clone, Default)]
pub struct Document {
    file_path: Option<String>,
    dirty: bool,
}

impl Document {
    pub fn untitled() -> Self {
        Self::default()
    }

    pub fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Bind the document to a disk location after an open or a save.
    pub fn set_path(&mut self, path: String) {
        self.file_path = Some(path);
    }

    /// Back to the unsaved, untitled state.
    pub fn reset(&mut self) {
        self.file_path = None;
        self.dirty = false;
    }

    /// File name component of the path, or "Untitled" for unsaved documents.
    pub fn display_name(&self) -> String {
        match self.file_path.as_deref() {
            Some(path) => extract_filename(path),
            None => "Untitled".to_string(),
        }
    }
}

/// Extract the filename component of a path, falling back to the whole path.
fn extract_filename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untitled_starts_clean_without_path() {
        let doc = Document::untitled();
        assert!(doc.file_path().is_none());
        assert!(!doc.is_dirty());
        assert_eq!(doc.display_name(), "Untitled");
    }

    #[test]
    fn test_dirty_flag_lifecycle() {
        let mut doc = Document::untitled();
        doc.mark_dirty();
        assert!(doc.is_dirty());
        doc.mark_clean();
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_reset_clears_path_and_dirty() {
        let mut doc = Document::untitled();
        doc.set_path("/tmp/a.html".to_string());
        doc.mark_dirty();
        doc.reset();
        assert!(doc.file_path().is_none());
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_display_name_uses_filename() {
        let mut doc = Document::untitled();
        doc.set_path("/home/user/notes/report.html".to_string());
        assert_eq!(doc.display_name(), "report.html");
    }
}
