//! Traits the document controller talks to instead of concrete FLTK widgets.
//!
//! The FLTK layer in `crate::ui` provides the real implementations; tests use
//! in-memory fakes. All calls are synchronous: a modal dialog blocks inside
//! the current message handler until the user answers.

use super::domain::{CharFormat, Document, Rgb};
use super::error::Result;

/// The widget that owns the document content and the format at the cursor.
///
/// Content crosses this boundary only as the surface's own serialized
/// rich-text blob; the controller never parses it.
pub trait EditSurface {
    fn serialized_content(&self) -> String;

    /// Replace the whole content from a serialized blob. Must be atomic: a
    /// rejected blob leaves the previous content in place.
    fn set_serialized_content(&mut self, blob: &str) -> Result<()>;

    fn clear(&mut self);

    fn format_at_cursor(&self) -> CharFormat;

    fn set_format_at_cursor(&mut self, format: CharFormat);
}

/// Answer to the unsaved-changes prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    Save,
    Discard,
    Cancel,
}

/// Modal dialogs: file pickers, the color picker, the unsaved-changes
/// prompt, and error notifications. `None` from a picker means the user
/// cancelled, which is never an error.
pub trait DialogService {
    fn pick_open_path(&mut self, filter: &str, start_dir: Option<&str>) -> Option<String>;

    fn pick_save_path(&mut self, filter: &str, start_dir: Option<&str>) -> Option<String>;

    fn pick_color(&mut self) -> Option<Rgb>;

    fn confirm_unsaved(&mut self, prompt: &str) -> ConfirmChoice;

    fn alert(&mut self, message: &str);
}

/// Window title / file label surface, refreshed after every state change.
pub trait StatusDisplay {
    fn show_document(&mut self, document: &Document);
}
