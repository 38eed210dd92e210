//! Document lifecycle orchestration: new/open/save/close plus the
//! unsaved-changes confirmation gate, and the dispatch of formatting
//! commands onto the editing surface.

use std::fs;
use std::path::Path;

use super::collaborators::{ConfirmChoice, DialogService, EditSurface, StatusDisplay};
use super::domain::{Document, FormatCommand};
use super::file_filters::{ensure_rich_text_extension, rich_text_filter};

const UNSAVED_PROMPT: &str = "Save changes before continuing?";

/// Owns the single open document and sequences every user command against
/// the editing surface, the modal dialogs, and the filesystem.
///
/// Every method runs to completion on the UI thread before the next event
/// is handled; dialogs block mid-method. No command is retried: an I/O
/// failure is reported once and leaves the state as documented per method.
pub struct DocumentController<S, D, W> {
    document: Document,
    surface: S,
    dialogs: D,
    status: W,
    /// Starting directory for the next file dialog.
    last_open_directory: Option<String>,
}

impl<S, D, W> DocumentController<S, D, W>
where
    S: EditSurface,
    D: DialogService,
    W: StatusDisplay,
{
    pub fn new(surface: S, dialogs: D, mut status: W) -> Self {
        let document = Document::untitled();
        status.show_document(&document);
        Self {
            document,
            surface,
            dialogs,
            status,
            last_open_directory: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn last_open_directory(&self) -> Option<&str> {
        self.last_open_directory.as_deref()
    }

    pub fn set_last_open_directory(&mut self, dir: Option<String>) {
        self.last_open_directory = dir;
    }

    // --- File operations ---

    /// Discard the current document (after the gate) and start untitled.
    pub fn new_document(&mut self) {
        if !self.confirm_discard_if_dirty() {
            return;
        }
        self.surface.clear();
        self.document.reset();
        self.status.show_document(&self.document);
    }

    /// Open a file picked by the user. A cancelled picker or any read
    /// failure leaves document, surface, and dirty flag untouched.
    pub fn open_document(&mut self) {
        if !self.confirm_discard_if_dirty() {
            return;
        }
        let filter = rich_text_filter();
        let Some(path) = self
            .dialogs
            .pick_open_path(&filter, self.last_open_directory.as_deref())
        else {
            return;
        };

        let loaded = fs::read_to_string(&path)
            .map_err(Into::into)
            .and_then(|blob| self.surface.set_serialized_content(&blob));
        match loaded {
            Ok(()) => {
                self.remember_directory(&path);
                self.document.set_path(path);
                self.document.mark_clean();
                self.status.show_document(&self.document);
            }
            Err(e) => self.dialogs.alert(&format!("Error opening file: {}", e)),
        }
    }

    /// Save to the known path, or prompt for one when untitled. Returns
    /// whether a write succeeded; a cancelled picker returns false without
    /// touching anything.
    pub fn save_document(&mut self) -> bool {
        let path = match self.document.file_path() {
            Some(path) => path.to_string(),
            None => match self.prompt_save_path() {
                Some(path) => path,
                None => return false,
            },
        };
        self.write_to(path)
    }

    /// Save under a freshly picked path regardless of the current one.
    pub fn save_document_as(&mut self) -> bool {
        match self.prompt_save_path() {
            Some(path) => self.write_to(path),
            None => false,
        }
    }

    /// The editing surface reported a content change; nothing else may set
    /// the dirty flag.
    pub fn on_content_changed(&mut self) {
        if !self.document.is_dirty() {
            self.document.mark_dirty();
            self.status.show_document(&self.document);
        }
    }

    /// Close request from the window. Returns true when the close may
    /// proceed; false vetoes it and the window stays open.
    pub fn close_window(&mut self) -> bool {
        self.confirm_discard_if_dirty()
    }

    // --- Format operations ---

    /// Read the format at the cursor, apply one command, write it back.
    /// Commands that report a no-op (unparseable font size) leave the
    /// surface untouched.
    pub fn apply_format(&mut self, command: &FormatCommand) {
        let current = self.surface.format_at_cursor();
        if let Some(next) = command.apply(&current) {
            self.surface.set_format_at_cursor(next);
        }
    }

    /// Run the color picker and apply the result as the text color.
    /// Cancelling the picker performs no mutation.
    pub fn pick_text_color(&mut self) {
        if let Some(color) = self.dialogs.pick_color() {
            self.apply_format(&FormatCommand::SetForeground(color));
        }
    }

    /// Run the color picker and apply the result as the highlight color.
    pub fn pick_highlight_color(&mut self) {
        if let Some(color) = self.dialogs.pick_color() {
            self.apply_format(&FormatCommand::SetBackground(color));
        }
    }

    // --- The confirmation gate ---

    /// Gate shared by every destructive command. Clean documents proceed
    /// silently. Dirty documents prompt Save / Discard / Cancel; choosing
    /// Save runs the save synchronously and then proceeds even when the
    /// save-path picker was cancelled mid-save (long-standing behavior,
    /// kept deliberately).
    fn confirm_discard_if_dirty(&mut self) -> bool {
        if !self.document.is_dirty() {
            return true;
        }
        match self.dialogs.confirm_unsaved(UNSAVED_PROMPT) {
            ConfirmChoice::Save => {
                self.save_document();
                true
            }
            ConfirmChoice::Discard => true,
            ConfirmChoice::Cancel => false,
        }
    }

    fn prompt_save_path(&mut self) -> Option<String> {
        let filter = rich_text_filter();
        let path = self
            .dialogs
            .pick_save_path(&filter, self.last_open_directory.as_deref())?;
        Some(ensure_rich_text_extension(&path))
    }

    /// Serialize the surface and overwrite `path`. On failure the dirty
    /// flag is preserved so the user can retry.
    fn write_to(&mut self, path: String) -> bool {
        let blob = self.surface.serialized_content();
        match fs::write(&path, &blob) {
            Ok(()) => {
                self.remember_directory(&path);
                self.document.set_path(path);
                self.document.mark_clean();
                self.status.show_document(&self.document);
                true
            }
            Err(e) => {
                self.dialogs.alert(&format!("Error saving file: {}", e));
                false
            }
        }
    }

    fn remember_directory(&mut self, path: &str) {
        if let Some(parent) = Path::new(path).parent() {
            self.last_open_directory = Some(parent.to_string_lossy().to_string());
        }
    }
}
