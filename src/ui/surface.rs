//! FLTK implementation of the editing surface.
//!
//! A `TextEditor` shows the document text; per-character formatting rides in
//! a parallel style buffer (one style byte per text byte, FLTK's highlight
//! mechanism). The authoritative content lives in a shared `RichTextModel`;
//! a buffer modify callback mirrors every user edit into the model using the
//! pending format and reports the change through the message channel.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use fltk::{
    app::Sender,
    enums::{Color, Font},
    prelude::*,
    text::{StyleTableEntryExt, TextAttr, TextBuffer, TextEditor},
};

use crate::app::collaborators::EditSurface;
use crate::app::domain::{CharFormat, Rgb};
use crate::app::error::Result;
use crate::app::messages::Message;
use crate::app::services::richtext::RichTextModel;

/// Style letters run from 'A'; FLTK wants printable ASCII, so the table is
/// capped and documents with more distinct formats than this reuse the last
/// entry for display (the model itself keeps the real format).
const MAX_STYLES: usize = 56;

const DEFAULT_TEXT_SIZE: i32 = 14;

pub struct RichTextSurface {
    editor: TextEditor,
    buffer: TextBuffer,
    style_buffer: TextBuffer,
    model: Rc<RefCell<RichTextModel>>,
    styles: Rc<RefCell<Vec<CharFormat>>>,
    /// Set while the surface itself rewrites the buffer, so the modify
    /// callback ignores programmatic changes.
    syncing: Rc<Cell<bool>>,
    sender: Sender<Message>,
}

impl RichTextSurface {
    pub fn new(mut editor: TextEditor, sender: Sender<Message>, default_format: CharFormat) -> Self {
        let mut buffer = TextBuffer::default();
        let style_buffer = TextBuffer::default();
        editor.set_buffer(buffer.clone());

        let model = Rc::new(RefCell::new(RichTextModel::with_pending(default_format.clone())));
        let styles = Rc::new(RefCell::new(vec![default_format]));
        let syncing = Rc::new(Cell::new(false));

        let model_cb = model.clone();
        let styles_cb = styles.clone();
        let syncing_cb = syncing.clone();
        let buf_cb = buffer.clone();
        let mut style_buf = style_buffer.clone();
        let mut editor_cb = editor.clone();
        buffer.add_modify_callback(move |pos, inserted, deleted, _restyled, _deleted_text| {
            if syncing_cb.get() || (inserted == 0 && deleted == 0) {
                return;
            }
            let mut model = model_cb.borrow_mut();
            if deleted > 0 {
                model.delete(pos as usize, (pos + deleted) as usize);
                style_buf.remove(pos, pos + deleted);
            }
            if inserted > 0 {
                if let Some(text) = buf_cb.text_range(pos, pos + inserted) {
                    model.insert(pos as usize, &text);
                }
                let mut styles = styles_cb.borrow_mut();
                let (index, added) = ensure_style(&mut styles, model.pending_format());
                style_buf.insert(pos, &style_letter(index).to_string().repeat(inserted as usize));
                if added {
                    apply_style_table(&mut editor_cb, &style_buf, &styles);
                }
            }
            sender.send(Message::ContentChanged);
        });

        let surface = Self {
            editor,
            buffer,
            style_buffer,
            model,
            styles,
            syncing,
            sender,
        };
        surface.refresh_style_table();
        surface
    }

    /// Push the current style table to the editor widget.
    fn refresh_style_table(&self) {
        let styles = self.styles.borrow();
        apply_style_table(&mut self.editor.clone(), &self.style_buffer, &styles);
    }

    /// Rewrite text and style buffers from the model, bypassing the modify
    /// callback.
    fn refresh_widget(&mut self) {
        let (text, style_text) = {
            let model = self.model.borrow();
            let mut styles = self.styles.borrow_mut();
            let mut text = String::new();
            let mut style_text = String::new();
            for run in model.runs() {
                let (index, _) = ensure_style(&mut styles, &run.format);
                let letter = style_letter(index);
                text.push_str(&run.text);
                style_text.extend(std::iter::repeat(letter).take(run.text.len()));
            }
            (text, style_text)
        };
        self.syncing.set(true);
        self.buffer.set_text(&text);
        self.style_buffer.set_text(&style_text);
        self.syncing.set(false);
        self.refresh_style_table();
        self.editor.set_insert_position(0);
        self.editor.redraw();
    }

    /// Mirror the widget's selection into the model so format reads/writes
    /// target it.
    fn sync_selection(&self) {
        let selection = self
            .buffer
            .clone()
            .selection_position()
            .map(|(a, b)| (a as usize, b as usize));
        self.model.borrow_mut().set_selection(selection);
    }
}

impl EditSurface for RichTextSurface {
    fn serialized_content(&self) -> String {
        self.model.borrow().to_html()
    }

    fn set_serialized_content(&mut self, blob: &str) -> Result<()> {
        // The model swaps runs atomically and keeps its pending/default
        // formats; a rejected blob leaves the widget untouched.
        self.model.borrow_mut().set_serialized_content(blob)?;
        self.refresh_widget();
        Ok(())
    }

    fn clear(&mut self) {
        self.model.borrow_mut().clear();
        self.syncing.set(true);
        self.buffer.set_text("");
        self.style_buffer.set_text("");
        self.syncing.set(false);
        self.editor.redraw();
    }

    fn format_at_cursor(&self) -> CharFormat {
        self.sync_selection();
        self.model.borrow().format_at_cursor()
    }

    fn set_format_at_cursor(&mut self, format: CharFormat) {
        self.sync_selection();
        let selection = self.model.borrow().selection();
        self.model.borrow_mut().set_format_at_cursor(format.clone());

        if let Some((start, end)) = selection {
            if start < end {
                let (index, added) = ensure_style(&mut self.styles.borrow_mut(), &format);
                let letters = style_letter(index).to_string().repeat(end - start);
                self.style_buffer.replace(start as i32, end as i32, &letters);
                if added {
                    self.refresh_style_table();
                }
                self.editor.redraw();
                // Restyling selected text changes the document.
                self.sender.send(Message::ContentChanged);
            }
        }
    }
}

/// Index of `format` in the style table, adding it when new. The bool is
/// true when an entry was added and the widget table needs a refresh.
fn ensure_style(styles: &mut Vec<CharFormat>, format: &CharFormat) -> (usize, bool) {
    if let Some(index) = styles.iter().position(|f| f == format) {
        return (index, false);
    }
    if styles.len() >= MAX_STYLES {
        return (MAX_STYLES - 1, false);
    }
    styles.push(format.clone());
    (styles.len() - 1, true)
}

fn style_letter(index: usize) -> char {
    (b'A' + index.min(MAX_STYLES - 1) as u8) as char
}

fn apply_style_table(editor: &mut TextEditor, style_buffer: &TextBuffer, styles: &[CharFormat]) {
    let table: Vec<StyleTableEntryExt> = styles.iter().map(style_entry).collect();
    editor.set_highlight_data_ext(style_buffer.clone(), table);
}

fn style_entry(format: &CharFormat) -> StyleTableEntryExt {
    StyleTableEntryExt {
        color: format.foreground.map(to_fltk_color).unwrap_or(Color::Foreground),
        font: font_for(format),
        size: format.font_size.map(|s| s as i32).unwrap_or(DEFAULT_TEXT_SIZE),
        attr: if format.underline {
            TextAttr::Underline
        } else {
            TextAttr::None
        },
        bgcolor: format.background.map(to_fltk_color).unwrap_or(Color::Background2),
    }
}

fn to_fltk_color(color: Rgb) -> Color {
    Color::from_rgb(color.r, color.g, color.b)
}

/// Map a format onto one of FLTK's core fonts. Bold and italic are font
/// variants in FLTK, not attributes.
fn font_for(format: &CharFormat) -> Font {
    let family = format.font_family.as_deref().unwrap_or("Helvetica");
    match (family, format.bold, format.italic) {
        ("Courier", false, false) => Font::Courier,
        ("Courier", true, false) => Font::CourierBold,
        ("Courier", false, true) => Font::CourierItalic,
        ("Courier", true, true) => Font::CourierBoldItalic,
        ("Times", false, false) => Font::Times,
        ("Times", true, false) => Font::TimesBold,
        ("Times", false, true) => Font::TimesItalic,
        ("Times", true, true) => Font::TimesBoldItalic,
        (_, false, false) => Font::Helvetica,
        (_, true, false) => Font::HelveticaBold,
        (_, false, true) => Font::HelveticaItalic,
        (_, true, true) => Font::HelveticaBoldItalic,
    }
}
