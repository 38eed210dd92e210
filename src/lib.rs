//! QuillPad - a minimal rich-text notepad.
//!
//! The `app` module is toolkit-free (document lifecycle, formatting model,
//! settings); `ui` holds the FLTK widgets and dialog implementations.

pub mod app;
pub mod ui;
