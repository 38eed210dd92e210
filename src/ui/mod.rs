//! FLTK implementations of the window, toolbar, dialogs, and editing surface.

pub mod color_dialog;
pub mod dialogs;
pub mod file_dialogs;
pub mod main_window;
pub mod surface;

pub use dialogs::FltkDialogs;
pub use main_window::{MainWidgets, WindowStatus, build_main_window};
pub use surface::RichTextSurface;
