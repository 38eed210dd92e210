use fltk::dialog::{self, ColorMode};

use crate::app::domain::Rgb;

/// Run the modal color chooser. `None` means the user cancelled.
pub fn pick_color(title: &str) -> Option<Rgb> {
    dialog::color_chooser(title, ColorMode::Rgb).map(|(r, g, b)| Rgb::new(r, g, b))
}
