//! FLTK-backed modal dialogs behind the `DialogService` trait.

use fltk::dialog;

use crate::app::collaborators::{ConfirmChoice, DialogService};
use crate::app::domain::Rgb;

use super::color_dialog::pick_color;
use super::file_dialogs::{native_open_dialog, native_save_dialog};

#[derive(Default)]
pub struct FltkDialogs;

impl DialogService for FltkDialogs {
    fn pick_open_path(&mut self, filter: &str, start_dir: Option<&str>) -> Option<String> {
        native_open_dialog(filter, start_dir)
    }

    fn pick_save_path(&mut self, filter: &str, start_dir: Option<&str>) -> Option<String> {
        native_save_dialog(filter, start_dir)
    }

    fn pick_color(&mut self) -> Option<Rgb> {
        pick_color("Pick a color")
    }

    fn confirm_unsaved(&mut self, prompt: &str) -> ConfirmChoice {
        match dialog::choice2_default(prompt, "Save", "Discard", "Cancel") {
            Some(0) => ConfirmChoice::Save,
            Some(1) => ConfirmChoice::Discard,
            _ => ConfirmChoice::Cancel,
        }
    }

    fn alert(&mut self, message: &str) {
        dialog::alert_default(message);
    }
}
