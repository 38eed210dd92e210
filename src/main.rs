use fltk::{app, prelude::*};

use quill_pad::app::controller::DocumentController;
use quill_pad::app::domain::{CharFormat, FormatCommand};
use quill_pad::app::messages::Message;
use quill_pad::app::settings::AppSettings;
use quill_pad::ui::{FltkDialogs, RichTextSurface, WindowStatus, build_main_window};

fn main() {
    let fltk_app = app::App::default();
    let settings = AppSettings::load();
    let (sender, receiver) = app::channel::<Message>();

    let mut widgets = build_main_window(&settings, &sender);

    let default_format = CharFormat {
        font_family: Some(settings.default_font_family.clone()),
        font_size: Some(settings.default_font_size),
        ..CharFormat::default()
    };
    let surface = RichTextSurface::new(widgets.editor.clone(), sender, default_format);
    let status = WindowStatus::new(widgets.wind.clone(), widgets.file_label.clone());
    let mut controller = DocumentController::new(surface, FltkDialogs, status);
    controller.set_last_open_directory(settings.last_open_directory.clone());

    widgets.wind.show();

    while fltk_app.wait() {
        if let Some(msg) = receiver.recv() {
            match msg {
                Message::FileNew => controller.new_document(),
                Message::FileOpen => controller.open_document(),
                Message::FileSave => {
                    controller.save_document();
                }
                Message::FileSaveAs => {
                    controller.save_document_as();
                }
                Message::SetFont(family) => {
                    controller.apply_format(&FormatCommand::SetFont(family));
                }
                Message::SetFontSize(input) => {
                    controller.apply_format(&FormatCommand::SetFontSize(input));
                }
                Message::ToggleBold => controller.apply_format(&FormatCommand::ToggleBold),
                Message::ToggleItalic => controller.apply_format(&FormatCommand::ToggleItalic),
                Message::ToggleUnderline => {
                    controller.apply_format(&FormatCommand::ToggleUnderline);
                }
                Message::PickTextColor => controller.pick_text_color(),
                Message::PickHighlightColor => controller.pick_highlight_color(),
                Message::ContentChanged => controller.on_content_changed(),
                Message::WindowClose => {
                    if controller.close_window() {
                        let settings = AppSettings {
                            window_width: widgets.wind.w(),
                            window_height: widgets.wind.h(),
                            last_open_directory: controller
                                .last_open_directory()
                                .map(str::to_string),
                            ..settings.clone()
                        };
                        if let Err(e) = settings.save() {
                            eprintln!("Failed to save settings: {}", e);
                        }
                        fltk_app.quit();
                    }
                }
            }
        }
    }
}
