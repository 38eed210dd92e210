use fltk::{
    app::Sender,
    button::Button,
    enums::{CallbackTrigger, Event, Font, FrameType, Shortcut},
    frame::Frame,
    group::{Flex, FlexType},
    input::Input,
    menu::{Choice, MenuBar, MenuFlag},
    prelude::*,
    text::TextEditor,
    window::Window,
};

use crate::app::collaborators::StatusDisplay;
use crate::app::domain::Document;
use crate::app::messages::Message;
use crate::app::settings::AppSettings;

pub const FONT_FAMILIES: [&str; 3] = ["Helvetica", "Courier", "Times"];

pub struct MainWidgets {
    pub wind: Window,
    pub file_label: Frame,
    pub editor: TextEditor,
}

pub fn build_main_window(settings: &AppSettings, sender: &Sender<Message>) -> MainWidgets {
    let mut wind = Window::new(
        100,
        100,
        settings.window_width,
        settings.window_height,
        "Untitled - QuillPad",
    );
    wind.set_xclass("QuillPad");

    let mut flex = Flex::new(0, 0, settings.window_width, settings.window_height, None);
    flex.set_type(FlexType::Column);

    let mut menu = MenuBar::new(0, 0, 0, 30, "");
    flex.fixed(&menu, 30);
    build_menu(&mut menu, sender);

    let toolbar = build_toolbar(settings, sender);
    flex.fixed(&toolbar, 36);

    let mut file_label = Frame::new(0, 0, 0, 24, "Untitled");
    file_label.set_frame(FrameType::FlatBox);
    file_label.set_label_size(12);
    flex.fixed(&file_label, 24);

    let editor = TextEditor::new(0, 0, 0, 0, "");

    flex.end();
    wind.resizable(&flex);
    wind.end();

    // Window close goes through the controller so unsaved changes can veto it.
    let s = *sender;
    wind.set_callback(move |_| {
        if fltk::app::event() == Event::Close {
            s.send(Message::WindowClose);
        }
    });

    MainWidgets {
        wind,
        file_label,
        editor,
    }
}

fn build_menu(menu: &mut MenuBar, sender: &Sender<Message>) {
    let s = sender;
    menu.add("File/New", Shortcut::Ctrl | 'n', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileNew) });
    menu.add("File/Open...", Shortcut::Ctrl | 'o', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileOpen) });
    menu.add("File/Save", Shortcut::Ctrl | 's', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileSave) });
    menu.add("File/Save As...", Shortcut::Ctrl | Shortcut::Shift | 's', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileSaveAs) });
    menu.add("File/Quit", Shortcut::Ctrl | 'q', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::WindowClose) });

    menu.add("Format/Bold", Shortcut::Ctrl | 'b', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ToggleBold) });
    menu.add("Format/Italic", Shortcut::Ctrl | 'i', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ToggleItalic) });
    menu.add("Format/Underline", Shortcut::Ctrl | 'u', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ToggleUnderline) });
    menu.add("Format/Text Color...", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::PickTextColor) });
    menu.add("Format/Highlight Color...", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::PickHighlightColor) });
}

fn build_toolbar(settings: &AppSettings, sender: &Sender<Message>) -> Flex {
    let mut toolbar = Flex::new(0, 0, 0, 36, None);
    toolbar.set_type(FlexType::Row);

    let mut btn_new = Button::new(0, 0, 0, 0, "New");
    toolbar.fixed(&btn_new, 50);
    btn_new.set_callback({ let s = *sender; move |_| s.send(Message::FileNew) });

    let mut btn_open = Button::new(0, 0, 0, 0, "Open");
    toolbar.fixed(&btn_open, 50);
    btn_open.set_callback({ let s = *sender; move |_| s.send(Message::FileOpen) });

    let mut btn_save = Button::new(0, 0, 0, 0, "Save");
    toolbar.fixed(&btn_save, 50);
    btn_save.set_callback({ let s = *sender; move |_| s.send(Message::FileSave) });

    let mut font_choice = Choice::new(0, 0, 0, 0, None);
    toolbar.fixed(&font_choice, 120);
    font_choice.add_choice(&FONT_FAMILIES.join("|"));
    let initial = FONT_FAMILIES
        .iter()
        .position(|f| *f == settings.default_font_family)
        .unwrap_or(0);
    font_choice.set_value(initial as i32);
    font_choice.set_callback({
        let s = *sender;
        move |choice| {
            if let Some(family) = choice.choice() {
                s.send(Message::SetFont(family));
            }
        }
    });

    let mut size_input = Input::new(0, 0, 0, 0, None);
    toolbar.fixed(&size_input, 50);
    size_input.set_value(&settings.default_font_size.to_string());
    size_input.set_trigger(CallbackTrigger::Changed);
    size_input.set_callback({
        let s = *sender;
        move |input| s.send(Message::SetFontSize(input.value()))
    });

    let mut btn_bold = Button::new(0, 0, 0, 0, "B");
    toolbar.fixed(&btn_bold, 32);
    btn_bold.set_label_font(Font::HelveticaBold);
    btn_bold.set_callback({ let s = *sender; move |_| s.send(Message::ToggleBold) });

    let mut btn_italic = Button::new(0, 0, 0, 0, "I");
    toolbar.fixed(&btn_italic, 32);
    btn_italic.set_label_font(Font::HelveticaItalic);
    btn_italic.set_callback({ let s = *sender; move |_| s.send(Message::ToggleItalic) });

    let mut btn_underline = Button::new(0, 0, 0, 0, "U");
    toolbar.fixed(&btn_underline, 32);
    btn_underline.set_callback({ let s = *sender; move |_| s.send(Message::ToggleUnderline) });

    let mut btn_text_color = Button::new(0, 0, 0, 0, "Color");
    toolbar.fixed(&btn_text_color, 60);
    btn_text_color.set_callback({ let s = *sender; move |_| s.send(Message::PickTextColor) });

    let mut btn_bg_color = Button::new(0, 0, 0, 0, "Highlight");
    toolbar.fixed(&btn_bg_color, 72);
    btn_bg_color.set_callback({ let s = *sender; move |_| s.send(Message::PickHighlightColor) });

    // Trailing frame soaks up the remaining row width.
    let _spacer = Frame::new(0, 0, 0, 0, "");

    toolbar.end();
    toolbar
}

/// Window title plus file label, refreshed by the controller.
pub struct WindowStatus {
    wind: Window,
    file_label: Frame,
}

impl WindowStatus {
    pub fn new(wind: Window, file_label: Frame) -> Self {
        Self { wind, file_label }
    }
}

impl StatusDisplay for WindowStatus {
    fn show_document(&mut self, document: &Document) {
        let prefix = if document.is_dirty() { "*" } else { "" };
        self.wind
            .set_label(&format!("{}{} - QuillPad", prefix, document.display_name()));
        self.file_label
            .set_label(document.file_path().unwrap_or("Untitled"));
    }
}
