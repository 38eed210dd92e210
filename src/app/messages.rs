/// All messages that can be sent through the FLTK channel.
/// Each toolbar/menu callback sends one of these; the dispatch loop in main handles them.
#[derive(Debug, Clone)]
pub enum Message {
    // File
    FileNew,
    FileOpen,
    FileSave,
    FileSaveAs,
    WindowClose,

    // Format
    SetFont(String),
    SetFontSize(String),
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    PickTextColor,
    PickHighlightColor,

    // Editing surface
    ContentChanged,
}
