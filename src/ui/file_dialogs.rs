use fltk::dialog::{FileDialogType, NativeFileChooser};

pub fn native_open_dialog(filter: &str, start_dir: Option<&str>) -> Option<String> {
    run_chooser(FileDialogType::BrowseFile, filter, start_dir)
}

pub fn native_save_dialog(filter: &str, start_dir: Option<&str>) -> Option<String> {
    run_chooser(FileDialogType::BrowseSaveFile, filter, start_dir)
}

fn run_chooser(kind: FileDialogType, filter: &str, start_dir: Option<&str>) -> Option<String> {
    let mut nfc = NativeFileChooser::new(kind);
    nfc.set_filter(filter);
    if let Some(dir) = start_dir {
        let _ = nfc.set_directory(&dir);
    }
    nfc.show(); // returns (), blocks until close
    let filename = nfc.filename();
    let s = filename.to_string_lossy();
    if s.is_empty() { None } else { Some(s.to_string()) }
}
