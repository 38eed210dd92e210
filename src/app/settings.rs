use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_font_family")]
    pub default_font_family: String,

    #[serde(default = "default_font_size")]
    pub default_font_size: u32,

    #[serde(default = "default_window_width")]
    pub window_width: i32,

    #[serde(default = "default_window_height")]
    pub window_height: i32,

    #[serde(default)]
    pub last_open_directory: Option<String>,
}

fn default_font_family() -> String {
    "Helvetica".to_string()
}

fn default_font_size() -> u32 {
    14
}

fn default_window_width() -> i32 {
    800
}

fn default_window_height() -> i32 {
    600
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_font_family: default_font_family(),
            default_font_size: default_font_size(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            last_open_directory: None,
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or fall back to defaults
    pub fn load() -> Self {
        let config_path = Self::config_path();

        match fs::read_to_string(&config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("Failed to parse settings: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save settings to disk as pretty JSON
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, json)?;

        Ok(())
    }

    /// Config file path (cross-platform)
    pub fn config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("quillpad");
        path.push("settings.json");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.default_font_family, "Helvetica");
        assert_eq!(settings.default_font_size, 14);
        assert_eq!(settings.window_width, 800);
        assert_eq!(settings.window_height, 600);
        assert!(settings.last_open_directory.is_none());
    }

    #[test]
    fn test_serialize_deserialize() {
        let settings = AppSettings {
            last_open_directory: Some("/home/user/docs".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let loaded: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, loaded);
    }

    #[test]
    fn test_partial_config() {
        // Simulate an old config missing new fields
        let json = r#"{"default_font_size": 18}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.default_font_size, 18);
        assert_eq!(settings.default_font_family, "Helvetica");
        assert_eq!(settings.window_width, 800);
    }

    #[test]
    fn test_config_path_ends_with_app_dir() {
        let path = AppSettings::config_path();
        assert!(path.ends_with("quillpad/settings.json"));
    }
}
