//! Character-level formatting values and the commands that mutate them.
//!
//! A `CharFormat` is copied out of the editing surface, changed in exactly
//! one field by a `FormatCommand`, and written back. Fields are orthogonal:
//! no command touches an attribute it does not target.

/// 24-bit RGB color used for text foreground/background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as a CSS hex color, e.g. "#1a2b3c"
    pub fn to_css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse a CSS hex color of the form "#rrggbb"
    pub fn parse_css(value: &str) -> Option<Self> {
        let hex = value.trim().strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }
}

/// The bundle of attributes applied to a run of text.
///
/// `None` means "inherit whatever the widget's default is"; the document
/// core never resolves defaults itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharFormat {
    pub font_family: Option<String>,
    pub font_size: Option<u32>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub foreground: Option<Rgb>,
    pub background: Option<Rgb>,
}

/// A single user formatting command, applied to the format at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCommand {
    SetFont(String),
    /// Raw text from the size input widget; non-numeric input is a no-op.
    SetFontSize(String),
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    SetForeground(Rgb),
    SetBackground(Rgb),
}

impl FormatCommand {
    /// Apply this command to `current`, returning the updated format.
    ///
    /// Returns `None` when the command is a defined no-op (unparseable font
    /// size); the caller must then leave the surface untouched and surface
    /// no error.
    pub fn apply(&self, current: &CharFormat) -> Option<CharFormat> {
        let mut next = current.clone();
        match self {
            FormatCommand::SetFont(family) => next.font_family = Some(family.clone()),
            FormatCommand::SetFontSize(input) => {
                next.font_size = Some(parse_point_size(input)?);
            }
            FormatCommand::ToggleBold => next.bold = !next.bold,
            FormatCommand::ToggleItalic => next.italic = !next.italic,
            FormatCommand::ToggleUnderline => next.underline = !next.underline,
            FormatCommand::SetForeground(color) => next.foreground = Some(*color),
            FormatCommand::SetBackground(color) => next.background = Some(*color),
        }
        Some(next)
    }
}

/// Parse a point size from free-form widget input. Zero is not a valid size.
fn parse_point_size(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok().filter(|size| *size > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn busy_format() -> CharFormat {
        CharFormat {
            font_family: Some("Times".to_string()),
            font_size: Some(14),
            bold: false,
            italic: true,
            underline: false,
            foreground: Some(Rgb::new(200, 30, 30)),
            background: Some(Rgb::new(255, 255, 200)),
        }
    }

    #[test]
    fn test_toggle_bold_leaves_other_attributes() {
        let before = busy_format();
        let after = FormatCommand::ToggleBold.apply(&before).unwrap();
        assert!(after.bold);
        assert_eq!(after.font_family, before.font_family);
        assert_eq!(after.font_size, before.font_size);
        assert_eq!(after.italic, before.italic);
        assert_eq!(after.underline, before.underline);
        assert_eq!(after.foreground, before.foreground);
        assert_eq!(after.background, before.background);
    }

    #[test]
    fn test_toggles_are_involutions() {
        let start = busy_format();
        for command in [
            FormatCommand::ToggleBold,
            FormatCommand::ToggleItalic,
            FormatCommand::ToggleUnderline,
        ] {
            let once = command.apply(&start).unwrap();
            let twice = command.apply(&once).unwrap();
            assert_eq!(twice, start, "{:?} applied twice changed the format", command);
            assert_ne!(once, start);
        }
    }

    #[test]
    fn test_set_font_only_changes_family() {
        let before = busy_format();
        let after = FormatCommand::SetFont("Courier".to_string())
            .apply(&before)
            .unwrap();
        assert_eq!(after.font_family.as_deref(), Some("Courier"));
        assert_eq!(after.font_size, before.font_size);
        assert_eq!(after.italic, before.italic);
    }

    #[test]
    fn test_font_size_parses_valid_input() {
        let after = FormatCommand::SetFontSize("14".to_string())
            .apply(&CharFormat::default())
            .unwrap();
        assert_eq!(after.font_size, Some(14));

        let padded = FormatCommand::SetFontSize(" 18 ".to_string())
            .apply(&CharFormat::default())
            .unwrap();
        assert_eq!(padded.font_size, Some(18));
    }

    #[test]
    fn test_font_size_rejects_bad_input() {
        let before = busy_format();
        assert_eq!(FormatCommand::SetFontSize("12abc".to_string()).apply(&before), None);
        assert_eq!(FormatCommand::SetFontSize("".to_string()).apply(&before), None);
        assert_eq!(FormatCommand::SetFontSize("-3".to_string()).apply(&before), None);
        assert_eq!(FormatCommand::SetFontSize("0".to_string()).apply(&before), None);
    }

    #[test]
    fn test_set_colors_are_independent() {
        let before = busy_format();
        let fg = FormatCommand::SetForeground(Rgb::new(0, 0, 255))
            .apply(&before)
            .unwrap();
        assert_eq!(fg.foreground, Some(Rgb::new(0, 0, 255)));
        assert_eq!(fg.background, before.background);

        let bg = FormatCommand::SetBackground(Rgb::new(0, 255, 0))
            .apply(&before)
            .unwrap();
        assert_eq!(bg.background, Some(Rgb::new(0, 255, 0)));
        assert_eq!(bg.foreground, before.foreground);
    }

    #[test]
    fn test_rgb_css_round_trip() {
        let color = Rgb::new(26, 43, 60);
        assert_eq!(color.to_css(), "#1a2b3c");
        assert_eq!(Rgb::parse_css("#1a2b3c"), Some(color));
        assert_eq!(Rgb::parse_css("#1A2B3C"), Some(color));
        assert_eq!(Rgb::parse_css("1a2b3c"), None);
        assert_eq!(Rgb::parse_css("#1a2b"), None);
        assert_eq!(Rgb::parse_css("#zzzzzz"), None);
    }
}
