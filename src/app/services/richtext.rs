//! In-memory rich-text store: a sequence of uniformly formatted runs.
//!
//! This is the content model behind the editing surface. It tracks the
//! "pending" format used for the next insertion, an optional selection that
//! formatting commands target instead, and serializes to a small HTML
//! dialect (`<span style="…">` runs, `<br>` line breaks, entity-escaped
//! text). Loading parses exactly that dialect; anything else is rejected as
//! a markup error before any state is touched.
//!
//! All positions are byte offsets into the concatenated run text and must
//! lie on UTF-8 character boundaries, which is what the FLTK text buffer
//! reports.

use crate::app::collaborators::EditSurface;
use crate::app::domain::{CharFormat, Rgb};
use crate::app::error::{AppError, Result};

/// A maximal stretch of text sharing one character format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub format: CharFormat,
}

#[derive(Debug, Clone, Default)]
pub struct RichTextModel {
    runs: Vec<Run>,
    /// Format for the next insertion and the format reported at the cursor
    /// when nothing is selected.
    pending: CharFormat,
    /// The format `pending` returns to when the document is cleared.
    default_format: CharFormat,
    /// Byte range targeted by format reads/writes, when present.
    selection: Option<(usize, usize)>,
}

impl RichTextModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pending(format: CharFormat) -> Self {
        Self {
            pending: format.clone(),
            default_format: format,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.runs.iter().map(|run| run.text.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|run| run.text.is_empty())
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn pending_format(&self) -> &CharFormat {
        &self.pending
    }

    /// Insert text at a byte offset using the pending format.
    pub fn insert(&mut self, pos: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let pos = pos.min(self.len());
        let index = self.boundary_index(pos);
        self.runs.insert(
            index,
            Run {
                text: text.to_string(),
                format: self.pending.clone(),
            },
        );
        self.normalize();
    }

    /// Delete the byte range `start..end`.
    pub fn delete(&mut self, start: usize, end: usize) {
        let len = self.len();
        let start = start.min(len);
        let end = end.min(len);
        if start >= end {
            return;
        }
        // Split at the end first so the start offset stays valid.
        self.boundary_index(end);
        self.boundary_index(start);
        let mut offset = 0;
        self.runs.retain(|run| {
            let run_start = offset;
            offset += run.text.len();
            !(run_start >= start && run_start + run.text.len() <= end)
        });
        self.selection = None;
        self.normalize();
    }

    /// Set (or clear) the selected byte range. Ranges are clamped and
    /// reordered so callers can pass anchor/cursor in either order.
    pub fn set_selection(&mut self, selection: Option<(usize, usize)>) {
        self.selection = selection.map(|(a, b)| {
            let len = self.len();
            (a.min(b).min(len), a.max(b).min(len))
        });
    }

    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }

    /// The format a toggle would start from: the format of the first
    /// selected character, or the pending format when nothing is selected.
    pub fn format_at_cursor(&self) -> CharFormat {
        if let Some((start, end)) = self.selection {
            if start < end {
                let mut offset = 0;
                for run in &self.runs {
                    if start < offset + run.text.len() {
                        return run.format.clone();
                    }
                    offset += run.text.len();
                }
            }
        }
        self.pending.clone()
    }

    /// Write a format back: onto the selected range when one exists
    /// (splitting runs at its boundaries), otherwise as the new pending
    /// format. Either way the pending format follows the write.
    pub fn set_format_at_cursor(&mut self, format: CharFormat) {
        if let Some((start, end)) = self.selection {
            if start < end {
                self.boundary_index(end);
                self.boundary_index(start);
                let mut offset = 0;
                for run in &mut self.runs {
                    let run_start = offset;
                    offset += run.text.len();
                    if run_start >= start && offset <= end {
                        run.format = format.clone();
                    }
                }
                self.normalize();
            }
        }
        self.pending = format;
    }

    /// Empty the document. The pending format returns to the default the
    /// model was created with, so a fresh document does not inherit the
    /// previous document's formatting.
    pub fn clear(&mut self) {
        self.runs.clear();
        self.selection = None;
        self.pending = self.default_format.clone();
    }

    /// Serialize to the HTML dialect this model reads back.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for run in &self.runs {
            let style = style_attribute(&run.format);
            if style.is_empty() {
                html.push_str(&escape_text(&run.text));
            } else {
                html.push_str("<span style=\"");
                html.push_str(&style);
                html.push_str("\">");
                html.push_str(&escape_text(&run.text));
                html.push_str("</span>");
            }
        }
        html
    }

    /// Parse a serialized blob into a fresh model.
    ///
    /// Accepts what `to_html` produces plus bare unformatted text. Nested
    /// spans inherit nothing (each span's style attribute is complete), so
    /// the parser only needs a stack for balance checking.
    pub fn from_html(html: &str) -> Result<Self> {
        let mut runs = Vec::new();
        let mut current = CharFormat::default();
        let mut stack: Vec<CharFormat> = Vec::new();
        let mut buf = String::new();
        let mut rest = html;

        while !rest.is_empty() {
            match rest.find('<') {
                None => {
                    decode_entities(rest, &mut buf);
                    rest = "";
                }
                Some(lt) => {
                    decode_entities(&rest[..lt], &mut buf);
                    let after_lt = &rest[lt + 1..];
                    let gt = after_lt
                        .find('>')
                        .ok_or_else(|| AppError::Markup("unterminated tag".to_string()))?;
                    let tag = after_lt[..gt].trim();
                    rest = &after_lt[gt + 1..];

                    if tag.eq_ignore_ascii_case("br") || tag.eq_ignore_ascii_case("br/") {
                        buf.push('\n');
                    } else if tag.eq_ignore_ascii_case("/span") {
                        flush_run(&mut runs, &mut buf, &current);
                        current = stack
                            .pop()
                            .ok_or_else(|| AppError::Markup("unbalanced </span>".to_string()))?;
                    } else if tag.get(..4).is_some_and(|name| name.eq_ignore_ascii_case("span")) {
                        flush_run(&mut runs, &mut buf, &current);
                        stack.push(current);
                        current = parse_span_attributes(&tag[4..])?;
                    } else {
                        return Err(AppError::Markup(format!("unsupported tag <{}>", tag)));
                    }
                }
            }
        }

        if !stack.is_empty() {
            return Err(AppError::Markup("unclosed <span>".to_string()));
        }
        flush_run(&mut runs, &mut buf, &current);

        let mut model = Self {
            runs,
            ..Self::default()
        };
        model.normalize();
        Ok(model)
    }

    /// Ensure a run boundary exists at `pos` and return the index of the
    /// run starting there (possibly `runs.len()` for the end of text).
    fn boundary_index(&mut self, pos: usize) -> usize {
        let mut offset = 0;
        for i in 0..self.runs.len() {
            if pos == offset {
                return i;
            }
            let end = offset + self.runs[i].text.len();
            if pos < end {
                let tail = self.runs[i].text.split_off(pos - offset);
                let format = self.runs[i].format.clone();
                self.runs.insert(i + 1, Run { text: tail, format });
                return i + 1;
            }
            offset = end;
        }
        self.runs.len()
    }

    /// Drop empty runs and merge adjacent runs with equal formats.
    fn normalize(&mut self) {
        self.runs.retain(|run| !run.text.is_empty());
        let mut i = 1;
        while i < self.runs.len() {
            if self.runs[i].format == self.runs[i - 1].format {
                let merged = self.runs.remove(i);
                self.runs[i - 1].text.push_str(&merged.text);
            } else {
                i += 1;
            }
        }
    }
}

impl EditSurface for RichTextModel {
    fn serialized_content(&self) -> String {
        self.to_html()
    }

    fn set_serialized_content(&mut self, blob: &str) -> Result<()> {
        let parsed = Self::from_html(blob)?;
        self.runs = parsed.runs;
        self.selection = None;
        Ok(())
    }

    fn clear(&mut self) {
        RichTextModel::clear(self);
    }

    fn format_at_cursor(&self) -> CharFormat {
        RichTextModel::format_at_cursor(self)
    }

    fn set_format_at_cursor(&mut self, format: CharFormat) {
        RichTextModel::set_format_at_cursor(self, format);
    }
}

fn flush_run(runs: &mut Vec<Run>, buf: &mut String, format: &CharFormat) {
    if !buf.is_empty() {
        runs.push(Run {
            text: std::mem::take(buf),
            format: format.clone(),
        });
    }
}

/// Build the inline style declarations for a run, set properties only.
fn style_attribute(format: &CharFormat) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(ref family) = format.font_family {
        parts.push(format!("font-family:{}", family));
    }
    if let Some(size) = format.font_size {
        parts.push(format!("font-size:{}pt", size));
    }
    if format.bold {
        parts.push("font-weight:bold".to_string());
    }
    if format.italic {
        parts.push("font-style:italic".to_string());
    }
    if format.underline {
        parts.push("text-decoration:underline".to_string());
    }
    if let Some(color) = format.foreground {
        parts.push(format!("color:{}", color.to_css()));
    }
    if let Some(color) = format.background {
        parts.push(format!("background-color:{}", color.to_css()));
    }
    parts.join("; ")
}

/// Parse the attribute section of a `<span …>` tag into a format.
fn parse_span_attributes(attributes: &str) -> Result<CharFormat> {
    let attributes = attributes.trim();
    if attributes.is_empty() {
        return Ok(CharFormat::default());
    }
    let style = attributes
        .strip_prefix("style=\"")
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| AppError::Markup(format!("unsupported span attributes: {}", attributes)))?;

    let mut format = CharFormat::default();
    for declaration in style.split(';') {
        let declaration = declaration.trim();
        if declaration.is_empty() {
            continue;
        }
        let (property, value) = declaration
            .split_once(':')
            .ok_or_else(|| AppError::Markup(format!("bad style declaration: {}", declaration)))?;
        let value = value.trim();
        match property.trim() {
            "font-family" => format.font_family = Some(value.trim_matches('\'').to_string()),
            "font-size" => {
                let points = value
                    .strip_suffix("pt")
                    .and_then(|n| n.trim().parse::<u32>().ok())
                    .ok_or_else(|| AppError::Markup(format!("bad font-size: {}", value)))?;
                format.font_size = Some(points);
            }
            "font-weight" if value == "bold" => format.bold = true,
            "font-style" if value == "italic" => format.italic = true,
            "text-decoration" if value == "underline" => format.underline = true,
            "color" => {
                format.foreground = Some(parse_color(value)?);
            }
            "background-color" => {
                format.background = Some(parse_color(value)?);
            }
            other => {
                return Err(AppError::Markup(format!("unsupported style property: {}", other)));
            }
        }
    }
    Ok(format)
}

fn parse_color(value: &str) -> Result<Rgb> {
    Rgb::parse_css(value).ok_or_else(|| AppError::Markup(format!("bad color: {}", value)))
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("<br>"),
            _ => out.push(ch),
        }
    }
    out
}

/// Decode the entities `escape_text` emits. A bare `&` that starts no known
/// entity passes through literally.
fn decode_entities(text: &str, out: &mut String) {
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let entity = [
            ("&amp;", '&'),
            ("&lt;", '<'),
            ("&gt;", '>'),
            ("&quot;", '"'),
            ("&#39;", '\''),
        ]
        .iter()
        .find(|(name, _)| rest.starts_with(name));
        match entity {
            Some((name, ch)) => {
                out.push(*ch);
                rest = &rest[name.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::FormatCommand;

    fn bold() -> CharFormat {
        CharFormat {
            bold: true,
            ..CharFormat::default()
        }
    }

    #[test]
    fn test_insert_uses_pending_format() {
        let mut model = RichTextModel::new();
        model.insert(0, "plain ");
        model.set_format_at_cursor(bold());
        model.insert(6, "loud");
        assert_eq!(model.text(), "plain loud");
        assert_eq!(model.runs().len(), 2);
        assert!(model.runs()[1].format.bold);
    }

    #[test]
    fn test_insert_mid_run_splits() {
        let mut model = RichTextModel::new();
        model.insert(0, "hello world");
        model.set_format_at_cursor(bold());
        model.insert(5, ",");
        assert_eq!(model.text(), "hello, world");
        assert_eq!(model.runs().len(), 3);
        assert_eq!(model.runs()[1].text, ",");
    }

    #[test]
    fn test_delete_across_runs() {
        let mut model = RichTextModel::new();
        model.insert(0, "aaa");
        model.set_format_at_cursor(bold());
        model.insert(3, "bbb");
        model.delete(2, 4);
        assert_eq!(model.text(), "aabb");
        assert_eq!(model.runs().len(), 2);
    }

    #[test]
    fn test_adjacent_equal_runs_merge() {
        let mut model = RichTextModel::new();
        model.insert(0, "one");
        model.insert(3, "two");
        assert_eq!(model.runs().len(), 1);
        assert_eq!(model.runs()[0].text, "onetwo");
    }

    #[test]
    fn test_selection_formatting_splits_runs() {
        let mut model = RichTextModel::new();
        model.insert(0, "hello world");
        model.set_selection(Some((6, 11)));
        model.set_format_at_cursor(bold());
        assert_eq!(model.runs().len(), 2);
        assert_eq!(model.runs()[1].text, "world");
        assert!(model.runs()[1].format.bold);
        assert!(!model.runs()[0].format.bold);
        assert_eq!(model.text(), "hello world");
    }

    #[test]
    fn test_format_at_cursor_reads_selection_start() {
        let mut model = RichTextModel::new();
        model.insert(0, "hello");
        model.set_selection(Some((1, 3)));
        model.set_format_at_cursor(bold());
        let toggled = FormatCommand::ToggleBold.apply(&model.format_at_cursor()).unwrap();
        assert!(!toggled.bold);
    }

    #[test]
    fn test_selection_clamped_and_reordered() {
        let mut model = RichTextModel::new();
        model.insert(0, "abc");
        model.set_selection(Some((99, 1)));
        assert_eq!(model.selection(), Some((1, 3)));
    }

    #[test]
    fn test_html_round_trip() {
        let mut model = RichTextModel::new();
        model.insert(0, "plain ");
        model.set_format_at_cursor(CharFormat {
            font_family: Some("Times".to_string()),
            font_size: Some(14),
            bold: true,
            underline: true,
            foreground: Some(Rgb::new(255, 0, 0)),
            background: Some(Rgb::new(255, 255, 0)),
            ..CharFormat::default()
        });
        model.insert(6, "fancy\ntext");

        let html = model.to_html();
        let reloaded = RichTextModel::from_html(&html).unwrap();
        assert_eq!(reloaded.runs(), model.runs());
        assert_eq!(reloaded.to_html(), html);
    }

    #[test]
    fn test_html_escaping() {
        let mut model = RichTextModel::new();
        model.insert(0, "a < b & c > \"d\"\ne");
        let html = model.to_html();
        assert_eq!(html, "a &lt; b &amp; c &gt; &quot;d&quot;<br>e");
        let reloaded = RichTextModel::from_html(&html).unwrap();
        assert_eq!(reloaded.text(), "a < b & c > \"d\"\ne");
    }

    #[test]
    fn test_bare_text_parses() {
        let model = RichTextModel::from_html("just text").unwrap();
        assert_eq!(model.text(), "just text");
        assert_eq!(model.runs().len(), 1);
    }

    #[test]
    fn test_unknown_markup_rejected() {
        assert!(RichTextModel::from_html("<table>x</table>").is_err());
        assert!(RichTextModel::from_html("<span style=\"font-size:12pt\">x").is_err());
        assert!(RichTextModel::from_html("x</span>").is_err());
        assert!(RichTextModel::from_html("<span style=\"margin:1px\">x</span>").is_err());
        assert!(RichTextModel::from_html("<span title=\"no\">x</span>").is_err());
    }

    #[test]
    fn test_non_ascii_tags_rejected() {
        // Tag names where byte 4 lands inside a multibyte character must
        // come back as markup errors, never out-of-bounds slicing.
        assert!(RichTextModel::from_html("<日本>x").is_err());
        assert!(RichTextModel::from_html("<b日>x").is_err());
        assert!(RichTextModel::from_html("<é>x</é>").is_err());
        assert!(RichTextModel::from_html("<спан style=\"font-weight:bold\">x</спан>").is_err());
        assert!(RichTextModel::from_html("日本 <日本>").is_err());
    }

    #[test]
    fn test_malformed_tags_rejected() {
        assert!(RichTextModel::from_html("<>x").is_err());
        assert!(RichTextModel::from_html("<p>x</p>").is_err());
        assert!(RichTextModel::from_html("<span style=\"font-weight:bold>x</span>").is_err());
        assert!(RichTextModel::from_html("<span style=bold>x</span>").is_err());
        assert!(RichTextModel::from_html("<span\u{e9}>x</span>").is_err());
        assert!(RichTextModel::from_html("x<").is_err());
    }

    #[test]
    fn test_loading_content_keeps_insertion_format() {
        let default = CharFormat {
            font_size: Some(14),
            ..CharFormat::default()
        };
        let mut model = RichTextModel::with_pending(default.clone());
        model.set_serialized_content("from disk").unwrap();
        assert_eq!(model.pending_format(), &default);
        RichTextModel::clear(&mut model);
        assert_eq!(model.pending_format(), &default);
    }

    #[test]
    fn test_rejected_blob_keeps_previous_content() {
        let mut model = RichTextModel::new();
        model.insert(0, "keep me");
        assert!(model.set_serialized_content("<table>nope</table>").is_err());
        assert_eq!(model.text(), "keep me");
    }

    #[test]
    fn test_clear_resets_pending_to_default() {
        let default = CharFormat {
            font_family: Some("Helvetica".to_string()),
            font_size: Some(14),
            ..CharFormat::default()
        };
        let mut model = RichTextModel::with_pending(default.clone());
        model.set_format_at_cursor(bold());
        model.insert(0, "loud");
        RichTextModel::clear(&mut model);
        assert_eq!(model.pending_format(), &default);
        model.insert(0, "fresh");
        assert_eq!(model.runs()[0].format, default);
    }

    #[test]
    fn test_clear_empties_content() {
        let mut model = RichTextModel::new();
        model.insert(0, "something");
        model.set_selection(Some((0, 3)));
        RichTextModel::clear(&mut model);
        assert!(model.is_empty());
        assert_eq!(model.selection(), None);
        assert_eq!(model.to_html(), "");
    }
}
