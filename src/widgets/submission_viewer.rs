use crate::theme::Theme;
use crate::widgets::chrome::panel_block;
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};
use std::sync::OnceLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Style as SynStyle, Theme as SynTheme, ThemeSet};
use syntect::parsing::SyntaxSet;

/// Scrollable, syntax-highlighted view of the last submitted payload.
pub struct SubmissionViewer {
    title: String,
    pub raw_json: String,
    lines: Vec<Line<'static>>,
    scroll_y: u16,
    last_viewport_h: u16,
}

impl SubmissionViewer {
    pub fn new(title: impl Into<String>, value: &serde_json::Value) -> Self {
        let raw_json = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        let lines = highlight_json(&raw_json);
        Self {
            title: title.into(),
            raw_json,
            lines,
            scroll_y: 0,
            last_viewport_h: 0,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME: OnceLock<SynTheme> = OnceLock::new();

fn get_syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn get_theme() -> &'static SynTheme {
    THEME.get_or_init(|| {
        let ts = ThemeSet::load_defaults();
        ts.themes
            .get("base16-ocean.dark")
            .cloned()
            .unwrap_or_else(|| ts.themes.values().next().cloned().unwrap_or_default())
    })
}

fn highlight_json(text: &str) -> Vec<Line<'static>> {
    let ps = get_syntax_set();
    let syn = ps
        .find_syntax_by_token("json")
        .unwrap_or_else(|| ps.find_syntax_plain_text());
    let mut high = HighlightLines::new(syn, get_theme());
    let mut out = Vec::new();
    for line in text.split('\n') {
        let regions: Vec<(SynStyle, &str)> = high.highlight_line(line, ps).unwrap_or_default();
        let spans: Vec<Span<'static>> = regions
            .into_iter()
            .map(|(st, seg)| {
                let c = st.foreground;
                Span::styled(seg.to_string(), Style::default().fg(Color::Rgb(c.r, c.g, c.b)))
            })
            .collect();
        out.push(Line::from(spans));
    }
    out
}

impl crate::widgets::Widget for SubmissionViewer {
    fn render(&mut self, f: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        self.last_viewport_h = area.height.saturating_sub(2);
        let max_scroll = (self.line_count() as u16).saturating_sub(self.last_viewport_h);
        if self.scroll_y > max_scroll {
            self.scroll_y = max_scroll;
        }
        let p = Paragraph::new(self.lines.clone())
            .block(panel_block(&self.title, focused, theme))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_y, 0));
        f.render_widget(p, area);
    }

    fn on_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::PageUp => {
                self.scroll_y = self.scroll_y.saturating_sub(self.last_viewport_h.max(1));
            }
            KeyCode::PageDown => {
                self.scroll_y = self.scroll_y.saturating_add(self.last_viewport_h.max(1));
            }
            KeyCode::Home => self.scroll_y = 0,
            KeyCode::End => {
                self.scroll_y = (self.line_count() as u16).saturating_sub(self.last_viewport_h);
            }
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::Widget;

    #[test]
    fn highlights_every_line() {
        let v = serde_json::json!({"fullName": "Ada", "emphasis": "[\"B\"]"});
        let viewer = SubmissionViewer::new("Submission", &v);
        assert_eq!(viewer.line_count(), viewer.raw_json.lines().count());
        assert!(viewer.raw_json.contains("\"fullName\": \"Ada\""));
    }

    #[test]
    fn scroll_keys_are_consumed() {
        let mut viewer = SubmissionViewer::new("Submission", &serde_json::json!({"a": "1"}));
        assert!(viewer.on_key(KeyCode::PageDown));
        assert!(viewer.on_key(KeyCode::Home));
        assert!(!viewer.on_key(KeyCode::Char('x')));
    }
}
