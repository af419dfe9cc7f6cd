use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::*;

use crate::ui::{AppState, ToastLevel};

pub fn help_text(state: &AppState) -> &'static str {
    if state.chooser.is_some() {
        "Type a path • Enter choose • Esc cancel"
    } else if state.editing.is_some() {
        "Type to edit • Enter/Esc done"
    } else if state.wizard.modal().is_open() {
        "Tab/↑↓ move • Enter/Space select • PgDn next • PgUp back • paste path to drop • F12 debug"
    } else {
        "↑↓ choose • Enter open • c copy submission • PgUp/PgDn scroll • F12 debug • q quit"
    }
}

pub fn draw_status(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans: Vec<Span> = Vec::new();
    if state.wizard.modal().is_open() {
        let nav = state.wizard.nav();
        spans.push(Span::styled(
            format!(" step {}/{} ", nav.current(), nav.total()),
            Style::default().fg(Color::Magenta),
        ));
        if state.editing.is_some() {
            spans.push(Span::raw(" | editing"));
        }
    }
    if let Some(t) = &state.toast {
        if !spans.is_empty() {
            spans.push(Span::raw("  |  "));
        }
        let color = state.theme.toast_color(t.level);
        let tag = match t.level {
            ToastLevel::Success => "[OK]",
            ToastLevel::Error => "[ERROR]",
            ToastLevel::Info => "[INFO]",
        };
        spans.push(Span::styled(
            format!("{tag} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(t.text.clone(), Style::default().fg(color)));
    }
    if !spans.is_empty() {
        spans.push(Span::raw("  |  "));
    }
    spans.push(Span::styled(help_text(state), state.theme.text_muted()));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
