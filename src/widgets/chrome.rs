use crate::theme::Theme;
use ratatui::widgets::{Block, BorderType, Borders};

pub fn panel_block<'a>(title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    let b = Block::default().borders(Borders::ALL).title(title);
    if focused {
        b.border_style(theme.border_focused())
    } else {
        b.border_style(theme.border_unfocused())
    }
}

/// Frame for the modal overlay itself.
pub fn modal_block<'a>(title: String, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_selected())
        .title(title)
        .style(ratatui::style::Style::default().bg(theme.bg))
}
