use crate::ui::AppState;
use crate::widgets::chrome::panel_block;
use crate::widgets::Widget;
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

/// Page behind the modal: the declared "use template" triggers and the last
/// submission.
pub fn draw_landing(f: &mut Frame, area: Rect, state: &mut AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let focused = !state.wizard.modal().is_open();
    let items: Vec<ListItem> = state
        .wizard
        .triggers()
        .iter()
        .map(|t| ListItem::new(format!("[ {} ]", t.label)))
        .collect();
    let list = List::new(items)
        .block(panel_block("Templates", focused, &state.theme))
        .highlight_style(state.theme.option_active())
        .highlight_symbol("› ");
    let mut ls = ListState::default();
    ls.select(Some(state.trigger_selected));
    f.render_stateful_widget(list, cols[0], &mut ls);

    let theme = state.theme.clone();
    match &mut state.submission {
        Some(viewer) => viewer.render(f, cols[1], false, &theme),
        None => {
            let p = Paragraph::new(vec![
                Line::from(format!("Form: {}", state.config_source)),
                Line::from(""),
                Line::from(Span::styled(
                    "Open a template to start building your resume.",
                    theme.text_muted(),
                )),
            ])
            .block(panel_block("Submission", false, &theme));
            f.render_widget(p, cols[1]);
        }
    }
}
