use crate::render::{ControlView, FocusTarget, OptionView, WizardView};
use crate::theme::Theme;
use crate::widgets::chrome::modal_block;
use crate::wizard::upload::ZoneTreatment;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap};
use tui_textarea::TextArea;

/// Path prompt standing in for the native file chooser.
pub struct ChooserView<'a> {
    pub zone: &'a str,
    pub input: &'a str,
}

pub struct ModalUi<'a> {
    pub view: &'a WizardView,
    pub focus: Option<&'a FocusTarget>,
    pub editing: Option<&'a str>,
    pub textarea: Option<&'a TextArea<'static>>,
    pub chooser: Option<ChooserView<'a>>,
    pub cursor_on: bool,
    pub theme: &'a Theme,
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let h = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(v[1]);
    h[1]
}

/// Screen rectangle the modal occupies inside `area`.
pub fn modal_rect(area: Rect) -> Rect {
    centered_rect(80, 85, area)
}

fn marker(ui: &ModalUi, target: &FocusTarget) -> &'static str {
    if ui.focus == Some(target) {
        "› "
    } else {
        "  "
    }
}

fn option_line(ui: &ModalUi, target: FocusTarget, o: &OptionView, exclusive: bool) -> Line<'static> {
    let glyph = match (exclusive, o.active) {
        (true, true) => "(•)",
        (true, false) => "( )",
        (false, true) => "[x]",
        (false, false) => "[ ]",
    };
    let style = if o.active {
        ui.theme.option_active()
    } else if ui.focus == Some(&target) {
        ui.theme.text_active_bold()
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw(format!("  {}", marker(ui, &target))),
        Span::styled(format!("{glyph} {}", o.label), style),
    ])
}

fn control_lines(ui: &ModalUi, c: &ControlView, lines: &mut Vec<Line<'static>>) {
    let theme = ui.theme;
    match c {
        ControlView::Input {
            name,
            label,
            value,
            placeholder,
            required,
            multiline,
            flagged,
        } => {
            let target = FocusTarget::Field {
                name: name.clone(),
                multiline: *multiline,
            };
            let req = if *required { " *" } else { "" };
            let editing = ui.editing == Some(name.as_str());
            let label_style = if *flagged {
                theme.border_flagged()
            } else {
                Style::default()
            };
            let value_style = if editing {
                theme.text_editing_bold()
            } else if ui.focus == Some(&target) {
                theme.text_active_bold()
            } else {
                Style::default()
            };
            let mut head = vec![
                Span::raw(marker(ui, &target)),
                Span::styled(format!("{label}{req}: "), label_style),
            ];
            if *multiline {
                if *flagged {
                    head.push(Span::styled("(required)", theme.border_flagged()));
                }
                lines.push(Line::from(head));
                if value.is_empty() {
                    let hint = placeholder.clone().unwrap_or_default();
                    lines.push(Line::from(Span::styled(format!("    {hint}"), theme.text_muted())));
                } else {
                    for l in value.lines() {
                        lines.push(Line::from(Span::styled(format!("    {l}"), value_style)));
                    }
                }
                return;
            }
            if value.is_empty() && !editing {
                let hint = placeholder.clone().unwrap_or_default();
                head.push(Span::styled(hint, theme.text_muted()));
            } else {
                let mut v = value.clone();
                if editing && ui.cursor_on {
                    v.push('▏');
                }
                head.push(Span::styled(v, value_style));
            }
            if *flagged {
                head.push(Span::styled("  (required)", theme.border_flagged()));
            }
            lines.push(Line::from(head));
        }
        ControlView::Upload {
            name,
            label,
            display,
            hint,
            treatment,
            flagged,
        } => {
            let target = FocusTarget::Zone(name.clone());
            let zone_style = if *flagged {
                theme.border_flagged()
            } else {
                match treatment {
                    ZoneTreatment::Selected => theme.border_selected(),
                    ZoneTreatment::Idle => theme.border_unfocused(),
                }
            };
            let body = if display.is_empty() {
                match hint {
                    Some(h) => format!("Press Enter to browse or drop a file ({h})"),
                    None => "Press Enter to browse or drop a file".to_string(),
                }
            } else {
                display.clone()
            };
            lines.push(Line::from(vec![
                Span::raw(marker(ui, &target)),
                Span::raw(format!("{label}: ")),
                Span::styled(format!("[ {body} ]"), zone_style),
            ]));
        }
        ControlView::Options {
            name,
            label,
            exclusive,
            options,
        } => {
            lines.push(Line::from(Span::styled(
                format!("  {label}"),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for o in options {
                let target = FocusTarget::Choice {
                    group: name.clone(),
                    value: o.value.clone(),
                    exclusive: *exclusive,
                };
                lines.push(option_line(ui, target, o, *exclusive));
            }
        }
        ControlView::Styles {
            name,
            label,
            cards,
            preview,
        } => {
            lines.push(Line::from(Span::styled(
                format!("  {label}"),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for o in cards {
                let target = FocusTarget::Style {
                    group: name.clone(),
                    value: o.value.clone(),
                };
                lines.push(option_line(ui, target, o, true));
            }
            let preview_line = match preview {
                Some(img) => Line::from(vec![
                    Span::raw("    Preview: "),
                    Span::styled(img.src.clone(), theme.border_selected()),
                    Span::styled(format!("  ({})", img.alt), theme.text_muted()),
                ]),
                None => Line::from(Span::styled(
                    "    Preview: pick a style",
                    theme.text_muted(),
                )),
            };
            lines.push(preview_line);
        }
    }
}

fn button_span(ui: &ModalUi, target: FocusTarget, text: String, base: Style) -> Span<'static> {
    let style = if ui.focus == Some(&target) {
        base.add_modifier(Modifier::REVERSED)
    } else {
        base
    };
    Span::styled(text, style)
}

/// Draws the open modal over `area` and returns the rectangle it covers.
pub fn draw_modal(f: &mut Frame, area: Rect, ui: &ModalUi) -> Rect {
    let view = ui.view;
    let rect = modal_rect(area);
    f.render_widget(Clear, rect);
    let block = modal_block(format!(" {} ", view.title), ui.theme);
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    let gauge = Gauge::default()
        .gauge_style(ui.theme.gauge())
        .ratio((view.progress_percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{:.0}%", view.progress_percent));
    f.render_widget(gauge, chunks[0]);

    let mut lines: Vec<Line<'static>> = Vec::new();
    let heading = match view.active_panel() {
        Some(p) => format!("Step {} of {}: {}", view.step, view.total, p.title),
        None => format!("Step {} of {}", view.step, view.total),
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            heading,
            ui.theme.text_active_bold(),
        ))),
        chunks[1],
    );
    if let Some(panel) = view.active_panel() {
        for c in &panel.controls {
            control_lines(ui, c, &mut lines);
            lines.push(Line::from(""));
        }
    }
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        chunks[2],
    );

    let prev_text = "[ Previous ]".to_string();
    let prev = if view.prev_visible {
        button_span(ui, FocusTarget::Prev, prev_text, Style::default())
    } else {
        Span::raw(" ".repeat(prev_text.chars().count()))
    };
    let next_style = if view.next.finish {
        ui.theme.finish_button()
    } else {
        ui.theme.text_active_bold()
    };
    let next = button_span(
        ui,
        FocusTarget::Next,
        format!("[ {} ]", view.next.label),
        next_style,
    );
    let close = button_span(ui, FocusTarget::Close, "[ x Close ]".into(), ui.theme.text_muted());
    f.render_widget(
        Paragraph::new(Line::from(vec![prev, Span::raw("   "), next, Span::raw("   "), close])),
        chunks[3],
    );

    if let Some(ta) = ui.textarea {
        let popup = centered_rect(70, 50, rect);
        f.render_widget(Clear, popup);
        f.render_widget(ta, popup);
    }
    if let Some(chooser) = &ui.chooser {
        let popup = centered_rect(70, 20, rect);
        f.render_widget(Clear, popup);
        let mut text = chooser.input.to_string();
        if ui.cursor_on {
            text.push('▏');
        }
        let p = Paragraph::new(vec![
            Line::from(text),
            Line::from(Span::styled(
                "Enter choose • Esc cancel",
                ui.theme.text_muted(),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(ui.theme.border_focused())
                .title(format!(" Choose file: {} ", chooser.zone)),
        );
        f.render_widget(p, popup);
    }
    rect
}
