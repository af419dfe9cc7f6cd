use crate::render::{focus_targets, wizard_view, FocusTarget};
use crate::services::config::{load_config, ConfigSource};
use crate::theme::Theme;
use crate::widgets::landing::draw_landing;
use crate::widgets::status_bar::draw_status;
use crate::widgets::submission_viewer::SubmissionViewer;
use crate::widgets::wizard_modal::{draw_modal, ChooserView, ModalUi};
use crate::widgets::Widget;
use crate::wizard::upload::{parse_dropped_paths, SelectedFile};
use crate::wizard::{Control, Effect, Wizard, WizardEvent};
use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tui_textarea::TextArea;

const TICKS_PER_SECOND: u64 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

pub struct Toast {
    pub text: String,
    pub level: ToastLevel,
    pub expires_at_tick: u64,
}

/// Field currently receiving keystrokes.
pub(crate) enum Editing {
    Line { field: String, buffer: String },
    Area { field: String, textarea: TextArea<'static> },
}

impl Editing {
    pub(crate) fn field(&self) -> &str {
        match self {
            Editing::Line { field, .. } | Editing::Area { field, .. } => field,
        }
    }
}

pub(crate) struct FileChooser {
    pub(crate) zone: String,
    pub(crate) input: String,
}

pub struct AppState {
    pub(crate) wizard: Wizard,
    pub(crate) config_source: ConfigSource,
    pub(crate) trigger_selected: usize,
    // Index into the focus targets of the active step
    pub(crate) focus: usize,
    pub(crate) editing: Option<Editing>,
    pub(crate) chooser: Option<FileChooser>,
    pub(crate) submission: Option<SubmissionViewer>,
    pub(crate) toast: Option<Toast>,
    pub(crate) tick: u64,
    // Rendered in the bottom debug pane while `show_debug` is set
    pub(crate) debug_log: VecDeque<String>,
    pub(crate) show_debug: bool,
    pub(crate) theme: Theme,
    pub(crate) modal_area: Option<Rect>,
    pub(crate) quit: bool,
}

impl AppState {
    pub fn new(wizard: Wizard, config_source: ConfigSource) -> Self {
        Self {
            wizard,
            config_source,
            trigger_selected: 0,
            focus: 0,
            editing: None,
            chooser: None,
            submission: None,
            toast: None,
            tick: 0,
            debug_log: VecDeque::new(),
            show_debug: false,
            theme: Theme::default(),
            modal_area: None,
            quit: false,
        }
    }

    pub fn dbg(&mut self, msg: impl Into<String>) {
        const MAX_LOG_LINES: usize = 200;
        if self.debug_log.len() >= MAX_LOG_LINES {
            self.debug_log.pop_front();
        }
        self.debug_log.push_back(msg.into());
    }

    fn show_toast(&mut self, text: impl Into<String>, level: ToastLevel, seconds: u64) {
        self.toast = Some(Toast {
            text: text.into(),
            level,
            expires_at_tick: self.tick + seconds * TICKS_PER_SECOND,
        });
    }

    fn targets(&self) -> Vec<FocusTarget> {
        focus_targets(&wizard_view(&self.wizard))
    }

    pub(crate) fn focused_target(&self) -> Option<FocusTarget> {
        self.targets().get(self.focus).cloned()
    }

    fn move_focus(&mut self, forward: bool) {
        let n = self.targets().len();
        if n == 0 {
            self.focus = 0;
            return;
        }
        self.focus = if forward {
            (self.focus + 1) % n
        } else {
            (self.focus + n - 1) % n
        };
    }

    fn field_value(&self, name: &str) -> String {
        match self.wizard.control(name) {
            Some(Control::Input(f)) => f.value().to_string(),
            _ => String::new(),
        }
    }
}

fn run_effects(state: &mut AppState, effects: Vec<Effect>) {
    for eff in effects {
        match eff {
            Effect::OpenFileChooser { zone } => {
                state.dbg(format!("choose file for {zone}"));
                state.chooser = Some(FileChooser {
                    zone,
                    input: String::new(),
                });
            }
            Effect::ValidationFailed { step, fields } => {
                state.dbg(format!("step {step} incomplete: {}", fields.join(", ")));
            }
            Effect::UnknownStyle { group, style } => {
                state.dbg(format!("{group}: no preview for '{style}'"));
                state.show_toast(format!("No preview for '{style}'"), ToastLevel::Info, 3);
            }
            Effect::Submitted(payload) => {
                state.dbg(format!("submitted {} fields", payload.len()));
                state.submission = Some(SubmissionViewer::new("Submission", &payload.report()));
                state.show_toast(
                    "Resume data collected (see Submission)",
                    ToastLevel::Success,
                    5,
                );
                state.editing = None;
                state.chooser = None;
            }
        }
    }
}

/// Feeds one event to the wizard and applies the resulting effects.
pub(crate) fn dispatch(state: &mut AppState, ev: WizardEvent) {
    let before = state.wizard.current_step();
    match state.wizard.update(ev) {
        Ok(effects) => run_effects(state, effects),
        Err(e) => {
            warn!(error = %e, "event rejected");
            state.dbg(format!("rejected: {e}"));
        }
    }
    if state.wizard.current_step() != before {
        state.focus = 0;
    }
    let n = state.targets().len();
    if state.focus >= n {
        state.focus = n.saturating_sub(1);
    }
}

fn to_textarea_input(key: KeyEvent) -> tui_textarea::Input {
    use tui_textarea::Key;
    let k = match key.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Tab => Key::Tab,
        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Esc => Key::Esc,
        KeyCode::F(n) => Key::F(n),
        _ => Key::Null,
    };
    tui_textarea::Input {
        key: k,
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        alt: key.modifiers.contains(KeyModifiers::ALT),
        shift: key.modifiers.contains(KeyModifiers::SHIFT),
    }
}

fn begin_edit(state: &mut AppState, name: String, multiline: bool) {
    let value = state.field_value(&name);
    state.editing = Some(if multiline {
        let mut ta = TextArea::from(value.lines().map(str::to_string).collect::<Vec<_>>());
        ta.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(state.theme.border_focused())
                .title(format!(" Editing: {name} (Esc or Ctrl+S to finish) ")),
        );
        Editing::Area {
            field: name,
            textarea: ta,
        }
    } else {
        Editing::Line {
            field: name,
            buffer: value,
        }
    });
}

fn handle_edit_key(state: &mut AppState, key: KeyEvent) {
    let Some(mut editing) = state.editing.take() else {
        return;
    };
    let mut done = false;
    let mut changed: Option<String> = None;
    match &mut editing {
        Editing::Line { buffer, .. } => match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => done = true,
            KeyCode::Backspace => {
                buffer.pop();
                changed = Some(buffer.clone());
            }
            KeyCode::Char(c) => {
                buffer.push(c);
                changed = Some(buffer.clone());
            }
            _ => {}
        },
        Editing::Area { textarea, .. } => {
            let ctrl_s = key.code == KeyCode::Char('s')
                && key.modifiers.contains(KeyModifiers::CONTROL);
            if key.code == KeyCode::Esc || ctrl_s {
                done = true;
            } else if textarea.input(to_textarea_input(key)) {
                changed = Some(textarea.lines().join("\n"));
            }
        }
    }
    let field = editing.field().to_string();
    if !done {
        state.editing = Some(editing);
    }
    if let Some(value) = changed {
        dispatch(state, WizardEvent::Input { field, value });
    }
}

fn handle_chooser_key(state: &mut AppState, key: KeyEvent) {
    let Some(mut chooser) = state.chooser.take() else {
        return;
    };
    match key.code {
        KeyCode::Esc => state.dbg(format!("file choice cancelled for {}", chooser.zone)),
        KeyCode::Enter => {
            let path = chooser.input.trim();
            if path.is_empty() {
                state.dbg(format!("file choice cancelled for {}", chooser.zone));
            } else {
                let files = vec![SelectedFile::new(path)];
                dispatch(
                    state,
                    WizardEvent::FilesChosen {
                        zone: chooser.zone,
                        files,
                    },
                );
            }
        }
        KeyCode::Backspace => {
            chooser.input.pop();
            state.chooser = Some(chooser);
        }
        KeyCode::Char(c) => {
            chooser.input.push(c);
            state.chooser = Some(chooser);
        }
        _ => state.chooser = Some(chooser),
    }
}

fn activate(state: &mut AppState, target: FocusTarget) {
    match target {
        FocusTarget::Field { name, multiline } => begin_edit(state, name, multiline),
        FocusTarget::Zone(zone) => dispatch(state, WizardEvent::ZoneClick(zone)),
        FocusTarget::Choice {
            group,
            value,
            exclusive,
        } => {
            let ev = if exclusive {
                WizardEvent::ChooseRadio { group, value }
            } else {
                WizardEvent::ToggleOption { group, value }
            };
            dispatch(state, ev);
        }
        FocusTarget::Style { group, value } => {
            dispatch(state, WizardEvent::ChooseStyle { group, value })
        }
        FocusTarget::Prev => dispatch(state, WizardEvent::Previous),
        FocusTarget::Next => dispatch(state, WizardEvent::Next),
        FocusTarget::Close => dispatch(state, WizardEvent::CloseControl),
    }
}

fn handle_modal_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::Down => state.move_focus(true),
        KeyCode::BackTab | KeyCode::Up => state.move_focus(false),
        KeyCode::PageDown => dispatch(state, WizardEvent::Next),
        KeyCode::PageUp => dispatch(state, WizardEvent::Previous),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(t) = state.focused_target() {
                activate(state, t);
            }
        }
        _ => {}
    }
}

fn copy_submission(state: &mut AppState) {
    let Some(content) = state.submission.as_ref().map(|s| s.raw_json.clone()) else {
        state.show_toast("Nothing submitted yet", ToastLevel::Info, 3);
        return;
    };
    match arboard::Clipboard::new().and_then(|mut c| c.set_text(content)) {
        Ok(()) => state.show_toast("Copied to clipboard!", ToastLevel::Success, 3),
        Err(e) => state.show_toast(format!("Clipboard unavailable: {e}"), ToastLevel::Error, 5),
    }
}

fn handle_landing_key(state: &mut AppState, key: KeyEvent) {
    let n = state.wizard.triggers().len();
    match key.code {
        KeyCode::Char('q') => state.quit = true,
        KeyCode::Up | KeyCode::Char('k') => {
            state.trigger_selected = state.trigger_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.trigger_selected = (state.trigger_selected + 1).min(n.saturating_sub(1));
        }
        KeyCode::Enter => {
            let id = state
                .wizard
                .triggers()
                .iter()
                .nth(state.trigger_selected)
                .map(|t| t.id.clone());
            if let Some(id) = id {
                state.focus = 0;
                dispatch(state, WizardEvent::Trigger(id));
            }
        }
        KeyCode::Char('c') => copy_submission(state),
        code => {
            if let Some(viewer) = &mut state.submission {
                viewer.on_key(code);
            }
        }
    }
}

pub(crate) fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        state.quit = true;
        return;
    }
    if key.code == KeyCode::F(12) {
        state.show_debug = !state.show_debug;
        return;
    }
    if state.chooser.is_some() {
        handle_chooser_key(state, key);
    } else if state.editing.is_some() {
        handle_edit_key(state, key);
    } else if state.wizard.modal().is_open() {
        handle_modal_key(state, key);
    } else {
        handle_landing_key(state, key);
    }
}

/// Bracketed paste. Over a focused upload zone it is a file drop.
pub(crate) fn handle_paste(state: &mut AppState, text: &str) {
    if let Some(chooser) = &mut state.chooser {
        chooser.input.push_str(text.trim());
        return;
    }
    if let Some(editing) = &mut state.editing {
        let (field, value) = match editing {
            Editing::Line { field, buffer } => {
                buffer.push_str(text);
                (field.clone(), buffer.clone())
            }
            Editing::Area { field, textarea } => {
                textarea.insert_str(text);
                (field.clone(), textarea.lines().join("\n"))
            }
        };
        dispatch(state, WizardEvent::Input { field, value });
        return;
    }
    if !state.wizard.modal().is_open() {
        return;
    }
    if let Some(FocusTarget::Zone(zone)) = state.focused_target() {
        dispatch(state, WizardEvent::DragOver(zone.clone()));
        let files = parse_dropped_paths(text);
        if files.is_empty() {
            dispatch(state, WizardEvent::DragLeave(zone));
        } else {
            dispatch(state, WizardEvent::Drop { zone, files });
        }
    }
}

pub(crate) fn handle_click(state: &mut AppState, column: u16, row: u16) {
    if !state.wizard.modal().is_open() {
        return;
    }
    if let Some(area) = state.modal_area {
        if !area.contains(Position::new(column, row)) {
            state.editing = None;
            state.chooser = None;
            dispatch(state, WizardEvent::BackdropClick);
        }
    }
}

fn on_tick(state: &mut AppState) {
    state.tick = state.tick.wrapping_add(1);
    if let Some(t) = &state.toast {
        if state.tick >= t.expires_at_tick {
            state.toast = None;
        }
    }
}

fn draw_debug(f: &mut Frame, area: Rect, state: &AppState) {
    let b = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            "Debug (F12 hide)",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ));
    // Last lines that fit under the border
    let h = area.height.saturating_sub(1) as usize;
    let start = state.debug_log.len().saturating_sub(h);
    let lines: Vec<Line> = state
        .debug_log
        .iter()
        .skip(start)
        .map(|s| Line::raw(s.clone()))
        .collect();
    let p = Paragraph::new(lines)
        .style(Style::default().fg(Color::Gray))
        .block(b)
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

pub(crate) fn ui(f: &mut Frame, state: &mut AppState) {
    let debug_h = if state.show_debug { 8 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(debug_h),
            Constraint::Length(1),
        ])
        .split(f.area());
    draw_landing(f, chunks[0], state);
    state.modal_area = if state.wizard.modal().is_open() {
        let view = wizard_view(&state.wizard);
        let targets = focus_targets(&view);
        let textarea = match &state.editing {
            Some(Editing::Area { textarea, .. }) => Some(textarea),
            _ => None,
        };
        let modal = ModalUi {
            view: &view,
            focus: targets.get(state.focus),
            editing: state.editing.as_ref().map(Editing::field),
            textarea,
            chooser: state.chooser.as_ref().map(|c| ChooserView {
                zone: &c.zone,
                input: &c.input,
            }),
            cursor_on: state.tick % 2 == 0,
            theme: &state.theme,
        };
        Some(draw_modal(f, chunks[0], &modal))
    } else {
        None
    };
    if state.show_debug {
        draw_debug(f, chunks[1], state);
    }
    draw_status(f, chunks[2], state);
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes"))
        .unwrap_or(false)
}

/// Draws `ticks` frames on a `TestBackend`, optionally after activating a
/// trigger, and returns a summary of where the wizard ended up.
fn run_headless(
    state: &mut AppState,
    ticks: u64,
    trigger: Option<String>,
) -> Result<serde_json::Value> {
    if let Some(id) = trigger {
        dispatch(state, WizardEvent::Trigger(id));
    }
    let backend = ratatui::backend::TestBackend::new(100, 30);
    let mut terminal = Terminal::new(backend)?;
    for _ in 0..ticks {
        terminal.draw(|f| ui(f, state))?;
        on_tick(state);
    }
    let nav = state.wizard.nav();
    Ok(serde_json::json!({
        "ok": true,
        "open": state.wizard.modal().is_open(),
        "step": nav.current(),
        "total": nav.total(),
        "step_title": state.wizard.current_panel().map(|p| p.title.clone()),
        "progress": nav.progress_percent(),
        "source": state.config_source.to_string(),
    }))
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, state: &mut AppState) -> Result<()> {
    let tick_rate = Duration::from_millis(1000 / TICKS_PER_SECOND);
    let mut last_tick = Instant::now();
    while !state.quit {
        terminal.draw(|f| ui(f, state))?;
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_millis(0));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                    handle_key(state, key)
                }
                Event::Paste(text) => handle_paste(state, &text),
                Event::Mouse(m) => {
                    if let MouseEventKind::Down(MouseButton::Left) = m.kind {
                        handle_click(state, m.column, m.row);
                    }
                }
                _ => {}
            }
        }
        if last_tick.elapsed() >= tick_rate {
            on_tick(state);
            last_tick = Instant::now();
        }
    }
    Ok(())
}

pub fn run() -> Result<()> {
    crate::logging::init_from_env()?;
    let (cfg, source) = load_config()?;
    let wizard = Wizard::mount(&cfg).with_context(|| format!("mounting form from {source}"))?;
    info!(source = %source, steps = wizard.nav().total(), "form loaded");
    let mut state = AppState::new(wizard, source);

    if env_flag("RESUME_WIZARD_HEADLESS") {
        let ticks: u64 = std::env::var("RESUME_WIZARD_TICKS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(10);
        let trigger = std::env::var("RESUME_WIZARD_HEADLESS_TRIGGER").ok();
        let summary = run_headless(&mut state, ticks, trigger)?;
        if env_flag("RESUME_WIZARD_SMOKE_SUMMARY") {
            println!("{summary}");
        }
        return Ok(());
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let res = event_loop(&mut terminal, &mut state);
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WizardConfig;
    use ratatui::backend::TestBackend;

    fn state() -> AppState {
        let cfg = WizardConfig::builtin().unwrap();
        AppState::new(Wizard::mount(&cfg).unwrap(), ConfigSource::Builtin)
    }

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    fn screen(state: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 36)).unwrap();
        terminal.draw(|f| ui(f, state)).unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn fill(state: &mut AppState, pairs: &[(&str, &str)]) {
        for (field, value) in pairs {
            dispatch(
                state,
                WizardEvent::Input {
                    field: field.to_string(),
                    value: value.to_string(),
                },
            );
        }
    }

    fn open(state: &mut AppState) {
        press(state, KeyCode::Enter);
        assert!(state.wizard.modal().is_open());
    }

    #[test]
    fn enter_on_trigger_opens_and_escape_does_not_close() {
        let mut st = state();
        open(&mut st);
        press(&mut st, KeyCode::Esc);
        assert!(st.wizard.modal().is_open());
        let s = screen(&mut st);
        assert!(s.contains("Step 1 of 5: Personal Details"));
        assert!(s.contains("[ Next ]"));
        assert!(!s.contains("[ Previous ]"));
    }

    #[test]
    fn typing_edits_focused_field() {
        let mut st = state();
        open(&mut st);
        press(&mut st, KeyCode::Enter);
        type_text(&mut st, "Adx");
        press(&mut st, KeyCode::Backspace);
        type_text(&mut st, "a");
        press(&mut st, KeyCode::Enter);
        assert!(st.editing.is_none());
        assert_eq!(st.wizard.collect_payload().get("fullName"), Some("Ada"));
    }

    #[test]
    fn page_down_blocked_until_required_filled() {
        let mut st = state();
        open(&mut st);
        press(&mut st, KeyCode::PageDown);
        assert_eq!(st.wizard.current_step(), 1);
        assert!(st.debug_log.back().unwrap().contains("fullName"));
        assert!(screen(&mut st).contains("(required)"));
        fill(&mut st, &[("fullName", "Ada"), ("email", "a@b.c"), ("targetRole", "Dev")]);
        press(&mut st, KeyCode::PageDown);
        assert_eq!(st.wizard.current_step(), 2);
        assert_eq!(st.focus, 0);
        assert!(screen(&mut st).contains("[ Previous ]"));
    }

    #[test]
    fn paste_on_zone_drops_file_and_chooser_commits_path() {
        let mut st = state();
        open(&mut st);
        fill(&mut st, &[("fullName", "Ada"), ("email", "a@b.c"), ("targetRole", "Dev")]);
        press(&mut st, KeyCode::PageDown);
        assert_eq!(
            st.focused_target(),
            Some(FocusTarget::Zone("resumeFile".into()))
        );
        handle_paste(&mut st, "'/home/me/My CV.pdf'");
        assert!(screen(&mut st).contains("My CV.pdf"));

        press(&mut st, KeyCode::Tab);
        press(&mut st, KeyCode::Enter);
        assert_eq!(st.chooser.as_ref().map(|c| c.zone.as_str()), Some("photoFile"));
        type_text(&mut st, "/tmp/me.png");
        press(&mut st, KeyCode::Enter);
        assert!(st.chooser.is_none());
        let payload = st.wizard.collect_payload();
        assert_eq!(payload.get("resumeFile"), Some("/home/me/My CV.pdf"));
        assert_eq!(payload.get("photoFile"), Some("/tmp/me.png"));
    }

    #[test]
    fn space_toggles_options() {
        let mut st = state();
        open(&mut st);
        fill(&mut st, &[("fullName", "Ada"), ("email", "a@b.c"), ("targetRole", "Dev")]);
        press(&mut st, KeyCode::PageDown);
        press(&mut st, KeyCode::PageDown);
        assert_eq!(st.wizard.current_step(), 3);
        press(&mut st, KeyCode::Char(' '));
        press(&mut st, KeyCode::Down);
        press(&mut st, KeyCode::Char(' '));
        assert_eq!(
            st.wizard.collect_payload().get("emphasis"),
            Some(r#"["leadership","technical-skills"]"#)
        );
        assert!(screen(&mut st).contains("[x] Leadership"));
    }

    #[test]
    fn backdrop_click_closes() {
        let mut st = state();
        open(&mut st);
        screen(&mut st);
        assert!(st.modal_area.is_some());
        handle_click(&mut st, 0, 0);
        assert!(!st.wizard.modal().is_open());
    }

    #[test]
    fn submission_lands_in_viewer() {
        let mut st = state();
        open(&mut st);
        fill(&mut st, &[("fullName", "Ada"), ("email", "a@b.c"), ("targetRole", "Dev")]);
        press(&mut st, KeyCode::PageDown);
        handle_paste(&mut st, "/tmp/cv.pdf /tmp/letter.pdf");
        press(&mut st, KeyCode::PageDown);
        fill(&mut st, &[("summary", "Engineer")]);
        press(&mut st, KeyCode::PageDown);
        press(&mut st, KeyCode::PageDown);
        assert_eq!(st.wizard.current_step(), 5);
        assert!(screen(&mut st).contains("[ Create My Resume ]"));
        press(&mut st, KeyCode::PageDown);
        assert!(!st.wizard.modal().is_open());
        let viewer = st.submission.as_ref().unwrap();
        assert!(viewer.raw_json.contains("\"summary\": \"Engineer\""));
        assert!(viewer.raw_json.contains("/tmp/letter.pdf"));
        assert!(matches!(
            st.toast.as_ref().map(|t| t.level),
            Some(ToastLevel::Success)
        ));
        assert!(screen(&mut st).contains("Submission"));
    }

    #[test]
    fn debug_pane_shows_rejected_steps() {
        let mut st = state();
        open(&mut st);
        press(&mut st, KeyCode::PageDown);
        assert!(!screen(&mut st).contains("step 1 incomplete"));
        press(&mut st, KeyCode::F(12));
        assert!(st.show_debug);
        let s = screen(&mut st);
        assert!(s.contains("Debug (F12 hide)"));
        assert!(s.contains("step 1 incomplete: fullName, email, targetRole"));
        fill(&mut st, &[("summary", "x")]);
        assert!(screen(&mut st).contains("not on the current step"));
    }

    #[test]
    fn headless_run_reports_opened_modal() {
        let mut st = state();
        let summary = run_headless(&mut st, 3, Some("hero-use-template".into())).unwrap();
        assert_eq!(summary["open"], true);
        assert_eq!(summary["step"], 1);
        assert_eq!(summary["total"], 5);
        assert_eq!(summary["step_title"], "Personal Details");
        assert_eq!(summary["source"], "built-in");
        assert_eq!(st.tick, 3);

        let mut st = state();
        let summary = run_headless(&mut st, 1, Some("nope".into())).unwrap();
        assert_eq!(summary["open"], false);
    }
}
