pub mod chrome;
pub mod landing;
pub mod status_bar;
pub mod submission_viewer;
pub mod wizard_modal;

use crate::theme::Theme;
use crossterm::event::KeyCode;
use ratatui::prelude::*;

pub trait Widget {
    fn render(&mut self, f: &mut Frame, area: Rect, focused: bool, theme: &Theme);
    /// Returns whether the key was consumed.
    fn on_key(&mut self, key: KeyCode) -> bool {
        let _ = key;
        false
    }
}
