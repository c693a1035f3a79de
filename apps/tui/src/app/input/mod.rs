pub(crate) mod helpers;
pub mod screens;

use crate::app::state::App;
use crossterm::event::{KeyCode, MouseEvent};
use ratatui::layout::Rect;

pub fn handle_input(app: &mut App, key: KeyCode) {
    screens::dispatch_input(app, key);
}

/// `area` is the full terminal area the frame was drawn into.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent, area: Rect) {
    screens::mouse::handle_main_mouse(app, mouse, area);
}
