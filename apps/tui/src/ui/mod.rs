// UI module for the station sunburst viewer
// Handles all UI rendering functions

pub mod layout;
pub mod screens;
pub mod theme;
pub mod widgets;

use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    screens::main::render_main(app, f);
}
