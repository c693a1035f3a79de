use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_search_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Enter => app.finish_search(true),
        KeyCode::Esc => app.finish_search(false),
        KeyCode::Backspace => app.table.pop_search_char(),
        KeyCode::Char(ch) => app.table.push_search_char(ch),
        _ => {}
    }
}
