use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_main_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.running = false;
        }
        KeyCode::Up => app.focus_prev(),
        KeyCode::Down => app.focus_next(),
        KeyCode::Home => app.focus_first(),
        KeyCode::End => app.focus_last(),
        KeyCode::Enter | KeyCode::Char(' ') => app.select_focused(),
        KeyCode::Left => app.cycle_group(-1),
        KeyCode::Right | KeyCode::Tab => app.cycle_group(1),
        KeyCode::Char(digit @ '1'..='9') => {
            if let Some(index) = digit.to_digit(10) {
                app.select_group(index as usize - 1);
            }
        }
        KeyCode::PageUp => app.table.prev_page(),
        KeyCode::PageDown => app.table.next_page(),
        KeyCode::Char('g') => app.table.first_page(),
        KeyCode::Char('G') => app.table.last_page(),
        KeyCode::Char('s') => app.table.cycle_sort(),
        KeyCode::Char('r') => app.table.reverse_sort(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Char('e') => app.export_table(),
        _ => {}
    }
}
