use crate::app::state::App;
use crossterm::event::KeyCode;

mod help;
mod main;
pub mod mouse;
mod search;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if app.search_active {
        search::handle_search_input(app, key);
        return;
    }

    if help::handle_help_toggle(app, key) {
        return;
    }

    main::handle_main_input(app, key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use station_sunburst::config::AppConfig;
    use station_sunburst::stations::{DatasetState, StationDataset};

    const DATASET: &str = r#"{
        "署屬氣象站": {
            "溫度、濕度": [
                {"name": "臺北", "code": "466920", "city": "臺北市", "lon": 121.5148, "lat": 25.0376},
                {"name": "板橋", "code": "466880", "city": "新北市", "lon": 121.4420, "lat": 24.9976}
            ],
            "溫度、濕度、氣壓": [
                {"name": "淡水", "code": "466900", "city": "新北市", "lon": 121.4489, "lat": 25.1649}
            ]
        }
    }"#;

    fn app() -> App {
        let mut app = App::new(&AppConfig::default());
        let dataset = StationDataset::from_json_str(DATASET).unwrap_or_default();
        app.apply_dataset(DatasetState::Ready(dataset));
        app
    }

    fn press(app: &mut App, keys: &[KeyCode]) {
        for key in keys {
            dispatch_input(app, *key);
        }
    }

    #[test]
    fn arrow_then_enter_selects_category() {
        let mut app = app();
        press(&mut app, &[KeyCode::Down, KeyCode::Enter]);
        assert_eq!(app.selection.as_ref().map(|s| s.category()), Some("署屬氣象站"));
        assert_eq!(app.table.len(), 2);
    }

    #[test]
    fn group_keys_switch_rows() {
        let mut app = app();
        press(&mut app, &[KeyCode::Down, KeyCode::Char(' '), KeyCode::Right]);
        assert_eq!(app.table.len(), 1);
        press(&mut app, &[KeyCode::Char('1')]);
        assert_eq!(app.table.len(), 2);
        press(&mut app, &[KeyCode::Left]);
        assert_eq!(app.table.len(), 1);
    }

    #[test]
    fn search_mode_captures_characters() {
        let mut app = app();
        press(&mut app, &[KeyCode::Down, KeyCode::Enter, KeyCode::Char('/')]);
        assert!(app.search_active);

        // 'q' is typed into the query rather than quitting
        press(&mut app, &[KeyCode::Char('q')]);
        assert!(app.running);
        press(&mut app, &[KeyCode::Backspace]);
        for ch in "板橋".chars() {
            press(&mut app, &[KeyCode::Char(ch)]);
        }
        assert_eq!(app.table.visible_len(), 1);

        press(&mut app, &[KeyCode::Enter]);
        assert!(!app.search_active);
        assert_eq!(app.table.search(), "板橋");

        press(&mut app, &[KeyCode::Char('/'), KeyCode::Esc]);
        assert_eq!(app.table.search(), "");
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('?')]);
        assert!(app.show_help);
        press(&mut app, &[KeyCode::Char('q')]);
        assert!(app.running);
        press(&mut app, &[KeyCode::Esc]);
        assert!(!app.show_help);
        press(&mut app, &[KeyCode::F(1), KeyCode::F(1)]);
        assert!(!app.show_help);
    }

    #[test]
    fn quit_keys_stop_the_app() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('q')]);
        assert!(!app.running);

        let mut app = self::app();
        press(&mut app, &[KeyCode::Esc]);
        assert!(!app.running);
    }

    #[test]
    fn sort_keys_reorder_table() {
        let mut app = app();
        press(&mut app, &[KeyCode::Down, KeyCode::Enter, KeyCode::Char('s'), KeyCode::Char('s')]);
        let first = app.table.page_rows().next().map(|s| s.code.clone());
        assert_eq!(first.as_deref(), Some("466880"));
        press(&mut app, &[KeyCode::Char('r')]);
        let first = app.table.page_rows().next().map(|s| s.code.clone());
        assert_eq!(first.as_deref(), Some("466920"));
    }
}
