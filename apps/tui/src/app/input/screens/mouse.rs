use crate::app::state::App;
use crate::ui::layout::{chart_point, MainLayout};
use crate::ui::widgets::detail::button_at;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

pub fn handle_main_mouse(app: &mut App, mouse: MouseEvent, area: Rect) {
    if app.show_help || app.search_active {
        return;
    }

    let layout = MainLayout::new(area, app.table.page_length());
    let point = chart_point(layout.chart_square(), mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let button = app.selection.as_ref().and_then(|selection| {
                button_at(selection, layout.detail_rows().buttons, mouse.column, mouse.row)
            });
            if let Some(index) = button {
                app.select_group(index);
            } else if let Some((x, y)) = point {
                app.click_chart(x, y);
            }
        }
        MouseEventKind::Moved => app.hover_chart(point),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use station_sunburst::config::AppConfig;
    use station_sunburst::domain::find_by_name;
    use station_sunburst::TAXONOMY;

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 140,
        height: 48,
    };

    fn event(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    // Terminal cell covering a segment's centroid.
    fn centroid_cell(app: &App, index: usize) -> (u16, u16) {
        let square = MainLayout::new(AREA, app.table.page_length()).chart_square();
        let (x, y) = app.layout.segments()[index].centroid();
        let column = f64::from(square.x) + (x + 1.0) / 2.0 * f64::from(square.width);
        let row = f64::from(square.y) + (1.0 - y) / 2.0 * f64::from(square.height);
        (column as u16, row as u16)
    }

    #[test]
    fn click_selects_the_segment_under_the_pointer() {
        let mut app = App::new(&AppConfig::default());
        let (column, row) = centroid_cell(&app, 0);
        let square = MainLayout::new(AREA, app.table.page_length()).chart_square();
        let expected = chart_point(square, column, row)
            .and_then(|(x, y)| app.layout.hit_test(x, y))
            .map(|segment| segment.path.clone());
        assert!(expected.is_some());

        handle_main_mouse(&mut app, event(MouseEventKind::Down(MouseButton::Left), column, row), AREA);
        assert_eq!(app.selection.map(|s| s.path), expected);
    }

    #[test]
    fn click_in_the_hole_or_outside_changes_nothing() {
        let mut app = App::new(&AppConfig::default());
        let square = MainLayout::new(AREA, app.table.page_length()).chart_square();
        let centre = (square.x + square.width / 2, square.y + square.height / 2);

        handle_main_mouse(&mut app, event(MouseEventKind::Down(MouseButton::Left), centre.0, centre.1), AREA);
        handle_main_mouse(&mut app, event(MouseEventKind::Down(MouseButton::Left), 0, 0), AREA);
        assert!(app.selection.is_none());
        assert!(app.placeholder.visible);
    }

    #[test]
    fn clicking_an_observation_button_switches_group() {
        let mut app = App::new(&AppConfig::default());
        if let Some((path, _)) = find_by_name(&TAXONOMY, "署屬氣象站") {
            app.select_path(&path);
        }
        assert_eq!(app.selection.as_ref().and_then(|s| s.active_group), Some("溫度、濕度"));

        let buttons = MainLayout::new(AREA, app.table.page_length()).detail_rows().buttons;
        let second = (buttons.x..buttons.right()).find(|&column| {
            app.selection
                .as_ref()
                .and_then(|s| button_at(s, buttons, column, buttons.y))
                == Some(1)
        });
        let Some(column) = second else {
            panic!("second button not on screen");
        };

        handle_main_mouse(&mut app, event(MouseEventKind::Down(MouseButton::Left), column, buttons.y), AREA);
        assert_eq!(
            app.selection.as_ref().and_then(|s| s.active_group),
            Some("溫度、濕度、氣壓")
        );
        assert_eq!(app.selection.map(|s| s.category()), Some("署屬氣象站"));
    }

    #[test]
    fn moving_sets_and_clears_hover() {
        let mut app = App::new(&AppConfig::default());
        let (column, row) = centroid_cell(&app, 0);

        handle_main_mouse(&mut app, event(MouseEventKind::Moved, column, row), AREA);
        assert!(app.hovered.is_some());
        handle_main_mouse(&mut app, event(MouseEventKind::Moved, 0, 0), AREA);
        assert!(app.hovered.is_none());
        assert!(app.selection.is_none());
    }
}
