use crate::ui::theme::key_style;
use crate::ui::widgets::popup::render_popup;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::Frame;

const SHORTCUTS: [(&str, &str); 12] = [
    ("↑/↓ Home/End", "Move through the classification list"),
    ("Enter/Space", "Select the focused category"),
    ("Mouse click", "Select the category or observation group under the pointer"),
    ("←/→ Tab 1-9", "Switch observation group"),
    ("PgUp/PgDn", "Previous / next table page"),
    ("g/G", "First / last table page"),
    ("s", "Sort by the next column"),
    ("r", "Reverse sort direction"),
    ("/", "Search the table (Enter keeps, Esc clears)"),
    ("e", "Export the table as CSV"),
    ("F1/?", "Toggle this help popup"),
    ("q/Esc", "Quit"),
];

fn build_help_lines() -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            "氣象測站分類圖",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(
            "Pick a category in the sunburst to see its rules and the stations of each observation group.",
        ),
        Line::from(""),
        Line::from(Span::styled(
            "Keyboard Shortcuts:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    lines.extend(SHORTCUTS.iter().map(|(key, description)| {
        Line::from(vec![
            Span::styled(format!("  {key:<14}"), key_style()),
            Span::raw(format!(" - {description}")),
        ])
    }));
    lines
}

pub fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    render_popup(
        f,
        area,
        "== Help & Keyboard Shortcuts ==",
        build_help_lines(),
        "Press ? or Esc to close",
    );
}
