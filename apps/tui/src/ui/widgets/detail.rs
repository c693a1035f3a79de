use crate::app::App;
use crate::ui::layout::detail_rows;
use crate::ui::theme::key_style;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use station_sunburst::detail::{ObservationDisplay, Selection};

fn field_line(label: &'static str, value: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

/// Observation line spans, each tagged with the group index it selects.
fn observation_spans(selection: &Selection) -> Vec<(Option<usize>, Span<'static>)> {
    let mut spans = vec![(
        None,
        Span::styled("觀測項目: ", Style::default().fg(Color::Gray)),
    )];
    match &selection.panel.observations {
        ObservationDisplay::Buttons(groups) => {
            let active = selection.active_index();
            for (index, group) in groups.iter().enumerate() {
                let style = if Some(index) == active {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                spans.push((
                    Some(index),
                    Span::styled(format!("[{} {group}]", index + 1), style),
                ));
                spans.push((None, Span::raw(" ")));
            }
        }
        ObservationDisplay::Text(text) => {
            spans.push((None, Span::styled(*text, Style::default().fg(Color::White))));
        }
    }
    spans
}

/// One bracketed button per observation group, the active one filled.
fn observation_line(selection: &Selection) -> Line<'static> {
    Line::from(
        observation_spans(selection)
            .into_iter()
            .map(|(_, span)| span)
            .collect::<Vec<_>>(),
    )
}

/// Index of the observation button drawn at (`column`, `row`) when the
/// observation line is rendered into `area`.
pub fn button_at(selection: &Selection, area: Rect, column: u16, row: u16) -> Option<usize> {
    if !area.contains(Position::new(column, row)) {
        return None;
    }
    let mut x = area.x;
    for (button, span) in observation_spans(selection) {
        let end = x.saturating_add(u16::try_from(span.width()).unwrap_or(u16::MAX));
        if column < end {
            return button;
        }
        x = end;
    }
    None
}

fn selection_lines(selection: &Selection) -> Vec<Line<'static>> {
    let panel = &selection.panel;
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                panel.name,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(panel.exception, Style::default().fg(Color::Red)),
        ]),
        field_line("判定規則: ", panel.rule),
        field_line("觀測系統: ", panel.system),
        field_line("維運單位: ", panel.agency),
        field_line("資料頻率: ", panel.frequency),
    ];
    if !panel.note.is_empty() {
        lines.push(field_line("備註: ", panel.note));
    }
    lines
}

pub fn render_detail(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" 分類資訊 ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    f.render_widget(block, area);
    let rows = detail_rows(area);

    let mut lines = Vec::new();
    if app.placeholder.visible {
        let style = if app.placeholder.is_error {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(app.placeholder.text, style)));
    }
    if let Some(selection) = &app.selection {
        lines.extend(selection_lines(selection));
        // Unwrapped so clicks map onto the same columns.
        f.render_widget(Paragraph::new(observation_line(selection)), rows.buttons);
        if !selection.panel.buttons().is_empty() {
            let hint = Span::styled(
                "←/→ 或 1-9 或點擊切換觀測項目",
                key_style().remove_modifier(Modifier::BOLD),
            );
            f.render_widget(Paragraph::new(hint), rows.hint);
        }
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), rows.fields);
}

#[cfg(test)]
mod tests {
    use super::*;
    use station_sunburst::domain::find_by_name;
    use station_sunburst::TAXONOMY;

    fn selection(name: &str) -> Option<Selection> {
        find_by_name(&TAXONOMY, name).map(|(path, node)| Selection::new(path, node))
    }

    #[test]
    fn button_at_follows_rendered_widths() {
        let Some(selection) = selection("署屬氣象站") else {
            panic!("category missing");
        };
        let area = Rect::new(5, 3, 60, 1);
        // "觀測項目: " is 10 columns, "[1 溫度、濕度]" 14, then one space.
        assert_eq!(button_at(&selection, area, 5, 3), None);
        assert_eq!(button_at(&selection, area, 15, 3), Some(0));
        assert_eq!(button_at(&selection, area, 28, 3), Some(0));
        assert_eq!(button_at(&selection, area, 29, 3), None);
        assert_eq!(button_at(&selection, area, 30, 3), Some(1));
        assert_eq!(button_at(&selection, area, 30, 4), None);
    }

    #[test]
    fn text_observations_have_no_buttons() {
        let Some(selection) = selection("地面系統測站") else {
            panic!("category missing");
        };
        let area = Rect::new(0, 0, 60, 1);
        assert!((0..60).all(|column| button_at(&selection, area, column, 0).is_none()));
    }
}
