use crate::app::App;
use crate::ui::theme::rgb;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use station_sunburst::detail::EXCEPTION_MARKER;

/// First row to show so that `selected_index` stays within `max_visible_rows`.
const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows {
        return 0;
    }

    if selected_index >= max_visible_rows {
        return selected_index.saturating_sub(max_visible_rows) + 1;
    }

    0
}

/// Taxonomy tree under the chart; the keyboard equivalent of pointing at it.
pub fn render_legend(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" 分類 ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let visible_rows = usize::from(block.inner(area).height);
    let offset = scroll_offset(app.nodes.len(), visible_rows, app.focus_index);
    let selected = app.selection.as_ref().map(|selection| &selection.path);

    let lines: Vec<Line<'_>> = app
        .nodes
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_rows)
        .filter_map(|(index, path)| {
            let node = App::node(path)?;
            let mut name_style = Style::default();
            if selected == Some(path) {
                name_style = name_style.add_modifier(Modifier::BOLD).fg(Color::Cyan);
            }
            if index == app.focus_index {
                name_style = name_style.add_modifier(Modifier::REVERSED);
            }

            let mut spans = vec![
                Span::raw("  ".repeat(path.level())),
                Span::styled("██ ", Style::default().fg(rgb(node.style.color))),
                Span::styled(node.name, name_style),
            ];
            if node.is_exception {
                spans.push(Span::styled(EXCEPTION_MARKER, Style::default().fg(Color::Red)));
            }
            Some(Line::from(spans))
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_keeps_focused_node_visible() {
        assert_eq!(scroll_offset(5, 10, 4), 0);
        assert_eq!(scroll_offset(14, 6, 3), 0);
        assert_eq!(scroll_offset(14, 6, 6), 1);
        assert_eq!(scroll_offset(14, 6, 13), 8);
    }
}
