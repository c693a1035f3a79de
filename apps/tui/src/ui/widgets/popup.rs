use crate::ui::theme::key_style;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

/// `percent_x` by `percent_y` of `area`, centred.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    popup
}

/// Clear a centred box and draw `lines` into it, with a closing hint on the
/// bottom border row.
pub fn render_popup(f: &mut Frame<'_>, area: Rect, title: &str, lines: Vec<Line<'static>>, hint: &str) {
    let popup_area = centered_rect(80, 80, area);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(title.to_string())
        .title_style(key_style())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, popup_area);

    if popup_area.height < 3 {
        return;
    }
    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };
    let hint = Paragraph::new(hint.to_string())
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(hint, hint_area);
}
