use crate::app::App;
use crate::ui::layout::MainLayout;
use crate::ui::screens::help::render_help_popup;
use crate::ui::theme::key_style;
use crate::ui::widgets::detail::render_detail;
use crate::ui::widgets::legend::render_legend;
use crate::ui::widgets::sunburst::render_sunburst;
use crate::ui::widgets::tables::render_station_table;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use station_sunburst::stations::DatasetState;
use throbber_widgets_tui::{Throbber, WhichUse, BRAILLE_SIX};

pub fn render_main(app: &App, f: &mut Frame<'_>) {
    let layout = MainLayout::new(f.area(), app.table.page_length());

    render_title_section(app, f, layout.title);
    render_sunburst(app, f, layout.chart);
    render_legend(app, f, layout.legend);
    render_detail(app, f, layout.detail);
    render_station_table(app, f, layout.table);
    render_status_section(app, f, layout.status);
    render_shortcuts(f, layout.shortcuts);

    if app.show_help {
        render_help_popup(f, f.area());
    }
}

fn render_title_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let title_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let count = match &app.dataset {
        DatasetState::Ready(dataset) => format!("{} 個測站", dataset.station_count()),
        DatasetState::Loading => "載入中".to_string(),
        DatasetState::Failed(_) => "無資料".to_string(),
    };

    let title = Paragraph::new(Text::from(TextLine::from(vec![
        Span::styled(
            "氣象測站分類 ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Station Sunburst",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  ({count})"), Style::default().fg(Color::Gray)),
    ])))
    .block(title_block)
    .alignment(Alignment::Left);
    f.render_widget(title, area);
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = status_block.inner(area);
    f.render_widget(status_block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner);

    if app.dataset.is_loading() {
        let throbber = Throbber::default()
            .label("載入測站資料...")
            .style(Style::default().fg(Color::Cyan))
            .throbber_set(BRAILLE_SIX)
            .use_type(WhichUse::Spin);
        let mut state = app.throbber_state.clone();
        f.render_stateful_widget(throbber, chunks[0], &mut state);
    } else {
        let style = if matches!(app.dataset, DatasetState::Failed(_)) {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        let status = Paragraph::new(Span::styled(app.status_message.as_str(), style))
            .wrap(Wrap { trim: true });
        f.render_widget(status, chunks[0]);
    }

    // Tooltip for the segment under the pointer
    if let Some(node) = app.hovered.as_ref().and_then(App::node) {
        let tooltip = Paragraph::new(Span::styled(node.name, Style::default().fg(Color::White)))
            .alignment(Alignment::Right);
        f.render_widget(tooltip, chunks[1]);
    }
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let gray = Style::default().fg(Color::Gray);
    let shortcuts = TextLine::from(vec![
        Span::styled("?", key_style()),
        Span::styled(": Help | ", gray),
        Span::styled("↑/↓ Enter", key_style()),
        Span::styled(": Select | ", gray),
        Span::styled("←/→", key_style()),
        Span::styled(": Group | ", gray),
        Span::styled("PgUp/PgDn", key_style()),
        Span::styled(": Page | ", gray),
        Span::styled("/", key_style()),
        Span::styled(": Search | ", gray),
        Span::styled("e", key_style()),
        Span::styled(": Export | ", gray),
        Span::styled("q", key_style()),
        Span::styled(": Quit", gray),
    ]);
    f.render_widget(Paragraph::new(shortcuts).alignment(Alignment::Center), area);
}
