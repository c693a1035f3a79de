use crate::app::App;
use crate::ui::theme::key_style;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;
use station_sunburst::table::{Column, StationTable};

fn header_cells(table: &StationTable) -> Vec<Cell<'static>> {
    Column::ALL
        .iter()
        .map(|column| match table.sort() {
            Some((sorted, direction)) if sorted == *column => {
                Cell::from(format!("{} {}", column.title(), direction.arrow()))
            }
            _ => Cell::from(column.title()),
        })
        .collect()
}

pub fn render_station_table(app: &App, f: &mut Frame<'_>, area: Rect) {
    let table = &app.table;
    let title = app.selection.as_ref().map_or_else(
        || " 測站列表 ".to_string(),
        |selection| {
            format!(
                " 測站列表: {} / {} ",
                selection.category(),
                selection.active_group.unwrap_or("-")
            )
        },
    );
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Green))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(2),    // Header and rows
            Constraint::Length(1), // Paging info
            Constraint::Length(1), // Search box
        ])
        .split(inner);

    let header = Row::new(header_cells(table)).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    let widths = [
        Constraint::Percentage(24),
        Constraint::Percentage(14),
        Constraint::Percentage(18),
        Constraint::Percentage(22),
        Constraint::Percentage(22),
    ];

    if table.visible_len() == 0 {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(chunks[0]);
        f.render_widget(Table::new(Vec::<Row<'_>>::new(), widths).header(header), rows[0]);
        let message = Paragraph::new(table.empty_message())
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        f.render_widget(message, rows[1]);
    } else {
        let rows = table.page_rows().map(|station| {
            Row::new(
                Column::ALL
                    .iter()
                    .map(|column| Cell::from(column.cell(station)))
                    .collect::<Vec<_>>(),
            )
        });
        let station_table = Table::new(rows, widths).header(header).column_spacing(1);
        f.render_widget(station_table, chunks[0]);
    }

    let info = Line::from(vec![
        Span::styled(table.info(), Style::default().fg(Color::Gray)),
        Span::raw("  "),
        Span::styled(
            format!("第 {}/{} 頁", table.page() + 1, table.page_count()),
            Style::default().fg(Color::Cyan),
        ),
    ]);
    f.render_widget(Paragraph::new(info), chunks[1]);

    let search_style = if app.search_active {
        key_style()
    } else {
        Style::default().fg(Color::Gray)
    };
    let cursor = if app.search_active { "_" } else { "" };
    let search = Line::from(vec![
        Span::styled("搜尋: ", search_style),
        Span::raw(format!("{}{cursor}", table.search())),
    ]);
    f.render_widget(Paragraph::new(search), chunks[2]);
}
