use ratatui::layout::{Constraint, Direction, Layout, Margin, Position, Rect};

/// Rows reserved for the taxonomy legend under the chart, borders included.
pub const LEGEND_HEIGHT: u16 = 8;
/// Table rows besides the stations themselves: borders, header, info and search lines.
const TABLE_CHROME: u16 = 5;

/// Screen regions of the main view. Rendering and mouse hit-testing both
/// derive their geometry from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainLayout {
    pub title: Rect,
    pub chart: Rect,
    pub legend: Rect,
    pub detail: Rect,
    pub table: Rect,
    pub status: Rect,
    pub shortcuts: Rect,
}

impl MainLayout {
    pub fn new(area: Rect, page_length: usize) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(10),   // Chart, detail and table
                Constraint::Length(3), // Status
                Constraint::Length(1), // Shortcuts hint
            ])
            .split(area.inner(Margin::new(2, 1)));

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(rows[1]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(LEGEND_HEIGHT)])
            .split(columns[0]);

        let table_height = u16::try_from(page_length)
            .unwrap_or(u16::MAX)
            .saturating_add(TABLE_CHROME);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(table_height)])
            .split(columns[1]);

        Self {
            title: rows[0],
            chart: left[0],
            legend: left[1],
            detail: right[0],
            table: right[1],
            status: rows[2],
            shortcuts: rows[3],
        }
    }

    /// Drawing square of the sunburst inside the chart block.
    pub fn chart_square(&self) -> Rect {
        chart_square(self.chart)
    }

    pub fn detail_rows(&self) -> DetailRows {
        detail_rows(self.detail)
    }
}

/// Interior of the detail block: wrapped fields on top, then the
/// observation buttons and the key hint on one fixed row each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailRows {
    pub fields: Rect,
    pub buttons: Rect,
    pub hint: Rect,
}

pub fn detail_rows(area: Rect) -> DetailRows {
    let [fields, buttons, hint] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area.inner(Margin::new(1, 1)));
    DetailRows {
        fields,
        buttons,
        hint,
    }
}

/// Largest area inside the bordered `area` that renders as a circle: twice as
/// many columns as rows, centred.
pub fn chart_square(area: Rect) -> Rect {
    let inner = area.inner(Margin::new(1, 1));
    let width = inner.width.min(inner.height.saturating_mul(2));
    let height = width / 2;
    Rect {
        x: inner.x + (inner.width - width) / 2,
        y: inner.y + (inner.height - height) / 2,
        width,
        height,
    }
}

/// Map a terminal cell to normalized chart coordinates (`[-1, 1]`, y up),
/// `None` outside the drawing square.
pub fn chart_point(square: Rect, column: u16, row: u16) -> Option<(f64, f64)> {
    if square.is_empty() || !square.contains(Position::new(column, row)) {
        return None;
    }
    let x = (f64::from(column - square.x) + 0.5) / f64::from(square.width) * 2.0 - 1.0;
    let y = 1.0 - (f64::from(row - square.y) + 0.5) / f64::from(square.height) * 2.0;
    Some((x, y))
}
