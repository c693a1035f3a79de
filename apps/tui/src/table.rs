use crate::stations::StationRecord;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::cmp::Ordering;

pub const DEFAULT_PAGE_LENGTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Code,
    City,
    Longitude,
    Latitude,
}

impl Column {
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Code,
        Self::City,
        Self::Longitude,
        Self::Latitude,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Name => "中文站名",
            Self::Code => "站碼",
            Self::City => "縣市",
            Self::Longitude => "經度",
            Self::Latitude => "緯度",
        }
    }

    /// Rendered cell text, as shown on screen and exported.
    pub fn cell(self, record: &StationRecord) -> String {
        match self {
            Self::Name => record.name.clone(),
            Self::Code => record.code.clone(),
            Self::City => record.city.clone(),
            Self::Longitude => format_coordinate(record.lon),
            Self::Latitude => format_coordinate(record.lat),
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Name => Self::Code,
            Self::Code => Self::City,
            Self::City => Self::Longitude,
            Self::Longitude => Self::Latitude,
            Self::Latitude => Self::Name,
        }
    }

    fn compare(self, a: &StationRecord, b: &StationRecord) -> Ordering {
        match self {
            Self::Name => a.name.cmp(&b.name),
            Self::Code => a.code.cmp(&b.code),
            Self::City => a.city.cmp(&b.city),
            Self::Longitude => compare_coordinate(a.lon, b.lon),
            Self::Latitude => compare_coordinate(a.lat, b.lat),
        }
    }
}

/// Four decimal places, empty for a missing value.
pub fn format_coordinate(value: Option<f64>) -> String {
    value.map_or_else(String::new, |value| format!("{value:.4}"))
}

// Missing coordinates sort after present ones.
fn compare_coordinate(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// Sortable, searchable, paged view over the stations of the current selection.
#[derive(Debug)]
pub struct StationTable {
    rows: Vec<StationRecord>,
    filtered_indices: Vec<usize>,
    page: usize,
    page_length: usize,
    sort: Option<(Column, SortDirection)>,
    search: String,
}

impl Default for StationTable {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LENGTH)
    }
}

impl StationTable {
    pub fn new(page_length: usize) -> Self {
        Self {
            rows: Vec::new(),
            filtered_indices: Vec::new(),
            page: 0,
            page_length: page_length.max(1),
            sort: None,
            search: String::new(),
        }
    }

    /// Clear the table and load `rows`, keeping search and sort settings.
    pub fn replace_rows(&mut self, rows: &[StationRecord]) {
        self.rows = rows.to_vec();
        self.page = 0;
        self.refresh();
    }

    /// Number of loaded rows, before searching.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn visible_len(&self) -> usize {
        self.filtered_indices.len()
    }

    /// Rows matching the search, in display order, across all pages.
    pub fn visible_rows(&self) -> impl Iterator<Item = &StationRecord> + '_ {
        self.filtered_indices.iter().map(|&index| &self.rows[index])
    }

    pub fn page_rows(&self) -> impl Iterator<Item = &StationRecord> + '_ {
        self.visible_rows()
            .skip(self.page * self.page_length)
            .take(self.page_length)
    }

    pub const fn page(&self) -> usize {
        self.page
    }

    pub const fn page_length(&self) -> usize {
        self.page_length
    }

    pub fn page_count(&self) -> usize {
        self.visible_len().div_ceil(self.page_length).max(1)
    }

    pub fn next_page(&mut self) {
        if self.page + 1 < self.page_count() {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn first_page(&mut self) {
        self.page = 0;
    }

    pub fn last_page(&mut self) {
        self.page = self.page_count() - 1;
    }

    pub const fn sort(&self) -> Option<(Column, SortDirection)> {
        self.sort
    }

    /// Unsorted, then each column ascending in turn.
    pub fn cycle_sort(&mut self) {
        self.sort = match self.sort {
            None => Some((Column::Name, SortDirection::Ascending)),
            Some((Column::Latitude, _)) => None,
            Some((column, _)) => Some((column.next(), SortDirection::Ascending)),
        };
        self.refresh();
    }

    pub fn reverse_sort(&mut self) {
        if let Some((column, direction)) = self.sort {
            self.sort = Some((column, direction.reversed()));
            self.refresh();
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: &str) {
        query.clone_into(&mut self.search);
        self.page = 0;
        self.refresh();
    }

    pub fn push_search_char(&mut self, ch: char) {
        self.search.push(ch);
        self.page = 0;
        self.refresh();
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
        self.page = 0;
        self.refresh();
    }

    pub fn clear_search(&mut self) {
        self.set_search("");
    }

    /// Rows holding every whitespace-separated search term in some cell.
    ///
    /// When no row holds the terms verbatim, rows whose text fuzzily matches
    /// every term are kept instead.
    fn matching_indices(&self) -> Vec<usize> {
        let terms: Vec<String> = self
            .search
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        if terms.is_empty() {
            return (0..self.rows.len()).collect();
        }

        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|record| {
                Column::ALL
                    .iter()
                    .map(|column| column.cell(record).to_lowercase())
                    .collect()
            })
            .collect();

        let exact: Vec<usize> = cells
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                terms
                    .iter()
                    .all(|term| row.iter().any(|cell| cell.contains(term.as_str())))
            })
            .map(|(index, _)| index)
            .collect();
        if !exact.is_empty() {
            return exact;
        }

        let matcher = SkimMatcherV2::default();
        cells
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                let text = row.join(" ");
                terms
                    .iter()
                    .all(|term| matcher.fuzzy_match(&text, term).is_some())
            })
            .map(|(index, _)| index)
            .collect()
    }

    fn refresh(&mut self) {
        let mut indices = self.matching_indices();

        if let Some((column, direction)) = self.sort {
            indices.sort_by(|&a, &b| {
                let ordering = column.compare(&self.rows[a], &self.rows[b]);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }

        self.filtered_indices = indices;
        self.page = self.page.min(self.page_count() - 1);
    }

    /// Summary line under the table.
    pub fn info(&self) -> String {
        let total = self.visible_len();
        let mut info = if total == 0 {
            "顯示第 0 至 0 項結果，共 0 項".to_string()
        } else {
            let start = self.page * self.page_length + 1;
            let end = (start + self.page_length - 1).min(total);
            format!("顯示第 {start} 至 {end} 項結果，共 {total} 項")
        };
        if total != self.len() {
            info.push_str(&format!("（從 {} 項結果中過濾）", self.len()));
        }
        info
    }

    /// Message shown in place of rows when there are none.
    pub fn empty_message(&self) -> &'static str {
        if self.is_empty() {
            "目前沒有資料"
        } else {
            "沒有符合的結果"
        }
    }
}
