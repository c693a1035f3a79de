use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use station_sunburst::config::AppConfig;
use station_sunburst::detail::Selection;
use station_sunburst::domain::{find, walk, NodePath};
use station_sunburst::export::export_csv;
use station_sunburst::stations::{load_dataset, DatasetState};
use station_sunburst::sunburst::SunburstLayout;
use station_sunburst::table::StationTable;
use station_sunburst::{ClassificationNode, TAXONOMY};
use std::path::PathBuf;
use throbber_widgets_tui::ThrobberState;
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

pub const PLACEHOLDER_HINT: &str = "請點選圖表中的分類，以查看分類資訊與測站列表。";
pub const LOAD_ERROR_TEXT: &str = "無法載入測站資料，請檢查 stations.json 檔案。";

/// Message area shown above the detail fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub text: &'static str,
    pub visible: bool,
    pub is_error: bool,
}

impl Placeholder {
    const fn hint() -> Self {
        Self {
            text: PLACEHOLDER_HINT,
            visible: true,
            is_error: false,
        }
    }

    const fn load_error() -> Self {
        Self {
            text: LOAD_ERROR_TEXT,
            visible: true,
            is_error: true,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub search_active: bool,
    pub status_message: String,
    pub dataset: DatasetState,
    dataset_rx: Option<oneshot::Receiver<DatasetState>>,
    pub layout: SunburstLayout,
    /// Taxonomy nodes in legend order.
    pub nodes: Vec<NodePath>,
    pub focus_index: usize,
    pub hovered: Option<NodePath>,
    pub selection: Option<Selection>,
    pub table: StationTable,
    pub placeholder: Placeholder,
    pub export_dir: PathBuf,
    pub throbber_state: ThrobberState,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            running: true,
            show_help: false,
            search_active: false,
            status_message: String::new(),
            dataset: DatasetState::Loading,
            dataset_rx: None,
            layout: SunburstLayout::new(&TAXONOMY),
            nodes: walk(&TAXONOMY).into_iter().map(|(path, _)| path).collect(),
            focus_index: 0,
            hovered: None,
            selection: None,
            table: StationTable::new(config.page_length),
            placeholder: Placeholder::hint(),
            export_dir: config.export_dir.clone(),
            throbber_state: ThrobberState::default(),
        }
    }

    /// Start reading the dataset in the background. Nothing waits for it:
    /// [`App::update`] picks the result up on a later tick.
    pub fn start_loading(&mut self, path: PathBuf) {
        let (tx, rx) = oneshot::channel();
        self.dataset = DatasetState::Loading;
        self.dataset_rx = Some(rx);

        tokio::spawn(async move {
            debug!(path = %path.display(), "loading station dataset");
            let state = DatasetState::from(load_dataset(&path).await);
            if tx.send(state).is_err() {
                warn!("station dataset arrived after the UI closed");
            }
        });
    }

    /// Per-tick housekeeping: spinner animation and dataset arrival.
    pub fn update(&mut self) {
        if self.dataset.is_loading() {
            self.throbber_state.calc_next();
        }
        self.poll_dataset();
    }

    fn poll_dataset(&mut self) {
        let Some(rx) = self.dataset_rx.as_mut() else {
            return;
        };

        match rx.try_recv() {
            Ok(state) => {
                self.dataset_rx = None;
                self.apply_dataset(state);
            }
            Err(oneshot::error::TryRecvError::Empty) => {}
            Err(oneshot::error::TryRecvError::Closed) => {
                self.dataset_rx = None;
                self.apply_dataset(DatasetState::Failed("dataset loader stopped".to_string()));
            }
        }
    }

    pub fn apply_dataset(&mut self, state: DatasetState) {
        match &state {
            DatasetState::Ready(dataset) => {
                info!(stations = dataset.station_count(), "station dataset loaded");
                self.status_message = format!("已載入 {} 個測站", dataset.station_count());
            }
            DatasetState::Failed(reason) => {
                error!("error fetching or parsing station dataset: {reason}");
                self.placeholder = Placeholder::load_error();
                self.status_message = reason.clone();
            }
            DatasetState::Loading => {}
        }
        self.dataset = state;

        // A selection made while loading showed an empty table; fill it now.
        if self.selection.is_some() {
            self.refresh_table();
        }
    }

    pub fn focused_path(&self) -> Option<&NodePath> {
        self.nodes.get(self.focus_index)
    }

    pub fn node(path: &NodePath) -> Option<&'static ClassificationNode> {
        find(&TAXONOMY, path)
    }

    pub fn focus_next(&mut self) {
        self.focus_index = wrap_increment(self.focus_index, self.nodes.len());
    }

    pub fn focus_prev(&mut self) {
        self.focus_index = wrap_decrement(self.focus_index, self.nodes.len());
    }

    pub fn focus_first(&mut self) {
        self.focus_index = 0;
    }

    pub fn focus_last(&mut self) {
        self.focus_index = self.nodes.len().saturating_sub(1);
    }

    pub fn select_focused(&mut self) {
        if let Some(path) = self.focused_path().cloned() {
            self.select_path(&path);
        }
    }

    /// Chart click: fill the panel, pick the default group and reload the table.
    pub fn select_path(&mut self, path: &NodePath) {
        let Some(node) = Self::node(path) else {
            return;
        };

        self.placeholder.visible = false;
        if let Some(index) = self.nodes.iter().position(|p| p == path) {
            self.focus_index = index;
        }

        let selection = Selection::new(path.clone(), node);
        info!(
            category = selection.category(),
            group = selection.active_group.unwrap_or("-"),
            "category selected"
        );
        self.selection = Some(selection);
        self.refresh_table();
    }

    /// Observation button click.
    pub fn select_group(&mut self, index: usize) {
        let Some(selection) = self.selection.as_mut() else {
            return;
        };
        if index >= selection.panel.buttons().len() {
            return;
        }
        selection.select_group(index);
        self.log_group_change();
        self.refresh_table();
    }

    pub fn cycle_group(&mut self, step: isize) {
        let Some(selection) = self.selection.as_mut() else {
            return;
        };
        if selection.cycle_group(step) {
            self.log_group_change();
            self.refresh_table();
        }
    }

    fn log_group_change(&self) {
        if let Some(selection) = &self.selection {
            info!(
                category = selection.category(),
                group = selection.active_group.unwrap_or("-"),
                "observation group selected"
            );
        }
    }

    /// Re-run the (category, group) lookup into the table.
    pub fn refresh_table(&mut self) {
        let Some(selection) = &self.selection else {
            self.table.replace_rows(&[]);
            return;
        };
        let stations = self
            .dataset
            .lookup(selection.category(), selection.active_group);
        debug!(
            category = selection.category(),
            rows = stations.len(),
            "station table refreshed"
        );
        self.table.replace_rows(stations);
    }

    /// Chart click at normalized coordinates; gaps and the hole are ignored.
    pub fn click_chart(&mut self, x: f64, y: f64) {
        let hit = self.layout.hit_test(x, y).map(|segment| segment.path.clone());
        if let Some(path) = hit {
            self.select_path(&path);
        }
    }

    /// Pointer moved over the chart, `None` once it left the drawing area.
    pub fn hover_chart(&mut self, point: Option<(f64, f64)>) {
        self.hovered = point
            .and_then(|(x, y)| self.layout.hit_test(x, y))
            .map(|segment| segment.path.clone());
    }

    pub fn start_search(&mut self) {
        self.search_active = true;
    }

    pub fn finish_search(&mut self, keep: bool) {
        self.search_active = false;
        if !keep {
            self.table.clear_search();
        }
    }

    pub fn export_table(&mut self) {
        match export_csv(&self.table, &self.export_dir) {
            Ok(path) => {
                info!(path = %path.display(), rows = self.table.visible_len(), "table exported");
                self.status_message = format!("已匯出 {}", path.display());
            }
            Err(e) => {
                error!("csv export failed: {e}");
                self.status_message = format!("匯出失敗: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use station_sunburst::detail::ObservationDisplay;
    use station_sunburst::domain::find_by_name;
    use station_sunburst::stations::StationDataset;

    const STATION_A: &str = r#"{
        "署屬氣象站": {
            "溫度、濕度": [
                {"name": "臺北", "code": "466920", "city": "臺北市", "lon": 121.5148, "lat": 25.0376}
            ]
        }
    }"#;

    fn app_with(json: &str) -> App {
        let mut app = App::new(&AppConfig::default());
        let dataset = StationDataset::from_json_str(json).unwrap_or_default();
        app.apply_dataset(DatasetState::Ready(dataset));
        app
    }

    fn path_of(name: &str) -> NodePath {
        find_by_name(&TAXONOMY, name)
            .map(|(path, _)| path)
            .unwrap_or_else(|| panic!("missing {name}"))
    }

    #[test]
    fn selecting_a_category_shows_its_stations() {
        let mut app = app_with(STATION_A);
        app.select_path(&path_of("署屬氣象站"));

        assert!(!app.placeholder.visible);
        assert_eq!(app.table.len(), 1);
        let row = app.table.page_rows().next().map(|s| s.code.clone());
        assert_eq!(row.as_deref(), Some("466920"));
    }

    #[test]
    fn switching_group_reloads_rows() {
        let mut app = app_with(STATION_A);
        app.select_path(&path_of("署屬氣象站"));
        app.select_group(1);
        assert_eq!(
            app.selection.as_ref().and_then(|s| s.active_group),
            Some("溫度、濕度、氣壓")
        );
        assert_eq!(app.table.len(), 0);

        app.cycle_group(1);
        assert_eq!(app.table.len(), 1);
    }

    #[test]
    fn unknown_category_yields_empty_table() {
        let mut app = app_with(STATION_A);
        app.select_path(&path_of("農業氣象站"));
        assert_eq!(app.table.len(), 0);
    }

    #[test]
    fn varies_root_has_no_buttons_and_no_rows() {
        let mut app = app_with(STATION_A);
        app.select_path(&path_of("地面系統測站"));
        let selection = app.selection.as_ref().unwrap_or_else(|| panic!("selection"));
        assert!(matches!(selection.panel.observations, ObservationDisplay::Text(_)));
        assert_eq!(selection.active_group, None);
        assert_eq!(app.table.len(), 0);
    }

    #[test]
    fn load_failure_turns_placeholder_into_red_error() {
        let mut app = App::new(&AppConfig::default());
        app.apply_dataset(DatasetState::Failed("missing".to_string()));
        assert_eq!(app.placeholder.text, LOAD_ERROR_TEXT);
        assert!(app.placeholder.visible);
        assert!(app.placeholder.is_error);
    }

    #[test]
    fn selection_before_load_fills_in_on_arrival() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = App::new(&AppConfig::default());
        app.select_path(&path_of("署屬氣象站"));
        assert_eq!(app.table.len(), 0);

        app.apply_dataset(DatasetState::Ready(StationDataset::from_json_str(STATION_A)?));
        assert_eq!(app.table.len(), 1);
        Ok(())
    }

    #[test]
    fn focus_wraps_and_selects() {
        let mut app = App::new(&AppConfig::default());
        app.focus_prev();
        assert_eq!(app.focus_index, app.nodes.len() - 1);
        app.focus_next();
        app.focus_next();
        app.select_focused();
        let name = app.selection.as_ref().map(|s| s.category());
        assert_eq!(name, Some("署屬氣象站"));
    }

    #[tokio::test]
    async fn background_load_is_picked_up_by_update() -> Result<(), Box<dyn std::error::Error>> {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(STATION_A.as_bytes())?;

        let mut app = App::new(&AppConfig::default());
        app.start_loading(file.path().to_path_buf());
        for _ in 0..200 {
            app.update();
            if !app.dataset.is_loading() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        assert!(matches!(app.dataset, DatasetState::Ready(_)));
        Ok(())
    }

    #[tokio::test]
    async fn background_load_failure_sets_error() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let mut app = App::new(&AppConfig::default());
        app.start_loading(dir.path().join("missing.json"));
        for _ in 0..200 {
            app.update();
            if !app.dataset.is_loading() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        assert!(app.placeholder.is_error);
        Ok(())
    }

    #[test]
    fn export_writes_into_configured_dir() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let mut app = app_with(STATION_A);
        app.export_dir = dir.path().to_path_buf();
        app.select_path(&path_of("署屬氣象站"));
        app.export_table();
        assert!(dir.path().join("測站列表.csv").exists());
        Ok(())
    }
}
