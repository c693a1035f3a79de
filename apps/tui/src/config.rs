use crate::table::DEFAULT_PAGE_LENGTH;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

pub const STATIONS_PATH_VAR: &str = "STATIONS_PATH";
pub const EXPORT_DIR_VAR: &str = "EXPORT_DIR";
pub const LOG_FILE_VAR: &str = "LOG_FILE";
pub const PAGE_LENGTH_VAR: &str = "PAGE_LENGTH";
pub const DEBUG_VAR: &str = "DEBUG";

/// Runtime settings, resolved from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub stations_path: PathBuf,
    pub export_dir: PathBuf,
    pub log_file: PathBuf,
    pub page_length: usize,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stations_path: PathBuf::from("stations.json"),
            export_dir: PathBuf::from("."),
            log_file: PathBuf::from("station_sunburst.log"),
            page_length: DEFAULT_PAGE_LENGTH,
            debug: false,
        }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset or invalid values keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            stations_path: non_empty(STATIONS_PATH_VAR).map_or(defaults.stations_path, PathBuf::from),
            export_dir: non_empty(EXPORT_DIR_VAR).map_or(defaults.export_dir, PathBuf::from),
            log_file: non_empty(LOG_FILE_VAR).map_or(defaults.log_file, PathBuf::from),
            page_length: non_empty(PAGE_LENGTH_VAR)
                .and_then(|value| value.trim().parse::<usize>().ok())
                .filter(|length| *length > 0)
                .unwrap_or(defaults.page_length),
            debug: non_empty(DEBUG_VAR).is_some_and(|value| value != "0"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(AppConfig::from_lookup(lookup(&[])), AppConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (STATIONS_PATH_VAR, "data/stations.json"),
            (EXPORT_DIR_VAR, "out"),
            (PAGE_LENGTH_VAR, "10"),
            (DEBUG_VAR, "1"),
        ]));
        assert_eq!(config.stations_path, PathBuf::from("data/stations.json"));
        assert_eq!(config.export_dir, PathBuf::from("out"));
        assert_eq!(config.page_length, 10);
        assert!(config.debug);
    }

    #[test]
    fn invalid_page_length_falls_back() {
        let config = AppConfig::from_lookup(lookup(&[(PAGE_LENGTH_VAR, "0"), (DEBUG_VAR, "0")]));
        assert_eq!(config.page_length, DEFAULT_PAGE_LENGTH);
        assert!(!config.debug);
        let config = AppConfig::from_lookup(lookup(&[(PAGE_LENGTH_VAR, "lots")]));
        assert_eq!(config.page_length, DEFAULT_PAGE_LENGTH);
    }
}
