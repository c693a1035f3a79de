use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One row of the station dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub lat: Option<f64>,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Stations keyed by category name, then by observation group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationDataset {
    categories: BTreeMap<String, BTreeMap<String, Vec<StationRecord>>>,
}

impl StationDataset {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Stations for `(category, group)`; any missing key yields an empty slice.
    pub fn lookup(&self, category: &str, group: Option<&str>) -> &[StationRecord] {
        group
            .and_then(|group| self.categories.get(category)?.get(group))
            .map_or(&[][..], Vec::as_slice)
    }

    /// Observation groups populated for a category, with their station counts.
    pub fn group_counts(&self, category: &str) -> Vec<(&str, usize)> {
        self.categories.get(category).map_or_else(Vec::new, |groups| {
            groups
                .iter()
                .map(|(group, stations)| (group.as_str(), stations.len()))
                .collect()
        })
    }

    pub fn station_count(&self) -> usize {
        self.categories
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }
}

/// Read and parse the station dataset document.
pub async fn load_dataset(path: &Path) -> Result<StationDataset, DatasetError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    StationDataset::from_json_str(&json).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load progress of the dataset, which nothing waits on.
#[derive(Debug, Clone, Default)]
pub enum DatasetState {
    #[default]
    Loading,
    Ready(StationDataset),
    Failed(String),
}

impl DatasetState {
    /// Same as [`StationDataset::lookup`], empty until the dataset has arrived.
    pub fn lookup(&self, category: &str, group: Option<&str>) -> &[StationRecord] {
        match self {
            Self::Ready(dataset) => dataset.lookup(category, group),
            Self::Loading | Self::Failed(_) => &[],
        }
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

impl From<Result<StationDataset, DatasetError>> for DatasetState {
    fn from(result: Result<StationDataset, DatasetError>) -> Self {
        match result {
            Ok(dataset) => Self::Ready(dataset),
            Err(error) => Self::Failed(error.to_string()),
        }
    }
}
