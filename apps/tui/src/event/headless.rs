use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde::Serialize;
use station_sunburst::config::AppConfig;
use station_sunburst::detail::{default_group, EXCEPTION_MARKER};
use station_sunburst::domain::{find_by_name, walk, Observations};
use station_sunburst::stations::{load_dataset, StationDataset, StationRecord};
use station_sunburst::table::Column;
use station_sunburst::TAXONOMY;
use tracing::{error, info};

use crate::app::state::LOAD_ERROR_TEXT;

/// What headless mode prints: the whole taxonomy, or one category's stations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessQuery {
    pub category: Option<String>,
    pub group: Option<String>,
    pub json: bool,
}

/// Run the application in headless mode (no UI). The dataset is awaited here.
pub async fn run_headless(config: &AppConfig, query: &HeadlessQuery) -> Result<()> {
    let dataset = match load_dataset(&config.stations_path).await {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("error fetching or parsing station dataset: {e}");
            eprintln!("{LOAD_ERROR_TEXT}");
            return Err(e.into());
        }
    };
    info!(stations = dataset.station_count(), "headless dataset loaded");

    match &query.category {
        Some(category) => {
            let lookup = build_lookup(&dataset, category, query.group.as_deref())?;
            if query.json {
                println!("{}", serde_json::to_string_pretty(&lookup)?);
            } else {
                render_lookup(&lookup);
            }
        }
        None => {
            let summary = build_summary(&dataset);
            if query.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                render_summary(&summary);
            }
        }
    }

    Ok(())
}

fn render_summary(summary: &HeadlessSummary<'_>) {
    println!("\nStation Classification");
    println!("======================");
    println!("Total stations: {}", summary.total_stations);

    for node in &summary.nodes {
        let indent = "  ".repeat(node.level);
        let marker = if node.is_exception { EXCEPTION_MARKER } else { "" };
        println!("{indent}- {}{marker}", node.name);
        for (group, count) in &node.station_counts {
            println!("{indent}    {group}: {count}");
        }
    }
}

fn render_lookup(lookup: &HeadlessLookup<'_>) {
    println!("\n{} / {}", lookup.category, lookup.group.unwrap_or("-"));
    println!(
        "{}",
        Column::ALL
            .iter()
            .map(|column| column.title())
            .collect::<Vec<_>>()
            .join(" | ")
    );
    for station in lookup.stations {
        let cells: Vec<_> = Column::ALL.iter().map(|column| column.cell(station)).collect();
        println!("{}", cells.join(" | "));
    }
    println!("({} stations)", lookup.stations.len());
}

fn build_summary(dataset: &StationDataset) -> HeadlessSummary<'_> {
    let nodes = walk(&TAXONOMY)
        .into_iter()
        .map(|(path, node)| HeadlessNode {
            name: node.name,
            level: path.level(),
            is_exception: node.is_exception,
            observations: node.observations,
            station_counts: dataset.group_counts(node.name),
        })
        .collect();

    HeadlessSummary {
        total_stations: dataset.station_count(),
        nodes,
    }
}

fn build_lookup<'a>(
    dataset: &'a StationDataset,
    category: &str,
    group: Option<&'a str>,
) -> Result<HeadlessLookup<'a>> {
    let (_, node) = find_by_name(&TAXONOMY, category)
        .ok_or_else(|| eyre!("unknown station category: {category}"))?;
    let group = group.or_else(|| default_group(node));

    Ok(HeadlessLookup {
        category: node.name,
        group,
        stations: dataset.lookup(node.name, group),
    })
}

#[derive(Serialize)]
struct HeadlessSummary<'a> {
    total_stations: usize,
    nodes: Vec<HeadlessNode<'a>>,
}

#[derive(Serialize)]
struct HeadlessNode<'a> {
    name: &'static str,
    level: usize,
    is_exception: bool,
    observations: Observations,
    station_counts: Vec<(&'a str, usize)>,
}

#[derive(Serialize)]
struct HeadlessLookup<'a> {
    category: &'static str,
    group: Option<&'a str>,
    stations: &'a [StationRecord],
}
