use clap::Parser;
use station_sunburst::config::{
    DEBUG_VAR, EXPORT_DIR_VAR, LOG_FILE_VAR, PAGE_LENGTH_VAR, STATIONS_PATH_VAR,
};

#[derive(Debug, Parser)]
#[command(
    name = "station_sunburst",
    version,
    about = "Weather-station classification sunburst and station table"
)]
pub struct CliArgs {
    /// Print the taxonomy with station counts and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the station dataset path
    #[arg(long, value_name = "PATH")]
    pub stations: Option<String>,

    /// Override the CSV export directory
    #[arg(long = "export-dir", value_name = "PATH")]
    pub export_dir: Option<String>,

    /// Override the log file path
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,

    /// Rows per table page
    #[arg(long = "page-length", value_name = "ROWS")]
    pub page_length: Option<usize>,

    /// Headless: list the stations of this category
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,

    /// Headless: observation group to list (defaults to the category's first)
    #[arg(long, value_name = "NAME", requires = "category")]
    pub group: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(path) = &self.stations {
            std::env::set_var(STATIONS_PATH_VAR, path);
        }
        if let Some(dir) = &self.export_dir {
            std::env::set_var(EXPORT_DIR_VAR, dir);
        }
        if let Some(path) = &self.log_file {
            std::env::set_var(LOG_FILE_VAR, path);
        }
        if let Some(rows) = self.page_length {
            std::env::set_var(PAGE_LENGTH_VAR, rows.to_string());
        }
        if self.debug {
            std::env::set_var(DEBUG_VAR, "1");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headless_lookup() {
        let args = CliArgs::parse_from([
            "station_sunburst",
            "--headless",
            "--category",
            "署屬氣象站",
            "--group",
            "溫度、濕度",
        ]);
        assert!(args.headless);
        assert_eq!(args.category.as_deref(), Some("署屬氣象站"));
        assert_eq!(args.group.as_deref(), Some("溫度、濕度"));
    }

    #[test]
    fn group_requires_category() {
        let result = CliArgs::try_parse_from(["station_sunburst", "--group", "雨量"]);
        assert!(result.is_err());
    }
}
