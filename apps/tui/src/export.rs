use crate::table::{Column, StationTable};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name (without extension) used for exported station lists.
pub const EXPORT_FILE_STEM: &str = "測站列表";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode csv: {0}")]
    Csv(#[from] csv::Error),
}

/// Write the table's searched and sorted rows, every page, as CSV.
///
/// Output starts with a UTF-8 byte-order mark so spreadsheet tools pick the
/// right encoding for the Chinese headers.
pub fn write_csv<W: Write>(table: &StationTable, mut out: W) -> Result<(), ExportError> {
    out.write_all(UTF8_BOM).map_err(csv::Error::from)?;

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(Column::ALL.iter().map(|column| column.title()))?;
    for record in table.visible_rows() {
        writer.write_record(Column::ALL.iter().map(|column| column.cell(record)))?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Export into `dir`, creating it when missing. Returns the written path.
pub fn export_csv(table: &StationTable, dir: &Path) -> Result<PathBuf, ExportError> {
    let path = dir.join(format!("{EXPORT_FILE_STEM}.csv"));
    let io_error = |source| ExportError::Io {
        path: path.clone(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(io_error)?;
    let file = File::create(&path).map_err(io_error)?;
    write_csv(table, file)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stations::StationRecord;

    fn table() -> StationTable {
        let mut table = StationTable::new(1);
        table.replace_rows(&[
            StationRecord {
                name: "臺北".to_string(),
                code: "466920".to_string(),
                city: "臺北市".to_string(),
                lon: Some(121.514_853),
                lat: Some(25.037_658),
            },
            StationRecord {
                name: "板橋".to_string(),
                code: "466880".to_string(),
                city: "新北市".to_string(),
                lon: None,
                lat: None,
            },
        ]);
        table
    }

    #[test]
    fn csv_has_bom_header_and_all_pages() -> Result<(), Box<dyn std::error::Error>> {
        let mut buffer = Vec::new();
        write_csv(&table(), &mut buffer)?;

        assert!(buffer.starts_with(UTF8_BOM));
        let text = String::from_utf8(buffer[UTF8_BOM.len()..].to_vec())?;
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "中文站名,站碼,縣市,經度,緯度",
                "臺北,466920,臺北市,121.5149,25.0377",
                "板橋,466880,新北市,,",
            ]
        );
        Ok(())
    }

    #[test]
    fn csv_respects_search() -> Result<(), Box<dyn std::error::Error>> {
        let mut table = table();
        table.set_search("板橋");
        let mut buffer = Vec::new();
        write_csv(&table, &mut buffer)?;
        let text = String::from_utf8(buffer[UTF8_BOM.len()..].to_vec())?;
        assert_eq!(text.lines().count(), 2);
        Ok(())
    }

    #[test]
    fn export_creates_directory_and_named_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("exports");
        let path = export_csv(&table(), &target)?;

        assert_eq!(path, target.join("測站列表.csv"));
        let bytes = std::fs::read(&path)?;
        assert!(bytes.starts_with(UTF8_BOM));
        Ok(())
    }
}
