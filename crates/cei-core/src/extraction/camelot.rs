use crate::error::CeiError;
use crate::extraction::{Flavor, PageRange, TableExtractor};
use crate::model::Table;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Table-extraction backend using the camelot CLI.
///
/// camelot is invoked once per (page range, flavor) attempt and writes one
/// CSV file per detected table into a staging directory, which is then read
/// back into `Table` grids.
pub struct CamelotExtractor;

impl CamelotExtractor {
    pub fn new() -> Self {
        CamelotExtractor
    }

    /// Check if the camelot CLI is available on the system.
    pub fn is_available() -> bool {
        Command::new("camelot")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

impl Default for CamelotExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TableExtractor for CamelotExtractor {
    fn extract_tables(
        &self,
        pdf: &Path,
        pages: PageRange,
        flavor: Flavor,
    ) -> Result<Vec<Table>, CeiError> {
        let staging = tempfile::tempdir().map_err(|e| CeiError::Extraction(e.to_string()))?;
        let out_base = staging.path().join("tables.csv");

        let output = Command::new("camelot")
            .arg("--pages")
            .arg(pages.to_string())
            .arg("--format")
            .arg("csv")
            .arg("--output")
            .arg(&out_base)
            .arg(flavor.as_str())
            .arg(pdf)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CeiError::CamelotNotFound
                } else {
                    CeiError::Extraction(format!("camelot failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(CeiError::CamelotFailed { code, stderr });
        }

        // camelot names the files tables-page-<n>-table-<m>.csv; sort for a
        // deterministic table order.
        let mut paths: Vec<PathBuf> = std::fs::read_dir(staging.path())?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
            })
            .collect();
        paths.sort();

        let mut tables = Vec::new();
        for path in &paths {
            let table = read_table_csv(path)?;
            if table.row_count() > 0 {
                tables.push(table);
            }
        }
        Ok(tables)
    }

    fn backend_name(&self) -> &str {
        "camelot"
    }
}

/// Read one camelot CSV artifact into a raw cell grid. No header handling:
/// header rows are just rows, the disambiguator filters them out.
fn read_table_csv(path: &Path) -> Result<Table, CeiError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut cells = Vec::new();
    for record in reader.records() {
        let record = record?;
        cells.push(record.iter().map(|s| s.to_string()).collect());
    }
    Ok(Table::new(cells))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_table_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables-page-45-table-1.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "Acme Holdings Inc,100").unwrap();
        writeln!(f, "Globex Corporation,95").unwrap();
        writeln!(f, "ragged row").unwrap();
        drop(f);

        let table = read_table_csv(&path).unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.width(), 2);
        assert_eq!(table.cell(0, 0), Some("Acme Holdings Inc"));
        assert_eq!(table.cell(1, 1), Some("95"));
        assert_eq!(table.cell(2, 1), None);
    }
}
