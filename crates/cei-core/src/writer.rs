use crate::error::CeiError;
use crate::model::YearResult;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

static ARTIFACT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^cei_(\d{4})\.csv$").unwrap());

/// Path of the CSV artifact for one year.
pub fn artifact_path(output_dir: &Path, year: u16) -> PathBuf {
    output_dir.join(format!("cei_{year}.csv"))
}

/// Write one year's rows to `<output_dir>/cei_<year>.csv`.
///
/// Columns are `Company,CEI_Score,Year`, no index column. Row order is the
/// extraction order, so identical inputs produce identical bytes.
pub fn write_year_csv(output_dir: &Path, result: &YearResult) -> Result<PathBuf, CeiError> {
    std::fs::create_dir_all(output_dir)?;
    let path = artifact_path(output_dir, result.year);

    let mut writer = csv::Writer::from_path(&path)?;
    for row in result.rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(path)
}

/// Years that already have a `cei_<year>.csv` artifact in the output
/// directory. A missing directory reads as no years.
pub fn existing_years(output_dir: &Path) -> HashSet<u16> {
    let mut years = HashSet::new();
    let Ok(entries) = std::fs::read_dir(output_dir) else {
        return years;
    };
    for entry in entries.filter_map(|e| e.ok()) {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(caps) = ARTIFACT_RE.captures(name) {
            if let Ok(year) = caps[1].parse() {
                years.insert(year);
            }
        }
    }
    years
}
