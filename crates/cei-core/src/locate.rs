use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").unwrap());

/// First 4-digit run in the file name, taken as the report year.
pub fn year_from_filename(path: &Path) -> Option<u16> {
    let name = path.file_name()?.to_str()?;
    YEAR_RE.find(name).and_then(|m| m.as_str().parse().ok())
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// All PDFs under `dir` (recursive) whose file name carries a year.
///
/// Walks in sorted order so "first match" is reproducible across runs.
pub fn find_report_pdfs(dir: &Path) -> Vec<(PathBuf, u16)> {
    let mut out = Vec::new();
    for entry in WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !is_pdf(path) {
            continue;
        }
        if let Some(year) = year_from_filename(path) {
            out.push((path.to_path_buf(), year));
        }
    }
    out
}

/// First PDF whose file-name year equals `year`, or None.
pub fn find_pdf_for_year(dir: &Path, year: u16) -> Option<PathBuf> {
    find_report_pdfs(dir)
        .into_iter()
        .find(|(_, y)| *y == year)
        .map(|(path, _)| path)
}
