pub mod disambiguate;
pub mod error;
pub mod extraction;
pub mod filter;
pub mod locate;
pub mod model;
pub mod ocr_text;
pub mod strategy;
pub mod writer;

use error::CeiError;
use extraction::{OcrEngine, TableExtractor};
use model::YearResult;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Externally supplied configuration for a processing run.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Directory scanned recursively for report PDFs.
    pub input_dir: PathBuf,
    /// Directory the per-year CSV artifacts are written to.
    pub output_dir: PathBuf,
}

/// OCR page window for a report year (1-based, inclusive).
///
/// The company listing lives in the appendix, and where the appendix sits
/// has drifted across report eras.
fn ocr_page_window(year: u16) -> (u32, u32) {
    if year >= 2015 {
        (40, 80)
    } else if year >= 2010 {
        (20, 60)
    } else {
        (10, 50)
    }
}

/// Extract (company, score) rows from one report PDF.
///
/// Every table strategy is tried first; OCR is engaged only when the table
/// path yields nothing at all. Extraction failures are logged and absorbed:
/// the worst case is an empty result, never an error.
pub fn extract_rows(
    pdf: &Path,
    year: u16,
    tables: &dyn TableExtractor,
    ocr: &dyn OcrEngine,
) -> YearResult {
    let result = strategy::run_table_strategies(pdf, year, tables);
    if !result.is_empty() {
        info!(year, rows = result.len(), "table extraction succeeded");
        return result;
    }

    warn!(
        year,
        backend = ocr.backend_name(),
        "table extraction yielded nothing, falling back to OCR"
    );
    let (first, last) = ocr_page_window(year);
    let text = match ocr.ocr_page_range(pdf, first, last) {
        Ok(text) => text,
        Err(e) => {
            warn!(year, "OCR failed: {e}");
            return YearResult::new(year);
        }
    };

    let mut result = YearResult::new(year);
    for (company, score) in ocr_text::parse_ocr_text(&text, year) {
        result.push(company, score);
    }
    info!(year, rows = result.len(), "OCR extraction finished");
    result
}

/// Process a single year end to end: locate the PDF, extract rows, write the
/// CSV artifact. No file is written on failure.
pub fn process_year(
    opts: &ExtractOptions,
    year: u16,
    tables: &dyn TableExtractor,
    ocr: &dyn OcrEngine,
) -> Result<PathBuf, CeiError> {
    let pdf = locate::find_pdf_for_year(&opts.input_dir, year).ok_or_else(|| {
        CeiError::PdfNotFound {
            year,
            dir: opts.input_dir.clone(),
        }
    })?;
    info!(year, pdf = %pdf.display(), "processing report");

    let result = extract_rows(&pdf, year, tables, ocr);
    if result.is_empty() {
        return Err(CeiError::NoData { year });
    }

    let path = writer::write_year_csv(&opts.output_dir, &result)?;
    info!(year, rows = result.len(), path = %path.display(), "wrote year artifact");
    Ok(path)
}

/// Process every year that has a PDF but no CSV artifact yet.
///
/// Returns the years that produced an artifact and the years that failed.
/// Per-year failures never abort the batch.
pub fn process_missing_years(
    opts: &ExtractOptions,
    tables: &dyn TableExtractor,
    ocr: &dyn OcrEngine,
) -> (Vec<u16>, Vec<u16>) {
    let existing = writer::existing_years(&opts.output_dir);
    let mut attempted: HashSet<u16> = HashSet::new();
    let mut succeeded = Vec::new();
    let mut failed = Vec::new();

    for (pdf, year) in locate::find_report_pdfs(&opts.input_dir) {
        if existing.contains(&year) || !attempted.insert(year) {
            continue;
        }
        info!(year, pdf = %pdf.display(), "processing missing year");

        let result = extract_rows(&pdf, year, tables, ocr);
        if result.is_empty() {
            warn!(year, "no data extracted");
            failed.push(year);
            continue;
        }
        match writer::write_year_csv(&opts.output_dir, &result) {
            Ok(path) => {
                info!(year, rows = result.len(), path = %path.display(), "wrote year artifact");
                succeeded.push(year);
            }
            Err(e) => {
                warn!(year, "failed to write artifact: {e}");
                failed.push(year);
            }
        }
    }

    (succeeded, failed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ocr_page_window_brackets() {
        assert_eq!(ocr_page_window(2022), (40, 80));
        assert_eq!(ocr_page_window(2015), (40, 80));
        assert_eq!(ocr_page_window(2014), (20, 60));
        assert_eq!(ocr_page_window(2010), (20, 60));
        assert_eq!(ocr_page_window(2005), (10, 50));
    }
}
