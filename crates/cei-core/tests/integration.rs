//! Integration tests for the year-processing pipeline.
//!
//! Uses mock TableExtractor/OcrEngine backends that return pre-built data
//! without invoking camelot or tesseract, so these tests run without any
//! external tools installed.

use cei_core::error::CeiError;
use cei_core::extraction::{Flavor, OcrEngine, PageRange, TableExtractor};
use cei_core::model::Table;
use cei_core::{extract_rows, process_missing_years, process_year, ExtractOptions};
use std::path::Path;

struct MockTables {
    tables: Vec<Table>,
}

impl TableExtractor for MockTables {
    fn extract_tables(
        &self,
        _pdf: &Path,
        _pages: PageRange,
        _flavor: Flavor,
    ) -> Result<Vec<Table>, CeiError> {
        Ok(self.tables.clone())
    }

    fn backend_name(&self) -> &str {
        "mock-tables"
    }
}

/// Table backend that always errors, forcing the OCR fallback.
struct FailingTables;

impl TableExtractor for FailingTables {
    fn extract_tables(
        &self,
        _pdf: &Path,
        _pages: PageRange,
        _flavor: Flavor,
    ) -> Result<Vec<Table>, CeiError> {
        Err(CeiError::Extraction("mock failure".into()))
    }

    fn backend_name(&self) -> &str {
        "failing-tables"
    }
}

struct MockOcr {
    text: String,
}

impl OcrEngine for MockOcr {
    fn ocr_page_range(&self, _pdf: &Path, _first: u32, _last: u32) -> Result<String, CeiError> {
        Ok(self.text.clone())
    }

    fn backend_name(&self) -> &str {
        "mock-ocr"
    }
}

/// OCR backend that always errors.
struct NoOcr;

impl OcrEngine for NoOcr {
    fn ocr_page_range(&self, _pdf: &Path, _first: u32, _last: u32) -> Result<String, CeiError> {
        Err(CeiError::TesseractNotFound)
    }

    fn backend_name(&self) -> &str {
        "no-ocr"
    }
}

fn table(rows: &[(&str, &str)]) -> Table {
    Table::new(
        rows.iter()
            .map(|(c, s)| vec![c.to_string(), s.to_string()])
            .collect(),
    )
}

/// 20 companies with distinct scores, plus header and page-number noise.
fn report_table() -> Table {
    let mut rows = vec![
        vec!["Company".to_string(), "CEI Score".to_string()],
        vec!["Page 45".to_string(), "45".to_string()],
    ];
    for i in 0..20 {
        rows.push(vec![format!("Company {i:02} Inc"), format!("{}", 100 - i)]);
    }
    Table::new(rows)
}

// ---------------------------------------------------------------------------
// End-to-end: one PDF in, one CSV artifact out
// ---------------------------------------------------------------------------
#[test]
fn end_to_end_single_year() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    std::fs::write(input.path().join("cei_2016_report.pdf"), b"%PDF-").unwrap();

    let tables = MockTables {
        tables: vec![report_table()],
    };
    let opts = ExtractOptions {
        input_dir: input.path().to_path_buf(),
        output_dir: output.path().to_path_buf(),
    };

    let path = process_year(&opts, 2016, &tables, &NoOcr).unwrap();
    assert_eq!(path, output.path().join("cei_2016.csv"));

    let mut reader = csv::Reader::from_path(&path).unwrap();
    assert_eq!(
        reader.headers().unwrap(),
        &csv::StringRecord::from(vec!["Company", "CEI_Score", "Year"])
    );

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 20);

    let mut companies = std::collections::HashSet::new();
    for record in &records {
        assert!(companies.insert(record[0].to_string()), "duplicate company");
        let score: f64 = record[1].parse().unwrap();
        assert!((0.0..=100.0).contains(&score));
        assert_eq!(&record[2], "2016");
    }
}

#[test]
fn reprocessing_is_byte_identical() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    std::fs::write(input.path().join("cei_2016.pdf"), b"%PDF-").unwrap();

    let tables = MockTables {
        tables: vec![report_table()],
    };
    let opts = ExtractOptions {
        input_dir: input.path().to_path_buf(),
        output_dir: output.path().to_path_buf(),
    };

    let path = process_year(&opts, 2016, &tables, &NoOcr).unwrap();
    let first = std::fs::read(&path).unwrap();
    process_year(&opts, 2016, &tables, &NoOcr).unwrap();
    let second = std::fs::read(&path).unwrap();
    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// Failure shapes: missing PDF vs zero valid rows
// ---------------------------------------------------------------------------
#[test]
fn missing_pdf_reported_without_artifact() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let tables = MockTables { tables: vec![] };
    let opts = ExtractOptions {
        input_dir: input.path().to_path_buf(),
        output_dir: output.path().to_path_buf(),
    };

    let result = process_year(&opts, 2016, &tables, &NoOcr);
    assert!(matches!(result, Err(CeiError::PdfNotFound { year: 2016, .. })));
    assert!(!output.path().join("cei_2016.csv").exists());
}

#[test]
fn zero_valid_rows_reported_without_artifact() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    std::fs::write(input.path().join("cei_2016.pdf"), b"%PDF-").unwrap();

    // Tables exist but contain nothing extractable, and OCR is unavailable.
    let tables = MockTables {
        tables: vec![table(&[("Scoring Criteria", "abc"), ("Page 1", "1")])],
    };
    let opts = ExtractOptions {
        input_dir: input.path().to_path_buf(),
        output_dir: output.path().to_path_buf(),
    };

    let result = process_year(&opts, 2016, &tables, &NoOcr);
    assert!(matches!(result, Err(CeiError::NoData { year: 2016 })));
    assert!(!output.path().join("cei_2016.csv").exists());
}

// ---------------------------------------------------------------------------
// Column disambiguation: constant year column must lose to the score column
// ---------------------------------------------------------------------------
#[test]
fn disambiguator_picks_score_over_constant_year_column() {
    let mut rows = vec![vec![
        "Name".to_string(),
        "Year".to_string(),
        "Score".to_string(),
        "Notes".to_string(),
    ]];
    for i in 0..15 {
        rows.push(vec![
            format!("Company {i:02} Inc"),
            "2016".to_string(),
            format!("{}", 100 - i * 2),
            "rated".to_string(),
        ]);
    }
    let result = cei_core::strategy::collect_rows(&[Table::new(rows)], 2016);

    assert_eq!(result.len(), 15);
    for row in result.rows() {
        assert!((0.0..=100.0).contains(&row.score));
        assert_ne!(row.score, 2016.0);
    }
}

// ---------------------------------------------------------------------------
// OCR fallback path
// ---------------------------------------------------------------------------
#[test]
fn ocr_fallback_engaged_when_tables_fail() {
    let input = tempfile::tempdir().unwrap();
    std::fs::write(input.path().join("cei_2016.pdf"), b"%PDF-").unwrap();
    let pdf = input.path().join("cei_2016.pdf");

    let ocr = MockOcr {
        text: "Delta Air Lines GA : 95\nAcme Holdings Inc : 100\nPage 42\n".to_string(),
    };

    let result = extract_rows(&pdf, 2016, &FailingTables, &ocr);
    assert_eq!(result.len(), 2);
    assert_eq!(result.rows()[0].company, "Delta Air Lines");
    assert_eq!(result.rows()[0].score, 95.0);
    assert_eq!(result.rows()[1].company, "Acme Holdings Inc");
}

#[test]
fn ocr_not_engaged_when_tables_succeed() {
    let input = tempfile::tempdir().unwrap();
    std::fs::write(input.path().join("cei_2016.pdf"), b"%PDF-").unwrap();
    let pdf = input.path().join("cei_2016.pdf");

    let tables = MockTables {
        tables: vec![table(&[
            ("Acme Holdings Inc", "100"),
            ("Globex Corporation", "95"),
            ("Initech LLC", "90"),
        ])],
    };

    // NoOcr would error if the fallback were engaged.
    let result = extract_rows(&pdf, 2016, &tables, &NoOcr);
    assert_eq!(result.len(), 3);
}

// ---------------------------------------------------------------------------
// Batch mode
// ---------------------------------------------------------------------------
#[test]
fn batch_skips_years_with_existing_artifacts() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    std::fs::write(input.path().join("cei_2016.pdf"), b"%PDF-").unwrap();
    std::fs::write(input.path().join("cei_2017.pdf"), b"%PDF-").unwrap();
    let seeded = b"Company,CEI_Score,Year\nExisting Corp,90.0,2016\n";
    std::fs::write(output.path().join("cei_2016.csv"), seeded).unwrap();

    let tables = MockTables {
        tables: vec![report_table()],
    };
    let opts = ExtractOptions {
        input_dir: input.path().to_path_buf(),
        output_dir: output.path().to_path_buf(),
    };

    let (succeeded, failed) = process_missing_years(&opts, &tables, &NoOcr);
    assert_eq!(succeeded, vec![2017]);
    assert!(failed.is_empty());

    // 2016 artifact untouched
    let content = std::fs::read(output.path().join("cei_2016.csv")).unwrap();
    assert_eq!(content, seeded);
    assert!(output.path().join("cei_2017.csv").exists());
}

#[test]
fn batch_records_failed_years_and_continues() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    std::fs::write(input.path().join("cei_2016.pdf"), b"%PDF-").unwrap();

    let tables = MockTables { tables: vec![] };
    let opts = ExtractOptions {
        input_dir: input.path().to_path_buf(),
        output_dir: output.path().to_path_buf(),
    };

    let (succeeded, failed) = process_missing_years(&opts, &tables, &NoOcr);
    assert!(succeeded.is_empty());
    assert_eq!(failed, vec![2016]);
    assert!(!output.path().join("cei_2016.csv").exists());
}
