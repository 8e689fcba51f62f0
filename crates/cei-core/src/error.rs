use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CeiError {
    #[error("no PDF found for year {year} under {dir}")]
    PdfNotFound { year: u16, dir: PathBuf },

    #[error("PDF found for year {year} but no valid rows survived extraction")]
    NoData { year: u16 },

    #[error("table extraction failed: {0}")]
    Extraction(String),

    #[error("camelot not found. Install it with: pip install 'camelot-py[cv]'")]
    CamelotNotFound,

    #[error("camelot failed with exit code {code}: {stderr}")]
    CamelotFailed { code: i32, stderr: String },

    #[error("pdftoppm not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftoppmNotFound,

    #[error("tesseract not found. Install it: brew install tesseract (macOS) or apt install tesseract-ocr (Linux)")]
    TesseractNotFound,

    #[error("{tool} failed with exit code {code}: {stderr}")]
    OcrToolFailed {
        tool: &'static str,
        code: i32,
        stderr: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
