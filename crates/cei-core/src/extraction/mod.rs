pub mod camelot;
pub mod ocr;

use crate::error::CeiError;
use crate::model::Table;
use std::fmt;
use std::path::Path;

/// Table-detection algorithm: ruled-line detection vs whitespace alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Lattice,
    Stream,
}

impl Flavor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flavor::Lattice => "lattice",
            Flavor::Stream => "stream",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page window handed to a backend (1-based, inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRange {
    All,
    Span(u32, u32),
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageRange::All => f.write_str("all"),
            PageRange::Span(first, last) => write!(f, "{first}-{last}"),
        }
    }
}

/// Trait for table-extraction backends.
pub trait TableExtractor: Send + Sync {
    /// Extract every table found in the given page window.
    fn extract_tables(
        &self,
        pdf: &Path,
        pages: PageRange,
        flavor: Flavor,
    ) -> Result<Vec<Table>, CeiError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Trait for OCR backends used on the fallback path.
pub trait OcrEngine: Send + Sync {
    /// Rasterize and OCR the given page window into plain text,
    /// pages separated by newlines.
    fn ocr_page_range(&self, pdf: &Path, first: u32, last: u32) -> Result<String, CeiError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
