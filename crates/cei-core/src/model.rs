use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One extracted company record, as written to the year's CSV artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyScoreRow {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "CEI_Score")]
    pub score: f64,
    #[serde(rename = "Year")]
    pub year: u16,
}

/// Ordered rows for a single report year.
///
/// Company names are unique within a year: the first occurrence wins and
/// later duplicates are discarded.
#[derive(Debug, Clone)]
pub struct YearResult {
    pub year: u16,
    rows: Vec<CompanyScoreRow>,
    seen: HashSet<String>,
}

impl YearResult {
    pub fn new(year: u16) -> Self {
        YearResult {
            year,
            rows: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Add a row, trimming the company name. Returns false when the name is
    /// empty after trimming or already present.
    pub fn push(&mut self, company: String, score: f64) -> bool {
        let company = company.trim().to_string();
        if company.is_empty() || self.seen.contains(&company) {
            return false;
        }
        self.seen.insert(company.clone());
        self.rows.push(CompanyScoreRow {
            company,
            score,
            year: self.year,
        });
        true
    }

    pub fn rows(&self) -> &[CompanyScoreRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Raw grid of text cells as returned by a table-extraction backend.
///
/// Rows may have differing lengths; missing cells read as empty.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub cells: Vec<Vec<String>>,
}

impl Table {
    pub fn new(cells: Vec<Vec<String>>) -> Self {
        Table { cells }
    }

    /// Widest row in the grid.
    pub fn width(&self) -> usize {
        self.cells.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.cells.get(row)?.get(col).map(|s| s.as_str())
    }
}

/// A scored (company column, score column) pairing for one table.
///
/// Ephemeral: produced per table, the best one is kept, the rest dropped.
#[derive(Debug, Clone)]
pub struct ExtractionCandidate {
    pub company_col: usize,
    pub score_col: usize,
    pub rows: Vec<(String, f64)>,
    pub quality: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_deduplicates_by_company() {
        let mut result = YearResult::new(2016);
        assert!(result.push("Acme Corp".into(), 90.0));
        assert!(!result.push("Acme Corp".into(), 85.0));
        assert_eq!(result.len(), 1);
        assert_eq!(result.rows()[0].score, 90.0);
    }

    #[test]
    fn test_push_trims_and_rejects_empty() {
        let mut result = YearResult::new(2016);
        assert!(result.push("  Acme Corp  ".into(), 90.0));
        assert_eq!(result.rows()[0].company, "Acme Corp");
        assert!(!result.push("   ".into(), 50.0));
    }

    #[test]
    fn test_table_width_uses_widest_row() {
        let table = Table::new(vec![
            vec!["a".into()],
            vec!["b".into(), "c".into(), "d".into()],
        ]);
        assert_eq!(table.width(), 3);
        assert_eq!(table.cell(0, 2), None);
        assert_eq!(table.cell(1, 2), Some("d"));
    }
}
