//! Strategy escalation for the table-extraction path.
//!
//! Each strategy is one (flavor, page range) attempt, tried in a fixed
//! priority order. The first strategy that clears the substantial-result
//! threshold wins immediately; otherwise the best result seen across all
//! strategies is kept. Failures are logged and skipped, never propagated.

use crate::disambiguate;
use crate::extraction::{Flavor, PageRange, TableExtractor};
use crate::model::{Table, YearResult};
use std::path::Path;
use tracing::{debug, info};

/// One table-extraction attempt.
#[derive(Debug, Clone, Copy)]
pub struct Strategy {
    pub flavor: Flavor,
    pub pages: PageRange,
}

/// Priority order: whole-document passes first, then the appendix window,
/// then a wide sweep.
pub const STRATEGIES: &[Strategy] = &[
    Strategy {
        flavor: Flavor::Lattice,
        pages: PageRange::All,
    },
    Strategy {
        flavor: Flavor::Stream,
        pages: PageRange::All,
    },
    Strategy {
        flavor: Flavor::Lattice,
        pages: PageRange::Span(30, 100),
    },
    Strategy {
        flavor: Flavor::Stream,
        pages: PageRange::Span(30, 100),
    },
    Strategy {
        flavor: Flavor::Lattice,
        pages: PageRange::Span(10, 80),
    },
    Strategy {
        flavor: Flavor::Stream,
        pages: PageRange::Span(10, 80),
    },
];

/// A result above this many rows is accepted without trying further
/// strategies.
pub const SUBSTANTIAL_ROWS: usize = 50;

/// Minimum filtered rows for a column pairing to count at all.
pub const MIN_CANDIDATE_ROWS: usize = 3;

/// Run the strategy list against one PDF, returning the best result seen.
/// Never fails: strategies that error are skipped.
pub fn run_table_strategies(
    pdf: &Path,
    year: u16,
    extractor: &dyn TableExtractor,
) -> YearResult {
    let mut best = YearResult::new(year);

    for (i, strategy) in STRATEGIES.iter().enumerate() {
        let tables = match extractor.extract_tables(pdf, strategy.pages, strategy.flavor) {
            Ok(tables) => tables,
            Err(e) => {
                debug!(strategy = i + 1, "strategy failed: {e}");
                continue;
            }
        };

        let result = collect_rows(&tables, year);
        if result.len() > best.len() {
            info!(
                strategy = i + 1,
                flavor = %strategy.flavor,
                pages = %strategy.pages,
                rows = result.len(),
                "strategy improved result"
            );
            best = result;
            if best.len() > SUBSTANTIAL_ROWS {
                break;
            }
        }
    }

    best
}

/// Disambiguate each table independently and merge the accepted rows,
/// deduplicating by company across tables (first occurrence wins).
pub fn collect_rows(tables: &[Table], year: u16) -> YearResult {
    let mut result = YearResult::new(year);
    for table in tables {
        if let Some(candidate) = disambiguate::best_candidate(table, MIN_CANDIDATE_ROWS) {
            for (company, score) in candidate.rows {
                result.push(company, score);
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CeiError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn table(rows: &[(&str, &str)]) -> Table {
        Table::new(
            rows.iter()
                .map(|(c, s)| vec![c.to_string(), s.to_string()])
                .collect(),
        )
    }

    fn big_table(count: usize) -> Table {
        Table::new(
            (0..count)
                .map(|i| vec![format!("Company {i:03} Inc"), format!("{}", 40 + (i % 60))])
                .collect(),
        )
    }

    /// Returns a fixed table set per call and counts invocations.
    struct CountingExtractor {
        per_call: Vec<Vec<Table>>,
        calls: AtomicUsize,
    }

    impl TableExtractor for CountingExtractor {
        fn extract_tables(
            &self,
            _pdf: &Path,
            _pages: PageRange,
            _flavor: Flavor,
        ) -> Result<Vec<Table>, CeiError> {
            let i = self.calls.fetch_add(1, Ordering::SeqCst);
            match self.per_call.get(i) {
                Some(tables) => Ok(tables.clone()),
                None => Err(CeiError::Extraction("exhausted".into())),
            }
        }

        fn backend_name(&self) -> &str {
            "counting"
        }
    }

    #[test]
    fn test_early_exit_on_substantial_result() {
        let extractor = CountingExtractor {
            per_call: vec![vec![big_table(60)]; STRATEGIES.len()],
            calls: AtomicUsize::new(0),
        };
        let result = run_table_strategies(Path::new("x.pdf"), 2016, &extractor);
        assert!(result.len() > SUBSTANTIAL_ROWS);
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_keeps_best_across_strategies() {
        let small = vec![table(&[
            ("Acme Holdings Inc", "100"),
            ("Globex Corporation", "95"),
            ("Initech LLC", "90"),
        ])];
        let bigger = vec![table(&[
            ("Acme Holdings Inc", "100"),
            ("Globex Corporation", "95"),
            ("Initech LLC", "90"),
            ("Umbrella Group", "85"),
            ("Stark Enterprises", "80"),
        ])];
        let extractor = CountingExtractor {
            per_call: vec![small, bigger, vec![], vec![], vec![], vec![]],
            calls: AtomicUsize::new(0),
        };
        let result = run_table_strategies(Path::new("x.pdf"), 2016, &extractor);
        assert_eq!(result.len(), 5);
        assert_eq!(extractor.calls.load(Ordering::SeqCst), STRATEGIES.len());
    }

    #[test]
    fn test_failing_strategies_skipped() {
        let extractor = CountingExtractor {
            per_call: vec![],
            calls: AtomicUsize::new(0),
        };
        let result = run_table_strategies(Path::new("x.pdf"), 2016, &extractor);
        assert!(result.is_empty());
        assert_eq!(extractor.calls.load(Ordering::SeqCst), STRATEGIES.len());
    }

    #[test]
    fn test_collect_rows_dedups_across_tables() {
        let t1 = table(&[
            ("Acme Holdings Inc", "100"),
            ("Globex Corporation", "95"),
            ("Initech LLC", "90"),
        ]);
        let t2 = table(&[
            ("Acme Holdings Inc", "70"),
            ("Umbrella Group", "85"),
            ("Stark Enterprises", "80"),
        ]);
        let result = collect_rows(&[t1, t2], 2016);
        assert_eq!(result.len(), 5);
        let acme = result
            .rows()
            .iter()
            .find(|r| r.company == "Acme Holdings Inc")
            .unwrap();
        assert_eq!(acme.score, 100.0);
    }
}
