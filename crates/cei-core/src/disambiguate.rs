//! Column disambiguation for raw extracted tables.
//!
//! There is no fixed layout across report years: the company column is not
//! always first and the score column is not always adjacent to it. Every
//! plausible (company column, score column) pairing is enumerated and scored,
//! and the highest-quality pairing wins.

use crate::filter;
use crate::model::{ExtractionCandidate, Table};
use std::collections::HashMap;

/// Company names lead the row in practice, so only the first few columns are
/// tried as the company column.
const MAX_COMPANY_COLS: usize = 4;

const VARIETY_BONUS: i64 = 10;
const PERFECT_SCORE_BONUS: i64 = 5;
const SPREAD_BONUS: i64 = 5;
const SUFFIX_WEIGHT: i64 = 2;
const DOMINANCE_PENALTY: i64 = 20;

/// Best-scoring column pairing for the table, or None when no pairing
/// produces at least `min_rows` filtered rows.
pub fn best_candidate(table: &Table, min_rows: usize) -> Option<ExtractionCandidate> {
    let width = table.width();
    if width < 2 {
        return None;
    }

    let mut best: Option<ExtractionCandidate> = None;
    for company_col in 0..width.min(MAX_COMPANY_COLS) {
        for score_col in 0..width {
            if score_col == company_col {
                continue;
            }
            let raw = candidate_rows(table, company_col, score_col);
            if raw.len() < min_rows {
                continue;
            }
            let rows = filter_company_rows(raw);
            if rows.len() < min_rows {
                continue;
            }
            let quality = score_quality(&rows);
            if best.as_ref().map_or(true, |b| quality > b.quality) {
                best = Some(ExtractionCandidate {
                    company_col,
                    score_col,
                    rows,
                    quality,
                });
            }
        }
    }
    best
}

/// Rows where the company cell is non-empty and the score cell parses as a
/// number in [0, 100]. Anything else is silently dropped.
fn candidate_rows(table: &Table, company_col: usize, score_col: usize) -> Vec<(String, f64)> {
    let mut rows = Vec::new();
    for r in 0..table.row_count() {
        let Some(company) = table.cell(r, company_col) else {
            continue;
        };
        let company = company.trim();
        if company.is_empty() {
            continue;
        }
        // camelot leaves pandas NaN markers in cells it could not read
        let lower = company.to_lowercase();
        if lower == "nan" || lower == "none" {
            continue;
        }
        let Some(score) = table.cell(r, score_col) else {
            continue;
        };
        let Ok(score) = score.trim().parse::<f64>() else {
            continue;
        };
        if !(0.0..=100.0).contains(&score) {
            continue;
        }
        rows.push((company.to_string(), score));
    }
    rows
}

/// Apply the company plausibility filter, with a relaxation pass: if strict
/// filtering keeps under 10% of a table of more than 20 rows, it is starving
/// a real listing, so only structural noise is removed instead.
fn filter_company_rows(rows: Vec<(String, f64)>) -> Vec<(String, f64)> {
    let strict: Vec<(String, f64)> = rows
        .iter()
        .filter(|(c, _)| filter::is_plausible_company(c))
        .cloned()
        .collect();

    if strict.len() * 10 < rows.len() && rows.len() > 20 {
        return rows
            .into_iter()
            .filter(|(c, _)| !filter::is_structural_noise(c))
            .collect();
    }
    strict
}

/// Quality score for a filtered candidate: row count plus bonuses for score
/// variety, a perfect 100 and spread, plus 2 per suffix-bearing name, minus
/// a penalty when a single value dominates a large table (the usual sign of
/// having picked a year or page-number column).
pub fn score_quality(rows: &[(String, f64)]) -> i64 {
    if rows.is_empty() {
        return 0;
    }

    let mut score = rows.len() as i64;

    let mut counts: HashMap<u64, usize> = HashMap::new();
    for (_, s) in rows {
        *counts.entry(s.to_bits()).or_default() += 1;
    }
    if counts.len() > 1 {
        score += VARIETY_BONUS;
    }
    if rows.iter().any(|(_, s)| *s == 100.0) {
        score += PERFECT_SCORE_BONUS;
    }

    let min = rows.iter().map(|(_, s)| *s).fold(f64::INFINITY, f64::min);
    let max = rows
        .iter()
        .map(|(_, s)| *s)
        .fold(f64::NEG_INFINITY, f64::max);
    if min < max {
        score += SPREAD_BONUS;
    }

    let most_common = counts.values().copied().max().unwrap_or(0);
    if most_common as f64 > rows.len() as f64 * 0.8 && rows.len() > 10 {
        score -= DOMINANCE_PENALTY;
    }

    let suffix_hits = rows
        .iter()
        .filter(|(c, _)| filter::has_company_suffix(c))
        .count() as i64;
    score + suffix_hits * SUFFIX_WEIGHT
}
