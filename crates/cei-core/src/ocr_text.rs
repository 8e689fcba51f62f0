//! Line-oriented heuristics for OCR'd report text.
//!
//! Applied when table extraction found nothing. Each line is tested against
//! an ordered set of templates: the clean appendix-list patterns first, then
//! a format keyed by the report era. Extracted names go through OCR cleanup
//! and the validity gate before deduplication (first occurrence wins).

use crate::filter;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

// Clean appendix-list templates, most specific first:
//   "Company Name City ST : 95"  /  "Company Name : 95"  /  "Company Name 95"
static CLEAN_STATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s+([A-Z]{2})\s*[:;]\s*(\d{1,3})\s*$").unwrap());
static CLEAN_COLON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s*[:;]\s*(\d{1,3})\s*$").unwrap());
static CLEAN_BARE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?)\s+(\d{1,3})\s*$").unwrap());

static TRAILING_SCORE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{1,3})\s*$").unwrap());
static ANY_SCORE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{1,3})\b").unwrap());
static LONE_SCORE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,3})$").unwrap());
static DOT_LEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{2,}").unwrap());
static TRAILING_LIST_PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.:;]+$").unwrap());
static MULTI_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Parse OCR text into (company, score) pairs for one report year.
pub fn parse_ocr_text(text: &str, year: u16) -> Vec<(String, f64)> {
    let lines: Vec<&str> = text.lines().collect();

    let mut raw = parse_clean_list(&lines);
    if year >= 2015 {
        raw.extend(parse_modern(&lines));
    } else if year >= 2010 {
        raw.extend(parse_mid(&lines));
    } else {
        raw.extend(parse_legacy(&lines));
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for (company, score) in raw {
        let company = filter::clean_company_name(&company);
        if company.is_empty() || seen.contains(&company) {
            continue;
        }
        if !filter::is_valid_ocr_entry(&company, score) {
            continue;
        }
        seen.insert(company.clone());
        out.push((company, score));
    }
    out
}

fn in_range(score: i64) -> bool {
    (0..=100).contains(&score)
}

/// Clean appendix listings: company, optional trailing state code, separator,
/// score. Present across eras, so always tried first.
fn parse_clean_list(lines: &[&str]) -> Vec<(String, f64)> {
    let mut out = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.len() < 10 {
            continue;
        }
        for re in [&*CLEAN_STATE_RE, &*CLEAN_COLON_RE, &*CLEAN_BARE_RE] {
            let Some(caps) = re.captures(line) else {
                continue;
            };
            let company_raw = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let score_str = caps
                .get(caps.len() - 1)
                .map(|m| m.as_str())
                .unwrap_or_default();
            let Ok(score) = score_str.parse::<i64>() else {
                continue;
            };
            if !in_range(score) {
                continue;
            }
            let company = TRAILING_LIST_PUNCT_RE.replace_all(company_raw.trim(), "");
            let company = MULTI_SPACE_RE.replace_all(&company, " ").to_string();
            if company.len() > 3 && filter::is_plausible_company_strict(&company) {
                out.push((company, score as f64));
                break;
            }
        }
    }
    out
}

/// Modern format (2015+): score sits at the end of the line, often behind a
/// dot leader.
fn parse_modern(lines: &[&str]) -> Vec<(String, f64)> {
    let mut out = Vec::new();
    for line in lines {
        let line = line.trim();
        let Some(m) = TRAILING_SCORE_RE.captures(line).and_then(|c| c.get(1)) else {
            continue;
        };
        let Ok(score) = m.as_str().parse::<i64>() else {
            continue;
        };
        if !in_range(score) {
            continue;
        }
        let company = DOT_LEADER_RE.replace_all(line[..m.start()].trim(), "");
        let company = company.trim().to_string();
        if company.len() > 3 && filter::is_company_like(&company) {
            out.push((company, score as f64));
        }
    }
    out
}

/// Mid-era format (2010-2014): score either embedded in the company line or
/// alone on the following line.
fn parse_mid(lines: &[&str]) -> Vec<(String, f64)> {
    let mut out = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let line = line.trim();
        if line.is_empty() || !filter::is_company_like(line) {
            continue;
        }

        if let Some(m) = ANY_SCORE_RE.captures(line).and_then(|c| c.get(1)) {
            if let Ok(score) = m.as_str().parse::<i64>() {
                if in_range(score) {
                    let company = ANY_SCORE_RE.replace_all(line, "").trim().to_string();
                    out.push((company, score as f64));
                }
            }
            continue;
        }

        if let Some(next) = lines.get(i + 1) {
            if let Some(m) = LONE_SCORE_RE.captures(next.trim()).and_then(|c| c.get(1)) {
                if let Ok(score) = m.as_str().parse::<i64>() {
                    if in_range(score) {
                        out.push((line.to_string(), score as f64));
                    }
                }
            }
        }
    }
    out
}

/// Legacy format (pre-2010): whitespace-split line with the score as the
/// final token.
fn parse_legacy(lines: &[&str]) -> Vec<(String, f64)> {
    let mut out = Vec::new();
    for line in lines {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            continue;
        }
        let Ok(score) = parts[parts.len() - 1].parse::<f64>() else {
            continue;
        };
        if !(0.0..=100.0).contains(&score) {
            continue;
        }
        let company = parts[..parts.len() - 1].join(" ");
        if filter::is_company_like(&company) {
            out.push((company, score));
        }
    }
    out
}
