//! Company-name plausibility filters.
//!
//! CEI appendix tables mix company rows with headers, page numbers, scoring
//! rubric text and footnotes. A string is accepted as a company name when it
//! passes all structural checks and either carries a known corporate suffix
//! (strong signal, sufficient on its own) or is a long multi-word string
//! (weak fallback signal).

use once_cell::sync::Lazy;
use regex::Regex;

/// Report vocabulary that disqualifies a string as a company name
/// (case-insensitive substring match).
pub const EXCLUSION_TERMS: &[&str] = &[
    "score",
    "rating",
    "points",
    "total",
    "average",
    "page",
    "appendix",
    "table",
    "figure",
    "notes",
    "criteria",
    "requirement",
    "policy",
    "benefit",
    "training",
    "harassment",
    "discrimination",
    "equality",
    "index",
    "corporate",
    "www.",
    "http",
    "email",
    "based on",
    "sexual orientation",
    "gender identity",
    "equivalency",
    "credit",
    "exclusion",
    "transition",
    "blanket",
    "individuals",
    "without",
];

/// Corporate suffix tokens that mark a string as a likely company name
/// (case-insensitive substring match).
pub const COMPANY_SUFFIXES: &[&str] = &[
    "inc",
    "corp",
    "corporation",
    "company",
    "llc",
    "ltd",
    "llp",
    "co.",
    "group",
    "holdings",
    "enterprises",
    "associates",
    "partners",
    "&",
    "financial",
    "bank",
    "insurance",
    "healthcare",
    "systems",
    "technologies",
    "solutions",
    "services",
];

static PURE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.?\d*$").unwrap());

static NUMERIC_ONLY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d\s.]+$").unwrap());

/// Anchored patterns for structural report noise (page numbers, section
/// headers). Used alone by the relaxed filtering pass.
static STRUCTURAL_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^\d+$",
        r"^page\s+\d+",
        r"^appendix",
        r"^table\s+\d+",
        r"^figure\s+\d+",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static TRAILING_PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[;:.]+$").unwrap());
static STRAY_SYMBOLS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[@#$%^*()]+").unwrap());
static MULTI_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static DOT_LEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{2,}").unwrap());
static OCR_ECHO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"e{3,}").unwrap());
static TRAILING_STATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+[A-Z]{2}\s*$").unwrap());
static TRAILING_ZIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+\d{5}(-\d{4})?\s*$").unwrap());

/// True when the string contains a known corporate suffix token.
pub fn has_company_suffix(text: &str) -> bool {
    let lower = text.to_lowercase();
    COMPANY_SUFFIXES.iter().any(|s| lower.contains(s))
}

/// True when the string contains report vocabulary that rules it out.
pub fn contains_excluded_term(text: &str) -> bool {
    let lower = text.to_lowercase();
    EXCLUSION_TERMS.iter().any(|t| lower.contains(t))
}

/// True for page numbers, bare numbers and section headers.
pub fn is_structural_noise(text: &str) -> bool {
    let lower = text.trim().to_lowercase();
    if lower.is_empty() || PURE_NUMBER_RE.is_match(&lower) {
        return true;
    }
    STRUCTURAL_RES.iter().any(|re| re.is_match(&lower))
}

/// Table-path plausibility check.
///
/// A corporate suffix is sufficient; without one the string must be both
/// multi-word and longer than 10 characters.
pub fn is_plausible_company(text: &str) -> bool {
    let t = text.trim();
    if t.len() <= 3 || is_structural_noise(t) || contains_excluded_term(t) {
        return false;
    }
    if has_company_suffix(t) {
        return true;
    }
    t.split_whitespace().count() >= 2 && t.len() > 10
}

/// Stricter OCR-path variant: without a suffix the string must be long,
/// multi-word and mostly capitalized, since OCR noise is often prose-like.
pub fn is_plausible_company_strict(text: &str) -> bool {
    let t = text.trim();
    if t.len() <= 3 || !t.chars().any(|c| c.is_alphabetic()) || contains_excluded_term(t) {
        return false;
    }
    if has_company_suffix(t) {
        return true;
    }
    if t.len() > 15 {
        let words: Vec<&str> = t.split_whitespace().collect();
        if words.len() >= 2 {
            let capitalized = words
                .iter()
                .filter(|w| w.chars().next().is_some_and(|c| c.is_uppercase()))
                .count();
            // at least 70% of words capitalized
            return capitalized * 10 >= words.len() * 7;
        }
    }
    false
}

/// Loose variant used by the era-format line templates, where the cleanup
/// pass afterwards does the heavy lifting.
pub fn is_company_like(text: &str) -> bool {
    let t = text.trim();
    if t.len() < 3 {
        return false;
    }
    if has_company_suffix(t) {
        return true;
    }
    let words: Vec<&str> = t.split_whitespace().collect();
    if t.len() > 10 && words.len() >= 2 {
        return true;
    }
    words.len() >= 2
        && words
            .iter()
            .all(|w| w.chars().next().is_some_and(|c| c.is_uppercase()))
}

/// Final validity gate for an OCR-extracted (company, score) pair.
pub fn is_valid_ocr_entry(company: &str, score: f64) -> bool {
    let t = company.trim();
    if t.len() <= 3 || !(0.0..=100.0).contains(&score) {
        return false;
    }
    if contains_excluded_term(t) || NUMERIC_ONLY_RE.is_match(t) {
        return false;
    }
    // OCR artifact lines carry a high density of stray symbols
    let specials = t
        .chars()
        .filter(|c| {
            !(c.is_alphanumeric()
                || c.is_whitespace()
                || matches!(c, '&' | '.' | '-' | '\'' | ',' | '_'))
        })
        .count();
    specials * 10 <= t.len() * 3
}

/// Strip OCR artifacts from a company name: trailing punctuation, stray
/// symbols, dot leaders, character echo, trailing state codes and ZIPs.
pub fn clean_company_name(raw: &str) -> String {
    let mut name = TRAILING_PUNCT_RE.replace_all(raw.trim(), "").to_string();
    name = STRAY_SYMBOLS_RE.replace_all(&name, "").to_string();
    name = DOT_LEADER_RE.replace_all(&name, "").to_string();
    name = OCR_ECHO_RE.replace_all(&name, "").to_string();
    name = MULTI_SPACE_RE.replace_all(&name, " ").to_string();
    name = TRAILING_ZIP_RE.replace_all(&name, "").to_string();
    name = TRAILING_STATE_RE.replace_all(&name, "").to_string();
    name.trim().to_string()
}
