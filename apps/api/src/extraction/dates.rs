//! Loose date and tenure parsing for AI-extracted resume text.
//!
//! Everything here is pure and total: unparseable input yields empty fields,
//! never an error, except for the strict `parse_tenure` which reports why a
//! range could not be split.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::models::candidate::Month;

static RE_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]{4}").unwrap());
static RE_EXACT_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{4}$").unwrap());

/// Month spellings seen in resumes, lowercase. Checked in calendar order.
const MONTH_NAMES: &[(&str, Month)] = &[
    ("jan", Month::Jan),
    ("january", Month::Jan),
    ("feb", Month::Feb),
    ("february", Month::Feb),
    ("mar", Month::Mar),
    ("march", Month::Mar),
    ("apr", Month::Apr),
    ("april", Month::Apr),
    ("may", Month::May),
    ("jun", Month::Jun),
    ("june", Month::Jun),
    ("jul", Month::Jul),
    ("july", Month::Jul),
    ("aug", Month::Aug),
    ("august", Month::Aug),
    ("sep", Month::Sep),
    ("sept", Month::Sep),
    ("september", Month::Sep),
    ("oct", Month::Oct),
    ("october", Month::Oct),
    ("nov", Month::Nov),
    ("november", Month::Nov),
    ("dec", Month::Dec),
    ("december", Month::Dec),
];

const TENURE_SEPARATOR: &str = " - ";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialDate {
    pub month: Option<Month>,
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tenure {
    pub start_month: Option<Month>,
    pub start_year: Option<String>,
    pub end_month: Option<Month>,
    pub end_year: Option<String>,
    pub present: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TenureError {
    #[error("tenure is empty")]
    Empty,

    #[error("expected 'start - end', found {parts} part(s)")]
    MissingSeparator { parts: usize },
}

/// Finds a month name and a 4-digit year anywhere in `text`.
///
/// Month names are matched as whole alphabetic words so "Summary" is not read
/// as March. The year is the first run of four digits.
pub fn parse_date_string(text: &str) -> PartialDate {
    PartialDate {
        month: find_month(text),
        year: first_year(text).map(str::to_string),
    }
}

/// Splits a tenure like `"Jan 2020 - Present"` into start/end parts.
///
/// Returns the empty tenure when the range has no `" - "` separator; use
/// [`parse_tenure`] to tell that apart from a range with unreadable dates.
#[allow(dead_code)]
pub fn parse_tenure_string(text: &str) -> Tenure {
    parse_tenure(text).unwrap_or_default()
}

pub fn parse_tenure(text: &str) -> Result<Tenure, TenureError> {
    if text.trim().is_empty() {
        return Err(TenureError::Empty);
    }

    let parts: Vec<&str> = text.split(TENURE_SEPARATOR).collect();
    let [start, end] = parts.as_slice() else {
        return Err(TenureError::MissingSeparator { parts: parts.len() });
    };

    let start = parse_date_string(start);
    if is_ongoing(end) {
        return Ok(Tenure {
            start_month: start.month,
            start_year: start.year,
            present: true,
            ..Default::default()
        });
    }

    let end = parse_date_string(end);
    Ok(Tenure {
        start_month: start.month,
        start_year: start.year,
        end_month: end.month,
        end_year: end.year,
        present: false,
    })
}

/// True for end dates like "Present", "current", "till present".
pub fn is_ongoing(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("present") || lower.contains("current")
}

pub fn find_month(text: &str) -> Option<Month> {
    let words: Vec<String> = text
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();

    MONTH_NAMES
        .iter()
        .find(|(name, _)| words.iter().any(|w| w == name))
        .map(|&(_, month)| month)
}

pub fn is_year(text: &str) -> bool {
    RE_EXACT_YEAR.is_match(text)
}

pub fn first_year(text: &str) -> Option<&str> {
    RE_YEAR.find(text).map(|m| m.as_str())
}

pub fn last_year(text: &str) -> Option<&str> {
    RE_YEAR.find_iter(text).last().map(|m| m.as_str())
}
