//! Maps a raw resume extraction onto a candidate profile.
//!
//! Every field falls back to the caller's prior value: an absent, blank or
//! invalid extracted value never clears something the recruiter already has.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde_json::Value;

use crate::extraction::dates::{find_month, first_year, is_ongoing, is_year, parse_tenure};
use crate::extraction::education::reclassify_education;
use crate::extraction::error::Warnings;
use crate::extraction::raw::RawExtraction;
use crate::extraction::{fill, replace_list, Mapped};
use crate::models::candidate::{CanonicalCandidateProfile, ExperienceEntry, Month};

static RE_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})(st|nd|rd|th)\b").unwrap());

/// Human date layouts tried after ISO, most common first. US month/day wins
/// over day/month when both would parse.
const DOB_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%d-%b-%Y",
];

pub fn map_candidate(prior: CanonicalCandidateProfile, extracted: &Value) -> Mapped<CanonicalCandidateProfile> {
    let raw = RawExtraction::new(extracted);
    let mut warnings = Warnings::default();
    let mut profile = prior;

    if let Some(name) = raw.text("name") {
        let (first, last) = split_name(&name);
        fill(&mut profile.first_name, first);
        fill(&mut profile.last_name, last);
    }

    fill(&mut profile.email, raw.text("email"));
    fill(&mut profile.phone, raw.text("phone"));
    fill(&mut profile.summary, raw.text("summary"));

    let contact = raw.object("contactDetails");
    fill(
        &mut profile.linkedin,
        contact.as_ref().and_then(|c| c.text("linkedin")).or_else(|| raw.text("linkedin")),
    );
    fill(
        &mut profile.github,
        contact.as_ref().and_then(|c| c.text("github")).or_else(|| raw.text("github")),
    );

    if let Some(dob) = raw.text("dob").or_else(|| raw.text("dateOfBirth")) {
        match normalize_date_of_birth(&dob) {
            Some(date) => profile.date_of_birth = Some(date),
            None => warnings.push("date_of_birth", dob, "unrecognized date format"),
        }
    }

    let address = contact.as_ref().and_then(|c| c.text("address"));
    let address_part = |i: usize| {
        address
            .as_deref()
            .and_then(|a| a.split(',').nth(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    let location = raw.object("location");
    let located = |key: &str| location.as_ref().and_then(|l| l.text(key));
    fill(&mut profile.city, located("city").or_else(|| address_part(0)));
    fill(&mut profile.state, located("state").or_else(|| address_part(1)));
    fill(&mut profile.country, located("country"));

    replace_list(&mut profile.skills, raw.text_list("skills"));

    let experience: Vec<ExperienceEntry> = raw
        .items("experience")
        .iter()
        .enumerate()
        .map(|(i, exp)| map_experience(exp, i, &mut warnings))
        .collect();
    replace_list(&mut profile.experience, experience);
    replace_list(&mut profile.education, reclassify_education(&raw, &mut warnings));

    Mapped {
        value: profile,
        warnings: warnings.into_vec(),
    }
}

/// First whitespace token is the first name; the rest is the last name.
pub fn split_name(name: &str) -> (Option<String>, Option<String>) {
    let mut tokens = name.split_whitespace();
    let first = tokens.next().map(str::to_string);
    let rest = tokens.collect::<Vec<_>>().join(" ");
    (first, (!rest.is_empty()).then_some(rest))
}

/// Accepts ISO dates as-is and reformats common human layouts to ISO.
pub fn normalize_date_of_birth(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }

    let cleaned = RE_ORDINAL.replace_all(text, "$1");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    DOB_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&cleaned, fmt).ok())
}

fn map_experience(exp: &RawExtraction<'_>, index: usize, warnings: &mut Warnings) -> ExperienceEntry {
    let field = |name: &str| format!("experience[{index}].{name}");

    let mut entry = ExperienceEntry {
        employer: exp
            .first_text(&["company", "employer", "organization"])
            .unwrap_or_default(),
        position: exp.first_text(&["position", "title", "role"]),
        start_month: month_field(exp, "startMonth", &field("start_month"), warnings),
        start_year: year_field(exp, "startYear", &field("start_year"), warnings),
        end_month: month_field(exp, "endMonth", &field("end_month"), warnings),
        end_year: year_field(exp, "endYear", &field("end_year"), warnings),
        present: false,
        responsibilities: exp.first_text(&["responsibilities", "description", "duties", "jobDescription"]),
    };

    if entry.start_month.is_none() && entry.start_year.is_none() {
        if let Some(tenure) = exp.text("tenure") {
            match parse_tenure(&tenure) {
                Ok(parsed) => {
                    entry.start_month = parsed.start_month;
                    entry.start_year = parsed.start_year;
                    entry.end_month = parsed.end_month;
                    entry.end_year = parsed.end_year;
                    entry.present = parsed.present;
                }
                Err(e) => warnings.push(field("tenure"), tenure, e.to_string()),
            }
        }
    }

    let end_says_ongoing = ["endMonth", "endYear"]
        .iter()
        .filter_map(|k| exp.text(k))
        .any(|v| is_ongoing(&v));
    if entry.present || exp.flag("isCurrentJob") == Some(true) || end_says_ongoing {
        entry.mark_present();
    }

    entry
}

fn month_field(exp: &RawExtraction<'_>, key: &str, field: &str, warnings: &mut Warnings) -> Option<Month> {
    let text = exp.text(key)?;
    if is_ongoing(&text) {
        return None;
    }
    let numeric = text
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=12).contains(n))
        .map(|n| Month::ALL[n - 1]);
    let month = numeric.or_else(|| find_month(&text));
    if month.is_none() {
        warnings.push(field, text, "expected a month name");
    }
    month
}

fn year_field(exp: &RawExtraction<'_>, key: &str, field: &str, warnings: &mut Warnings) -> Option<String> {
    let text = exp.text(key)?;
    if is_ongoing(&text) {
        return None;
    }
    if is_year(&text) {
        return Some(text);
    }
    let year = first_year(&text).map(str::to_string);
    if year.is_none() {
        warnings.push(field, text, "expected a 4-digit year");
    }
    year
}
