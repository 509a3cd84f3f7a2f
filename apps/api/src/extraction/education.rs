//! Education reclassification.
//!
//! The AI returns education in three places (`education`, the 10th/12th
//! sections and `certifications`) with drifting field names. Everything is
//! folded into `EducationEntry` values in this order: general entries,
//! 10th, 12th, certifications.

use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::dates::{first_year, is_year, last_year};
use crate::extraction::error::Warnings;
use crate::extraction::raw::RawExtraction;
use crate::models::candidate::{EducationEntry, EducationLevel};

pub const SECONDARY_DEFAULT_DEGREE: &str = "Secondary School Certificate";
pub const HIGHER_SECONDARY_DEFAULT_DEGREE: &str = "Higher Secondary Certificate";

const INSTITUTION_KEYS: &[&str] = &["institution", "school", "university", "college"];
const YEAR_KEYS: &[&str] = &["year", "endYear", "startYear", "graduationYear"];

static RE_TENTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"10th|sslc|\bssc\b|\bclass\s*(10|x)\b|\bmatric").unwrap()
});
static RE_SECONDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(higher|senior)\s+secondary\b").unwrap());
static RE_TWELFTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"12th|higher secondary|senior secondary|\bhsc\b|\bpuc\b|\bclass\s*(12|xii)\b|\bintermediate\b").unwrap()
});
static RE_BACHELOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"bachelor|\bb\.|\b(ba|bs|bsc|btech|bcom|bca|bba|be)\b").unwrap()
});
static RE_MASTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"master|\bm\.|\b(ma|ms|msc|mtech|mcom|mca|mba)\b").unwrap()
});
static RE_PHD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bph\.?\s?d\b|doctorate|doctor of philosophy").unwrap());

/// Infers a level from free-form degree text.
///
/// Categories are tried in a fixed order and the first hit wins, so
/// "Secondary School Certificate" is 10th rather than a certificate.
pub fn infer_level(degree: &str) -> Option<EducationLevel> {
    let text = degree.to_lowercase();

    let plain_secondary = text.contains("secondary") && !RE_SECONDARY.is_match(&text);
    if RE_TENTH.is_match(&text) || plain_secondary {
        Some(EducationLevel::Tenth)
    } else if RE_TWELFTH.is_match(&text) {
        Some(EducationLevel::Twelfth)
    } else if RE_BACHELOR.is_match(&text) {
        Some(EducationLevel::Bachelor)
    } else if RE_MASTER.is_match(&text) {
        Some(EducationLevel::Master)
    } else if RE_PHD.is_match(&text) {
        Some(EducationLevel::Phd)
    } else if text.contains("diploma") {
        Some(EducationLevel::Diploma)
    } else if text.contains("certif") {
        Some(EducationLevel::Certificate)
    } else {
        None
    }
}

/// Builds the full education list from an extraction.
pub fn reclassify_education(raw: &RawExtraction<'_>, warnings: &mut Warnings) -> Vec<EducationEntry> {
    let mut entries: Vec<EducationEntry> = raw
        .items("education")
        .iter()
        .enumerate()
        .map(|(i, edu)| map_education_entry(edu, i, warnings))
        .collect();

    if let Some(tenth) = raw.object("secondaryEducation") {
        entries.push(EducationEntry {
            level: Some(EducationLevel::Tenth),
            degree: SECONDARY_DEFAULT_DEGREE.to_string(),
            institution: tenth.text("institution"),
            year: coerce_year(tenth.text("year"), "secondaryEducation.year", warnings),
        });
    }

    if let Some(twelfth) = raw.object("higherSecondaryEducation") {
        let degree = match twelfth.text("stream") {
            Some(stream) => format!("{HIGHER_SECONDARY_DEFAULT_DEGREE} ({stream})"),
            None => HIGHER_SECONDARY_DEFAULT_DEGREE.to_string(),
        };
        entries.push(EducationEntry {
            level: Some(EducationLevel::Twelfth),
            degree,
            institution: twelfth.text("institution"),
            year: coerce_year(twelfth.text("year"), "higherSecondaryEducation.year", warnings),
        });
    }

    for (i, cert) in raw.items("certifications").iter().enumerate() {
        entries.push(map_certification(cert, i, warnings));
    }

    entries
}

fn map_education_entry(edu: &RawExtraction<'_>, index: usize, warnings: &mut Warnings) -> EducationEntry {
    let degree_text = edu.first_text(&["degree", "major", "course"]);
    let level = resolve_level(edu, degree_text.as_deref(), index, warnings);

    let mut degree = match (edu.text("degree"), edu.text("field")) {
        (Some(degree), Some(field)) => format!("{degree} in {field}"),
        _ => degree_text.unwrap_or_default(),
    };
    if degree.is_empty() {
        match level {
            Some(EducationLevel::Tenth) => degree = SECONDARY_DEFAULT_DEGREE.to_string(),
            Some(EducationLevel::Twelfth) => degree = HIGHER_SECONDARY_DEFAULT_DEGREE.to_string(),
            _ => {}
        }
    }

    let field = format!("education[{index}].year");
    let year = coerce_year(edu.first_text(YEAR_KEYS), &field, warnings).or_else(|| {
        // Later years in a blob of text are usually the graduation year.
        edu.string_properties()
            .into_iter()
            .find_map(last_year)
            .map(str::to_string)
    });

    EducationEntry {
        level,
        degree,
        institution: edu.first_text(INSTITUTION_KEYS),
        year,
    }
}

fn resolve_level(
    edu: &RawExtraction<'_>,
    degree_text: Option<&str>,
    index: usize,
    warnings: &mut Warnings,
) -> Option<EducationLevel> {
    if let Some(explicit) = edu.text("level") {
        match EducationLevel::from_label(&explicit) {
            Some(level) => return Some(level),
            None => warnings.push(
                format!("education[{index}].level"),
                explicit,
                "unknown education level, inferring from degree",
            ),
        }
    }
    degree_text.and_then(infer_level)
}

fn map_certification(cert: &RawExtraction<'_>, index: usize, warnings: &mut Warnings) -> EducationEntry {
    let name = cert.text("name").unwrap_or_default();
    let institution = cert.first_text(&["institution", "organization", "issuer"]);

    let degree = match cert.text("issuer") {
        Some(issuer)
            if !mentions(institution.as_deref(), &issuer) && !mentions(Some(name.as_str()), &issuer) =>
        {
            if name.is_empty() {
                issuer
            } else {
                format!("{name} by {issuer}")
            }
        }
        _ => name,
    };

    let field = format!("certifications[{index}].year");
    let year = coerce_year(cert.text("year"), &field, warnings)
        .or_else(|| cert.text("date").as_deref().and_then(first_year).map(str::to_string));

    EducationEntry {
        level: Some(EducationLevel::Certificate),
        degree,
        institution,
        year,
    }
}

fn mentions(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
}

/// Reduces a year-ish value to four digits, warning when nothing usable is left.
fn coerce_year(value: Option<String>, field: &str, warnings: &mut Warnings) -> Option<String> {
    let value = value?;
    if is_year(&value) {
        return Some(value);
    }
    match first_year(&value) {
        Some(year) => Some(year.to_string()),
        None => {
            warnings.push(field, value, "expected a 4-digit year");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn reclassify(value: &Value) -> (Vec<EducationEntry>, usize) {
        let mut warnings = Warnings::default();
        let entries = reclassify_education(&RawExtraction::new(value), &mut warnings);
        (entries, warnings.into_vec().len())
    }

    #[test]
    fn test_infer_level_from_degree_keywords() {
        assert_eq!(infer_level("B.Tech in Computer Science"), Some(EducationLevel::Bachelor));
        assert_eq!(infer_level("Class 10 CBSE"), Some(EducationLevel::Tenth));
        assert_eq!(infer_level("SSLC"), Some(EducationLevel::Tenth));
        assert_eq!(infer_level("Higher Secondary (Science)"), Some(EducationLevel::Twelfth));
        assert_eq!(infer_level("PUC - PCMB"), Some(EducationLevel::Twelfth));
        assert_eq!(infer_level("Bachelor of Arts"), Some(EducationLevel::Bachelor));
        assert_eq!(infer_level("MBA, Finance"), Some(EducationLevel::Master));
        assert_eq!(infer_level("M.Sc Physics"), Some(EducationLevel::Master));
        assert_eq!(infer_level("Master of Science"), Some(EducationLevel::Master));
        assert_eq!(infer_level("Ph.D. in Chemistry"), Some(EducationLevel::Phd));
        assert_eq!(infer_level("Diploma in Mechanical Engineering"), Some(EducationLevel::Diploma));
        assert_eq!(infer_level("AWS Certified Developer"), Some(EducationLevel::Certificate));
    }

    #[test]
    fn test_infer_level_unrecognized_is_unset() {
        assert_eq!(infer_level("Underwater basket weaving"), None);
        assert_eq!(infer_level(""), None);
    }

    #[test]
    fn test_explicit_level_wins_over_degree() {
        let value = json!({"education": [{"level": "master", "degree": "B.Tech"}]});
        let (entries, _) = reclassify(&value);
        assert_eq!(entries[0].level, Some(EducationLevel::Master));
    }

    #[test]
    fn test_unknown_explicit_level_falls_back_with_warning() {
        let value = json!({"education": [{"level": "graduate-ish", "degree": "BSc Maths"}]});
        let (entries, warnings) = reclassify(&value);
        assert_eq!(entries[0].level, Some(EducationLevel::Bachelor));
        assert_eq!(warnings, 1);
    }

    #[test]
    fn test_degree_and_field_are_combined() {
        let value = json!({"education": [{
            "degree": "B.Tech",
            "field": "Computer Science",
            "university": "VIT",
            "college": "ignored",
            "year": "2019"
        }]});
        let (entries, _) = reclassify(&value);
        assert_eq!(
            entries[0],
            EducationEntry {
                level: Some(EducationLevel::Bachelor),
                degree: "B.Tech in Computer Science".to_string(),
                institution: Some("VIT".to_string()),
                year: Some("2019".to_string()),
            }
        );
    }

    #[test]
    fn test_major_used_when_degree_missing() {
        let value = json!({"education": [{"major": "Economics", "school": "LSE"}]});
        let (entries, _) = reclassify(&value);
        assert_eq!(entries[0].degree, "Economics");
        assert_eq!(entries[0].institution.as_deref(), Some("LSE"));
    }

    #[test]
    fn test_tenth_without_degree_gets_default_label() {
        let value = json!({"education": [{"level": "10th", "school": "KV"}]});
        let (entries, _) = reclassify(&value);
        assert_eq!(entries[0].degree, SECONDARY_DEFAULT_DEGREE);
    }

    #[test]
    fn test_year_priority_and_embedded_year() {
        let value = json!({"education": [
            {"degree": "BA", "endYear": "2016", "startYear": "2013"},
            {"degree": "MA", "year": "Class of 2018"},
            {"degree": "PhD", "graduationYear": 2023}
        ]});
        let (entries, _) = reclassify(&value);
        assert_eq!(entries[0].year.as_deref(), Some("2016"));
        assert_eq!(entries[1].year.as_deref(), Some("2018"));
        assert_eq!(entries[2].year.as_deref(), Some("2023"));
    }

    #[test]
    fn test_year_falls_back_to_last_run_in_any_property() {
        let value = json!({"education": [{
            "degree": "B.Com",
            "notes": "Completed in batch of 2018-2019"
        }]});
        let (entries, _) = reclassify(&value);
        assert_eq!(entries[0].year.as_deref(), Some("2019"));
    }

    #[test]
    fn test_unusable_year_warns_then_scans() {
        let value = json!({"education": [{"degree": "BSc", "year": "final", "duration": "2015 - 2018"}]});
        let (entries, warnings) = reclassify(&value);
        assert_eq!(entries[0].year.as_deref(), Some("2018"));
        assert_eq!(warnings, 1);
    }

    #[test]
    fn test_secondary_sections_and_ordering() {
        let value = json!({
            "certifications": [{"name": "CKA", "issuer": "CNCF", "date": "March 2022"}],
            "higherSecondaryEducation": {"institution": "DAV", "stream": "Science", "year": "2014"},
            "secondaryEducation": {"institution": "KV", "year": "2012"},
            "education": [{"degree": "B.E. Mechanical"}]
        });
        let (entries, _) = reclassify(&value);
        let levels: Vec<_> = entries.iter().map(|e| e.level).collect();
        assert_eq!(
            levels,
            vec![
                Some(EducationLevel::Bachelor),
                Some(EducationLevel::Tenth),
                Some(EducationLevel::Twelfth),
                Some(EducationLevel::Certificate),
            ]
        );
        assert_eq!(entries[1].degree, SECONDARY_DEFAULT_DEGREE);
        assert_eq!(entries[1].year.as_deref(), Some("2012"));
        assert_eq!(entries[2].degree, "Higher Secondary Certificate (Science)");
        assert_eq!(entries[2].institution.as_deref(), Some("DAV"));
    }

    #[test]
    fn test_certification_uses_issuer_as_institution() {
        let value = json!({"certifications": [{"name": "CKA", "issuer": "CNCF", "date": "March 2022"}]});
        let (entries, _) = reclassify(&value);
        assert_eq!(
            entries[0],
            EducationEntry {
                level: Some(EducationLevel::Certificate),
                degree: "CKA".to_string(),
                institution: Some("CNCF".to_string()),
                year: Some("2022".to_string()),
            }
        );
    }

    #[test]
    fn test_certification_issuer_suffix_when_institution_differs() {
        let value = json!({"certifications": [{
            "name": "Cloud Practitioner",
            "organization": "Coursera",
            "issuer": "AWS",
            "year": "2021"
        }]});
        let (entries, _) = reclassify(&value);
        assert_eq!(entries[0].degree, "Cloud Practitioner by AWS");
        assert_eq!(entries[0].institution.as_deref(), Some("Coursera"));
        assert_eq!(entries[0].year.as_deref(), Some("2021"));
    }

    #[test]
    fn test_certification_issuer_not_repeated_when_in_name() {
        let value = json!({"certifications": [{
            "name": "Oracle Certified Java Programmer",
            "organization": "Udemy",
            "issuer": "Oracle"
        }]});
        let (entries, _) = reclassify(&value);
        assert_eq!(entries[0].degree, "Oracle Certified Java Programmer");
        assert_eq!(entries[0].year, None);
    }

    #[test]
    fn test_certification_year_reduced_to_embedded_run() {
        let value = json!({"certifications": [
            {"name": "CKA", "year": "Spring 2021"},
            {"name": "PMP", "year": "2019-20", "date": "March 2022"},
            {"name": "ITIL", "year": "recently", "date": "Jan 2018"}
        ]});
        let (entries, warnings) = reclassify(&value);
        assert_eq!(entries[0].year.as_deref(), Some("2021"));
        assert_eq!(entries[1].year.as_deref(), Some("2019"));
        assert_eq!(entries[2].year.as_deref(), Some("2018"));
        assert_eq!(warnings, 1);
    }

    #[test]
    fn test_nothing_extracted_yields_empty_list() {
        let (entries, warnings) = reclassify(&json!({"education": "n/a"}));
        assert!(entries.is_empty());
        assert_eq!(warnings, 0);
    }
}
