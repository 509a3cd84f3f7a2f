use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calendar month as it appears on the candidate form (three-letter label).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    pub fn abbrev(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

/// Closed set of education levels offered by the candidate form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "10th")]
    Tenth,
    #[serde(rename = "12th")]
    Twelfth,
    #[serde(rename = "diploma")]
    Diploma,
    #[serde(rename = "bachelor")]
    Bachelor,
    #[serde(rename = "master")]
    Master,
    #[serde(rename = "phd")]
    Phd,
    #[serde(rename = "certificate")]
    Certificate,
}

impl EducationLevel {
    /// Parses an explicit level label. Accepts the canonical labels and a few
    /// spellings the AI tends to produce ("Bachelor's", "PhD", "10").
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label
            .trim()
            .to_lowercase()
            .replace(['\'', '’'], "")
            .trim_end_matches('s')
            .to_string();
        match normalized.as_str() {
            "10th" | "10" | "x" | "ssc" | "sslc" | "secondary" => Some(EducationLevel::Tenth),
            "12th" | "12" | "xii" | "hsc" | "puc" | "higher secondary" => {
                Some(EducationLevel::Twelfth)
            }
            "diploma" => Some(EducationLevel::Diploma),
            "bachelor" | "ug" | "undergraduate" => Some(EducationLevel::Bachelor),
            "master" | "pg" | "postgraduate" => Some(EducationLevel::Master),
            "phd" | "ph.d" | "ph.d." | "doctorate" => Some(EducationLevel::Phd),
            "certificate" | "certification" => Some(EducationLevel::Certificate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub employer: String,
    pub position: Option<String>,
    pub start_month: Option<Month>,
    pub start_year: Option<String>,
    pub end_month: Option<Month>,
    pub end_year: Option<String>,
    /// Still employed here. When set, `end_month` and `end_year` are always empty.
    pub present: bool,
    pub responsibilities: Option<String>,
}

impl ExperienceEntry {
    /// Marks the entry as current and clears the end date.
    pub fn mark_present(&mut self) {
        self.present = true;
        self.end_month = None;
        self.end_year = None;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub level: Option<EducationLevel>,
    pub degree: String,
    pub institution: Option<String>,
    pub year: Option<String>,
}

/// Normalized candidate record produced from an uploaded resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalCandidateProfile {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub summary: Option<String>,
}
