use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobLocation {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub remote: bool,
    pub hybrid: bool,
    pub onsite: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryRange {
    pub min: Option<String>,
    pub max: Option<String>,
    pub currency: Option<String>,
    pub period: Option<String>,
}

impl SalaryRange {
    /// Renders the range the way the job form displays it, e.g. `"5 - 8 LPA INR"`.
    /// Returns `None` unless both bounds are known. Currency defaults to INR.
    pub fn display(&self) -> Option<String> {
        let (min, max) = (self.min.as_deref()?, self.max.as_deref()?);
        let currency = self.currency.as_deref().unwrap_or("INR");
        Some(format!("{min} - {max} {currency}"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub person: Option<String>,
}

/// Normalized job record produced from an uploaded job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalJobPosting {
    pub title: Option<String>,
    pub company: Option<String>,
    pub department: Option<String>,
    pub industry: Option<String>,
    pub location: JobLocation,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub experience_required: Option<String>,
    pub salary: SalaryRange,
    pub description: Option<String>,
    pub responsibilities: Vec<String>,
    pub required_skills: Vec<String>,
    /// Only skills listed under an explicit "Additional Skills" heading.
    pub additional_skills: Vec<String>,
    pub education_requirement: Option<String>,
    pub certifications: Vec<String>,
    pub preferred_qualifications: Vec<String>,
    pub benefits: Vec<String>,
    pub application_deadline: Option<NaiveDate>,
    pub contact: ContactInfo,
    pub work_schedule: Option<String>,
    pub travel_requirements: Option<String>,
    pub company_size: Option<String>,
    pub job_code: Option<String>,
    pub summary: Option<String>,
}
