//! Field schemas for the job and candidate forms.
//!
//! Clients render one form per `FormKind` from these tables instead of keeping
//! hand-written copies of the field list in every dialog. The same tables drive
//! the `missing_required` report attached to extraction results.

use serde::{Deserialize, Serialize};

use crate::models::candidate::CanonicalCandidateProfile;
use crate::models::job::CanonicalJobPosting;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    LongText,
    Email,
    Date,
    Tags,
    Toggle,
    List,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind, required: bool) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        required,
    }
}

pub const JOB_FORM: &[FieldSpec] = &[
    field("title", "Job Title", FieldKind::Text, true),
    field("company", "Company", FieldKind::Text, false),
    field("department", "Department", FieldKind::Text, false),
    field("industry", "Industry Type", FieldKind::Text, false),
    field("city", "City", FieldKind::Text, true),
    field("state", "State", FieldKind::Text, true),
    field("country", "Country", FieldKind::Text, true),
    field("remote", "Remote", FieldKind::Toggle, false),
    field("hybrid", "Hybrid", FieldKind::Toggle, false),
    field("onsite", "Onsite", FieldKind::Toggle, false),
    field("job_type", "Job Type", FieldKind::Text, false),
    field("experience_level", "Experience Level", FieldKind::Text, false),
    field("experience_required", "Experience Required", FieldKind::Text, true),
    field("education_requirement", "Education", FieldKind::Text, true),
    field("salary", "Salary Per Annum", FieldKind::Text, true),
    field("description", "Job Description", FieldKind::LongText, true),
    field("responsibilities", "Responsibilities", FieldKind::List, false),
    field("required_skills", "Key Skills", FieldKind::Tags, true),
    field("additional_skills", "Additional Skills", FieldKind::Tags, false),
    field("preferred_qualifications", "Preferred Qualifications", FieldKind::List, false),
    field("benefits", "Benefits", FieldKind::List, false),
    field("application_deadline", "Application Deadline", FieldKind::Date, false),
];

pub const CANDIDATE_FORM: &[FieldSpec] = &[
    field("first_name", "First Name", FieldKind::Text, true),
    field("middle_name", "Middle Name", FieldKind::Text, false),
    field("last_name", "Last Name", FieldKind::Text, true),
    field("email", "Email", FieldKind::Email, true),
    field("phone", "Phone", FieldKind::Text, true),
    field("date_of_birth", "Date of Birth", FieldKind::Date, true),
    field("linkedin", "LinkedIn", FieldKind::Text, false),
    field("github", "GitHub", FieldKind::Text, false),
    field("city", "City", FieldKind::Text, true),
    field("state", "State", FieldKind::Text, true),
    field("country", "Country", FieldKind::Text, true),
    field("skills", "Skills", FieldKind::Tags, true),
    field("experience", "Experience", FieldKind::List, false),
    field("education", "Education", FieldKind::List, false),
    field("summary", "Summary", FieldKind::LongText, false),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Job,
    Candidate,
}

impl FormKind {
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            FormKind::Job => JOB_FORM,
            FormKind::Candidate => CANDIDATE_FORM,
        }
    }
}

/// A record that can be checked against a form schema.
pub trait FormRecord {
    const FORM: FormKind;

    /// Whether the named schema field holds a usable value.
    fn has_value(&self, field: &str) -> bool;
}

/// Names of required fields the record leaves empty, in schema order.
pub fn missing_required<R: FormRecord>(record: &R) -> Vec<String> {
    R::FORM
        .fields()
        .iter()
        .filter(|spec| spec.required && !record.has_value(spec.name))
        .map(|spec| spec.name.to_string())
        .collect()
}

fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

impl FormRecord for CanonicalJobPosting {
    const FORM: FormKind = FormKind::Job;

    fn has_value(&self, field: &str) -> bool {
        match field {
            "title" => filled(&self.title),
            "company" => filled(&self.company),
            "department" => filled(&self.department),
            "industry" => filled(&self.industry),
            "city" => filled(&self.location.city),
            "state" => filled(&self.location.state),
            "country" => filled(&self.location.country),
            "remote" | "hybrid" | "onsite" => true,
            "job_type" => filled(&self.job_type),
            "experience_level" => filled(&self.experience_level),
            "experience_required" => filled(&self.experience_required),
            "education_requirement" => filled(&self.education_requirement),
            "salary" => self.salary.display().is_some(),
            "description" => filled(&self.description),
            "responsibilities" => !self.responsibilities.is_empty(),
            "required_skills" => !self.required_skills.is_empty(),
            "additional_skills" => !self.additional_skills.is_empty(),
            "preferred_qualifications" => !self.preferred_qualifications.is_empty(),
            "benefits" => !self.benefits.is_empty(),
            "application_deadline" => self.application_deadline.is_some(),
            _ => false,
        }
    }
}

impl FormRecord for CanonicalCandidateProfile {
    const FORM: FormKind = FormKind::Candidate;

    fn has_value(&self, field: &str) -> bool {
        match field {
            "first_name" => filled(&self.first_name),
            "middle_name" => filled(&self.middle_name),
            "last_name" => filled(&self.last_name),
            "email" => filled(&self.email),
            "phone" => filled(&self.phone),
            "date_of_birth" => self.date_of_birth.is_some(),
            "linkedin" => filled(&self.linkedin),
            "github" => filled(&self.github),
            "city" => filled(&self.city),
            "state" => filled(&self.state),
            "country" => filled(&self.country),
            "skills" => !self.skills.is_empty(),
            "experience" => !self.experience.is_empty(),
            "education" => !self.education.is_empty(),
            "summary" => filled(&self.summary),
            _ => false,
        }
    }
}
