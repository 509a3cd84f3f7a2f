//! Maps a raw job-description extraction onto a job posting.
//!
//! Same fallback rule as the candidate mapper: extracted values only ever
//! replace prior values, never blank them.

use chrono::NaiveDate;
use serde_json::Value;

use crate::extraction::error::Warnings;
use crate::extraction::raw::RawExtraction;
use crate::extraction::{fill, replace_list, Mapped};
use crate::models::job::CanonicalJobPosting;

pub fn map_job(prior: CanonicalJobPosting, extracted: &Value) -> Mapped<CanonicalJobPosting> {
    let raw = RawExtraction::new(extracted);
    let mut warnings = Warnings::default();
    let mut job = prior;

    fill(&mut job.title, raw.first_text(&["jobTitle", "title"]));
    fill(&mut job.company, raw.first_text(&["companyName", "company"]));
    fill(&mut job.department, raw.text("department"));
    fill(&mut job.industry, raw.first_text(&["industryType", "industry"]));
    fill(&mut job.job_type, raw.text("jobType"));
    fill(&mut job.experience_level, raw.text("experienceLevel"));
    fill(&mut job.experience_required, raw.text("experienceRequired"));
    fill(&mut job.description, raw.text("description"));
    fill(&mut job.work_schedule, raw.text("workSchedule"));
    fill(&mut job.travel_requirements, raw.text("travelRequirements"));
    fill(&mut job.company_size, raw.text("companySize"));
    fill(&mut job.job_code, raw.text("jobCode"));
    fill(&mut job.summary, raw.text("summary"));

    if let Some(location) = raw.object("location") {
        fill(&mut job.location.city, location.text("city"));
        fill(&mut job.location.state, location.text("state"));
        fill(&mut job.location.country, location.text("country"));
        for (key, dest) in [
            ("isRemote", &mut job.location.remote),
            ("isHybrid", &mut job.location.hybrid),
            ("isOnsite", &mut job.location.onsite),
        ] {
            if let Some(flag) = location.flag(key) {
                *dest = flag;
            }
        }
    }

    if let Some(salary) = raw.object("salaryRange") {
        fill(&mut job.salary.min, salary.text("min"));
        fill(&mut job.salary.max, salary.text("max"));
        fill(&mut job.salary.currency, salary.text("currency"));
        fill(&mut job.salary.period, salary.text("period"));
    }

    if let Some(contact) = raw.object("contactInfo") {
        fill(&mut job.contact.email, contact.text("email"));
        fill(&mut job.contact.phone, contact.text("phone"));
        fill(&mut job.contact.person, contact.text("person"));
    }

    let requirements = raw.object("requirements");
    if let Some(req) = &requirements {
        fill(&mut job.education_requirement, req.text("education"));
        replace_list(&mut job.certifications, req.text_list("certifications"));
    }
    let required_skills = requirements
        .as_ref()
        .map(|req| req.text_list("skills"))
        .unwrap_or_default();
    replace_list(&mut job.required_skills, required_skills);

    // The model sometimes echoes key skills here; only keep genuinely extra ones.
    let additional: Vec<String> = raw
        .text_list("additionalSkills")
        .into_iter()
        .filter(|s| !job.required_skills.iter().any(|r| r.eq_ignore_ascii_case(s)))
        .collect();
    replace_list(&mut job.additional_skills, additional);

    replace_list(&mut job.responsibilities, raw.text_list("responsibilities"));
    replace_list(&mut job.preferred_qualifications, raw.text_list("preferredQualifications"));
    replace_list(&mut job.benefits, raw.text_list("benefits"));

    if let Some(deadline) = raw.text("applicationDeadline") {
        match NaiveDate::parse_from_str(&deadline, "%Y-%m-%d") {
            Ok(date) => job.application_deadline = Some(date),
            Err(_) => warnings.push("application_deadline", deadline, "expected YYYY-MM-DD"),
        }
    }

    Mapped {
        value: job,
        warnings: warnings.into_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::{JobLocation, SalaryRange};
    use serde_json::json;

    fn populated_job() -> CanonicalJobPosting {
        CanonicalJobPosting {
            title: Some("Data Engineer".into()),
            company: Some("Acme".into()),
            location: JobLocation {
                city: Some("Hyderabad".into()),
                country: Some("India".into()),
                hybrid: true,
                ..Default::default()
            },
            salary: SalaryRange {
                min: Some("12".into()),
                max: Some("18".into()),
                currency: Some("INR".into()),
                period: Some("per year".into()),
            },
            required_skills: vec!["Spark".into()],
            benefits: vec!["Health insurance".into()],
            application_deadline: NaiveDate::from_ymd_opt(2026, 12, 1),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_extraction_leaves_job_unchanged() {
        let prior = populated_job();
        let before = serde_json::to_vec(&prior).unwrap();
        let extracted = json!({
            "jobTitle": "", "companyName": null,
            "location": {"city": "", "isRemote": null},
            "salaryRange": {"min": "", "max": null},
            "requirements": {"skills": [], "education": ""},
            "additionalSkills": [], "benefits": [], "applicationDeadline": ""
        });
        let mapped = map_job(prior, &extracted);
        assert_eq!(serde_json::to_vec(&mapped.value).unwrap(), before);
        assert!(mapped.warnings.is_empty());
    }

    #[test]
    fn test_full_extraction_maps_fields() {
        let extracted = json!({
            "jobTitle": "Senior Rust Engineer",
            "companyName": "Ferrous Ltd",
            "department": "Platform",
            "industryType": "Fintech",
            "location": {"city": "Remote", "country": "India", "isRemote": "true", "isOnsite": false},
            "jobType": "Full-time",
            "experienceLevel": "Senior Level",
            "experienceRequired": "5+ years",
            "salaryRange": {"min": 3000000, "max": "4500000", "currency": "INR", "period": "per year"},
            "description": "Own the ledger service.",
            "responsibilities": ["Design services", "Mentor engineers"],
            "requirements": {
                "education": "B.E./B.Tech",
                "skills": ["Rust", "Tokio", "PostgreSQL"],
                "certifications": ["None required"]
            },
            "preferredQualifications": ["Kafka"],
            "benefits": ["ESOPs"],
            "applicationDeadline": "2026-11-30",
            "contactInfo": {"email": "hr@ferrous.dev", "person": "Meera"},
            "summary": "Rust role",
            "additionalSkills": ["Terraform", "rust"]
        });

        let mapped = map_job(CanonicalJobPosting::default(), &extracted);
        let job = mapped.value;
        assert_eq!(job.title.as_deref(), Some("Senior Rust Engineer"));
        assert_eq!(job.industry.as_deref(), Some("Fintech"));
        assert!(job.location.remote);
        assert!(!job.location.onsite);
        assert!(!job.location.hybrid);
        assert_eq!(job.salary.min.as_deref(), Some("3000000"));
        assert_eq!(job.salary.display().as_deref(), Some("3000000 - 4500000 INR"));
        assert_eq!(job.required_skills, vec!["Rust", "Tokio", "PostgreSQL"]);
        assert_eq!(job.additional_skills, vec!["Terraform"]);
        assert_eq!(job.education_requirement.as_deref(), Some("B.E./B.Tech"));
        assert_eq!(job.application_deadline, NaiveDate::from_ymd_opt(2026, 11, 30));
        assert_eq!(job.contact.person.as_deref(), Some("Meera"));
        assert_eq!(job.contact.phone, None);
        assert_eq!(job.responsibilities.len(), 2);
        assert!(mapped.warnings.is_empty());
    }

    #[test]
    fn test_additional_skills_empty_without_section() {
        let extracted = json!({"requirements": {"skills": ["Excel"]}});
        let mapped = map_job(CanonicalJobPosting::default(), &extracted);
        assert!(mapped.value.additional_skills.is_empty());
    }

    #[test]
    fn test_bad_deadline_keeps_prior() {
        let prior = populated_job();
        let mapped = map_job(prior.clone(), &json!({"applicationDeadline": "end of month"}));
        assert_eq!(mapped.value.application_deadline, prior.application_deadline);
        assert_eq!(mapped.warnings[0].field, "application_deadline");
    }
}
