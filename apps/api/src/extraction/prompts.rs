// Extraction prompt templates.
// `{source}` is replaced with "PDF", "image" or "text"; `{document_text}` with the
// embedded document body (empty when the document travels as an attachment).

/// Resume template. The JSON keys here are the ones the candidate mapper reads.
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Extract all information from this resume {source} and format it as JSON with the following structure:
{document_text}
{
  "name": "Full Name",
  "email": "email@example.com",
  "phone": "phone number",
  "dob": "Date of birth in YYYY-MM-DD format. Look for DOB, Date of Birth, Birth Date or 'born on'. Do not mistake graduation or job start dates for DOB. null if not found.",
  "location": {
    "city": "City name only, without house number, street or zip code",
    "state": "State or province name only",
    "country": "Country name only"
  },
  "contactDetails": {
    "address": "address if available",
    "linkedin": "linkedin url if available",
    "github": "github url if available"
  },
  "experience": [
    {
      "company": "Company Name",
      "position": "Job Title",
      "tenure": "Duration (e.g., Jan 2020 - Dec 2022)",
      "startMonth": "Start month (e.g., Jan)",
      "startYear": "Start year (e.g., 2020)",
      "endMonth": "End month, or 'Present' if current job",
      "endYear": "End year if available",
      "isCurrentJob": "true or false",
      "description": "Job description"
    }
  ],
  "skills": ["COMPREHENSIVE list of technical, professional, domain and soft skills, including skills clearly implied by the work experience"],
  "education": [
    {
      "level": "Exactly one of: '10th', '12th', 'diploma', 'bachelor', 'master', 'phd', 'certificate'",
      "institution": "School/University/College Name",
      "degree": "Degree or Program Name",
      "field": "Field of Study",
      "year": "Graduation/Passing year as a 4-digit number",
      "startYear": "Start year if available",
      "endYear": "End year if available"
    }
  ],
  "secondaryEducation": {
    "institution": "10th standard school name",
    "board": "Board name (CBSE, ICSE, State Board)",
    "year": "Year of passing 10th standard"
  },
  "higherSecondaryEducation": {
    "institution": "12th standard school/college name",
    "board": "Board name",
    "stream": "Stream (Science, Commerce, Arts)",
    "year": "Year of passing 12th standard"
  },
  "certifications": [
    {"name": "Certification Name", "issuer": "Issuing Organization", "date": "Date of Issue"}
  ],
  "summary": "A detailed summary of the resume including key achievements and career highlights."
}

Return only the JSON object, no additional text or formatting."#;

/// Job description template. The JSON keys here are the ones the job mapper reads.
pub const JOB_PROMPT_TEMPLATE: &str = r#"Extract all information from this job description {source} and format it as JSON with the following structure:
{document_text}
{
  "jobTitle": "Job Title/Position Name",
  "companyName": "Company Name if mentioned",
  "department": "Department if mentioned",
  "location": {
    "city": "City name if mentioned",
    "state": "State name if mentioned",
    "country": "Country name if mentioned",
    "isRemote": "true/false",
    "isHybrid": "true/false",
    "isOnsite": "true/false"
  },
  "jobType": "Full-time/Part-time/Contract/Internship/Temporary",
  "experienceLevel": "Entry Level/Mid Level/Senior Level/Executive",
  "experienceRequired": "Years of experience required (e.g., 2-5 years)",
  "salaryRange": {"min": "Minimum salary", "max": "Maximum salary", "currency": "USD, INR, ...", "period": "per year/per month/per hour"},
  "description": "Complete job description text",
  "responsibilities": ["Job responsibilities and duties"],
  "requirements": {
    "education": "Educational requirements",
    "skills": ["Required technical and soft skills, except those under 'Additional Skills'"],
    "experience": "Experience requirement details",
    "certifications": ["Required certifications"]
  },
  "preferredQualifications": ["Nice-to-have qualifications"],
  "benefits": ["Benefits offered"],
  "applicationDeadline": "YYYY-MM-DD if mentioned",
  "contactInfo": {"email": "Contact email", "phone": "Contact phone", "person": "Contact person"},
  "workSchedule": "Work schedule if mentioned",
  "travelRequirements": "Travel requirements if mentioned",
  "industryType": "Industry type/sector",
  "companySize": "Company size if mentioned",
  "jobCode": "Job code/reference number if mentioned",
  "summary": "Summary of the posting and the ideal candidate",
  "additionalSkills": ["ONLY skills listed under a heading called 'Additional Skills'; otherwise an empty array"]
}

IMPORTANT:
- Extract information exactly as written; do not guess salaries.
- Never copy key skills into 'additionalSkills' unless they sit under an 'Additional Skills' heading.
- Use null or an empty array for anything not mentioned.

Return only the JSON object, no additional text or formatting."#;

/// Fills a template for one document.
pub fn render(template: &str, source: &str, document_text: Option<&str>) -> String {
    let body = match document_text {
        Some(text) => format!("\nDocument content:\n{text}\n"),
        None => String::new(),
    };
    template
        .replace("{source}", source)
        .replace("{document_text}", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_embeds_text() {
        let prompt = render(RESUME_PROMPT_TEMPLATE, "text", Some("Asha Rao, Pune"));
        assert!(prompt.starts_with("Extract all information from this resume text"));
        assert!(prompt.contains("Document content:\nAsha Rao, Pune"));
        assert!(!prompt.contains("{document_text}"));
    }

    #[test]
    fn test_render_without_text_leaves_no_placeholder() {
        let prompt = render(JOB_PROMPT_TEMPLATE, "PDF", None);
        assert!(prompt.contains("job description PDF"));
        assert!(!prompt.contains("{source}"));
        assert!(!prompt.contains("Document content"));
    }
}
