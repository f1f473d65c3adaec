// Profile extraction prompt templates.

/// System prompt for profile extraction. Replace `{json_only}` before sending.
pub const PROFILE_EXTRACT_SYSTEM_TEMPLATE: &str = r#"You are a data extraction assistant. Extract LinkedIn profile information from the provided document text and return it as valid JSON only.

Return a JSON object with EXACTLY these fields:
{
  "name": "Full name of the person",
  "headline": "Their professional headline/title",
  "about": "Their summary/about section (first 300 chars)",
  "linkedinUrl": "Their LinkedIn URL if found (format: https://linkedin.com/in/username)",
  "experience": ["Job 1 title at Company", "Job 2 title at Company", "Job 3 title at Company"],
  "education": ["Degree at School", "Degree at School"],
  "skills": ["Skill 1", "Skill 2", "Skill 3", "Skill 4", "Skill 5"]
}

RULES:
1. "name" is the person's actual full name (like "John Smith"), NOT a section header like "Contact", "Summary", "Top Skills" or "Experience"
2. Section titles often appear before the name in extracted text; skip them and find the person
3. LinkedIn URL format is https://linkedin.com/in/username; omit the field if none is present
4. Use an empty string or empty array when a section is missing
5. {json_only}"#;

/// User prompt for profile extraction. Replace `{document_text}` before sending.
pub const PROFILE_EXTRACT_PROMPT_TEMPLATE: &str =
    "Extract the LinkedIn profile data from this document text:\n\n{document_text}";
