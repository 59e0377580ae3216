// Resume enrichment prompt template.
// `{raw_text}` is replaced verbatim with the text extracted from the PDF.

pub const RESUME_EXTRACT_PROMPT: &str = r#"Extract information from the following resume text and return ONLY a JSON object.
Do not add any prose, markdown formatting, or code fences. The response must be a single valid JSON object that can be parsed as-is.

RESUME TEXT:
"{raw_text}"

OUTPUT SCHEMA (return exactly this structure, filled in from the resume):
{
  "name": "",
  "email": "",
  "education": {
    "degree": "",
    "branch": "",
    "institution": "",
    "year": null
  },
  "experience": {
    "job_title": "",
    "company": ""
  },
  "skills": [],
  "summary": ""
}"#;

pub fn build_resume_prompt(raw_text: &str) -> String {
    RESUME_EXTRACT_PROMPT.replace("{raw_text}", raw_text)
}
