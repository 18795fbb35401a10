use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

pub fn skill_extraction_system() -> String {
    format!(
        "{JSON_ONLY_SYSTEM} You are an expert resume analyzer. \
         Extract technical skills: programming languages, frameworks, databases, tools and platforms."
    )
}

pub const SKILL_EXTRACTION_PROMPT_TEMPLATE: &str = r#"Extract the technical skills from the resume below.

Return a JSON object of exactly this shape:
{"skills": ["Python", "JavaScript", "React", "SQL", "Docker"]}

Use the common name of each skill. Do not include soft skills, job titles or company names.

RESUME:
{resume_text}"#;
