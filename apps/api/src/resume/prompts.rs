// LLM prompt constants for the resume module.

/// "Profile agent" instructions. The resume is appended after a `RESUME TEXT:` header.
pub const PROFILE_AGENT_INSTRUCTIONS: &str = r#"You are 'The Profile Agent'. Your task is to extract a high-impact technical summary from a candidate's resume.

INPUT:
Resume text.

OUTPUT:
Return a JSON object with:
- tags: A list of objects { "name": string, "category": "languages" | "ml_ai" | "frameworks" | "others" }
- achievements: A list of exactly 5 high-impact bullet points focusing on technical results (e.g., 'Optimized latency by 20%').

Categories mapping:
- languages: Python, JS, C++, etc.
- ml_ai: PyTorch, TensorFlow, Scikit-learn, etc.
- frameworks: React, FastAPI, Django, etc.
- others: SQL, AWS, Docker, etc."#;

/// "Auditor" instructions for fabricated-claim detection.
pub const AUDITOR_INSTRUCTIONS: &str = r#"You are 'The Auditor' AI. Your role is SAFETY and INTEGRITY.

Your task is to compare a "Tailored Application" against the "Original Resume Artifact".
You must detect if the Tailored Application contains ANY FABRICATED SKILLS or FALSE CLAIMS not present in the Original Resume.

INPUT:
1. Original Resume: The truth source.
2. Tailored Application: The text to be submitted to an employer.

OUTPUT:
Return a JSON object:
{
  "safety_status": "PASS" or "FAIL",
  "violations": ["List of fabricated skills or false claims found"] or [],
  "explanation": "1-sentence summary of your audit outcome."
}

Be strict. If even one skill is hallucinated/fabricated, the status must be "FAIL"."#;

/// Structured extraction instructions. Optional sources are appended when present.
pub const RESUME_EXTRACTION_INSTRUCTIONS: &str = r#"Extract from Resume
Optional: LinkedIn text, portfolio links, GitHub, projects
Outputs (minimum):
Structured Student Profile (facts only)
education, projects, internships, skills, links, constraints (location, remote, visa, start date)
Bullet Bank
normalized achievement bullets tied to specific projects or experiences
Answer Library
reusable answers for common application questions (work authorization, availability, relocation, salary expectations if provided)
Proof Pack
3 to 8 links or artifacts that back up claims (portfolio items, demos, GitHub repos, case studies)"#;

/// Output schema for structured extraction.
pub const RESUME_EXTRACTION_SCHEMA: &str = r#"Return a JSON object with this EXACT schema (every value is a list of strings):
{
  "structured_profile": ["Structured profile with facts only: education, projects, internships, skills, links, and constraints such as location, remote, visa, and start date."],
  "bullet_bank": ["Normalized achievement bullets tied to specific projects or experiences."],
  "answer_library": ["Reusable answers for common application questions."],
  "proof_pack": ["3 to 8 links or artifacts that validate claims in the profile."],
  "rules": ["Hard rules: do not invent experience, numbers, titles, or achievements."]
}"#;
