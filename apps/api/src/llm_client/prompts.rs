// Shared prompt fragments and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// Instruction appended to every prompt whose reply is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "Return ONLY the JSON. \
    Do NOT include any text outside the JSON. \
    Do NOT include explanations or apologies.";

/// Joins prompt sections with blank lines, skipping empty ones.
pub fn assemble(sections: &[&str]) -> String {
    sections
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
