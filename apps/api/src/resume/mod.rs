// Resume intelligence: profile artifact extraction, structured resume parsing,
// and the tailored-application audit. All LLM calls go through llm_client.

pub mod artifact;
pub mod audit;
pub mod handlers;
pub mod parser;
pub mod prompts;
