//! Profile artifact: technology tags and headline achievements for a candidate card.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::prompts::{assemble, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{generate_json, GenerativeModel};
use crate::resume::prompts::PROFILE_AGENT_INSTRUCTIONS;

pub const ACHIEVEMENT_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagCategory {
    Languages,
    MlAi,
    Frameworks,
    #[serde(other)]
    Others,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillTag {
    pub name: String,
    pub category: TagCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileArtifact {
    pub tags: Vec<SkillTag>,
    pub achievements: Vec<String>,
}

impl ProfileArtifact {
    /// Shown when the model is unavailable.
    pub fn fallback() -> Self {
        let tag = |name: &str, category| SkillTag {
            name: name.to_string(),
            category,
        };
        Self {
            tags: vec![
                tag("Python", TagCategory::Languages),
                tag("React", TagCategory::Frameworks),
                tag("ML/AI", TagCategory::MlAi),
            ],
            achievements: [
                "Built and deployed scalable applications using modern stacks.",
                "Optimized system performance and user experience.",
                "Demonstrated strong problem-solving in technical challenges.",
                "Collaborated on diverse software development projects.",
                "Maintained high code quality and best practices.",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

pub fn build_artifact_prompt(resume_text: &str) -> String {
    assemble(&[
        PROFILE_AGENT_INSTRUCTIONS,
        JSON_ONLY_INSTRUCTION,
        &format!("RESUME TEXT:\n{resume_text}"),
    ])
}

/// Extracts the profile artifact. Never fails: model errors yield `ProfileArtifact::fallback()`.
pub async fn generate_profile_artifact(
    model: &dyn GenerativeModel,
    resume_text: &str,
) -> ProfileArtifact {
    let prompt = build_artifact_prompt(resume_text);
    match generate_json::<ProfileArtifact>(model, &prompt).await {
        Ok(mut artifact) => {
            fit_achievements(&mut artifact.achievements);
            artifact
        }
        Err(e) => {
            warn!("Profile agent failed: {e}. Using fallback artifact.");
            ProfileArtifact::fallback()
        }
    }
}

/// Exactly `ACHIEVEMENT_COUNT` entries: blank ones dropped, extras cut, gaps filled
/// from the fallback list (skipping lines already present).
fn fit_achievements(achievements: &mut Vec<String>) {
    achievements.retain(|a| !a.trim().is_empty());
    achievements.truncate(ACHIEVEMENT_COUNT);

    for filler in ProfileArtifact::fallback().achievements {
        if achievements.len() == ACHIEVEMENT_COUNT {
            break;
        }
        if !achievements.contains(&filler) {
            achievements.push(filler);
        }
    }
}
