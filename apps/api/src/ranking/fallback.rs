//! Keyword fallback scorer, used whenever the model ranking call fails.
//!
//! Pure-Rust, deterministic, no I/O. Same inputs always produce the same output.
//!
//! Algorithm:
//! 1. Active keywords = vocabulary terms that occur in the lower-cased resume.
//! 2. Per job: +title_points per active keyword in the title,
//!    +requirements_points per active keyword in the requirements.
//! 3. + (job id mod id_offset_modulus) to spread otherwise-equal jobs.
//! 4. Clamp to `ceiling`; unmatched jobs are floored at `floor`.
//! 5. Sort descending (stable), keep the first `limit`.

use serde::{Deserialize, Serialize};

use crate::models::job::JobPosting;
use crate::ranking::{MatchResult, MAX_RANKED_JOBS};

/// Terms a resume is checked for. Matching is plain substring containment.
pub const KEYWORD_VOCABULARY: &[&str] = &[
    "python",
    "javascript",
    "react",
    "fastapi",
    "sql",
    "aws",
    "docker",
    "data science",
    "machine learning",
    "backend",
    "frontend",
    "devops",
    "product manager",
    "analyst",
    "engineer",
    "java",
    "c++",
    "go",
];

const MATCHED_REASONING_KEYWORDS: usize = 2;
const UNMATCHED_REASONING: &str =
    "Potential match based on general professional alignment and experience.";
const BROAD_GAP_SKILLS: &[&str] = &["Advanced System Design", "Cloud Architecture"];
const NICHE_GAP_SKILLS: &[&str] = &["Niche Industry Knowledge"];

/// Tuning constants for the keyword scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackWeights {
    pub title_points: i64,
    pub requirements_points: i64,
    pub id_offset_modulus: i64,
    /// Highest score the fallback may assign; 100 is left to the model.
    pub ceiling: i64,
    /// Score given to jobs with no keyword overlap.
    pub floor: i64,
    /// Below this score the broad-gap skill list is suggested.
    pub gap_threshold: i64,
    pub limit: usize,
}

impl Default for FallbackWeights {
    fn default() -> Self {
        Self {
            title_points: 20,
            requirements_points: 15,
            id_offset_modulus: 20,
            ceiling: 98,
            floor: 30,
            gap_threshold: 70,
            limit: MAX_RANKED_JOBS,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeywordScorer {
    weights: FallbackWeights,
}

impl KeywordScorer {
    pub fn new(weights: FallbackWeights) -> Self {
        Self { weights }
    }

    /// Scores every job against the resume and returns the top `limit`, best first.
    pub fn score(&self, resume_text: &str, jobs: &[JobPosting]) -> Vec<MatchResult> {
        let active = active_keywords(resume_text);

        let mut results: Vec<MatchResult> = jobs
            .iter()
            .map(|job| self.score_job(&active, job))
            .collect();

        // sort_by is stable: equal scores keep corpus order
        results.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        results.truncate(self.weights.limit);
        results
    }

    fn score_job(&self, active: &[&'static str], job: &JobPosting) -> MatchResult {
        let w = &self.weights;
        let title = job.title.to_lowercase();
        let requirements = job.requirements.to_lowercase();

        let mut score = 0_i64;
        let mut matched: Vec<&str> = Vec::new();

        for kw in active {
            if title.contains(kw) {
                score += w.title_points;
                matched.push(kw);
            }
        }
        for kw in active {
            if requirements.contains(kw) {
                score += w.requirements_points;
                if !matched.contains(kw) {
                    matched.push(kw);
                }
            }
        }

        if w.id_offset_modulus > 0 {
            score += job.id.rem_euclid(w.id_offset_modulus);
        }
        score = score.min(w.ceiling);

        let reasoning = if matched.is_empty() {
            score = score.max(w.floor);
            UNMATCHED_REASONING.to_string()
        } else {
            let named: Vec<&str> = matched
                .iter()
                .take(MATCHED_REASONING_KEYWORDS)
                .copied()
                .collect();
            format!(
                "Matched based on shared interest in {} and technical similarity.",
                named.join(", ")
            )
        };

        let focus = matched.first().copied().unwrap_or("skills");
        let interview_questions = vec![
            format!("How would you apply your {focus} to this role?"),
            "Can you describe a complex technical problem you solved recently?".to_string(),
            format!("What interests you most about joining {}?", job.company),
        ];

        let missing = if score < w.gap_threshold {
            BROAD_GAP_SKILLS
        } else {
            NICHE_GAP_SKILLS
        };

        MatchResult {
            id: job.id,
            match_score: Some(score),
            reasoning: Some(reasoning),
            interview_questions,
            missing_skills: missing.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Vocabulary terms present in the resume, in vocabulary order.
pub fn active_keywords(resume_text: &str) -> Vec<&'static str> {
    let resume = resume_text.to_lowercase();
    KEYWORD_VOCABULARY
        .iter()
        .copied()
        .filter(|kw| resume.contains(kw))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: i64, title: &str, requirements: &str) -> JobPosting {
        JobPosting {
            id,
            title: title.to_string(),
            company: "TechGiant".to_string(),
            description: "Build the next generation of our platform.".to_string(),
            requirements: requirements.to_string(),
        }
    }

    fn corpus(n: i64) -> Vec<JobPosting> {
        let titles = [
            "Python Backend Engineer",
            "Frontend Developer",
            "Data Scientist",
            "Product Manager",
            "DevOps Engineer",
        ];
        let reqs = [
            "SQL, Docker",
            "Proficiency in Python or JavaScript.",
            "Experience with AWS.",
            "Excellent communication skills.",
        ];
        (1..=n)
            .map(|i| job(i, titles[i as usize % titles.len()], reqs[i as usize % reqs.len()]))
            .collect()
    }

    #[test]
    fn test_title_match_plus_id_offset() {
        let scorer = KeywordScorer::default();
        let jobs = vec![job(5, "Python Backend Engineer", "SQL, Docker")];

        let results = scorer.score("I write python services and react UIs", &jobs);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 5);
        // 20 (python in title) + 5 % 20
        assert_eq!(results[0].match_score, Some(25));
        assert!(results[0].reasoning.as_deref().unwrap().contains("python"));
    }

    #[test]
    fn test_title_and_requirements_both_count() {
        let scorer = KeywordScorer::default();
        let jobs = vec![job(20, "Python Developer", "Python and SQL")];

        let results = scorer.score("python, sql", &jobs);

        // python: 20 + 15, sql: 15, offset 0
        assert_eq!(results[0].match_score, Some(50));
        assert_eq!(
            results[0].reasoning.as_deref(),
            Some("Matched based on shared interest in python, sql and technical similarity.")
        );
    }

    #[test]
    fn test_reasoning_names_at_most_two_keywords() {
        let scorer = KeywordScorer::default();
        let jobs = vec![job(1, "Python React Docker role", "")];

        let results = scorer.score("python react docker", &jobs);
        let reasoning = results[0].reasoning.clone().unwrap();

        assert!(reasoning.contains("python, react"));
        assert!(!reasoning.contains("docker"));
    }

    #[test]
    fn test_unmatched_job_gets_floor_and_generic_reasoning() {
        let scorer = KeywordScorer::default();
        let jobs = vec![job(3, "Chef", "Knife skills")];

        let results = scorer.score("python", &jobs);

        assert_eq!(results[0].match_score, Some(30));
        assert_eq!(results[0].reasoning.as_deref(), Some(UNMATCHED_REASONING));
        assert_eq!(
            results[0].interview_questions[0],
            "How would you apply your skills to this role?"
        );
        assert_eq!(
            results[0].missing_skills,
            vec!["Advanced System Design", "Cloud Architecture"]
        );
    }

    #[test]
    fn test_score_clamped_to_ceiling() {
        let scorer = KeywordScorer::default();
        let jobs = vec![job(
            19,
            "Python JavaScript React Backend Frontend Engineer",
            "python javascript react sql aws docker",
        )];

        let resume = "python javascript react sql aws docker backend frontend engineer";
        let results = scorer.score(resume, &jobs);

        assert_eq!(results[0].match_score, Some(98));
        assert_eq!(results[0].missing_skills, vec!["Niche Industry Knowledge"]);
    }

    #[test]
    fn test_output_sorted_descending_and_truncated() {
        let scorer = KeywordScorer::default();
        let jobs = corpus(75);

        let results = scorer.score("Python engineer with SQL, Docker and AWS", &jobs);

        assert_eq!(results.len(), MAX_RANKED_JOBS);
        assert!(results
            .windows(2)
            .all(|w| w[0].match_score >= w[1].match_score));
    }

    #[test]
    fn test_scores_always_within_bounds() {
        let scorer = KeywordScorer::default();
        let mut jobs = corpus(60);
        jobs.push(job(-7, "Go Engineer", "go go go"));

        for resume in ["", "python sql docker aws react go java c++", "analyst"] {
            for result in scorer.score(resume, &jobs) {
                let score = result.match_score.unwrap();
                assert!((0..=98).contains(&score), "score {score} out of range");
            }
        }
    }

    #[test]
    fn test_negative_id_offset_is_non_negative() {
        let scorer = KeywordScorer::default();
        let results = scorer.score("go", &[job(-7, "Go Engineer", "")]);
        // "go" in title (20) + (-7 rem_euclid 20 = 13)
        assert_eq!(results[0].match_score, Some(33));
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let scorer = KeywordScorer::default();
        let jobs = corpus(40);
        let resume = "Backend engineer: Python, FastAPI, SQL, Docker";

        assert_eq!(scorer.score(resume, &jobs), scorer.score(resume, &jobs));
    }

    #[test]
    fn test_company_named_in_last_question() {
        let scorer = KeywordScorer::default();
        let results = scorer.score("python", &[job(1, "Python Dev", "")]);
        assert_eq!(
            results[0].interview_questions[2],
            "What interests you most about joining TechGiant?"
        );
    }

    #[test]
    fn test_custom_weights_are_honoured() {
        let scorer = KeywordScorer::new(FallbackWeights {
            title_points: 50,
            id_offset_modulus: 0,
            limit: 1,
            ..FallbackWeights::default()
        });
        let jobs = vec![job(1, "Python Dev", ""), job(2, "Chef", "")];

        let results = scorer.score("python", &jobs);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_score, Some(50));
    }

    #[test]
    fn test_active_keywords_are_case_insensitive() {
        assert_eq!(active_keywords("PYTHON and Docker"), vec!["python", "docker"]);
        assert!(active_keywords("").is_empty());
    }

    #[test]
    fn test_empty_corpus_yields_empty_ranking() {
        assert!(KeywordScorer::default().score("python", &[]).is_empty());
    }
}
