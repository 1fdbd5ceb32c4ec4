//! Demo corpus for empty databases (enabled with `SEED_JOBS=true`).

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::jobs::store::count_jobs;
use crate::models::job::NewJob;

pub const SEED_JOB_COUNT: usize = 100;

const COMPANIES: &[&str] = &[
    "TechGiant",
    "DataFlow",
    "CloudNine",
    "InnovateSoft",
    "ByteMe",
    "CyberPulse",
    "LogicGate",
    "NebulaSystems",
    "PixelPerfect",
    "QuantEdge",
    "SilverLinings",
    "Terraformers",
    "VectorLabs",
    "WaveLength",
    "ZenithTech",
];

const DEPARTMENTS: &[(&str, &[&str])] = &[
    (
        "Software Engineering",
        &[
            "Full Stack Developer",
            "Backend Engineer",
            "Frontend Developer",
            "Site Reliability Engineer",
            "DevOps Engineer",
            "Mobile Developer (iOS/Android)",
            "Embedded Systems Engineer",
            "Quality Assurance Engineer",
            "Security Engineer",
        ],
    ),
    (
        "Data Science",
        &[
            "Data Scientist",
            "Machine Learning Engineer",
            "Data Engineer",
            "Business Intelligence Analyst",
            "AI Research Scientist",
            "Data Architect",
        ],
    ),
    (
        "Product Management",
        &[
            "Product Manager",
            "Associate Product Manager",
            "Technical Product Manager",
            "Product Owner",
            "Product Marketing Manager",
        ],
    ),
];

const LOCATIONS: &[&str] = &[
    "Remote",
    "New York, NY",
    "San Francisco, CA",
    "Austin, TX",
    "Seattle, WA",
    "London, UK",
    "Berlin, DE",
    "Tokyo, JP",
];

const DESCRIPTIONS: &[&str] = &[
    "We are looking for a passionate professional to join our team and help us build the next generation of our platform.",
    "Join a fast-paced team dedicated to solving complex problems and delivering high-quality solutions to our global customers.",
    "Be part of an innovative company where you can grow your skills and contribute to impactful projects.",
    "Seeking a collaborative individual who thrives in a dynamic environment and is eager to make a difference.",
    "Help us shape the future of tech by bringing your expertise and creativity to our talented engineering group.",
];

const REQUIREMENTS: &[&str] = &[
    "3+ years of experience in the field. Proficiency in Python or JavaScript.",
    "Strong problem-solving skills and experience with cloud technologies (AWS/GCP).",
    "Bachelor's degree in CS or related field. Excellent communication skills.",
    "Ability to work in a cross-functional team and mentor junior members.",
    "Experience with SQL and NoSQL databases. Familiarity with Agile methodologies.",
];

/// Deterministic spread over the tables: different strides per column so the
/// combinations vary without a random source.
pub fn seed_postings(count: usize) -> Vec<NewJob> {
    (0..count)
        .map(|i| {
            let (department, roles) = DEPARTMENTS[i % DEPARTMENTS.len()];
            let role = roles[(i * 7 + i / DEPARTMENTS.len()) % roles.len()];
            let location = LOCATIONS[(i * 5 + 3) % LOCATIONS.len()];
            NewJob {
                title: format!("{role} - {department} ({location})"),
                company: COMPANIES[(i * 11) % COMPANIES.len()].to_string(),
                description: DESCRIPTIONS[(i * 3 + 1) % DESCRIPTIONS.len()].to_string(),
                requirements: REQUIREMENTS[(i * 2 + i / 5) % REQUIREMENTS.len()].to_string(),
            }
        })
        .collect()
}

/// Inserts the demo corpus unless the `jobs` table already has rows.
/// Returns the number of postings inserted.
pub async fn seed_jobs(pool: &PgPool) -> Result<usize> {
    if count_jobs(pool).await? > 0 {
        info!("Database already seeded");
        return Ok(0);
    }

    let postings = seed_postings(SEED_JOB_COUNT);
    let mut tx = pool.begin().await?;
    for job in &postings {
        sqlx::query(
            "INSERT INTO jobs (title, company, description, requirements) VALUES ($1, $2, $3, $4)",
        )
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.description)
        .bind(&job.requirements)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    info!("Seeded {} jobs", postings.len());
    Ok(postings.len())
}
