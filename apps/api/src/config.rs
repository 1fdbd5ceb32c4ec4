use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::auth::jwt::JwtConfig;
use crate::llm_client::DEFAULT_MODEL;
use crate::ranking::fallback::FallbackWeights;
use crate::session::Pacing;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub jwt: JwtConfig,
    pub seed_jobs: bool,
    pub pacing: Pacing,
    pub fallback: FallbackWeights,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            jwt: jwt_from_env()?,
            seed_jobs: parse_env("SEED_JOBS", false)?,
            pacing: Pacing {
                thinking: Duration::from_millis(parse_env("PACING_THINKING_MS", 2000)?),
                ranked: Duration::from_millis(parse_env("PACING_RANKED_MS", 1000)?),
                per_application: Duration::from_millis(parse_env("PACING_APPLY_MS", 1500)?),
            },
            fallback: fallback_weights_from_env()?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Token settings only. Used on its own by `matchmaker issue-token`, which needs
/// neither the database nor the model.
pub fn jwt_from_env() -> Result<JwtConfig> {
    dotenvy::dotenv().ok();

    Ok(JwtConfig {
        secret: require_env("JWT_SECRET")?,
        expiry_mins: parse_env("JWT_EXPIRY_MINS", 60)?,
    })
}

/// Keyword scorer tuning; every `FALLBACK_*` variable is optional.
pub fn fallback_weights_from_env() -> Result<FallbackWeights> {
    let defaults = FallbackWeights::default();
    let weights = FallbackWeights {
        title_points: parse_env("FALLBACK_TITLE_POINTS", defaults.title_points)?,
        requirements_points: parse_env(
            "FALLBACK_REQUIREMENTS_POINTS",
            defaults.requirements_points,
        )?,
        id_offset_modulus: parse_env("FALLBACK_ID_MODULUS", defaults.id_offset_modulus)?,
        ceiling: parse_env("FALLBACK_CEILING", defaults.ceiling)?,
        floor: parse_env("FALLBACK_FLOOR", defaults.floor)?,
        gap_threshold: parse_env("FALLBACK_GAP_THRESHOLD", defaults.gap_threshold)?,
        limit: parse_env("FALLBACK_LIMIT", defaults.limit)?,
    };

    if weights.floor > weights.ceiling {
        bail!(
            "FALLBACK_FLOOR ({}) must not exceed FALLBACK_CEILING ({})",
            weights.floor,
            weights.ceiling
        );
    }
    if weights.id_offset_modulus < 0 {
        bail!("FALLBACK_ID_MODULUS must not be negative");
    }
    Ok(weights)
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
