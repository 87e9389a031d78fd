//! Advise command - AI tax advice for a computed comparison.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use console::style;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};

use taxdoc_core::advice::{advice_prompt, SYSTEM_PROMPT};
use taxdoc_core::error::AdviceError;
use taxdoc_core::models::config::AdviceConfig;
use taxdoc_core::{compare, AdviceCache, AdviceCacheState, TaxInput};

use super::load_config;

/// Arguments for the advise command.
#[derive(Args)]
pub struct AdviseArgs {
    /// Basic salary (yearly)
    #[arg(long, default_value = "0")]
    basic: Decimal,

    /// House rent allowance
    #[arg(long, default_value = "0")]
    hra: Decimal,

    /// Special allowance
    #[arg(long, default_value = "0")]
    special_allowance: Decimal,

    /// Bonus
    #[arg(long, default_value = "0")]
    bonus: Decimal,

    /// Section 80C investments
    #[arg(long = "80c", default_value = "0")]
    section_80c: Decimal,

    /// Section 80D (health insurance)
    #[arg(long = "80d", default_value = "0")]
    section_80d: Decimal,

    /// Home loan interest
    #[arg(long, default_value = "0")]
    home_loan_interest: Decimal,

    /// Annual rent paid
    #[arg(long, default_value = "0")]
    rent_paid: Decimal,

    /// Read the input from a JSON file instead of flags
    #[arg(long)]
    input: Option<PathBuf>,

    /// Skip the cache and always call the advice service
    #[arg(long)]
    refresh: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

pub async fn run(args: AdviseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let input = if let Some(path) = &args.input {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&content)?
    } else {
        TaxInput {
            basic_salary: args.basic,
            hra: args.hra,
            special_allowance: args.special_allowance,
            bonus: args.bonus,
            section_80c: args.section_80c,
            section_80d: args.section_80d,
            home_loan_interest: args.home_loan_interest,
            rent_paid: args.rent_paid,
        }
    };

    let comparison = compare(&input);
    let prompt = advice_prompt(&comparison);

    let mut cache = load_cache(&config.advice);

    if !args.refresh {
        if let Some(content) = cache.lookup(&prompt) {
            info!("serving advice from cache");
            println!("{}", content);
            return Ok(());
        }
    }

    if let Err(AdviceError::RateLimited { retry_after_secs }) = cache.check_cooldown() {
        anyhow::bail!(
            "advice service was called recently; retry in {} seconds",
            retry_after_secs
        );
    }

    let api_key = std::env::var(&config.advice.api_key_env)
        .map_err(|_| AdviceError::MissingApiKey(config.advice.api_key_env.clone()))?;

    eprintln!("{}", style("Requesting tax advice...").dim());
    let content = request_advice(&config.advice, &api_key, &prompt).await?;

    cache.record_response(&prompt, &content);
    if let Err(err) = save_cache(&cache) {
        debug!("failed to persist advice cache: {}", err);
    }

    println!("{}", content);
    Ok(())
}

async fn request_advice(
    config: &AdviceConfig,
    api_key: &str,
    prompt: &str,
) -> anyhow::Result<String> {
    let payload = serde_json::json!({
        "model": config.model,
        "messages": [
            {"role": "system", "content": SYSTEM_PROMPT},
            {"role": "user", "content": prompt},
        ],
    });

    let client = reqwest::Client::new();
    let response = client
        .post(&config.endpoint)
        .bearer_auth(api_key)
        .json(&payload)
        .send()
        .await
        .context("advice request failed")?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AdviceError::Api(format!("{}: {}", status, body)).into());
    }

    let parsed: ChatResponse = response
        .json()
        .await
        .context("failed to parse advice response")?;

    let content = parsed
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| AdviceError::Api("response contained no choices".into()))?;

    Ok(content)
}

fn cache_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taxdoc")
        .join("advice_cache.json")
}

fn load_cache(config: &AdviceConfig) -> AdviceCache {
    let path = cache_path();
    let state = fs::read_to_string(&path)
        .ok()
        .and_then(|content| serde_json::from_str::<AdviceCacheState>(&content).ok())
        .unwrap_or_default();
    AdviceCache::from_state(config, state)
}

fn save_cache(cache: &AdviceCache) -> anyhow::Result<()> {
    let path = cache_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, serde_json::to_string_pretty(cache.state())?)?;
    Ok(())
}
