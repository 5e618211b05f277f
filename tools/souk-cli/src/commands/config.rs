//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};
use souk_market::Language;
use souk_observability::{LogFormat, LogLevel};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Get { key } => get_config(&key, ctx).await,
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx).await,
        ConfigCommand::Init { catalog, force } => init_config(&catalog, force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("[catalog]");
    ctx.output.kv("path", &ctx.config.catalog.path);

    ctx.output.info("[search]");
    ctx.output.kv("language", ctx.config.search.language.code());
    ctx.output.kv("debounce_ms", &ctx.config.search.debounce_ms.to_string());
    ctx.output.kv("min_score", &ctx.config.search.min_score.to_string());
    ctx.output.kv("record_history", &ctx.config.search.record_history.to_string());

    ctx.output.info("[logging]");
    ctx.output.kv("level", &ctx.config.logging.level.to_string().to_lowercase());
    ctx.output.kv("format", &ctx.config.logging.format.to_string());

    Ok(())
}

async fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

async fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(path) = ctx.writable_config() else {
        bail!("No config file found. Run `souk config init` to create one.");
    };
    let path = path.to_string_lossy().to_string();

    let mut config = CliConfig::load(&path)?;
    set_config_value(&mut config, key, value)?;
    config.save(&path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

async fn init_config(catalog: &str, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("souk.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config(catalog))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if ctx.config.search.min_score == 0 {
        warnings.push("search.min_score of 0 accepts any query".to_string());
    }

    if ctx.config.search.debounce_ms > 2_000 {
        warnings.push(format!(
            "search.debounce_ms {} is unusually long",
            ctx.config.search.debounce_ms
        ));
    }

    match ctx.load_store(None) {
        Ok(store) => {
            let snapshot = store.snapshot();
            if snapshot.categories.is_empty() {
                warnings.push("catalog has no categories".to_string());
            }
            for listing in &snapshot.listings {
                let known = snapshot.categories.iter().any(|c| c.id == listing.category_id);
                if !known {
                    errors.push(format!(
                        "listing {} references unknown category {}",
                        listing.id, listing.category_id
                    ));
                }
            }
            ctx.output.info(&format!(
                "Catalog: {} categories, {} listings",
                snapshot.categories.len(),
                snapshot.listings.len()
            ));
        }
        Err(e) => errors.push(format!("{:#}", e)),
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["catalog", "path"] => Ok(config.catalog.path.clone()),
        ["search", "language"] => Ok(config.search.language.code().to_string()),
        ["search", "debounce_ms"] => Ok(config.search.debounce_ms.to_string()),
        ["search", "min_score"] => Ok(config.search.min_score.to_string()),
        ["search", "record_history"] => Ok(config.search.record_history.to_string()),
        ["logging", "level"] => Ok(config.logging.level.to_string().to_lowercase()),
        ["logging", "format"] => Ok(config.logging.format.to_string()),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["catalog", "path"] => config.catalog.path = value.to_string(),
        ["search", "language"] => config.search.language = value.parse::<Language>()?,
        ["search", "debounce_ms"] => config.search.debounce_ms = value.parse()?,
        ["search", "min_score"] => config.search.min_score = value.parse()?,
        ["search", "record_history"] => config.search.record_history = value.parse()?,
        ["logging", "level"] => config.logging.level = value.parse::<LogLevel>()?,
        ["logging", "format"] => config.logging.format = value.parse::<LogFormat>()?,
        _ => bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}
