//! CLI command implementations.

pub mod config;
pub mod detect;
pub mod resolve;
pub mod search;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use souk_market::catalog::{Category, CategoryTree};
use souk_market::error::MarketError;
use souk_market::search::ListingTypeToggle;
use souk_market::Language;

/// Arguments for the detect command.
#[derive(Args)]
pub struct DetectArgs {
    /// Free-text query.
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Query language (fr, en, ar).
    #[arg(short, long)]
    pub lang: Option<Language>,

    /// Show the score of every category.
    #[arg(long)]
    pub explain: bool,

    /// Catalog snapshot to map the result to a category.
    #[arg(long)]
    pub catalog: Option<String>,
}

/// Arguments for the resolve command.
#[derive(Args)]
pub struct ResolveArgs {
    /// Category id or slug.
    pub category: String,

    /// Display language (fr, en, ar).
    #[arg(short, long)]
    pub lang: Option<Language>,

    /// Catalog snapshot path.
    #[arg(long)]
    pub catalog: Option<String>,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Free-text query.
    pub text: Vec<String>,

    /// Category id or slug.
    #[arg(long)]
    pub category: Option<String>,

    /// Subcategory id or slug.
    #[arg(long)]
    pub subcategory: Option<String>,

    /// Listing type: any, offer, request, for_rent.
    #[arg(short, long, default_value = "any", value_parser = parse_toggle)]
    pub toggle: ListingTypeToggle,

    /// Facet filter as key=value (e.g. propertyType=Villa).
    #[arg(short, long = "filter")]
    pub filters: Vec<String>,

    /// Signed-in user id; enables history recording.
    #[arg(short, long)]
    pub user: Option<String>,

    /// Detection language (fr, en, ar).
    #[arg(short, long)]
    pub lang: Option<Language>,

    /// Do not infer a category from the text.
    #[arg(long)]
    pub no_detect: bool,

    /// Print the structured store query as SQL.
    #[arg(long)]
    pub sql: bool,

    /// Maximum listings to print.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,

    /// Catalog snapshot path.
    #[arg(long)]
    pub catalog: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Catalog snapshot path to write.
        #[arg(long, default_value = "catalog.json")]
        catalog: String,
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file and catalog.
    Validate,
}

fn parse_toggle(s: &str) -> Result<ListingTypeToggle, String> {
    match s.to_ascii_lowercase().replace('-', "_").as_str() {
        "any" | "all" => Ok(ListingTypeToggle::Any),
        "offer" | "sell" => Ok(ListingTypeToggle::Offer),
        "request" | "wanted" | "buy" => Ok(ListingTypeToggle::Request),
        "for_rent" | "rent" => Ok(ListingTypeToggle::ForRent),
        other => Err(format!("unknown listing type: {}", other)),
    }
}

/// Split `key=value` filter arguments.
pub(crate) fn parse_filters(raw: &[String]) -> Result<Vec<(&str, &str)>> {
    raw.iter()
        .map(|f| match f.split_once('=') {
            Some((key, value)) => Ok((key.trim(), value.trim())),
            None => bail!("Filter must be key=value: {}", f),
        })
        .collect()
}

/// Find a category by id, then by slug.
pub(crate) fn find_category<'a>(tree: &'a CategoryTree, key: &str) -> Result<&'a Category> {
    tree.iter()
        .find(|c| c.id.as_str() == key)
        .or_else(|| tree.by_slug(key))
        .ok_or_else(|| MarketError::CategoryNotFound(key.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toggle() {
        assert_eq!(parse_toggle("for-rent"), Ok(ListingTypeToggle::ForRent));
        assert_eq!(parse_toggle("Request"), Ok(ListingTypeToggle::Request));
        assert!(parse_toggle("lease").is_err());
    }

    #[test]
    fn test_parse_filters() {
        let raw = vec!["propertyType=Villa".to_string(), "surfaceMin = 100".to_string()];
        let pairs = parse_filters(&raw).unwrap();
        assert_eq!(pairs, vec![("propertyType", "Villa"), ("surfaceMin", "100")]);
        assert!(parse_filters(&["hasPool".to_string()]).is_err());
    }
}
