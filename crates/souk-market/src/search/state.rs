//! The facet selection bag of a session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MarketError;
use crate::search::{FacetKey, FacetValue};

/// Current facet selections, keyed by facet.
///
/// Values are kept as entered; whether a key applies is decided by the active
/// facet schema at filtering time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState(BTreeMap<FacetKey, FacetValue>);

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from navigation parameters. Unknown keys and blank values are
    /// skipped; numeric keys must parse.
    pub fn from_params<'a, I>(params: I) -> Result<Self, MarketError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut state = Self::new();
        for (name, raw) in params {
            let key = match name.parse::<FacetKey>() {
                Ok(key) => key,
                Err(_) => {
                    debug!(key = name, "ignoring unknown navigation parameter");
                    continue;
                }
            };
            state.set_param(key, raw)?;
        }
        Ok(state)
    }

    /// Set a facet from its string form, validating numeric and flag keys.
    pub fn set_param(&mut self, key: FacetKey, raw: &str) -> Result<(), MarketError> {
        let raw = raw.trim();
        if raw.is_empty() {
            self.remove(key);
            return Ok(());
        }

        let value = if key.is_numeric() {
            let n: f64 = raw.parse().map_err(|_| MarketError::InvalidFacetValue {
                key: key.to_string(),
                value: raw.to_string(),
            })?;
            FacetValue::Number(n)
        } else if key.is_flag() {
            match raw.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => FacetValue::Flag(true),
                "false" | "0" | "no" | "off" => FacetValue::Flag(false),
                _ => {
                    return Err(MarketError::InvalidFacetValue {
                        key: key.to_string(),
                        value: raw.to_string(),
                    })
                }
            }
        } else {
            FacetValue::text(raw)
        };

        self.set(key, value);
        Ok(())
    }

    pub fn set(&mut self, key: FacetKey, value: impl Into<FacetValue>) {
        self.0.insert(key, value.into());
    }

    /// Builder-style set.
    pub fn with(mut self, key: FacetKey, value: impl Into<FacetValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn remove(&mut self, key: FacetKey) -> Option<FacetValue> {
        self.0.remove(&key)
    }

    pub fn get(&self, key: FacetKey) -> Option<&FacetValue> {
        self.0.get(&key)
    }

    /// Value of a key when it is set to something truthy.
    pub fn active(&self, key: FacetKey) -> Option<&FacetValue> {
        self.0.get(&key).filter(|v| v.is_active())
    }

    /// Every set key whose value is truthy.
    pub fn active_entries(&self) -> impl Iterator<Item = (FacetKey, &FacetValue)> {
        self.0
            .iter()
            .filter(|(_, v)| v.is_active())
            .map(|(k, v)| (*k, v))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = FacetKey> + '_ {
        self.0.keys().copied()
    }
}
