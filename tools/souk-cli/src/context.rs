//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use souk_market::store::MemoryStore;

use crate::config::CliConfig;
use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["souk.toml", ".souk.toml", "souk.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Config file in use, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory relative paths in the config resolve against.
    pub fn base_dir(&self) -> PathBuf {
        self.config_path
            .as_ref()
            .and_then(|p| p.parent())
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// Resolve a configured path.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.base_dir().join(path)
        }
    }

    /// Load the catalog snapshot, `override_path` taking precedence.
    pub fn load_store(&self, override_path: Option<&str>) -> Result<MemoryStore> {
        let path = match override_path {
            Some(path) => PathBuf::from(path),
            None => self.resolve_path(&self.config.catalog.path),
        };
        self.output.debug(&format!("Loading catalog: {}", path.display()));

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        MemoryStore::from_json_str(&content)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))
    }

    /// Config file to write to: the one loaded, else the first existing
    /// name in the working directory.
    pub fn writable_config(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config_path {
            return Some(path.clone());
        }
        CONFIG_NAMES
            .iter()
            .map(|name| self.cwd.join(name))
            .find(|path| path.exists())
    }
}
