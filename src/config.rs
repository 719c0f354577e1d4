use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::install::InstallManifest;
use crate::responder::DEFAULT_BOOTSTRAP_AGENT;

/// Config file name looked up in the working and config directories
pub const CONFIG_FILE: &str = "agentpublish.yaml";

/// Environment override for the package install root
pub const PACKAGE_ROOT_ENV: &str = "AGENTPUBLISH_PACKAGE_ROOT";

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub log_level: LogLevel,
    pub package: PackageConfig,
    pub install: InstallManifest,
    pub extension: ExtensionConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PackageConfig {
    /// npm package name, used for the install hint and self-removal
    pub name: String,
    /// Package install root; resolved from the executable when unset
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Directory holding the bundled `.github/agents`; defaults to the package root
    pub root: Option<PathBuf>,
    /// Descriptor loaded at activation for the responder's instructions
    pub bootstrap_agent: String,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            name: "agentpublishtest".to_string(),
            root: None,
        }
    }
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            root: None,
            bootstrap_agent: DEFAULT_BOOTSTRAP_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain.
    ///
    /// A file that exists but fails to parse is skipped. Such failures are
    /// returned alongside the config because logging is not set up yet.
    pub fn load() -> (Self, Vec<String>) {
        let mut problems = Vec::new();

        for path in Self::candidates() {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => return (config, problems),
                Err(e) => problems.push(format!("Failed to load config from {}: {:#}", path.display(), e)),
            }
        }

        (Self::default(), problems)
    }

    fn candidates() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(env_path) = std::env::var("AGENTPUBLISH_CONFIG") {
            paths.push(PathBuf::from(env_path));
        }

        paths.push(PathBuf::from(CONFIG_FILE));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("agentpublish").join(CONFIG_FILE));
        }

        paths
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Root of the installed package: config, then env, then `<exe dir>/..`
    pub fn package_root(&self) -> PathBuf {
        if let Some(root) = &self.package.root {
            return Self::expand_path(root);
        }

        if let Ok(root) = std::env::var(PACKAGE_ROOT_ENV) {
            return Self::expand_path(Path::new(&root));
        }

        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().and_then(Path::parent).map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Directory the editor front end treats as its own bundle
    pub fn extension_root(&self) -> PathBuf {
        match &self.extension.root {
            Some(root) => Self::expand_path(root),
            None => self.package_root(),
        }
    }

    /// Expand a path that may contain ~ or env vars
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = shellexpand::full(&path_str).unwrap_or_else(|_| path_str.clone());
        PathBuf::from(expanded.as_ref())
    }
}
