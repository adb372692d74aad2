//! Config discovery and edge-file loading.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use serde::Deserialize;
use tracing::debug;

use metacat_core::config::{PROJECT_CONFIG_FILE, USER_CONFIG_DIR, USER_CONFIG_FILE};
use metacat_core::{CandidateEdge, Config};

/// Load configuration, then apply `METACAT_*` environment overrides.
///
/// With no explicit path, searches in order:
/// 1. `./metacat.toml` (project local)
/// 2. `<config dir>/metacat/config.toml` (user config)
/// 3. Falls back to defaults
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => from_file(path)?,
        None => match discover() {
            Some(path) => from_file(&path)?,
            None => Config::default(),
        },
    };
    config.apply_overrides(|key| std::env::var(key).ok());
    Ok(config)
}

fn discover() -> Option<PathBuf> {
    let local = PathBuf::from(PROJECT_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
}

/// Load configuration from a specific file, without env overrides.
pub fn from_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
    let config = Config::from_toml_str(&content)
        .wrap_err_with(|| format!("invalid config file {}", path.display()))?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Either a bare list of edges or `{ edges: [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum EdgeFile {
    List(Vec<CandidateEdge>),
    Wrapped { edges: Vec<CandidateEdge> },
}

impl EdgeFile {
    fn into_edges(self) -> Vec<CandidateEdge> {
        match self {
            Self::List(edges) | Self::Wrapped { edges } => edges,
        }
    }
}

/// Read candidate edges from a JSON or YAML file (chosen by extension).
pub fn load_candidates(path: &Path) -> Result<Vec<CandidateEdge>> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read edge file {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    let file: EdgeFile = if is_yaml {
        serde_yaml::from_str(&content)
            .wrap_err_with(|| format!("invalid YAML edge file {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .wrap_err_with(|| format!("invalid JSON edge file {}", path.display()))?
    };

    let edges = file.into_edges();
    debug!(path = %path.display(), count = edges.len(), "loaded candidate edges");
    Ok(edges)
}
