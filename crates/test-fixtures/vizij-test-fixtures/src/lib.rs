use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    geometry: HashMap<String, String>,
    configs: HashMap<String, String>,
    #[serde(default)]
    scenarios: HashMap<String, ScenarioEntry>,
}

/// A geometry snapshot paired with the config it is meant to run under.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioEntry {
    pub geometry: String,
    pub config: String,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Host geometry snapshots (items, container, gap, optional marker).
pub mod geometry {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.geometry.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.geometry, "geometry", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.geometry, "geometry", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.geometry, "geometry", name)?;
        Ok(resolve_path(rel))
    }
}

/// Engine configs, possibly partial (missing fields take their defaults).
pub mod configs {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.configs.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.configs, "config", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.configs, "config", name)?;
        super::load_json(rel)
    }
}

/// Named geometry + config pairs.
pub mod scenarios {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.scenarios.keys().cloned().collect()
    }

    pub fn entry(name: &str) -> Result<ScenarioEntry> {
        lookup(&MANIFEST.scenarios, "scenario", name).cloned()
    }

    /// `(geometry_json, config_json)` for a scenario.
    pub fn json(name: &str) -> Result<(String, String)> {
        let entry = entry(name)?;
        Ok((
            super::geometry::json(&entry.geometry)?,
            super::configs::json(&entry.config)?,
        ))
    }
}
