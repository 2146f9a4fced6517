//! Per-project Jira workflow transition ids

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Transition id used for projects without an explicit entry
pub const DEFAULT_TRANSITION_ID: u32 = 5;

/// Maps a Jira project key to the id of its "Done" transition.
///
/// When read from a config file, a missing `default_id` keeps
/// [`DEFAULT_TRANSITION_ID`] and `overrides` are merged onto the built-in
/// entries, the same way `--jira-transitions` is applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "TransitionSection")]
pub struct TransitionMap {
    pub default_id: u32,
    pub overrides: BTreeMap<String, u32>,
}

/// On-disk shape of the `transitions` section
#[derive(Deserialize, Default)]
#[serde(default)]
struct TransitionSection {
    default_id: Option<u32>,
    overrides: BTreeMap<String, u32>,
}

impl From<TransitionSection> for TransitionMap {
    fn from(section: TransitionSection) -> Self {
        let mut map = TransitionMap::default();
        if let Some(default_id) = section.default_id {
            map.default_id = default_id;
        }
        map.overrides.extend(section.overrides);
        map
    }
}

impl TransitionMap {
    /// A map with no per-project entries
    pub fn with_default(default_id: u32) -> Self {
        Self {
            default_id,
            overrides: BTreeMap::new(),
        }
    }

    pub fn resolve(&self, project_key: &str) -> u32 {
        self.overrides
            .get(project_key)
            .copied()
            .unwrap_or(self.default_id)
    }

    pub fn insert(&mut self, project_key: impl Into<String>, transition_id: u32) {
        self.overrides.insert(project_key.into(), transition_id);
    }

    /// Parse `KEY=ID` pairs separated by commas, e.g. `FRB=51,OPS=31`.
    pub fn parse_overrides(spec: &str) -> Result<Vec<(String, u32)>> {
        spec.split(',')
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, id) = pair
                    .split_once('=')
                    .ok_or_else(|| Error::InvalidTransition(pair.to_string()))?;
                let key = key.trim();
                let id = id
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| Error::InvalidTransition(pair.to_string()))?;
                if key.is_empty() {
                    return Err(Error::InvalidTransition(pair.to_string()));
                }
                Ok((key.to_string(), id))
            })
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.overrides.keys().any(|key| key.trim().is_empty()) {
            return Err(Error::Validation(
                "Transition project keys cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for TransitionMap {
    fn default() -> Self {
        let mut map = Self::with_default(DEFAULT_TRANSITION_ID);
        map.insert("FRB", 51);
        map
    }
}
