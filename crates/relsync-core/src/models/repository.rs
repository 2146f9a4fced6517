//! GitHub repository identifier

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub repo: String,
}

impl Repository {
    /// Split an `owner/repo` identifier, as found in `GITHUB_REPOSITORY`.
    pub fn parse(value: &str) -> Result<Self> {
        let (owner, repo) = value
            .trim()
            .split_once('/')
            .ok_or_else(|| Error::InvalidRepository(value.to_string()))?;

        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(Error::InvalidRepository(value.to_string()));
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Web URL of the release page for a tag in this repository
    pub fn release_url(&self, tag: &str) -> String {
        format!(
            "https://github.com/{}/{}/releases/tag/{}",
            self.owner, self.repo, tag
        )
    }
}

impl FromStr for Repository {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
