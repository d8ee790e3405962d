//! Migration step descriptors
//!
//! A step is the metadata an external migration harness needs to order and
//! record a migration: a dotted numeric version and a human-readable name.
//! Each step exposes one or more tasks through [`MigrationTask`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::bulk::MigrationReport;

/// Error parsing a [`MigrationVersion`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    /// The version string is empty
    #[error("empty migration version")]
    Empty,

    /// A dot-separated component is not a non-negative integer
    #[error("invalid version component '{component}' in '{version}'")]
    InvalidComponent {
        /// The full version string
        version: String,
        /// The offending component
        component: String,
    },
}

/// Dotted numeric version such as `202306.1.1`
///
/// Compares component-wise as numbers, so `202306.1.2 < 202306.1.10`. Missing
/// trailing components count as zero.
#[derive(Debug, Clone, Eq)]
pub struct MigrationVersion {
    components: Vec<u64>,
}

impl MigrationVersion {
    /// The numeric components
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    fn component(&self, idx: usize) -> u64 {
        self.components.get(idx).copied().unwrap_or(0)
    }
}

impl FromStr for MigrationVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(VersionParseError::Empty);
        }
        let components = s
            .split('.')
            .map(|part| {
                part.parse::<u64>()
                    .map_err(|_| VersionParseError::InvalidComponent {
                        version: s.to_string(),
                        component: part.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { components })
    }
}

impl PartialEq for MigrationVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for MigrationVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MigrationVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for MigrationVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.components.iter().map(u64::to_string).collect();
        f.write_str(&parts.join("."))
    }
}

impl Serialize for MigrationVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Identity of one migration step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationStep {
    /// Ordering key
    pub version: MigrationVersion,
    /// Human-readable name
    pub name: String,
}

impl MigrationStep {
    /// Create a step
    ///
    /// # Errors
    ///
    /// Returns [`VersionParseError`] if `version` is not dotted numeric.
    pub fn new(version: &str, name: impl Into<String>) -> Result<Self, VersionParseError> {
        Ok(Self {
            version: version.parse()?,
            name: name.into(),
        })
    }
}

impl fmt::Display for MigrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.version)
    }
}

/// A runnable task belonging to a migration step
pub trait MigrationTask {
    /// The step this task belongs to
    fn step(&self) -> &MigrationStep;

    /// Human-readable task name
    fn task_name(&self) -> &str;

    /// Run the task once
    fn run(&self) -> docmigrate_core::Result<MigrationReport>;
}
