//! Repository versions: the target of an upgrade.

use std::collections::BTreeSet;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::stack::StackId;

/// Kind of repository a version was published as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepositoryType {
    /// A full stack release touching every service.
    #[default]
    #[serde(alias = "standard")]
    Standard,
    /// A patch for a subset of services.
    #[serde(alias = "patch")]
    Patch,
    /// A maintenance release for a subset of services.
    #[serde(alias = "maintenance")]
    Maintenance,
    /// A single-service release.
    #[serde(alias = "service")]
    Service,
}

impl RepositoryType {
    /// Whether this type upgrades only part of the cluster.
    pub fn is_partial(&self) -> bool {
        !matches!(self, RepositoryType::Standard)
    }
}

impl fmt::Display for RepositoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryType::Standard => write!(f, "STANDARD"),
            RepositoryType::Patch => write!(f, "PATCH"),
            RepositoryType::Maintenance => write!(f, "MAINTENANCE"),
            RepositoryType::Service => write!(f, "SERVICE"),
        }
    }
}

/// Version definition metadata shipped with a repository version.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct VersionDefinition {
    /// Services this version carries new bits for.
    #[serde(default)]
    pub available_services: BTreeSet<String>,
}

impl VersionDefinition {
    /// Build a definition from a list of service names.
    pub fn with_services<I, S>(services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            available_services: services.into_iter().map(Into::into).collect(),
        }
    }
}

/// The version an upgrade intends to roll out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RepositoryVersion {
    /// Store identifier. `None` when the value was built by a caller and
    /// not resolved from a store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Stack this version belongs to.
    pub stack: StackId,
    /// Full version string (e.g. "2.6.4.0-91").
    pub version: String,
    /// Repository type.
    #[serde(default, rename = "type")]
    pub repository_type: RepositoryType,
    /// Optional version definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<VersionDefinition>,
}

impl RepositoryVersion {
    /// Create an unresolved standard version.
    pub fn new(stack: StackId, version: impl Into<String>) -> Self {
        Self {
            id: None,
            stack,
            version: version.into(),
            repository_type: RepositoryType::Standard,
            definition: None,
        }
    }

    /// Set the store identifier.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the repository type.
    pub fn with_type(mut self, repository_type: RepositoryType) -> Self {
        self.repository_type = repository_type;
        self
    }

    /// Attach a version definition.
    pub fn with_definition(mut self, definition: VersionDefinition) -> Self {
        self.definition = Some(definition);
        self
    }

    /// Services the version definition names, empty when there is none.
    pub fn available_services(&self) -> impl Iterator<Item = &str> {
        self.definition
            .iter()
            .flat_map(|d| d.available_services.iter().map(String::as_str))
    }
}

impl fmt::Display for RepositoryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.stack, self.version)
    }
}
