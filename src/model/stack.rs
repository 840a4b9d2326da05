//! Stack identifiers.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use schemars::{json_schema, JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};

use crate::error::UpgateError;

static STACK_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[A-Za-z][A-Za-z0-9_]*)-(?P<version>[0-9][0-9A-Za-z._]*)$")
        .expect("stack id pattern is valid")
});

/// A software distribution and its major version, e.g. `HDP-2.6`.
///
/// Compared by value. Serialized as the `NAME-VERSION` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StackId {
    /// Distribution name (e.g. "HDP").
    pub name: String,
    /// Major version of the distribution (e.g. "2.6").
    pub version: String,
}

impl StackId {
    /// Create a stack id from its parts.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for StackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.version)
    }
}

impl FromStr for StackId {
    type Err = UpgateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = STACK_ID_REGEX
            .captures(s.trim())
            .ok_or_else(|| UpgateError::InvalidStackId {
                value: s.to_string(),
            })?;
        Ok(Self::new(&caps["name"], &caps["version"]))
    }
}

impl Serialize for StackId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StackId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl JsonSchema for StackId {
    fn schema_name() -> Cow<'static, str> {
        "StackId".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "string",
            "pattern": STACK_ID_REGEX.as_str(),
            "description": "Stack name and version, e.g. HDP-2.6"
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_version() {
        let stack: StackId = "HDP-2.6".parse().unwrap();
        assert_eq!(stack.name, "HDP");
        assert_eq!(stack.version, "2.6");
    }

    #[test]
    fn display_round_trips_through_parse() {
        let stack = StackId::new("HDF", "3.1");
        assert_eq!(stack.to_string(), "HDF-3.1");
        assert_eq!(stack.to_string().parse::<StackId>().unwrap(), stack);
    }

    #[test]
    fn rejects_missing_version() {
        let err = "HDP".parse::<StackId>().unwrap_err();
        assert!(matches!(err, UpgateError::InvalidStackId { .. }));
    }

    #[test]
    fn rejects_non_numeric_version() {
        assert!("HDP-latest".parse::<StackId>().is_err());
        assert!("-2.6".parse::<StackId>().is_err());
    }

    #[test]
    fn equality_is_by_value() {
        assert_eq!(StackId::new("HDP", "1.0"), StackId::new("HDP", "1.0"));
        assert_ne!(StackId::new("HDP", "1.0"), StackId::new("HDP", "2.0.6"));
    }

    #[test]
    fn serde_uses_string_form() {
        let stack = StackId::new("HDP", "1.0");
        let json = serde_json::to_string(&stack).unwrap();
        assert_eq!(json, "\"HDP-1.0\"");
        let back: StackId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stack);
    }

    #[test]
    fn deserialize_rejects_invalid() {
        let err = serde_json::from_str::<StackId>("\"nope\"");
        assert!(err.is_err());
    }
}
