//! Provider identifiers and the logical operations issued against them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a supported upstream travel provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    /// Stateless: every call carries a static `X-API-KEY` header.
    Bdfare,
    /// Stateful: calls carry a bearer token obtained from `/Authenticate`.
    Flyhub,
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bdfare => write!(f, "bdfare"),
            Self::Flyhub => write!(f, "flyhub"),
        }
    }
}

impl std::str::FromStr for ProviderId {
    type Err = crate::FarelinkError;

    /// Parse a provider name (case-insensitive) into a [`ProviderId`].
    ///
    /// # Errors
    ///
    /// Returns [`FarelinkError::Validation`](crate::FarelinkError::Validation)
    /// if the string does not name a known provider.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bdfare" => Ok(Self::Bdfare),
            "flyhub" => Ok(Self::Flyhub),
            other => Err(crate::FarelinkError::Validation(format!(
                "unknown provider: {other}"
            ))),
        }
    }
}

impl ProviderId {
    /// Returns all known provider variants.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Bdfare, Self::Flyhub]
    }

    /// Whether the provider needs a login round-trip before authenticated calls.
    #[must_use]
    pub fn is_stateful(self) -> bool {
        matches!(self, Self::Flyhub)
    }
}

/// A logical provider call. Used to pick per-operation timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Search,
    Price,
    Authenticate,
    Balance,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Search => write!(f, "search"),
            Self::Price => write!(f, "price"),
            Self::Authenticate => write!(f, "authenticate"),
            Self::Balance => write!(f, "balance"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_display() {
        assert_eq!(ProviderId::Bdfare.to_string(), "bdfare");
        assert_eq!(ProviderId::Flyhub.to_string(), "flyhub");
        assert_eq!(Operation::Authenticate.to_string(), "authenticate");
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!(ProviderId::from_str("bdfare").unwrap(), ProviderId::Bdfare);
        assert_eq!(ProviderId::from_str("FlyHub").unwrap(), ProviderId::Flyhub);
    }

    #[test]
    fn test_from_str_unknown() {
        let err = ProviderId::from_str("sabre").unwrap_err();
        assert!(err.to_string().contains("sabre"));
    }

    #[test]
    fn test_statefulness() {
        assert!(!ProviderId::Bdfare.is_stateful());
        assert!(ProviderId::Flyhub.is_stateful());
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&ProviderId::Flyhub).unwrap(),
            "\"flyhub\""
        );
        let back: ProviderId = serde_json::from_str("\"bdfare\"").unwrap();
        assert_eq!(back, ProviderId::Bdfare);
    }

    #[test]
    fn test_hash_in_map() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(ProviderId::Flyhub, "val");
        assert_eq!(map[&ProviderId::Flyhub], "val");
    }
}
