use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A trade specialization backed by its own estimation service.
///
/// The five built-in trades have fixed phase tables, fallbacks and
/// scheduling precedence. Anything else supplied by a caller is kept as
/// `Other` so it can still be dispatched (and fail as unconfigured).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Trade {
    Carpentry,
    Electrical,
    Plumbing,
    Flooring,
    Painting,
    Other(String),
}

impl Trade {
    /// Built-in trades in detection priority order.
    pub const KNOWN: [Trade; 5] = [
        Trade::Carpentry,
        Trade::Electrical,
        Trade::Plumbing,
        Trade::Flooring,
        Trade::Painting,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Trade::Carpentry => "carpentry",
            Trade::Electrical => "electrical",
            Trade::Plumbing => "plumbing",
            Trade::Flooring => "flooring",
            Trade::Painting => "painting",
            Trade::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Trade::Other(_))
    }

    /// Position in the detection priority order. Unknown trades sort last.
    pub fn priority(&self) -> usize {
        Self::KNOWN
            .iter()
            .position(|t| t == self)
            .unwrap_or(Self::KNOWN.len())
    }

    /// Environment variable holding this trade's service base URL,
    /// e.g. `CARPENTRY_SERVICE_URL`.
    pub fn service_url_env_key(&self) -> String {
        let name: String = self
            .as_str()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("{name}_SERVICE_URL")
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Trade {
    fn from(s: &str) -> Self {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "carpentry" => Trade::Carpentry,
            "electrical" => Trade::Electrical,
            "plumbing" => Trade::Plumbing,
            "flooring" => Trade::Flooring,
            "painting" => Trade::Painting,
            _ => Trade::Other(normalized),
        }
    }
}

impl FromStr for Trade {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Trade::from(s))
    }
}

impl Serialize for Trade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Trade {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Trade::from(raw.as_str()))
    }
}
