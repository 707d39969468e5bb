use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::constants::NEVER_EXPIRES;

/// When an upload stops being served
///
/// `Never` is written as the `"Infinity"` sentinel the new store understands,
/// `At` as milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expiry {
    Never,
    At(i64),
}

impl Expiry {
    /// Normalize a legacy `uploaded_until` column, where NULL means unbounded.
    pub fn from_legacy(uploaded_until: Option<i64>) -> Self {
        match uploaded_until {
            Some(ms) => Expiry::At(ms),
            None => Expiry::Never,
        }
    }

    pub fn is_never(&self) -> bool {
        matches!(self, Expiry::Never)
    }
}

impl Display for Expiry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Expiry::Never => write!(f, "{}", NEVER_EXPIRES),
            Expiry::At(ms) => write!(f, "{}", ms),
        }
    }
}

impl FromStr for Expiry {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == NEVER_EXPIRES {
            return Ok(Expiry::Never);
        }
        s.parse::<i64>()
            .map(Expiry::At)
            .map_err(|_| anyhow::anyhow!("Invalid expiry: {}", s))
    }
}

impl Serialize for Expiry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Expiry::Never => serializer.serialize_str(NEVER_EXPIRES),
            Expiry::At(ms) => serializer.serialize_i64(*ms),
        }
    }
}

impl<'de> Deserialize<'de> for Expiry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Millis(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Millis(ms) => Ok(Expiry::At(ms)),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}
