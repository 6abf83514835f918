use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Classification outcome for one streamed transaction.
///
/// The lowercase names are the output vocabulary consumed downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Trusted,
    Unverified,
}

impl Verdict {
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Trusted => "trusted",
            Verdict::Unverified => "unverified",
        }
    }

    #[inline]
    #[must_use]
    pub fn is_trusted(self) -> bool {
        self == Verdict::Trusted
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Depth threshold used to decide trust.
///
/// Each tier is numbered after the feature it implements and maps to a fixed
/// hop limit: 1 (direct payment), 2 (friend of a friend), 4 (fourth degree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyTier {
    Feature1,
    Feature2,
    Feature3,
}

impl PolicyTier {
    pub const ALL: [PolicyTier; 3] = [PolicyTier::Feature1, PolicyTier::Feature2, PolicyTier::Feature3];

    /// Maximum number of hops that still counts as trusted
    #[inline]
    #[must_use]
    pub fn depth(self) -> u32 {
        match self {
            PolicyTier::Feature1 => 1,
            PolicyTier::Feature2 => 2,
            PolicyTier::Feature3 => 4,
        }
    }

    #[inline]
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            PolicyTier::Feature1 => 1,
            PolicyTier::Feature2 => 2,
            PolicyTier::Feature3 => 3,
        }
    }
}

impl std::fmt::Display for PolicyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "feature{}", self.number())
    }
}

impl TryFrom<u8> for PolicyTier {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PolicyTier::Feature1),
            2 => Ok(PolicyTier::Feature2),
            3 => Ok(PolicyTier::Feature3),
            other => Err(Error::UnknownTier(other.to_string())),
        }
    }
}

impl FromStr for PolicyTier {
    type Err = Error;

    /// Accepts `feature1`..`feature3` (any case) or the bare numbers `1`..`3`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lowered = trimmed.to_ascii_lowercase();
        let number = lowered.strip_prefix("feature").unwrap_or(&lowered);
        number
            .parse::<u8>()
            .map_err(|_| Error::UnknownTier(trimmed.to_string()))
            .and_then(|n| PolicyTier::try_from(n).map_err(|_| Error::UnknownTier(trimmed.to_string())))
    }
}
