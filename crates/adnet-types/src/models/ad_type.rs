//! Ad placement types and client platforms.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of ad placement, each with its own network priority list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdType {
    Banner,
    Interstitial,
    Rewarded,
}

impl AdType {
    /// All ad types in wire order.
    pub const ALL: [AdType; 3] = [Self::Banner, Self::Interstitial, Self::Rewarded];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Banner => "banner",
            Self::Interstitial => "interstitial",
            Self::Rewarded => "rewarded",
        }
    }
}

impl fmt::Display for AdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mobile platform reported by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Android => "ANDROID",
            Self::Ios => "IOS",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    /// Case-insensitive, for CLI convenience. The HTTP API only accepts
    /// the upper-case wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ANDROID" => Ok(Self::Android),
            "IOS" => Ok(Self::Ios),
            other => Err(format!("unknown platform: {other}")),
        }
    }
}
