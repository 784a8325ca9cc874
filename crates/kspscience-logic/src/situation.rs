//! Vehicle situations and experiment run types.
//!
//! Both are closed sets. Their canonical names are the variant names and are
//! used verbatim in opportunity identifiers and in catalog JSON.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScienceError;

/// Where a vessel is relative to a body when an experiment runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Situation {
    Landed,
    Splashed,
    FlyingLow,
    FlyingHigh,
    SpaceLow,
    SpaceHigh,
}

impl Situation {
    pub const ALL: [Situation; 6] = [
        Self::Landed,
        Self::Splashed,
        Self::FlyingLow,
        Self::FlyingHigh,
        Self::SpaceLow,
        Self::SpaceHigh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landed => "Landed",
            Self::Splashed => "Splashed",
            Self::FlyingLow => "FlyingLow",
            Self::FlyingHigh => "FlyingHigh",
            Self::SpaceLow => "SpaceLow",
            Self::SpaceHigh => "SpaceHigh",
        }
    }

    /// Flying situations need air; bodies without an atmosphere never offer them.
    pub fn is_flying(&self) -> bool {
        matches!(self, Self::FlyingLow | Self::FlyingHigh)
    }

    /// The game's spelling of this situation inside a science subject id,
    /// e.g. `SrfLanded` in `crewReport@KerbinSrfLandedLaunchPad`.
    pub fn subject_token(&self) -> &'static str {
        match self {
            Self::Landed => "SrfLanded",
            Self::Splashed => "SrfSplashed",
            Self::FlyingLow => "FlyingLow",
            Self::FlyingHigh => "FlyingHigh",
            Self::SpaceLow => "InSpaceLow",
            Self::SpaceHigh => "InSpaceHigh",
        }
    }
}

impl fmt::Display for Situation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Situation {
    type Err = ScienceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sit| sit.as_str() == s)
            .ok_or_else(|| ScienceError::UnknownSituation(s.to_string()))
    }
}

impl TryFrom<String> for Situation {
    type Error = ScienceError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// How many times an experiment fires for one situation on one body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum RunType {
    /// Exactly once, whatever the biome.
    Global,
    /// Once per biome that is not surface-only.
    RealBiomes,
    /// Once per non-liquid biome, surface-only sites included.
    LandBiomes,
    /// Once per liquid biome.
    LiquidBiomes,
}

impl RunType {
    pub const ALL: [RunType; 4] = [
        Self::Global,
        Self::RealBiomes,
        Self::LandBiomes,
        Self::LiquidBiomes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::RealBiomes => "RealBiomes",
            Self::LandBiomes => "LandBiomes",
            Self::LiquidBiomes => "LiquidBiomes",
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global)
    }
}

impl fmt::Display for RunType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunType {
    type Err = ScienceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rt| rt.as_str() == s)
            .ok_or_else(|| ScienceError::UnknownRunType(s.to_string()))
    }
}

impl TryFrom<String> for RunType {
    type Error = ScienceError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
