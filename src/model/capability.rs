//! Locomotion capabilities of duck members.
//!
//! A duck either swims, flies, does both, or (for plain members) neither.
//! Capabilities are a two-bit flag set rather than a type hierarchy, so a
//! combined swimmer/flyer is just `SWIM | FLY`.

use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A single locomotion capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    #[default]
    Swim,
    Fly,
}

impl Capability {
    const fn bit(self) -> u8 {
        match self {
            Capability::Swim => 0b01,
            Capability::Fly => 0b10,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Swim => f.write_str("swim"),
            Capability::Fly => f.write_str("fly"),
        }
    }
}

/// Set of capabilities held by a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CapabilitySet(u8);

impl CapabilitySet {
    pub const NONE: CapabilitySet = CapabilitySet(0);
    pub const SWIM: CapabilitySet = CapabilitySet(0b01);
    pub const FLY: CapabilitySet = CapabilitySet(0b10);
    pub const SWIM_AND_FLY: CapabilitySet = CapabilitySet(0b11);

    pub fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    pub fn insert(&mut self, capability: Capability) {
        self.0 |= capability.bit();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Stored discriminator for this set (`SWIMMING`, `FLYING`,
    /// `FLYING_AND_SWIMMING`, `NONE`).
    pub fn discriminator(self) -> &'static str {
        match self.0 {
            0b01 => "SWIMMING",
            0b10 => "FLYING",
            0b11 => "FLYING_AND_SWIMMING",
            _ => "NONE",
        }
    }
}

impl From<Capability> for CapabilitySet {
    fn from(capability: Capability) -> Self {
        CapabilitySet(capability.bit())
    }
}

impl BitOr for CapabilitySet {
    type Output = CapabilitySet;

    fn bitor(self, rhs: CapabilitySet) -> CapabilitySet {
        CapabilitySet(self.0 | rhs.0)
    }
}

impl FromStr for CapabilitySet {
    type Err = Error;

    /// Parse a stored duck-type discriminator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SWIMMING" => Ok(CapabilitySet::SWIM),
            "FLYING" => Ok(CapabilitySet::FLY),
            "FLYING_AND_SWIMMING" | "SWIMMING_AND_FLYING" => Ok(CapabilitySet::SWIM_AND_FLY),
            "NONE" => Ok(CapabilitySet::NONE),
            other => Err(Error::Validation(format!("Unknown duck type: {other}"))),
        }
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.discriminator())
    }
}
