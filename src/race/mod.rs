//! # Buoy Races
//!
//! Selection of lane participants from the duck pool and simulation of the
//! race over a sequence of buoy distances.
//!
//! ```text
//! duck pool ──select(capability, lanes)──▶ participants
//!           ──simulate(distances)────────▶ RaceResult
//!           ──notify(subscribers)────────▶ "Race <name> finished in <t>s"
//! ```

pub mod selector;
pub mod simulator;

use serde::{Deserialize, Serialize};

use crate::model::MemberId;
use crate::{Error, Result};

pub use selector::select;
pub use simulator::{run_race, simulate};

// ============================================================================
// RaceConfig
// ============================================================================

/// Buoy distances and the number of lanes to fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceConfig {
    distances: Vec<f64>,
    lanes: usize,
}

impl RaceConfig {
    /// Fails with `InvalidConfiguration` for an empty or non-positive distance
    /// list, or zero lanes.
    pub fn new(distances: Vec<f64>, lanes: usize) -> Result<Self> {
        validate_distances(&distances)?;
        if lanes == 0 {
            return Err(Error::InvalidConfiguration(
                "a race needs at least one lane".into(),
            ));
        }
        Ok(Self { distances, lanes })
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    pub fn lanes(&self) -> usize {
        self.lanes
    }
}

/// Every buoy distance must be finite and strictly positive, and there must
/// be at least one.
pub fn validate_distances(distances: &[f64]) -> Result<()> {
    if distances.is_empty() {
        return Err(Error::InvalidConfiguration("a race needs at least one buoy".into()));
    }
    if let Some(bad) = distances.iter().find(|d| !(d.is_finite() && **d > 0.0)) {
        return Err(Error::InvalidConfiguration(format!(
            "buoy distance must be positive, got {bad}"
        )));
    }
    Ok(())
}

// ============================================================================
// RaceResult
// ============================================================================

/// Completion time of one participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneTime {
    /// 1-based lane, in selection order.
    pub lane: usize,
    pub member: MemberId,
    pub username: String,
    pub time: f64,
}

/// Outcome of a simulated race.
///
/// Lanes keep selection order; they are not re-sorted by finishing time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub lanes: Vec<LaneTime>,
    /// Slowest completion time, 0 when nobody raced.
    pub total: f64,
}

impl RaceResult {
    pub fn time_of(&self, member: MemberId) -> Option<f64> {
        self.lanes.iter().find(|l| l.member == member).map(|l| l.time)
    }

    pub fn participants(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.lanes.iter().map(|l| l.member)
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Announcement sent to event subscribers.
    pub fn summary(&self, race_name: &str) -> String {
        format!("Race {race_name} finished in {:.3}s", self.total)
    }
}
