//! Race simulation.
//!
//! Each buoy is an out-and-back leg swum at constant speed. A participant's
//! completion time is the time of their single slowest leg,
//! `max_j(2 * d_j / v)`, not the sum over all legs.

use crate::model::{EventSubscription, Member, Snapshot};
use crate::notify::{self, Mailbox};
use crate::{Error, Result};
use super::{validate_distances, LaneTime, RaceResult};

/// Compute completion times for `participants` over `distances`.
///
/// Fails with `InvalidConfiguration` for bad distances and with
/// `InvalidMemberState` if any participant lacks a positive speed. Both are
/// checked before any time is computed.
pub fn simulate(participants: &[Member], distances: &[f64]) -> Result<RaceResult> {
    validate_distances(distances)?;

    let speeds = participants
        .iter()
        .map(racing_speed)
        .collect::<Result<Vec<f64>>>()?;

    let lanes: Vec<LaneTime> = participants
        .iter()
        .zip(speeds)
        .enumerate()
        .map(|(idx, (member, speed))| LaneTime {
            lane: idx + 1,
            member: member.id,
            username: member.username.clone(),
            time: distances.iter().map(|d| 2.0 * d / speed).fold(0.0, f64::max),
        })
        .collect();

    let total = lanes.iter().map(|l| l.time).fold(0.0, f64::max);
    Ok(RaceResult { lanes, total })
}

fn racing_speed(member: &Member) -> Result<f64> {
    match member.speed() {
        Some(speed) if speed.is_finite() && speed > 0.0 => Ok(speed),
        Some(speed) => Err(Error::InvalidMemberState(format!(
            "member {} ({}) has non-positive speed {speed}",
            member.id, member.username
        ))),
        None => Err(Error::InvalidMemberState(format!(
            "member {} ({}) is not a duck and cannot race",
            member.id, member.username
        ))),
    }
}

/// Simulate the race, then announce the result to the event's subscribers.
///
/// Nothing is announced when the simulation fails.
pub fn run_race(
    race_name: &str,
    participants: &[Member],
    distances: &[f64],
    subscribers: &EventSubscription,
    snapshot: &Snapshot,
    mailbox: &dyn Mailbox,
) -> Result<RaceResult> {
    let result = simulate(participants, distances)?;

    for lane in &result.lanes {
        tracing::info!(race = race_name, "Duck {} on lane {}: t = {:.3} s", lane.username, lane.lane, lane.time);
    }
    tracing::info!(race = race_name, total = result.total, participants = result.len(), "race finished");

    notify::notify(mailbox, snapshot, subscribers, &result.summary(race_name))?;
    Ok(result)
}
