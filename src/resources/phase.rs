//! Cloud journey phases and the timer chain that advances them.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::resources::config::ConfigError;

/// Stage of the cloud transition. Only ever moves forward within a session.
#[derive(States, Default, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum CloudPhase {
    /// The room and bookshelf are shown.
    #[default]
    Idle,
    /// Clouds bloom until the room is hidden.
    Filling,
    /// Clouds stream past.
    Traveling,
    /// Clouds part over the dream world.
    Arrived,
}

impl CloudPhase {
    /// Position in the forward ordering.
    pub fn rank(self) -> u8 {
        match self {
            CloudPhase::Idle => 0,
            CloudPhase::Filling => 1,
            CloudPhase::Traveling => 2,
            CloudPhase::Arrived => 3,
        }
    }

    pub fn is_after(self, other: CloudPhase) -> bool {
        self.rank() > other.rank()
    }
}

/// Offsets in seconds, measured from the trigger, at which each phase begins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseSchedule {
    pub filling: f32,
    pub traveling: f32,
    pub arrived: f32,
}

impl Default for PhaseSchedule {
    fn default() -> Self {
        Self {
            filling: 1.0,
            traveling: 4.0,
            arrived: 9.0,
        }
    }
}

impl PhaseSchedule {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.filling < 0.0 {
            return Err(ConfigError::invalid("phase offsets must not be negative"));
        }
        if self.traveling < self.filling || self.arrived < self.traveling {
            return Err(ConfigError::invalid(format!(
                "phase offsets must be non-decreasing, got {} / {} / {}",
                self.filling, self.traveling, self.arrived
            )));
        }
        Ok(())
    }

    /// Phase that should be showing `elapsed` seconds after the trigger.
    pub fn phase_at(&self, elapsed: f32) -> CloudPhase {
        if elapsed >= self.arrived {
            CloudPhase::Arrived
        } else if elapsed >= self.traveling {
            CloudPhase::Traveling
        } else if elapsed >= self.filling {
            CloudPhase::Filling
        } else {
            CloudPhase::Idle
        }
    }
}

/// Drives the one-shot `Idle -> Filling -> Traveling -> Arrived` chain.
///
/// The sequencer only records when it was triggered; phases are derived from
/// the elapsed time on each poll, so a late poll jumps straight to the
/// furthest phase reached.
#[derive(Resource, Debug, Clone, Default)]
pub struct PhaseSequencer {
    schedule: PhaseSchedule,
    triggered_at: Option<f32>,
    phase: CloudPhase,
}

impl PhaseSequencer {
    pub fn new(schedule: PhaseSchedule) -> Self {
        Self {
            schedule,
            triggered_at: None,
            phase: CloudPhase::Idle,
        }
    }

    /// Starts the sequence at time `now` (seconds).
    /// Returns `false` without effect if a sequence was already started.
    pub fn trigger(&mut self, now: f32) -> bool {
        if self.triggered_at.is_some() {
            return false;
        }
        self.triggered_at = Some(now);
        true
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered_at.is_some()
    }

    pub fn phase(&self) -> CloudPhase {
        self.phase
    }

    /// Seconds since the trigger, if triggered.
    pub fn elapsed(&self, now: f32) -> Option<f32> {
        self.triggered_at.map(|t| (now - t).max(0.0))
    }

    /// Advances to the phase due at `now`. Returns the new phase when it
    /// changed.
    pub fn poll(&mut self, now: f32) -> Option<CloudPhase> {
        let elapsed = self.elapsed(now)?;
        let due = self.schedule.phase_at(elapsed);
        if due.is_after(self.phase) {
            self.phase = due;
            Some(due)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_until_triggered() {
        let mut seq = PhaseSequencer::new(PhaseSchedule::default());
        assert_eq!(seq.poll(100.0), None);
        assert_eq!(seq.phase(), CloudPhase::Idle);
    }

    #[test]
    fn test_advances_at_offsets() {
        let mut seq = PhaseSequencer::new(PhaseSchedule::default());
        assert!(seq.trigger(10.0));
        assert_eq!(seq.poll(10.5), None);
        assert_eq!(seq.poll(11.0), Some(CloudPhase::Filling));
        assert_eq!(seq.poll(13.9), None);
        assert_eq!(seq.poll(14.0), Some(CloudPhase::Traveling));
        assert_eq!(seq.poll(18.99), None);
        assert_eq!(seq.poll(19.0), Some(CloudPhase::Arrived));
        assert_eq!(seq.poll(50.0), None);
        assert_eq!(seq.phase(), CloudPhase::Arrived);
    }

    #[test]
    fn test_retrigger_is_noop() {
        let mut seq = PhaseSequencer::new(PhaseSchedule::default());
        assert!(seq.trigger(0.0));
        seq.poll(2.0);
        assert!(!seq.trigger(5.0));
        // First trigger time still applies.
        assert_eq!(seq.poll(4.0), Some(CloudPhase::Traveling));
    }

    #[test]
    fn test_retrigger_before_first_phase_is_noop() {
        let mut seq = PhaseSequencer::new(PhaseSchedule::default());
        assert!(seq.trigger(0.0));
        assert!(!seq.trigger(0.5));
        assert_eq!(seq.poll(1.0), Some(CloudPhase::Filling));
    }

    #[test]
    fn test_late_poll_jumps_forward() {
        let mut seq = PhaseSequencer::new(PhaseSchedule::default());
        seq.trigger(0.0);
        assert_eq!(seq.poll(30.0), Some(CloudPhase::Arrived));
    }

    #[test]
    fn test_never_moves_backward() {
        let mut seq = PhaseSequencer::new(PhaseSchedule::default());
        seq.trigger(10.0);
        assert_eq!(seq.poll(15.0), Some(CloudPhase::Traveling));
        // A clock sample from before the trigger must not rewind the phase.
        assert_eq!(seq.poll(9.0), None);
        assert_eq!(seq.phase(), CloudPhase::Traveling);
    }

    #[test]
    fn test_schedule_validation() {
        assert!(PhaseSchedule::default().validate().is_ok());
        let equal = PhaseSchedule { filling: 1.0, traveling: 1.0, arrived: 1.0 };
        assert!(equal.validate().is_ok());
        let backwards = PhaseSchedule { filling: 2.0, traveling: 1.0, arrived: 3.0 };
        assert!(backwards.validate().is_err());
        let negative = PhaseSchedule { filling: -1.0, traveling: 1.0, arrived: 3.0 };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_rank_order() {
        assert!(CloudPhase::Filling.is_after(CloudPhase::Idle));
        assert!(CloudPhase::Arrived.is_after(CloudPhase::Traveling));
        assert!(!CloudPhase::Idle.is_after(CloudPhase::Idle));
    }
}
