//! Update cadence
//!
//! Decides how many simulation updates each outer-loop iteration runs.

use serde::{Deserialize, Serialize};

use crate::consts::{FIXED_STEP_MS, LEGACY_START_DELAY_MS, MAX_SUBSTEPS};

/// How updates are scheduled against wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    /// Nothing runs until `start_delay_ms` after the loop starts; from then on
    /// every iteration runs one update and draws, with no further gating.
    /// Ball speed follows the frame rate in this mode.
    Legacy { start_delay_ms: u64 },
    /// Fixed timestep accumulator
    Fixed { step_ms: u64, max_substeps: u32 },
}

impl Default for Cadence {
    fn default() -> Self {
        Cadence::Fixed {
            step_ms: FIXED_STEP_MS,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

impl Cadence {
    pub fn legacy() -> Self {
        Cadence::Legacy {
            start_delay_ms: LEGACY_START_DELAY_MS,
        }
    }
}

/// Tracks elapsed time for a [`Cadence`]
#[derive(Debug, Clone)]
pub struct Pacer {
    cadence: Cadence,
    /// Start mark, taken on the first query
    start_ms: Option<u64>,
    last_ms: u64,
    accumulator_ms: u64,
}

impl Pacer {
    pub fn new(cadence: Cadence) -> Self {
        Self {
            cadence,
            start_ms: None,
            last_ms: 0,
            accumulator_ms: 0,
        }
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// Number of updates to run for a frame observed at `now_ms`
    pub fn updates_due(&mut self, now_ms: u64) -> u32 {
        let start = match self.start_ms {
            Some(start) => start,
            None => {
                self.start_ms = Some(now_ms);
                self.last_ms = now_ms;
                now_ms
            }
        };

        match self.cadence {
            Cadence::Legacy { start_delay_ms } => {
                u32::from(now_ms.saturating_sub(start) > start_delay_ms)
            }
            Cadence::Fixed {
                step_ms,
                max_substeps,
            } => {
                let step_ms = step_ms.max(1);
                self.accumulator_ms += now_ms.saturating_sub(self.last_ms);
                self.last_ms = now_ms;

                let due = self.accumulator_ms / step_ms;
                self.accumulator_ms %= step_ms;
                if due > u64::from(max_substeps) {
                    log::debug!(
                        "Dropping {} updates of backlog",
                        due - u64::from(max_substeps)
                    );
                }
                due.min(u64::from(max_substeps)) as u32
            }
        }
    }

    /// Whether the frame that ran `updates` updates should be drawn
    pub fn should_draw(&self, updates: u32) -> bool {
        match self.cadence {
            Cadence::Legacy { .. } => updates > 0,
            Cadence::Fixed { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_gate_never_resets() {
        let mut pacer = Pacer::new(Cadence::legacy());
        assert_eq!(pacer.updates_due(1_000), 0);
        assert_eq!(pacer.updates_due(1_150), 0);
        // Exactly at the threshold is still gated
        assert_eq!(pacer.updates_due(1_300), 0);
        assert!(!pacer.should_draw(0));

        // Past it, every iteration runs once regardless of spacing
        assert_eq!(pacer.updates_due(1_301), 1);
        assert_eq!(pacer.updates_due(1_301), 1);
        assert_eq!(pacer.updates_due(5_000), 1);
        assert!(pacer.should_draw(1));
    }

    #[test]
    fn test_fixed_step_counts_elapsed_steps() {
        let mut pacer = Pacer::new(Cadence::Fixed {
            step_ms: 4,
            max_substeps: 100,
        });
        assert_eq!(pacer.updates_due(50), 0);
        assert_eq!(pacer.updates_due(58), 2);
        // Remainder carries over
        assert_eq!(pacer.updates_due(61), 0);
        assert_eq!(pacer.updates_due(62), 1);
        assert!(pacer.should_draw(0));
    }

    #[test]
    fn test_fixed_step_caps_backlog() {
        let mut pacer = Pacer::new(Cadence::Fixed {
            step_ms: 1,
            max_substeps: 10,
        });
        pacer.updates_due(0);
        assert_eq!(pacer.updates_due(1_000), 10);
        // Backlog was dropped, not deferred
        assert_eq!(pacer.updates_due(1_001), 1);
    }

    #[test]
    fn test_zero_step_treated_as_one_ms() {
        let mut pacer = Pacer::new(Cadence::Fixed {
            step_ms: 0,
            max_substeps: 100,
        });
        pacer.updates_due(10);
        assert_eq!(pacer.updates_due(15), 5);
    }

    #[test]
    fn test_clock_going_backwards_runs_nothing() {
        let mut pacer = Pacer::new(Cadence::default());
        pacer.updates_due(100);
        assert_eq!(pacer.updates_due(90), 0);
    }
}
