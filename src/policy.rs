/*!
 * Policy Strategy
 * The four scheduling policies as one tagged enum over shared record state
 */

use crate::core::types::{
    QueueLevel, Ticks, BURST_SMOOTHING_ALPHA, MAX_BURST_ESTIMATE, MIN_BURST_ESTIMATE,
    MIN_USER_QUEUE, USER_QUEUE,
};
use crate::store::SchedRecord;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Active scheduling policy, fixed for the lifetime of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    /// First-come-first-served: one fixed user queue, priority never changes
    Fcfs,
    /// Round-robin: fixed user queue, quantum expiry resets queue and slice
    RoundRobin,
    /// Multilevel feedback: demote on quantum expiry, promote on rebalance
    Feedback,
    /// Shortest-process-next with exponential burst estimation
    ShortestNext,
}

/// What a priority-change request did to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Accepted but deliberately not applied (FCFS contract)
    Ignored,
    /// Record was mutated and needs a dispatch
    Applied,
}

impl PolicyKind {
    /// Parse from string representation
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "fcfs" | "first_come_first_served" => Ok(Self::Fcfs),
            "round_robin" | "roundrobin" | "rr" => Ok(Self::RoundRobin),
            "feedback" | "multilevel_feedback" | "mlfq" => Ok(Self::Feedback),
            "shortest_next" | "spn" => Ok(Self::ShortestNext),
            _ => Err(format!(
                "Invalid policy '{}'. Valid: fcfs, round_robin, feedback, shortest_next",
                s
            )),
        }
    }

    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::RoundRobin => "round_robin",
            Self::Feedback => "feedback",
            Self::ShortestNext => "shortest_next",
        }
    }

    /// Policies that pin every user process to the fixed user queue.
    pub const fn is_fixed(&self) -> bool {
        matches!(self, Self::Fcfs | Self::RoundRobin)
    }

    /// Finalize placement for an explicitly admitted record.
    ///
    /// The admitter's quantum is already on the record; only queue levels are
    /// decided here.
    pub fn place_explicit(&self, record: &mut SchedRecord, privileged: bool) {
        if self.is_fixed() && record.max_priority >= USER_QUEUE {
            record.max_priority = USER_QUEUE;
        }
        record.priority = match self {
            Self::Fcfs | Self::RoundRobin | Self::Feedback => record.max_priority,
            Self::ShortestNext => {
                if privileged {
                    record.max_priority
                } else {
                    spn_priority(record)
                }
            }
        };
    }

    /// Finalize placement for a record inheriting from its admitting parent.
    pub fn place_inherited(
        &self,
        record: &mut SchedRecord,
        parent: &SchedRecord,
        parent_privileged: bool,
        privileged: bool,
        default_quantum: Ticks,
    ) {
        match self {
            Self::Fcfs | Self::RoundRobin => {
                if record.max_priority >= USER_QUEUE {
                    record.max_priority = USER_QUEUE;
                }
                record.priority = record.max_priority;
                record.time_slice = default_quantum;
            }
            Self::Feedback => {
                record.priority = parent.priority.max(record.max_priority);
                record.time_slice = parent.time_slice;
            }
            Self::ShortestNext => {
                record.time_slice = parent.time_slice;
                if !parent_privileged {
                    record.burst_estimate = parent.burst_estimate;
                }
                record.priority = if privileged {
                    record.max_priority
                } else {
                    spn_priority(record)
                };
            }
        }
    }

    /// Adjust the record after its quantum ran out.
    pub fn on_quantum_expired(
        &self,
        record: &mut SchedRecord,
        exempt: bool,
        default_quantum: Ticks,
    ) {
        match self {
            Self::Fcfs => {}
            Self::RoundRobin => {
                record.priority = USER_QUEUE;
                record.time_slice = default_quantum;
            }
            Self::Feedback => {
                if !exempt && record.priority < MIN_USER_QUEUE {
                    record.priority += 1;
                }
            }
            Self::ShortestNext => {
                if !exempt {
                    record.burst_estimate = smooth_burst(record.burst_estimate, record.time_slice);
                    record.priority = spn_priority(record);
                }
            }
        }
    }

    /// Apply an explicit priority-change request to the record.
    pub fn on_priority_request(
        &self,
        record: &mut SchedRecord,
        level: QueueLevel,
        default_quantum: Ticks,
    ) -> RequestOutcome {
        match self {
            Self::Fcfs => RequestOutcome::Ignored,
            Self::RoundRobin => {
                record.priority = USER_QUEUE;
                record.time_slice = default_quantum;
                RequestOutcome::Applied
            }
            Self::Feedback | Self::ShortestNext => {
                record.max_priority = level;
                record.priority = level;
                RequestOutcome::Applied
            }
        }
    }

    /// Periodic rebalance pass over one record; true when it needs a dispatch.
    pub fn on_tick(&self, record: &mut SchedRecord, exempt: bool) -> bool {
        match self {
            Self::Fcfs | Self::RoundRobin => false,
            Self::Feedback => {
                if !exempt && record.priority > record.max_priority {
                    record.priority -= 1;
                    true
                } else {
                    false
                }
            }
            Self::ShortestNext => {
                if exempt {
                    return false;
                }
                let decayed =
                    ((record.burst_estimate as u64 * 95 / 100) as Ticks).max(MIN_BURST_ESTIMATE);
                if decayed == record.burst_estimate {
                    return false;
                }
                record.burst_estimate = decayed;
                record.priority = spn_priority(record);
                true
            }
        }
    }

    /// Fold the last observed burst into the estimate at removal time.
    pub fn observe_final_burst(&self, record: &mut SchedRecord, elapsed: Ticks) {
        if matches!(self, Self::ShortestNext) && elapsed > 0 {
            record.burst_estimate = smooth_burst(record.burst_estimate, elapsed);
        }
    }
}

impl Serialize for PolicyKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PolicyKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Exponentially smoothed burst estimate, clamped to the valid band.
///
/// Integer arithmetic: `(alpha * actual + (100 - alpha) * old) / 100` with the
/// observed burst floored to 1 to avoid non-positive inputs.
pub fn smooth_burst(old: Ticks, actual: Ticks) -> Ticks {
    let actual = actual.max(1) as u64;
    let smoothed =
        (BURST_SMOOTHING_ALPHA * actual + (100 - BURST_SMOOTHING_ALPHA) * old as u64) / 100;
    smoothed.clamp(MIN_BURST_ESTIMATE as u64, MAX_BURST_ESTIMATE as u64) as Ticks
}

/// Total, deterministic map from burst estimate to user queue level.
pub fn queue_for_estimate(estimate: Ticks) -> QueueLevel {
    match estimate {
        0..=20 => USER_QUEUE,
        21..=50 => USER_QUEUE + 1,
        51..=100 => USER_QUEUE + 2,
        101..=200 => USER_QUEUE + 3,
        _ => MIN_USER_QUEUE,
    }
}

/// Estimate-derived level, never better than the record's ceiling.
fn spn_priority(record: &SchedRecord) -> QueueLevel {
    queue_for_estimate(record.burst_estimate).max(record.max_priority)
}
