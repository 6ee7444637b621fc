/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::types::{Pid, QueueLevel};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scheduling engine errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedError {
    #[error("Process {0} has no in-use scheduling record")]
    #[diagnostic(
        code(sched::unknown_process),
        help("The process was never admitted or has already been removed.")
    )]
    UnknownProcess(Pid),

    #[error("Process {0} already has a scheduling record")]
    #[diagnostic(
        code(sched::already_scheduled),
        help("A process must be removed before it can be admitted again.")
    )]
    AlreadyScheduled(Pid),

    #[error("Scheduling record table is full")]
    #[diagnostic(
        code(sched::table_full),
        help("Remove processes or raise the configured record capacity.")
    )]
    TableFull,

    #[error("Requested queue level {requested} is outside 0..{limit}")]
    #[diagnostic(
        code(sched::invalid_priority),
        help("Queue levels are bounded by the number of scheduling queues.")
    )]
    InvalidPriority {
        requested: QueueLevel,
        limit: QueueLevel,
    },

    #[error("Requested quantum must be positive")]
    #[diagnostic(
        code(sched::invalid_quantum),
        help("An in-use record always carries a non-zero time slice.")
    )]
    InvalidQuantum,

    #[error("No usable CPU remains for process {0}")]
    #[diagnostic(
        code(sched::no_cpu_available),
        help("Every alive CPU rejected the process; the record holds no dispatch.")
    )]
    NoCpuAvailable(Pid),

    #[error("Dispatcher rejected process {pid}: {reason}")]
    #[diagnostic(
        code(sched::dispatch_failed),
        help("In-memory record state is kept; the caller decides whether to retry.")
    )]
    DispatchFailed { pid: Pid, reason: String },

    #[error("Failed to arm the periodic rebalance timer: {0}")]
    #[diagnostic(
        code(sched::timer_arm),
        help("Losing the rebalance pass breaks anti-starvation; treat as fatal.")
    )]
    TimerArm(String),

    #[error("Invalid engine configuration: {0}")]
    #[diagnostic(
        code(sched::invalid_config),
        help("Review CPU count, boot CPU, capacity, and quantum settings.")
    )]
    InvalidConfig(String),
}

/// Result type for scheduling operations
///
/// # Must Use
/// Scheduling decisions can fail and must be handled by the caller
pub type Result<T> = std::result::Result<T, SchedError>;
