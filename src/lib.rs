/*!
 * schedd - Userspace Scheduling Policy Engine
 * Decides per-process priority, quantum, and CPU assignment and relays
 * decisions to a trusted low-level dispatcher
 */

pub mod config;
pub mod core;
pub mod cpu;
pub mod dispatch;
pub mod engine;
pub mod policy;
pub mod store;
pub mod tick;

// Re-exports
pub use config::{EngineConfig, RESOURCE_SERVER, SCHEDULER_ID};
pub use crate::core::errors::{Result, SchedError};
pub use crate::core::types::{CpuId, Pid, QueueLevel, Ticks, MIN_USER_QUEUE, NUM_QUEUES, USER_QUEUE};
pub use cpu::CpuTracker;
pub use dispatch::{DispatchChanges, DispatchError, Dispatcher};
pub use engine::{AdmitDecision, AdmitKind, AdmitRequest, SchedEngine};
pub use policy::{queue_for_estimate, smooth_burst, PolicyKind, RequestOutcome};
pub use store::{RecordStore, SchedRecord};
pub use tick::{BalanceCommand, BalanceTask};
