/*!
 * Dispatcher Seam
 * Interface to the trusted low-level dispatcher that applies decisions
 */

use crate::core::types::{CpuId, Pid, QueueLevel, Ticks};
use thiserror::Error;

/// The changed subset of scheduling parameters for one decision.
///
/// `None` is the "no change" sentinel: the dispatcher leaves that parameter
/// alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchChanges {
    pub priority: Option<QueueLevel>,
    pub quantum: Option<Ticks>,
    pub cpu: Option<CpuId>,
    /// Process has a worse-than-default priority ceiling
    pub niced: bool,
}

impl DispatchChanges {
    /// Priority and quantum only; the process stays on its CPU.
    pub fn local(priority: QueueLevel, quantum: Ticks, niced: bool) -> Self {
        Self {
            priority: Some(priority),
            quantum: Some(quantum),
            cpu: None,
            niced,
        }
    }

    /// All three parameters, used at admission.
    pub fn full(priority: QueueLevel, quantum: Ticks, cpu: CpuId, niced: bool) -> Self {
        Self {
            priority: Some(priority),
            quantum: Some(quantum),
            cpu: Some(cpu),
            niced,
        }
    }
}

/// Failures reported by the low-level dispatcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The offered CPU is no longer usable; the engine marks it dead and
    /// retries on another
    #[error("chosen CPU is not usable")]
    CpuRejected,
    /// Any other dispatcher failure, surfaced to the caller
    #[error("dispatcher failure: {0}")]
    Other(String),
}

/// External collaborator that preempts/resumes processes at the kernel level.
pub trait Dispatcher: Send {
    /// One-time ownership handshake at admission, before the first dispatch.
    fn take_over(&mut self, pid: Pid) -> Result<(), DispatchError>;

    /// Apply the changed parameters for `pid`.
    fn dispatch(&mut self, pid: Pid, changes: &DispatchChanges) -> Result<(), DispatchError>;
}
