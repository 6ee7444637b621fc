/*!
 * Engine Configuration
 * Startup-time selection of policy and machine parameters
 */

use crate::core::errors::{Result, SchedError};
use crate::core::types::{
    CpuId, Pid, Ticks, DEFAULT_BALANCE_INTERVAL_SECS, DEFAULT_USER_TIME_SLICE,
};
use crate::policy::PolicyKind;
use serde::Deserialize;
use std::time::Duration;

/// Well-known identity of the resource-management server; processes it admits
/// are treated as privileged.
pub const RESOURCE_SERVER: Pid = 2;

/// Identity this engine reports to the admitter as the owning scheduler.
pub const SCHEDULER_ID: Pid = 4;

/// Process-wide engine configuration, fixed once the engine is built.
///
/// There is deliberately no runtime policy toggle: the active policy is an
/// explicit construction-time decision.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Active scheduling policy
    pub policy: PolicyKind,
    /// Number of CPUs the dispatcher exposes
    pub cpu_count: usize,
    /// Bootstrap CPU; privileged processes are pinned here
    pub boot_cpu: CpuId,
    /// Scheduling record table size
    pub capacity: usize,
    /// Quantum for processes admitted without one
    pub default_quantum: Ticks,
    /// Seconds between periodic rebalance passes
    pub balance_interval_secs: u64,
    /// Identity whose children are privileged
    pub resource_server: Pid,
    /// When true, privileged processes receive normal feedback/estimation
    /// treatment instead of the explicit-priority bypass
    pub privileged_aging: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Feedback,
            cpu_count: 1,
            boot_cpu: 0,
            capacity: 256,
            default_quantum: DEFAULT_USER_TIME_SLICE,
            balance_interval_secs: DEFAULT_BALANCE_INTERVAL_SECS,
            resource_server: RESOURCE_SERVER,
            privileged_aging: false,
        }
    }
}

impl EngineConfig {
    pub fn new(policy: PolicyKind) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn with_cpus(mut self, cpu_count: usize, boot_cpu: CpuId) -> Self {
        self.cpu_count = cpu_count;
        self.boot_cpu = boot_cpu;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_privileged_aging(mut self, enabled: bool) -> Self {
        self.privileged_aging = enabled;
        self
    }

    pub fn balance_interval(&self) -> Duration {
        Duration::from_secs(self.balance_interval_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cpu_count == 0 {
            return Err(SchedError::InvalidConfig("cpu_count must be at least 1".into()));
        }
        if self.boot_cpu as usize >= self.cpu_count {
            return Err(SchedError::InvalidConfig(format!(
                "boot_cpu {} is outside 0..{}",
                self.boot_cpu, self.cpu_count
            )));
        }
        if self.capacity == 0 {
            return Err(SchedError::InvalidConfig("capacity must be at least 1".into()));
        }
        if self.default_quantum == 0 {
            return Err(SchedError::InvalidConfig("default_quantum must be positive".into()));
        }
        Ok(())
    }
}
