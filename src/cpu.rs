/*!
 * CPU Load Tracker
 * Per-CPU assigned-process counts and availability for placement decisions
 */

use crate::core::errors::{Result, SchedError};
use crate::core::types::{CpuId, Pid};
use log::{info, warn};

#[derive(Debug, Clone, Copy)]
struct CpuState {
    load: u32,
    alive: bool,
}

/// In-memory bookkeeping over CPU load counters.
///
/// This is placement accounting only; actual migration is the dispatcher's
/// job. A CPU marked dead is never revisited.
#[derive(Debug)]
pub struct CpuTracker {
    cpus: Vec<CpuState>,
    boot_cpu: CpuId,
}

impl CpuTracker {
    /// Create a tracker for `count` CPUs, all alive with zero load.
    pub fn new(count: usize, boot_cpu: CpuId) -> Self {
        Self {
            cpus: vec![
                CpuState {
                    load: 0,
                    alive: true
                };
                count
            ],
            boot_cpu,
        }
    }

    /// Choose a CPU for `pid` and reserve a load slot on it.
    ///
    /// Single-CPU systems and privileged processes are pinned to the boot CPU
    /// without touching load counts. Everyone else gets the least-loaded alive
    /// CPU, excluding the boot CPU unless it is the only alive option; ties
    /// break toward the lowest index.
    pub fn pick(&mut self, pid: Pid, privileged: bool) -> Result<CpuId> {
        let boot = self.boot_cpu as usize;

        if self.cpus.len() == 1 || privileged {
            if !self.cpus[boot].alive {
                warn!("boot CPU {} is dead, cannot place pinned process {}", boot, pid);
                return Err(SchedError::NoCpuAvailable(pid));
            }
            return Ok(self.boot_cpu);
        }

        let mut choice: Option<usize> = None;
        let mut best = u32::MAX;
        for (idx, cpu) in self.cpus.iter().enumerate() {
            if !cpu.alive || idx == boot {
                continue;
            }
            if cpu.load < best {
                best = cpu.load;
                choice = Some(idx);
            }
        }

        let idx = match choice {
            Some(idx) => idx,
            // Boot CPU is the only alive option left
            None if self.cpus[boot].alive => boot,
            None => {
                warn!("no alive CPU remains for process {}", pid);
                return Err(SchedError::NoCpuAvailable(pid));
            }
        };

        self.cpus[idx].load += 1;
        Ok(idx as CpuId)
    }

    /// Permanently exclude a CPU from placement.
    pub fn mark_dead(&mut self, cpu: CpuId) {
        if let Some(state) = self.cpus.get_mut(cpu as usize) {
            if state.alive {
                info!("CPU {} marked dead ({} processes were assigned)", cpu, state.load);
                state.alive = false;
                state.load = 0;
            }
        }
    }

    /// Give back the load slot taken by `pick` when a process is removed.
    pub fn release(&mut self, cpu: CpuId, privileged: bool) {
        if self.cpus.len() == 1 || privileged {
            return;
        }
        if let Some(state) = self.cpus.get_mut(cpu as usize) {
            if state.alive {
                state.load = state.load.saturating_sub(1);
            }
        }
    }

    /// Number of CPUs still eligible for placement.
    pub fn alive_count(&self) -> usize {
        self.cpus.iter().filter(|c| c.alive).count()
    }

    /// Current load counter for a CPU, if it exists.
    pub fn load(&self, cpu: CpuId) -> Option<u32> {
        self.cpus.get(cpu as usize).map(|c| c.load)
    }

    pub fn boot_cpu(&self) -> CpuId {
        self.boot_cpu
    }
}
