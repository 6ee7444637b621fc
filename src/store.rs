/*!
 * Scheduling Record Store
 * Fixed-capacity slot arena with a pid -> slot reverse index
 */

use crate::core::errors::{Result, SchedError};
use crate::core::types::{
    CpuId, Pid, QueueLevel, Ticks, DEFAULT_BURST_ESTIMATE, DEFAULT_USER_TIME_SLICE,
};
use ahash::AHashMap;
use std::time::Instant;

/// Per-process scheduling state, owned exclusively by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedRecord {
    pub pid: Pid,
    pub parent: Pid,
    pub priority: QueueLevel,
    /// Ceiling on how well this process may ever be scheduled.
    pub max_priority: QueueLevel,
    pub time_slice: Ticks,
    pub cpu: Option<CpuId>,
    /// Exponentially smoothed predicted burst length (shortest-process-next).
    pub burst_estimate: Ticks,
    /// When this process last received the CPU (shortest-process-next).
    pub last_start: Option<Instant>,
}

impl SchedRecord {
    pub fn new(pid: Pid, parent: Pid, max_priority: QueueLevel) -> Self {
        Self {
            pid,
            parent,
            priority: max_priority,
            max_priority,
            time_slice: DEFAULT_USER_TIME_SLICE,
            cpu: None,
            burst_estimate: DEFAULT_BURST_ESTIMATE,
            last_start: None,
        }
    }

    /// The bootstrap process admits itself.
    pub fn is_self_parented(&self) -> bool {
        self.pid == self.parent
    }
}

/// Fixed-capacity table of in-use scheduling records.
///
/// Slots are reused after removal; the reverse index keeps pid lookup O(1).
#[derive(Debug)]
pub struct RecordStore {
    slots: Vec<Option<SchedRecord>>,
    index: AHashMap<Pid, usize>,
}

impl RecordStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            index: AHashMap::with_capacity(capacity),
        }
    }

    /// Whether `pid` can be admitted right now.
    pub fn ensure_vacancy(&self, pid: Pid) -> Result<()> {
        if self.index.contains_key(&pid) {
            return Err(SchedError::AlreadyScheduled(pid));
        }
        if self.index.len() >= self.slots.len() {
            return Err(SchedError::TableFull);
        }
        Ok(())
    }

    /// Place a record in the first free slot.
    pub fn insert(&mut self, record: SchedRecord) -> Result<usize> {
        self.ensure_vacancy(record.pid)?;
        let slot = self
            .slots
            .iter()
            .position(|s| s.is_none())
            .ok_or(SchedError::TableFull)?;
        self.index.insert(record.pid, slot);
        self.slots[slot] = Some(record);
        Ok(slot)
    }

    pub fn get(&self, pid: Pid) -> Option<&SchedRecord> {
        let slot = *self.index.get(&pid)?;
        self.slots[slot].as_ref()
    }

    pub fn get_mut(&mut self, pid: Pid) -> Option<&mut SchedRecord> {
        let slot = *self.index.get(&pid)?;
        self.slots[slot].as_mut()
    }

    /// Release the record for `pid`, freeing its slot for reuse.
    pub fn remove(&mut self, pid: Pid) -> Option<SchedRecord> {
        let slot = self.index.remove(&pid)?;
        self.slots[slot].take()
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.index.contains_key(&pid)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// In-use records in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &SchedRecord> {
        self.slots.iter().filter_map(|s| s.as_ref())
    }

    /// Pids of in-use records in slot order; safe to hold across mutation.
    pub fn pids(&self) -> Vec<Pid> {
        self.slots
            .iter()
            .filter_map(|s| s.as_ref().map(|r| r.pid))
            .collect()
    }
}
