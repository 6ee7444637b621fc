/*!
 * Scheduling Engine
 * Event handlers orchestrating the record store, policy, CPU tracker, and
 * dispatcher under the common dispatch protocol
 */

use crate::config::{EngineConfig, SCHEDULER_ID};
use crate::core::errors::{Result, SchedError};
use crate::core::types::{CpuId, Pid, QueueLevel, Ticks, NUM_QUEUES, USER_QUEUE};
use crate::cpu::CpuTracker;
use crate::dispatch::{DispatchChanges, DispatchError, Dispatcher};
use crate::policy::RequestOutcome;
use crate::store::{RecordStore, SchedRecord};
use log::{error, info, trace, warn};
use std::time::Instant;

/// How a process is being admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmitKind {
    /// Scheduling parameters supplied by the admitter
    Explicit,
    /// Scheduling parameters inherited from the admitting parent
    Inherited,
}

/// Inbound admission event.
#[derive(Debug, Clone)]
pub struct AdmitRequest {
    pub pid: Pid,
    pub parent: Pid,
    pub max_priority: QueueLevel,
    pub quantum: Option<Ticks>,
    pub kind: AdmitKind,
}

/// Reply to a successful admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmitDecision {
    /// Identity of the engine now owning the process
    pub scheduler: Pid,
    pub priority: QueueLevel,
    pub quantum: Ticks,
    pub cpu: CpuId,
}

/// Which parameter subset a dispatch carries.
#[derive(Debug, Clone, Copy)]
enum ChangeScope {
    /// Priority and quantum only
    Local,
    /// Priority, quantum, and a freshly picked CPU
    Full,
}

/// The policy decision layer: consumes scheduling events one at a time and
/// relays decisions to the dispatcher.
///
/// Single-threaded by contract; every handler runs to completion before the
/// next event is accepted, so no locking happens here.
pub struct SchedEngine<D: Dispatcher> {
    config: EngineConfig,
    store: RecordStore,
    cpus: CpuTracker,
    dispatcher: D,
}

impl<D: Dispatcher> SchedEngine<D> {
    pub fn new(config: EngineConfig, dispatcher: D) -> Result<Self> {
        config.validate()?;
        info!(
            "scheduling engine initialized: policy={}, cpus={}, capacity={}",
            config.policy.as_str(),
            config.cpu_count,
            config.capacity
        );
        Ok(Self {
            store: RecordStore::new(config.capacity),
            cpus: CpuTracker::new(config.cpu_count, config.boot_cpu),
            config,
            dispatcher,
        })
    }

    /// Assign scheduler ownership of a process.
    ///
    /// The record is committed before the first dispatch; if every CPU rejects
    /// the process the record stays in the table without a successful
    /// dispatch, and the caller decides what to do with it.
    pub fn admit(&mut self, request: AdmitRequest) -> Result<AdmitDecision> {
        if request.max_priority >= NUM_QUEUES {
            return Err(SchedError::InvalidPriority {
                requested: request.max_priority,
                limit: NUM_QUEUES,
            });
        }
        let quantum = request.quantum.unwrap_or(self.config.default_quantum);
        if quantum == 0 {
            return Err(SchedError::InvalidQuantum);
        }
        self.store.ensure_vacancy(request.pid)?;

        let mut record = SchedRecord::new(request.pid, request.parent, request.max_priority);
        record.time_slice = quantum;
        let exempt = self.is_exempt(request.parent);

        // The self-admitting bootstrap process is seeded onto the boot CPU at
        // the fixed user queue before policy placement runs.
        if record.is_self_parented() {
            record.priority = USER_QUEUE;
            record.time_slice = self.config.default_quantum;
            record.cpu = Some(self.config.boot_cpu);
        }

        match request.kind {
            AdmitKind::Explicit => self.config.policy.place_explicit(&mut record, exempt),
            AdmitKind::Inherited => {
                let parent = self
                    .store
                    .get(request.parent)
                    .ok_or(SchedError::UnknownProcess(request.parent))?;
                let parent_exempt = self.is_exempt(parent.parent);
                self.config.policy.place_inherited(
                    &mut record,
                    parent,
                    parent_exempt,
                    exempt,
                    self.config.default_quantum,
                );
            }
        }
        debug_assert!(record.priority < NUM_QUEUES);
        debug_assert!(record.time_slice > 0);

        self.dispatcher
            .take_over(request.pid)
            .map_err(|err| SchedError::DispatchFailed {
                pid: request.pid,
                reason: err.to_string(),
            })?;

        info!(
            "admitted process {} (parent {}, {:?}, prio {}, quantum {})",
            request.pid, request.parent, request.kind, record.priority, record.time_slice
        );
        self.store.insert(record)?;
        self.dispatch_record(request.pid, ChangeScope::Full)?;

        let record = self
            .store
            .get(request.pid)
            .ok_or(SchedError::UnknownProcess(request.pid))?;
        let cpu = record.cpu.ok_or(SchedError::NoCpuAvailable(request.pid))?;
        Ok(AdmitDecision {
            scheduler: SCHEDULER_ID,
            priority: record.priority,
            quantum: record.time_slice,
            cpu,
        })
    }

    /// Release scheduler ownership; returns the final record state.
    pub fn remove(&mut self, pid: Pid) -> Result<SchedRecord> {
        let mut record = self
            .store
            .remove(pid)
            .ok_or(SchedError::UnknownProcess(pid))?;
        let privileged = record.parent == self.config.resource_server;

        // Shortest-process-next folds the last observed burst into the
        // estimate before the record is discarded.
        if !self.is_exempt(record.parent) {
            if let Some(start) = record.last_start {
                let elapsed = start.elapsed().as_millis().min(u128::from(Ticks::MAX)) as Ticks;
                self.config.policy.observe_final_burst(&mut record, elapsed);
            }
        }

        if let Some(cpu) = record.cpu {
            self.cpus.release(cpu, privileged);
        }
        info!("removed process {} (final burst estimate {})", pid, record.burst_estimate);
        Ok(record)
    }

    /// A dispatched quantum ran out; requeue the process per policy.
    pub fn quantum_expired(&mut self, pid: Pid) -> Result<()> {
        let policy = self.config.policy;
        let default_quantum = self.config.default_quantum;
        let resource_server = self.config.resource_server;
        let aging = self.config.privileged_aging;

        let record = self
            .store
            .get_mut(pid)
            .ok_or(SchedError::UnknownProcess(pid))?;
        let exempt = record.parent == resource_server && !aging;
        policy.on_quantum_expired(record, exempt, default_quantum);
        trace!(
            "quantum expired for process {}: prio {}, quantum {}",
            pid,
            record.priority,
            record.time_slice
        );
        self.dispatch_record(pid, ChangeScope::Local)
    }

    /// Explicit priority-change request from a trusted caller.
    ///
    /// On dispatch failure the queue levels are rolled back; a CPU pick that
    /// already happened is not, matching the at-least-once nature of CPU
    /// assignment.
    pub fn set_priority(&mut self, pid: Pid, level: QueueLevel) -> Result<()> {
        if level >= NUM_QUEUES {
            return Err(SchedError::InvalidPriority {
                requested: level,
                limit: NUM_QUEUES,
            });
        }
        let policy = self.config.policy;
        let default_quantum = self.config.default_quantum;

        let record = self
            .store
            .get_mut(pid)
            .ok_or(SchedError::UnknownProcess(pid))?;
        let saved = (record.priority, record.max_priority);
        if policy.on_priority_request(record, level, default_quantum) == RequestOutcome::Ignored {
            return Ok(());
        }

        match self.dispatch_record(pid, ChangeScope::Local) {
            Ok(()) => Ok(()),
            Err(err) => {
                if let Some(record) = self.store.get_mut(pid) {
                    record.priority = saved.0;
                    record.max_priority = saved.1;
                }
                warn!(
                    "priority change to {} for process {} rolled back after dispatch failure",
                    level, pid
                );
                Err(err)
            }
        }
    }

    /// Periodic anti-starvation pass over every in-use record.
    ///
    /// Dispatch failures are logged and skipped; the pass always visits every
    /// record. Returns the pids that were re-dispatched.
    pub fn rebalance(&mut self) -> Vec<Pid> {
        let policy = self.config.policy;
        let resource_server = self.config.resource_server;
        let aging = self.config.privileged_aging;

        let mut dispatched = Vec::new();
        for pid in self.store.pids() {
            let Some(record) = self.store.get_mut(pid) else {
                continue;
            };
            let exempt = record.parent == resource_server && !aging;
            if !policy.on_tick(record, exempt) {
                continue;
            }
            match self.dispatch_record(pid, ChangeScope::Local) {
                Ok(()) => dispatched.push(pid),
                Err(err) => warn!("rebalance dispatch failed for process {}: {}", pid, err),
            }
        }
        if !dispatched.is_empty() {
            trace!("rebalance re-dispatched {} processes", dispatched.len());
        }
        dispatched
    }

    /// Common dispatch protocol shared by every state-changing handler.
    ///
    /// A `Full` dispatch picks a CPU and, on rejection, marks it dead and
    /// retries until a CPU accepts or none remains alive.
    fn dispatch_record(&mut self, pid: Pid, scope: ChangeScope) -> Result<()> {
        let (mut changes, privileged) = {
            let record = self.store.get(pid).ok_or(SchedError::UnknownProcess(pid))?;
            let niced = record.max_priority > USER_QUEUE;
            (
                DispatchChanges::local(record.priority, record.time_slice, niced),
                record.parent == self.config.resource_server,
            )
        };

        match scope {
            ChangeScope::Local => {
                if let Err(err) = self.dispatcher.dispatch(pid, &changes) {
                    error!(
                        "dispatch failed for process {} (prio {:?}, quantum {:?}): {}",
                        pid, changes.priority, changes.quantum, err
                    );
                    return Err(SchedError::DispatchFailed {
                        pid,
                        reason: err.to_string(),
                    });
                }
            }
            ChangeScope::Full => loop {
                let cpu = self.cpus.pick(pid, privileged)?;
                changes.cpu = Some(cpu);
                match self.dispatcher.dispatch(pid, &changes) {
                    Ok(()) => {
                        if let Some(record) = self.store.get_mut(pid) {
                            record.cpu = Some(cpu);
                        }
                        break;
                    }
                    Err(DispatchError::CpuRejected) => {
                        warn!("CPU {} rejected process {}, marking dead and retrying", cpu, pid);
                        self.cpus.mark_dead(cpu);
                    }
                    Err(err) => {
                        // Give back the reservation taken by pick; the record
                        // never learned about this CPU
                        self.cpus.release(cpu, privileged);
                        error!(
                            "dispatch failed for process {} on CPU {}: {}",
                            pid, cpu, err
                        );
                        return Err(SchedError::DispatchFailed {
                            pid,
                            reason: err.to_string(),
                        });
                    }
                }
            },
        }

        if let Some(record) = self.store.get_mut(pid) {
            record.last_start = Some(Instant::now());
        }
        Ok(())
    }

    fn is_exempt(&self, parent: Pid) -> bool {
        parent == self.config.resource_server && !self.config.privileged_aging
    }

    pub fn record(&self, pid: Pid) -> Option<&SchedRecord> {
        self.store.get(pid)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cpu_tracker(&self) -> &CpuTracker {
        &self.cpus
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{DEFAULT_BURST_ESTIMATE, MIN_USER_QUEUE};
    use crate::policy::PolicyKind;
    use std::collections::HashSet;

    #[derive(Default)]
    struct FakeDispatcher {
        calls: Vec<(Pid, DispatchChanges)>,
        takeovers: Vec<Pid>,
        reject_cpus: HashSet<CpuId>,
        fail_next: Option<DispatchError>,
    }

    impl Dispatcher for FakeDispatcher {
        fn take_over(&mut self, pid: Pid) -> std::result::Result<(), DispatchError> {
            self.takeovers.push(pid);
            Ok(())
        }

        fn dispatch(
            &mut self,
            pid: Pid,
            changes: &DispatchChanges,
        ) -> std::result::Result<(), DispatchError> {
            self.calls.push((pid, *changes));
            if let Some(err) = self.fail_next.take() {
                return Err(err);
            }
            if let Some(cpu) = changes.cpu {
                if self.reject_cpus.contains(&cpu) {
                    return Err(DispatchError::CpuRejected);
                }
            }
            Ok(())
        }
    }

    fn engine(policy: PolicyKind) -> SchedEngine<FakeDispatcher> {
        SchedEngine::new(EngineConfig::new(policy), FakeDispatcher::default()).unwrap()
    }

    fn user_admit(pid: Pid) -> AdmitRequest {
        AdmitRequest {
            pid,
            parent: 1,
            max_priority: USER_QUEUE,
            quantum: Some(200),
            kind: AdmitKind::Explicit,
        }
    }

    #[test]
    fn test_admit_establishes_invariants() {
        let mut engine = engine(PolicyKind::Feedback);
        let decision = engine.admit(user_admit(10)).unwrap();
        assert_eq!(decision.scheduler, SCHEDULER_ID);
        assert_eq!(decision.priority, USER_QUEUE);
        assert_eq!(decision.quantum, 200);

        let record = engine.record(10).unwrap();
        assert!(record.priority >= record.max_priority);
        assert!(record.priority < NUM_QUEUES);
        assert!(record.max_priority < NUM_QUEUES);
        assert!(record.time_slice > 0);
        assert_eq!(engine.dispatcher().takeovers, vec![10]);
    }

    #[test]
    fn test_admit_rejects_invalid_ceiling() {
        let mut engine = engine(PolicyKind::Feedback);
        let mut request = user_admit(10);
        request.max_priority = NUM_QUEUES;
        assert_eq!(
            engine.admit(request),
            Err(SchedError::InvalidPriority {
                requested: NUM_QUEUES,
                limit: NUM_QUEUES
            })
        );
        assert!(engine.is_empty());
    }

    #[test]
    fn test_admit_rejects_zero_quantum() {
        let mut engine = engine(PolicyKind::Feedback);
        let mut request = user_admit(10);
        request.quantum = Some(0);
        assert_eq!(engine.admit(request), Err(SchedError::InvalidQuantum));
    }

    #[test]
    fn test_double_admit_rejected() {
        let mut engine = engine(PolicyKind::Feedback);
        engine.admit(user_admit(10)).unwrap();
        assert_eq!(
            engine.admit(user_admit(10)),
            Err(SchedError::AlreadyScheduled(10))
        );
    }

    #[test]
    fn test_inherit_requires_known_parent() {
        let mut engine = engine(PolicyKind::Feedback);
        let request = AdmitRequest {
            pid: 11,
            parent: 99,
            max_priority: USER_QUEUE,
            quantum: None,
            kind: AdmitKind::Inherited,
        };
        assert_eq!(engine.admit(request), Err(SchedError::UnknownProcess(99)));
    }

    #[test]
    fn test_fcfs_quantum_expiry_idempotent() {
        let mut engine = engine(PolicyKind::Fcfs);
        engine.admit(user_admit(10)).unwrap();
        let before = engine.record(10).unwrap().clone();
        for _ in 0..5 {
            engine.quantum_expired(10).unwrap();
        }
        let after = engine.record(10).unwrap();
        assert_eq!(after.priority, before.priority);
        assert_eq!(after.time_slice, before.time_slice);
    }

    #[test]
    fn test_round_robin_reset_on_expiry() {
        let mut engine = engine(PolicyKind::RoundRobin);
        engine.admit(user_admit(10)).unwrap();
        engine.quantum_expired(10).unwrap();
        let record = engine.record(10).unwrap();
        assert_eq!(record.priority, USER_QUEUE);
        assert_eq!(record.time_slice, engine.config().default_quantum);
    }

    #[test]
    fn test_feedback_demotion_and_promotion_cycle() {
        let mut engine = engine(PolicyKind::Feedback);
        engine.admit(user_admit(10)).unwrap();

        // Repeated expiry demotes down to the worst user level, never past it
        for _ in 0..20 {
            engine.quantum_expired(10).unwrap();
        }
        assert_eq!(engine.record(10).unwrap().priority, MIN_USER_QUEUE);

        // Each rebalance promotes one level until the ceiling is reached
        let mut levels = Vec::new();
        loop {
            let dispatched = engine.rebalance();
            if dispatched.is_empty() {
                break;
            }
            assert_eq!(dispatched, vec![10]);
            levels.push(engine.record(10).unwrap().priority);
        }
        assert_eq!(
            levels,
            ((USER_QUEUE..MIN_USER_QUEUE).rev()).collect::<Vec<_>>()
        );
        assert_eq!(engine.record(10).unwrap().priority, USER_QUEUE);
    }

    #[test]
    fn test_spn_estimate_drives_priority() {
        let mut engine = engine(PolicyKind::ShortestNext);
        let mut request = user_admit(10);
        request.quantum = Some(300);
        let decision = engine.admit(request).unwrap();
        // Default estimate of 100 maps to best + 2
        assert_eq!(decision.priority, USER_QUEUE + 2);

        engine.quantum_expired(10).unwrap();
        let record = engine.record(10).unwrap();
        assert_eq!(record.burst_estimate, 200);
        assert_eq!(record.priority, USER_QUEUE + 3);
    }

    #[test]
    fn test_spn_privileged_bypass() {
        let mut engine = engine(PolicyKind::ShortestNext);
        let resource_server = engine.config().resource_server;
        let request = AdmitRequest {
            pid: 10,
            parent: resource_server,
            max_priority: 1,
            quantum: Some(100),
            kind: AdmitKind::Explicit,
        };
        let decision = engine.admit(request).unwrap();
        assert_eq!(decision.priority, 1);

        engine.quantum_expired(10).unwrap();
        let record = engine.record(10).unwrap();
        assert_eq!(record.priority, 1);
        assert_eq!(record.burst_estimate, DEFAULT_BURST_ESTIMATE);
        assert!(engine.rebalance().is_empty());
    }

    #[test]
    fn test_privileged_aging_opt_in() {
        let config = EngineConfig::new(PolicyKind::Feedback).with_privileged_aging(true);
        let mut engine = SchedEngine::new(config, FakeDispatcher::default()).unwrap();
        let resource_server = engine.config().resource_server;
        let request = AdmitRequest {
            pid: 10,
            parent: resource_server,
            max_priority: USER_QUEUE,
            quantum: Some(100),
            kind: AdmitKind::Explicit,
        };
        engine.admit(request).unwrap();
        engine.quantum_expired(10).unwrap();
        assert_eq!(engine.record(10).unwrap().priority, USER_QUEUE + 1);
    }

    #[test]
    fn test_set_priority_out_of_range_leaves_record_unchanged() {
        let mut engine = engine(PolicyKind::Feedback);
        engine.admit(user_admit(10)).unwrap();
        let before = engine.record(10).unwrap().clone();
        let calls_before = engine.dispatcher().calls.len();

        assert_eq!(
            engine.set_priority(10, NUM_QUEUES),
            Err(SchedError::InvalidPriority {
                requested: NUM_QUEUES,
                limit: NUM_QUEUES
            })
        );
        let after = engine.record(10).unwrap();
        assert_eq!(after.priority, before.priority);
        assert_eq!(after.max_priority, before.max_priority);
        assert_eq!(after.time_slice, before.time_slice);
        assert_eq!(engine.dispatcher().calls.len(), calls_before);
    }

    #[test]
    fn test_set_priority_rolls_back_on_dispatch_failure() {
        let mut engine = engine(PolicyKind::Feedback);
        engine.admit(user_admit(10)).unwrap();
        let before = engine.record(10).unwrap().clone();

        engine.dispatcher.fail_next = Some(DispatchError::Other("EPERM".into()));
        let result = engine.set_priority(10, 12);
        assert!(matches!(result, Err(SchedError::DispatchFailed { pid: 10, .. })));

        let after = engine.record(10).unwrap();
        assert_eq!(after.priority, before.priority);
        assert_eq!(after.max_priority, before.max_priority);
    }

    #[test]
    fn test_set_priority_applied_and_niced() {
        let mut engine = engine(PolicyKind::Feedback);
        engine.admit(user_admit(10)).unwrap();
        engine.set_priority(10, 12).unwrap();

        let record = engine.record(10).unwrap();
        assert_eq!(record.priority, 12);
        assert_eq!(record.max_priority, 12);
        // A worse-than-default ceiling flips the niced flag
        let (_, changes) = engine.dispatcher().calls.last().unwrap();
        assert!(changes.niced);
    }

    #[test]
    fn test_fcfs_set_priority_accepted_but_ignored() {
        let mut engine = engine(PolicyKind::Fcfs);
        engine.admit(user_admit(10)).unwrap();
        let calls_before = engine.dispatcher().calls.len();
        engine.set_priority(10, 12).unwrap();
        assert_eq!(engine.record(10).unwrap().priority, USER_QUEUE);
        assert_eq!(engine.dispatcher().calls.len(), calls_before);
    }

    #[test]
    fn test_double_remove_rejected() {
        let mut engine = engine(PolicyKind::Feedback);
        engine.admit(user_admit(10)).unwrap();
        engine.remove(10).unwrap();
        assert_eq!(engine.remove(10), Err(SchedError::UnknownProcess(10)));
    }

    #[test]
    fn test_unknown_process_events() {
        let mut engine = engine(PolicyKind::Feedback);
        assert_eq!(engine.quantum_expired(7), Err(SchedError::UnknownProcess(7)));
        assert_eq!(engine.set_priority(7, 8), Err(SchedError::UnknownProcess(7)));
    }

    #[test]
    fn test_cpu_rejection_retries_and_excludes() {
        let config = EngineConfig::new(PolicyKind::Feedback).with_cpus(3, 2);
        let mut dispatcher = FakeDispatcher::default();
        dispatcher.reject_cpus.insert(0);
        let mut engine = SchedEngine::new(config, dispatcher).unwrap();

        // CPU 0 is offered first, rejected, and replaced by CPU 1
        let decision = engine.admit(user_admit(10)).unwrap();
        assert_eq!(decision.cpu, 1);
        assert_eq!(engine.cpu_tracker().alive_count(), 2);

        // CPU 0 is never offered again for any later admission
        let calls_before = engine.dispatcher().calls.len();
        let decision = engine.admit(user_admit(11)).unwrap();
        assert_eq!(decision.cpu, 1);
        for (_, changes) in &engine.dispatcher().calls[calls_before..] {
            assert_ne!(changes.cpu, Some(0));
        }
    }

    #[test]
    fn test_failed_dispatch_releases_cpu_reservation() {
        let config = EngineConfig::new(PolicyKind::Feedback).with_cpus(2, 0);
        let mut dispatcher = FakeDispatcher::default();
        dispatcher.fail_next = Some(DispatchError::Other("EPERM".into()));
        let mut engine = SchedEngine::new(config, dispatcher).unwrap();

        let result = engine.admit(user_admit(10));
        assert!(matches!(result, Err(SchedError::DispatchFailed { pid: 10, .. })));

        // The picked CPU never reached the record, so its load slot must be
        // given back immediately
        assert_eq!(engine.record(10).unwrap().cpu, None);
        assert_eq!(engine.cpu_tracker().load(1), Some(0));

        engine.remove(10).unwrap();
        assert_eq!(engine.cpu_tracker().load(1), Some(0));

        // Later placements see a balanced tracker again
        let decision = engine.admit(user_admit(11)).unwrap();
        assert_eq!(decision.cpu, 1);
        assert_eq!(engine.cpu_tracker().load(1), Some(1));
    }

    #[test]
    fn test_admit_fails_when_no_cpu_remains() {
        let config = EngineConfig::new(PolicyKind::Feedback).with_cpus(2, 0);
        let mut dispatcher = FakeDispatcher::default();
        dispatcher.reject_cpus.insert(0);
        dispatcher.reject_cpus.insert(1);
        let mut engine = SchedEngine::new(config, dispatcher).unwrap();

        assert_eq!(
            engine.admit(user_admit(10)),
            Err(SchedError::NoCpuAvailable(10))
        );
        // The record is left in place without a successful dispatch
        assert_eq!(engine.len(), 1);
        assert_eq!(engine.record(10).unwrap().cpu, None);
    }

    #[test]
    fn test_inherited_child_follows_parent() {
        let mut engine = engine(PolicyKind::Feedback);
        engine.admit(user_admit(1)).unwrap();
        for _ in 0..3 {
            engine.quantum_expired(1).unwrap();
        }
        let parent_priority = engine.record(1).unwrap().priority;

        let request = AdmitRequest {
            pid: 2,
            parent: 1,
            max_priority: USER_QUEUE,
            quantum: None,
            kind: AdmitKind::Inherited,
        };
        let decision = engine.admit(request).unwrap();
        assert_eq!(decision.priority, parent_priority);
    }

    #[test]
    fn test_bootstrap_self_parented_admission() {
        let mut engine = engine(PolicyKind::Feedback);
        let request = AdmitRequest {
            pid: 1,
            parent: 1,
            max_priority: 10,
            quantum: None,
            kind: AdmitKind::Explicit,
        };
        let decision = engine.admit(request).unwrap();
        assert_eq!(decision.priority, 10);
        assert_eq!(decision.cpu, engine.cpu_tracker().boot_cpu());
    }
}
