/*!
 * Periodic Rebalance Task
 * Background task driving the anti-starvation pass at a fixed interval
 */

use crate::core::errors::{Result, SchedError};
use crate::dispatch::Dispatcher;
use crate::engine::SchedEngine;
use log::{info, trace, warn};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Control messages for the rebalance task
#[derive(Debug, Clone, Copy)]
pub enum BalanceCommand {
    /// Run a rebalance pass immediately
    Trigger,
    /// Shutdown the rebalance task
    Shutdown,
}

/// Handle to the rebalance background task.
///
/// One task means one pending tick: the pass never re-enters itself or runs
/// concurrently with an event handler holding the engine lock.
pub struct BalanceTask {
    command_tx: mpsc::UnboundedSender<BalanceCommand>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl BalanceTask {
    /// Spawn the rebalance task.
    ///
    /// Failing to arm the timer is fatal to the caller: without the periodic
    /// pass the anti-starvation contract is broken.
    pub fn spawn<D>(engine: Arc<RwLock<SchedEngine<D>>>, period: Duration) -> Result<Self>
    where
        D: Dispatcher + Sync + 'static,
    {
        if period.is_zero() {
            return Err(SchedError::TimerArm(
                "rebalance interval must be non-zero".into(),
            ));
        }

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_balance_loop(engine, period, command_rx));
        info!("rebalance task spawned with {:?} interval", period);

        Ok(Self {
            command_tx,
            handle: Some(handle),
        })
    }

    /// Request an immediate rebalance pass.
    pub fn trigger(&self) {
        let _ = self.command_tx.send(BalanceCommand::Trigger);
    }

    /// Shutdown the rebalance task gracefully.
    pub async fn shutdown(mut self) {
        let _ = self.command_tx.send(BalanceCommand::Shutdown);
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                warn!("rebalance task shutdown error: {}", err);
            } else {
                info!("rebalance task shutdown complete");
            }
        }
    }
}

async fn run_balance_loop<D>(
    engine: Arc<RwLock<SchedEngine<D>>>,
    period: Duration,
    mut command_rx: mpsc::UnboundedReceiver<BalanceCommand>,
) where
    D: Dispatcher + Sync + 'static,
{
    let mut interval = tokio::time::interval(period);
    // The first tick fires immediately; skip it so passes start one period in
    interval.tick().await;
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let dispatched = engine.write().rebalance();
                if !dispatched.is_empty() {
                    trace!("periodic rebalance re-dispatched {} processes", dispatched.len());
                }
            }

            command = command_rx.recv() => {
                match command {
                    Some(BalanceCommand::Trigger) => {
                        engine.write().rebalance();
                    }
                    Some(BalanceCommand::Shutdown) | None => {
                        info!("rebalance task stopping");
                        break;
                    }
                }
            }
        }
    }
}
