/*!
 * Core Types
 * Identifier aliases and scheduling constants shared across the engine
 */

/// Process ID type
pub type Pid = u32;

/// CPU index type
pub type CpuId = u32;

/// Priority queue level (lower value = higher dispatch precedence)
pub type QueueLevel = u8;

/// Time quantum / burst length in scheduler ticks
pub type Ticks = u32;

/// Number of priority queue levels understood by the dispatcher
pub const NUM_QUEUES: QueueLevel = 16;

/// Best user queue level; fixed policies pin every user process here
pub const USER_QUEUE: QueueLevel = 7;

/// Worst user queue level; feedback demotion bottoms out here
pub const MIN_USER_QUEUE: QueueLevel = 14;

/// Quantum granted when the admitter does not specify one
pub const DEFAULT_USER_TIME_SLICE: Ticks = 200;

/// Weight of the most recent burst in the exponential average, in percent
pub const BURST_SMOOTHING_ALPHA: u64 = 50;

/// Burst estimate assigned to freshly admitted processes
pub const DEFAULT_BURST_ESTIMATE: Ticks = 100;

/// Lower clamp on the burst estimate
pub const MIN_BURST_ESTIMATE: Ticks = 10;

/// Upper clamp on the burst estimate
pub const MAX_BURST_ESTIMATE: Ticks = 1000;

/// Default interval between periodic rebalance passes, in seconds
pub const DEFAULT_BALANCE_INTERVAL_SECS: u64 = 5;
