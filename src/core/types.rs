/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process identifier, unique within a registry
pub type ProcessId = u32;

/// One discrete unit of simulated time
pub type Tick = u64;

/// Scheduling priority (lower value is more urgent)
pub type Priority = u32;

/// Sort key used for processes without an explicit priority
pub const UNSET_PRIORITY: Priority = Priority::MAX;

/// Common result type for simulator operations
pub type SimResult<T> = Result<T, super::errors::SimError>;
