/*!
 * Scheduler Module
 * Per-tick state transitions for FCFS, SJF, Round-Robin, Priority and
 * Multilevel-Queue scheduling
 */

pub mod engine;
pub mod policy;
pub mod state;
pub mod types;

// Re-export public API
pub use engine::{advance, initialize, reset};
pub use policy::{Discipline, PreemptionRule, QuantumRule, SelectionOrder};
pub use state::{CompletedProcess, ProcessLocation, SchedulerState, TimelineEntry};
pub use types::{
    Algorithm, MlqQuanta, PolicyParams, DEFAULT_TIME_QUANTUM, LOW_QUANTUM, MEDIUM_QUANTUM,
};
