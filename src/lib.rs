/*!
 * CPU Scheduling Simulator
 * Discrete-time scheduling engine with replayable history
 */

pub mod config;
pub mod core;
pub mod history;
pub mod metrics;
pub mod monitoring;
pub mod process;
pub mod runner;
pub mod scheduler;

// Re-exports
pub use config::{RunMode, SimulationConfig};
pub use crate::core::{InlineString, ProcessId, SimError, SimResult, Tick};
pub use history::{History, HistoryEntry, Phase, Simulation};
pub use metrics::{Metrics, ProcessMetrics};
pub use monitoring::init_tracing;
pub use process::{Process, ProcessRegistry, ProcessSpec, ProcessUpdate, QueueClass};
pub use runner::{run_paced, shared, SharedSimulation};
pub use scheduler::{Algorithm, PolicyParams, SchedulerState, TimelineEntry};
