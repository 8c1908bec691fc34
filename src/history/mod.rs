/*!
 * History Module
 * Replayable record of a simulation run and the controller that drives it
 */

mod buffer;
mod controller;

pub use buffer::{History, HistoryEntry};
pub use controller::{Phase, Simulation};
