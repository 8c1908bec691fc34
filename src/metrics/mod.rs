/*!
 * Metrics Module
 * Scheduling quality figures derived from a snapshot on demand
 */

mod calculator;

pub use calculator::{calculate, Metrics, ProcessMetrics};
