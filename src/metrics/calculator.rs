/*!
 * Metrics Calculator
 * Turnaround, waiting and response statistics over completed processes
 */

use crate::core::data_structures::InlineString;
use crate::core::types::{ProcessId, Tick};
use crate::scheduler::SchedulerState;
use serde::{Deserialize, Serialize};

/// Per-process figures, available once the process has completed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessMetrics {
    pub id: ProcessId,
    pub name: InlineString,
    pub arrival_time: Tick,
    pub burst_time: Tick,
    pub completion_time: Tick,
    /// completion - arrival
    pub turnaround_time: Tick,
    /// turnaround - burst
    pub waiting_time: Tick,
    /// first dispatch - arrival
    pub response_time: Tick,
}

/// Aggregate figures for one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub processes: Vec<ProcessMetrics>,
    pub average_turnaround: f64,
    pub average_waiting: f64,
    pub average_response: f64,
    pub context_switches: u64,
    pub elapsed_ticks: Tick,
    pub busy_ticks: Tick,
    /// busy / elapsed
    pub cpu_utilization: f64,
    /// completed processes per tick
    pub throughput: f64,
}

/// Compute metrics for a snapshot
///
/// Returns `None` until at least one process has completed; averages over
/// nothing are absent, not zero.
pub fn calculate(state: &SchedulerState) -> Option<Metrics> {
    if state.completed.is_empty() {
        return None;
    }

    let processes: Vec<ProcessMetrics> = state
        .completed
        .iter()
        .map(|done| {
            let p = &done.process;
            let turnaround = done.completion_time.saturating_sub(p.arrival_time);
            let first_dispatch = state
                .timeline
                .iter()
                .find(|entry| entry.process_id == p.id)
                .map(|entry| entry.start)
                .unwrap_or(p.arrival_time);

            ProcessMetrics {
                id: p.id,
                name: p.name.clone(),
                arrival_time: p.arrival_time,
                burst_time: p.burst_time,
                completion_time: done.completion_time,
                turnaround_time: turnaround,
                waiting_time: turnaround.saturating_sub(p.burst_time),
                response_time: first_dispatch.saturating_sub(p.arrival_time),
            }
        })
        .collect();

    let count = processes.len() as f64;
    let mean =
        |f: fn(&ProcessMetrics) -> Tick| processes.iter().map(f).sum::<Tick>() as f64 / count;

    let elapsed = state.current_time;
    let busy = state.busy_ticks();
    let ratio = |n: f64| if elapsed == 0 { 0.0 } else { n / elapsed as f64 };

    Some(Metrics {
        average_turnaround: mean(|m: &ProcessMetrics| m.turnaround_time),
        average_waiting: mean(|m: &ProcessMetrics| m.waiting_time),
        average_response: mean(|m: &ProcessMetrics| m.response_time),
        context_switches: state.context_switches,
        elapsed_ticks: elapsed,
        busy_ticks: busy,
        cpu_utilization: ratio(busy as f64),
        throughput: ratio(count),
        processes,
    })
}
