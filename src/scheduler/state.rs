/*!
 * Scheduler State
 * Immutable per-tick snapshot of the simulated CPU
 */

use crate::core::data_structures::InlineString;
use crate::core::types::{ProcessId, Tick};
use crate::process::{Process, ProcessRegistry};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A process occupying the CPU from `start` onwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub process_id: ProcessId,
    pub process_name: InlineString,
    pub start: Tick,
    pub color: InlineString,
}

impl TimelineEntry {
    pub fn new(process: &Process, start: Tick) -> Self {
        Self {
            process_id: process.id,
            process_name: process.name.clone(),
            start,
            color: process.color.clone(),
        }
    }
}

/// A finished process and the tick boundary it finished on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedProcess {
    #[serde(flatten)]
    pub process: Process,
    pub completion_time: Tick,
}

/// Where a registry process currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessLocation {
    NotArrived,
    Ready,
    Running,
    Completed,
}

/// Scheduler snapshot
///
/// `current_time` is the next tick to execute: the initial state is at 0
/// and executing tick `t` yields a state at `t + 1`. Snapshots are never
/// mutated once produced; the engine clones the previous one and edits
/// the copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerState {
    pub current_time: Tick,
    pub ready_queue: VecDeque<Process>,
    pub running: Option<Process>,
    pub completed: Vec<CompletedProcess>,
    pub timeline: Vec<TimelineEntry>,
    pub context_switches: u64,
}

impl SchedulerState {
    /// Empty state at tick 0
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn is_ready(&self, id: ProcessId) -> bool {
        self.ready_queue.iter().any(|p| p.id == id)
    }

    pub fn is_running(&self, id: ProcessId) -> bool {
        self.running.as_ref().is_some_and(|p| p.id == id)
    }

    pub fn completion(&self, id: ProcessId) -> Option<&CompletedProcess> {
        self.completed.iter().find(|c| c.process.id == id)
    }

    pub fn location_of(&self, id: ProcessId) -> ProcessLocation {
        if self.is_running(id) {
            ProcessLocation::Running
        } else if self.is_ready(id) {
            ProcessLocation::Ready
        } else if self.completion(id).is_some() {
            ProcessLocation::Completed
        } else {
            ProcessLocation::NotArrived
        }
    }

    /// Live remaining time of a process that has arrived
    pub fn remaining_time_of(&self, id: ProcessId) -> Option<Tick> {
        if let Some(p) = self.running.as_ref().filter(|p| p.id == id) {
            return Some(p.remaining_time);
        }
        if let Some(p) = self.ready_queue.iter().find(|p| p.id == id) {
            return Some(p.remaining_time);
        }
        self.completion(id).map(|_| 0)
    }

    /// True once every registry process has completed
    pub fn is_complete(&self, registry: &ProcessRegistry) -> bool {
        self.completed.len() == registry.len()
    }

    /// CPU time consumed so far across all processes
    pub fn busy_ticks(&self) -> Tick {
        let consumed = |p: &Process| p.burst_time - p.remaining_time;
        self.completed.iter().map(|c| c.process.burst_time).sum::<Tick>()
            + self.ready_queue.iter().map(consumed).sum::<Tick>()
            + self.running.iter().map(consumed).sum::<Tick>()
    }
}
