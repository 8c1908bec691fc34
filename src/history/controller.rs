/*!
 * Simulation Controller
 * Drives a scheduling policy tick by tick over a replayable history
 */

use super::buffer::{History, HistoryEntry};
use crate::config::SimulationConfig;
use crate::core::types::{ProcessId, SimResult};
use crate::metrics::{self, Metrics};
use crate::monitoring::generate_run_id;
use crate::process::{ProcessRegistry, ProcessUpdate};
use crate::scheduler::{engine, Algorithm, PolicyParams, SchedulerState};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Controller lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// No ticks executed
    Idle,
    /// `ticks` executed; `cursor` indexes the observed snapshot
    Stepped { ticks: usize, cursor: usize },
    /// The observed snapshot is the last one and every process has completed
    Finished { ticks: usize },
}

/// Simulation controller
///
/// Owns the registry, the active algorithm and its parameters, and the
/// history buffer. Transitions (`advance`, `retreat`, `reset`) are the only
/// way the history changes. Callers sharing one controller across tasks
/// must serialize access themselves.
#[derive(Debug, Clone)]
pub struct Simulation {
    registry: ProcessRegistry,
    algorithm: Algorithm,
    params: PolicyParams,
    initial: SchedulerState,
    history: History,
    run_id: String,
}

impl Simulation {
    /// Create an idle simulation; fails if the registry is malformed
    pub fn new(
        registry: ProcessRegistry,
        algorithm: Algorithm,
        params: PolicyParams,
    ) -> SimResult<Self> {
        let initial = engine::initialize(&registry)?;
        let run_id = generate_run_id();
        info!(
            run_id = %run_id,
            algorithm = %algorithm,
            processes = registry.len(),
            "Simulation created"
        );

        Ok(Self {
            registry,
            algorithm,
            params: params.fresh(),
            initial,
            history: History::new(),
            run_id,
        })
    }

    /// Create an idle simulation from configuration
    pub fn from_config(registry: ProcessRegistry, config: &SimulationConfig) -> SimResult<Self> {
        Self::new(registry, config.algorithm, config.policy_params())
    }

    pub fn phase(&self) -> Phase {
        match self.history.cursor() {
            None => Phase::Idle,
            Some(cursor) => {
                let ticks = self.history.len();
                if self.history.at_end() && self.state().is_complete(&self.registry) {
                    Phase::Finished { ticks }
                } else {
                    Phase::Stepped { ticks, cursor }
                }
            }
        }
    }

    /// Snapshot currently observed (tick 0 while idle)
    pub fn state(&self) -> &SchedulerState {
        self.history
            .current()
            .map(|entry| &entry.state)
            .unwrap_or(&self.initial)
    }

    /// Quantum counters that follow the observed snapshot
    pub fn params(&self) -> &PolicyParams {
        self.history
            .current()
            .map(|entry| &entry.params)
            .unwrap_or(&self.params)
    }

    /// True when every process has completed in the observed snapshot
    pub fn is_finished(&self) -> bool {
        self.state().is_complete(&self.registry)
    }

    /// Step forward one tick
    ///
    /// Replays a recorded snapshot when the cursor is behind the end of the
    /// buffer; otherwise runs the policy once and records the result.
    /// Advancing a finished simulation returns the same snapshot.
    pub fn advance(&mut self) -> SimResult<&SchedulerState> {
        if !self.history.at_end() {
            debug!(run_id = %self.run_id, "Replaying recorded tick");
            self.history.forward();
            return Ok(self.state());
        }

        if self.is_finished() {
            debug!(run_id = %self.run_id, "Advance on finished simulation ignored");
            return Ok(self.state());
        }

        let (state, params) =
            engine::advance(self.algorithm, &self.registry, self.state(), self.params())?;
        debug!(
            run_id = %self.run_id,
            tick = state.current_time - 1,
            running = ?state.running.as_ref().map(|p| p.id),
            ready = state.ready_queue.len(),
            completed = state.completed.len(),
            "Tick executed"
        );

        let finished = state.is_complete(&self.registry);
        let entry = self.history.push(HistoryEntry { state, params });
        if finished {
            info!(
                run_id = %self.run_id,
                ticks = entry.state.current_time,
                context_switches = entry.state.context_switches,
                "Simulation finished"
            );
        }
        Ok(&entry.state)
    }

    /// Step back one recorded snapshot; no-op on the first one or while idle
    pub fn retreat(&mut self) -> &SchedulerState {
        self.history.back();
        self.state()
    }

    /// Discard all history and return to idle at tick 0
    pub fn reset(&mut self) -> SimResult<&SchedulerState> {
        self.initial = engine::reset(&self.registry)?;
        self.history.clear();
        self.params = self.params.fresh();
        self.run_id = generate_run_id();
        info!(run_id = %self.run_id, "Simulation reset");
        Ok(&self.initial)
    }

    /// Advance until every process has completed
    pub fn run_to_completion(&mut self) -> SimResult<&SchedulerState> {
        while !self.is_finished() {
            self.advance()?;
        }
        Ok(self.state())
    }

    /// Turnaround and waiting statistics for the observed snapshot
    pub fn metrics(&self) -> Option<Metrics> {
        metrics::calculate(self.state())
    }

    /// Switch algorithm; resets first since histories are policy specific
    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> SimResult<()> {
        self.reset()?;
        info!(from = %self.algorithm, to = %algorithm, "Algorithm changed");
        self.algorithm = algorithm;
        Ok(())
    }

    /// Replace policy parameters; resets first
    ///
    /// Parameters are checked when the next tick runs, not here.
    pub fn set_params(&mut self, params: PolicyParams) -> SimResult<()> {
        self.reset()?;
        self.params = params.fresh();
        info!(time_quantum = params.time_quantum, "Policy parameters changed");
        Ok(())
    }

    /// Add a default process to the registry; resets first
    pub fn add_process(&mut self) -> SimResult<ProcessId> {
        self.reset()?;
        Ok(self.registry.add_process())
    }

    /// Remove a process from the registry; resets first
    pub fn remove_process(&mut self, id: ProcessId) -> SimResult<bool> {
        self.reset()?;
        Ok(self.registry.remove_process(id))
    }

    /// Edit one field of a registry process; resets first
    pub fn update_process(&mut self, id: ProcessId, update: ProcessUpdate) -> SimResult<()> {
        self.reset()?;
        self.registry.update_process(id, update)
    }

    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Identifier attached to this run's log records
    pub fn run_id(&self) -> &str {
        &self.run_id
    }
}
