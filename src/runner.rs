/*!
 * Paced Runner
 * Advances a shared simulation on a timer until it finishes
 *
 * Pacing only decides when `advance` is called; the produced snapshots are
 * the same as stepping by hand.
 */

use crate::core::types::SimResult;
use crate::history::Simulation;
use crate::monitoring::RunSpan;
use crate::scheduler::SchedulerState;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn, Instrument};

/// Simulation handle shared between a pacing task and its observers
pub type SharedSimulation = Arc<Mutex<Simulation>>;

pub fn shared(simulation: Simulation) -> SharedSimulation {
    Arc::new(Mutex::new(simulation))
}

/// Advance once per `period` until every process has completed
///
/// The lock is held only for a single tick, so observers can inspect or
/// rewind the simulation between ticks. Returns the final observed state.
pub async fn run_paced(
    simulation: SharedSimulation,
    period: Duration,
) -> SimResult<SchedulerState> {
    let (run_id, algorithm) = {
        let sim = simulation.lock();
        (sim.run_id().to_string(), sim.algorithm())
    };
    let span = RunSpan::new(&run_id, algorithm.as_str());

    let result = pace(&simulation, period).instrument(span.span().clone()).await;
    match &result {
        Ok(state) => {
            span.record_ticks(state.current_time);
            span.record_result(true);
            info!(run_id = %run_id, ticks = state.current_time, "Paced run complete");
        }
        Err(e) => {
            span.record_result(false);
            warn!(run_id = %run_id, error = %e, "Paced run aborted");
        }
    }
    result
}

async fn pace(simulation: &SharedSimulation, period: Duration) -> SimResult<SchedulerState> {
    let mut ticker = interval(period.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let mut sim = simulation.lock();
        if sim.is_finished() {
            return Ok(sim.state().clone());
        }
        sim.advance()?;
    }
}
