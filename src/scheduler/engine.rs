/*!
 * Simulation Engine
 * Single-tick state transition shared by every scheduling discipline
 */

use super::policy::Discipline;
use super::state::{CompletedProcess, SchedulerState, TimelineEntry};
use super::types::{Algorithm, PolicyParams};
use crate::core::types::{SimResult, Tick};
use crate::process::{Process, ProcessRegistry};
use tracing::{debug, info, instrument, trace};

/// Build the empty state at tick 0 for a registry
pub fn initialize(registry: &ProcessRegistry) -> SimResult<SchedulerState> {
    registry.validate()?;
    info!(processes = registry.len(), "Scheduler state initialized");
    Ok(SchedulerState::initial())
}

/// Discard progress and start over from tick 0
pub fn reset(registry: &ProcessRegistry) -> SimResult<SchedulerState> {
    initialize(registry)
}

/// Execute one tick of `algorithm` on top of `state`
///
/// Returns the next snapshot together with the updated quantum counters.
/// Fails with `InvalidParameter` before touching anything if the
/// parameters cannot drive the algorithm. A state in which every process
/// has completed is returned unchanged.
#[instrument(level = "trace", skip_all, fields(algorithm = %algorithm, tick = state.current_time))]
pub fn advance(
    algorithm: Algorithm,
    registry: &ProcessRegistry,
    state: &SchedulerState,
    params: &PolicyParams,
) -> SimResult<(SchedulerState, PolicyParams)> {
    params.validate_for(algorithm)?;

    if state.is_complete(registry) {
        trace!("All processes completed, tick ignored");
        return Ok((state.clone(), *params));
    }

    let discipline = algorithm.discipline();
    let tick = state.current_time;
    let mut next = state.clone();
    let mut params = *params;

    admit(registry, &mut next, tick);
    discipline.order.arrange(&mut next.ready_queue);

    if let Some(running) = next.running.take() {
        if discipline.preemption.should_preempt(&running, &next.ready_queue) {
            debug!(pid = running.id, tick, "Preempted by higher class arrival");
            clear_counter(&discipline, &running, &mut params);
            next.ready_queue.push_back(running);
        } else {
            next.running = Some(running);
        }
    }

    if next.running.is_none() {
        dispatch(&discipline, &mut next, &mut params, tick);
    }

    if let Some(running) = next.running.take() {
        execute(&discipline, &mut next, &mut params, running, tick);
    }

    next.current_time = tick + 1;
    Ok((next, params))
}

/// Move processes arriving on `tick` into the ready queue in registry order
fn admit(registry: &ProcessRegistry, state: &mut SchedulerState, tick: Tick) {
    for process in registry.arrivals_at(tick) {
        let known = state.is_ready(process.id)
            || state.is_running(process.id)
            || state.completion(process.id).is_some();
        if known {
            continue;
        }

        let mut admitted = process.clone();
        admitted.remaining_time = admitted.burst_time;
        trace!(pid = admitted.id, tick, "Process admitted");
        state.ready_queue.push_back(admitted);
    }
}

/// Run the current process for one tick, then settle completion or slice expiry
fn execute(
    discipline: &Discipline,
    state: &mut SchedulerState,
    params: &mut PolicyParams,
    mut running: Process,
    tick: Tick,
) {
    debug_assert!(running.remaining_time > 0, "finished process left on the CPU");
    running.remaining_time = running.remaining_time.saturating_sub(1);

    let slice_expired = match discipline.quantum.counter(&running, params) {
        Some(counter) => {
            *counter = counter.saturating_sub(1);
            *counter == 0
        }
        None => false,
    };

    if running.is_finished() {
        clear_counter(discipline, &running, params);
        debug!(pid = running.id, completion_time = tick + 1, "Process completed");
        state.completed.push(CompletedProcess {
            process: running,
            completion_time: tick + 1,
        });
        dispatch(discipline, state, params, tick + 1);
    } else if slice_expired {
        let pid = running.id;
        state.ready_queue.push_back(running);
        discipline.order.arrange(&mut state.ready_queue);

        // Nobody else eligible: keep the CPU with a fresh slice, no switch
        if let Some(index) = discipline.order.pick(&state.ready_queue) {
            if state.ready_queue[index].id == pid {
                if let Some(same) = state.ready_queue.remove(index) {
                    refill_counter(discipline, &same, params);
                    state.running = Some(same);
                    return;
                }
            }
        }

        debug!(pid, "Time slice expired");
        dispatch(discipline, state, params, tick + 1);
    } else {
        state.running = Some(running);
    }
}

/// Hand the CPU to the next selected process, starting at `at`
fn dispatch(
    discipline: &Discipline,
    state: &mut SchedulerState,
    params: &mut PolicyParams,
    at: Tick,
) {
    let Some(index) = discipline.order.pick(&state.ready_queue) else {
        return;
    };
    let Some(process) = state.ready_queue.remove(index) else {
        return;
    };

    refill_counter(discipline, &process, params);
    state.timeline.push(TimelineEntry::new(&process, at));
    state.context_switches += 1;
    debug!(
        pid = process.id,
        class = %process.class(),
        start = at,
        "Process dispatched"
    );
    state.running = Some(process);
}

fn refill_counter(discipline: &Discipline, process: &Process, params: &mut PolicyParams) {
    if let Some(slice) = discipline.quantum.slice_for(process, params) {
        if let Some(counter) = discipline.quantum.counter(process, params) {
            *counter = slice;
        }
    }
}

fn clear_counter(discipline: &Discipline, process: &Process, params: &mut PolicyParams) {
    if let Some(counter) = discipline.quantum.counter(process, params) {
        *counter = 0;
    }
}
