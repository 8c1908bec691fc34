/*!
 * Registry Validation
 * Checks raw process descriptions before a simulation may start
 */

use super::types::{Process, ProcessSpec, QueueClass};
use crate::core::errors::SimError;
use crate::core::types::{Priority, ProcessId, SimResult, Tick};
use std::collections::HashSet;

/// Convert a raw description into a process, rejecting malformed fields
pub(super) fn validate_spec(spec: &ProcessSpec) -> SimResult<Process> {
    let id = ProcessId::try_from(spec.id).map_err(|_| {
        SimError::invalid_registry(format!("process id {} is out of range", spec.id))
    })?;

    let burst = validate_burst(id, spec.burst_time)?;
    let arrival = validate_arrival(id, spec.arrival_time)?;

    let name = spec.name.clone().unwrap_or_else(|| format!("P{}", id));
    let mut process = Process::new(id, name, arrival, burst);

    if let Some(priority) = spec.priority {
        process.priority = Some(validate_priority(id, priority)?);
    }
    if let Some(class) = spec.queue_class {
        process.queue_class = Some(validate_queue_class(id, class)?);
    }
    if let Some(ref color) = spec.color {
        process.color = color.as_str().into();
    }

    Ok(process)
}

pub(super) fn validate_burst(id: ProcessId, burst: i64) -> SimResult<Tick> {
    if burst < 1 {
        return Err(SimError::invalid_registry(format!(
            "process {} has burst time {}; must be at least 1",
            id, burst
        )));
    }
    Ok(burst as Tick)
}

pub(super) fn validate_arrival(id: ProcessId, arrival: i64) -> SimResult<Tick> {
    if arrival < 0 {
        return Err(SimError::invalid_registry(format!(
            "process {} has negative arrival time {}",
            id, arrival
        )));
    }
    Ok(arrival as Tick)
}

pub(super) fn validate_priority(id: ProcessId, priority: i64) -> SimResult<Priority> {
    Priority::try_from(priority).map_err(|_| {
        SimError::invalid_registry(format!("process {} has invalid priority {}", id, priority))
    })
}

pub(super) fn validate_queue_class(id: ProcessId, class: i64) -> SimResult<QueueClass> {
    QueueClass::from_index(class).ok_or_else(|| {
        SimError::invalid_registry(format!(
            "process {} has queue class {}; expected 0, 1 or 2",
            id, class
        ))
    })
}

/// Check the invariants a registry must hold as a whole
pub(super) fn validate_processes(processes: &[Process]) -> SimResult<()> {
    let mut seen = HashSet::with_capacity(processes.len());
    for process in processes {
        if process.burst_time < 1 {
            return Err(SimError::invalid_registry(format!(
                "process {} has burst time 0",
                process.id
            )));
        }
        if !seen.insert(process.id) {
            return Err(SimError::invalid_registry(format!(
                "duplicate process id {}",
                process.id
            )));
        }
    }
    Ok(())
}
