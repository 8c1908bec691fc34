/*!
 * Process Registry
 * Ordered, validated set of processes a simulation runs over
 */

use super::types::{palette_color, Process, ProcessSpec, ProcessUpdate, QueueClass};
use super::validation;
use crate::core::errors::SimError;
use crate::core::types::{ProcessId, SimResult, Tick};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Burst assigned to processes created with `add_process`
pub const DEFAULT_BURST: Tick = 5;

/// Process registry
///
/// Registry order is significant: it breaks ties between processes that
/// arrive on the same tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessRegistry {
    processes: Vec<Process>,
}

impl ProcessRegistry {
    /// Validate raw descriptions into a registry
    pub fn from_specs(specs: &[ProcessSpec]) -> SimResult<Self> {
        let processes = specs
            .iter()
            .map(validation::validate_spec)
            .collect::<SimResult<Vec<_>>>()?;
        Self::from_processes(processes)
    }

    /// Build from already-typed processes, checking registry-wide invariants
    pub fn from_processes(processes: Vec<Process>) -> SimResult<Self> {
        validation::validate_processes(&processes)?;
        let processes = processes
            .into_iter()
            .map(|mut p| {
                p.remaining_time = p.burst_time;
                p
            })
            .collect();
        Ok(Self { processes })
    }

    /// Parse a JSON array of process descriptions
    pub fn from_json(json: &str) -> SimResult<Self> {
        let specs: Vec<ProcessSpec> = serde_json::from_str(json)?;
        Self::from_specs(&specs)
    }

    /// Load a registry from a JSON file
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let registry = Self::from_json(&text)?;
        info!(path = %path.display(), processes = registry.len(), "Loaded process registry");
        Ok(registry)
    }

    /// Three-process demonstration registry
    pub fn demo() -> Self {
        Self {
            processes: vec![
                Process::new(1, "P1", 0, 10)
                    .with_priority(1)
                    .with_queue_class(QueueClass::High),
                Process::new(2, "P2", 1, 5)
                    .with_priority(2)
                    .with_queue_class(QueueClass::Medium),
                Process::new(3, "P3", 2, 8)
                    .with_priority(3)
                    .with_queue_class(QueueClass::High),
            ],
        }
    }

    /// Re-check invariants; registries can be edited after construction
    pub fn validate(&self) -> SimResult<()> {
        validation::validate_processes(&self.processes)
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter()
    }

    pub fn get(&self, id: ProcessId) -> Option<&Process> {
        self.processes.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Processes whose arrival tick is `tick`, in registry order
    pub fn arrivals_at(&self, tick: Tick) -> impl Iterator<Item = &Process> {
        self.processes.iter().filter(move |p| p.arrival_time == tick)
    }

    /// Append a default process and return its id
    ///
    /// The new process gets the next free id, name `P<id>`, burst 5,
    /// arrival 0, priority equal to its id and the High queue class.
    pub fn add_process(&mut self) -> ProcessId {
        let id = self.processes.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let process = Process::new(id, format!("P{}", id), 0, DEFAULT_BURST)
            .with_priority(id)
            .with_queue_class(QueueClass::High)
            .with_color(palette_color(id));
        self.processes.push(process);
        debug!(pid = id, "Process added to registry");
        id
    }

    /// Remove a process, returning whether it was present
    pub fn remove_process(&mut self, id: ProcessId) -> bool {
        let before = self.processes.len();
        self.processes.retain(|p| p.id != id);
        let removed = self.processes.len() < before;
        if removed {
            debug!(pid = id, "Process removed from registry");
        }
        removed
    }

    /// Apply a single-field edit
    ///
    /// Changing the burst also resets the remaining time.
    pub fn update_process(&mut self, id: ProcessId, update: ProcessUpdate) -> SimResult<()> {
        let process = self
            .processes
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| SimError::invalid_registry(format!("process {} not found", id)))?;

        match update {
            ProcessUpdate::BurstTime(burst) => {
                let burst = validation::validate_burst(id, burst)?;
                process.burst_time = burst;
                process.remaining_time = burst;
            }
            ProcessUpdate::ArrivalTime(arrival) => {
                process.arrival_time = validation::validate_arrival(id, arrival)?;
            }
            ProcessUpdate::Priority(priority) => {
                process.priority = Some(validation::validate_priority(id, priority)?);
            }
            ProcessUpdate::QueueClass(class) => {
                process.queue_class = Some(validation::validate_queue_class(id, class)?);
            }
        }

        debug!(pid = id, ?update, "Process updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_specs_preserves_order() {
        let registry = ProcessRegistry::from_specs(&[
            ProcessSpec::new(2, 0, 3),
            ProcessSpec::new(1, 0, 4),
        ])
        .unwrap();
        let ids: Vec<_> = registry.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let specs = [ProcessSpec::new(1, 0, 3), ProcessSpec::new(1, 2, 1)];
        let err = ProcessRegistry::from_specs(&specs)
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidRegistry(_)));
    }

    #[test]
    fn test_from_json() {
        let registry = ProcessRegistry::from_json(
            r#"[{"id":1,"name":"init","burstTime":3,"arrivalTime":0,"priority":2,"queueClass":1}]"#,
        )
        .unwrap();
        let p = registry.get(1).unwrap();
        assert_eq!(p.name, "init");
        assert_eq!(p.class(), QueueClass::Medium);
        assert_eq!(p.priority, Some(2));
    }

    #[test]
    fn test_malformed_json() {
        let err = ProcessRegistry::from_json("[{\"id\": 1}").unwrap_err();
        assert!(matches!(err, SimError::Serialization(_)));
    }

    #[test]
    fn test_add_and_remove() {
        let mut registry = ProcessRegistry::demo();
        let id = registry.add_process();
        assert_eq!(id, 4);

        let added = registry.get(4).unwrap();
        assert_eq!(added.name, "P4");
        assert_eq!(added.burst_time, DEFAULT_BURST);
        assert_eq!(added.priority, Some(4));

        assert!(registry.remove_process(2));
        assert!(!registry.remove_process(2));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_add_to_empty_registry() {
        let mut registry = ProcessRegistry::default();
        assert_eq!(registry.add_process(), 1);
    }

    #[test]
    fn test_update_burst_resets_remaining() {
        let mut registry = ProcessRegistry::demo();
        registry.update_process(1, ProcessUpdate::BurstTime(7)).unwrap();
        let p = registry.get(1).unwrap();
        assert_eq!(p.burst_time, 7);
        assert_eq!(p.remaining_time, 7);

        assert!(registry.update_process(1, ProcessUpdate::BurstTime(0)).is_err());
        assert!(registry.update_process(9, ProcessUpdate::ArrivalTime(1)).is_err());
    }

    #[test]
    fn test_arrivals_at() {
        let registry = ProcessRegistry::demo();
        let ids: Vec<_> = registry.arrivals_at(1).map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(registry.arrivals_at(7).count(), 0);
    }
}
