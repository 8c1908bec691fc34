/*!
 * Registry File Tests
 * Loading process registries from JSON files
 */

use cpu_sched_sim::{Algorithm, PolicyParams, ProcessRegistry, QueueClass, SimError, Simulation};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_registry(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_registry_file() {
    let file = write_registry(
        r##"[
            {"id": 1, "name": "editor", "arrivalTime": 0, "burstTime": 6, "queueClass": 2},
            {"id": 2, "arrivalTime": 3, "burstTime": 2, "queue": 0, "priority": 1,
             "color": "#123456"}
        ]"##,
    );

    let registry = ProcessRegistry::load(file.path()).unwrap();
    assert_eq!(registry.len(), 2);

    let editor = registry.get(1).unwrap();
    assert_eq!(editor.name.as_str(), "editor");
    assert_eq!(editor.class(), QueueClass::Low);
    assert_eq!(editor.remaining_time, 6);

    let second = registry.get(2).unwrap();
    assert_eq!(second.name.as_str(), "P2");
    assert_eq!(second.priority, Some(1));
    assert_eq!(second.color.as_str(), "#123456");

    let mut sim =
        Simulation::new(registry, Algorithm::MultilevelQueue, PolicyParams::default()).unwrap();
    let state = sim.run_to_completion().unwrap();
    assert_eq!(state.completion(2).map(|c| c.completion_time), Some(5));
    assert_eq!(state.completion(1).map(|c| c.completion_time), Some(8));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ProcessRegistry::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SimError::Io(_)));
}

#[test]
fn test_malformed_file() {
    let file = write_registry("[{\"id\": 1, \"burstTime\": ");
    let err = ProcessRegistry::load(file.path()).unwrap_err();
    assert!(matches!(err, SimError::Serialization(_)));
}

#[test]
fn test_invalid_entries_rejected() {
    let cases = [
        r#"[{"id": 1, "arrivalTime": 0, "burstTime": 0}]"#,
        r#"[{"id": 1, "arrivalTime": -2, "burstTime": 3}]"#,
        r#"[{"id": 1, "arrivalTime": 0, "burstTime": 3, "queueClass": 5}]"#,
        r#"[{"id": 1, "arrivalTime": 0, "burstTime": 3},
            {"id": 1, "arrivalTime": 1, "burstTime": 3}]"#,
    ];

    for json in cases {
        let file = write_registry(json);
        let err = ProcessRegistry::load(file.path()).unwrap_err();
        assert!(matches!(err, SimError::InvalidRegistry(_)), "accepted {}", json);
    }
}

#[test]
fn test_saved_registry_loads_back() {
    let json = serde_json::to_string(&ProcessRegistry::demo()).unwrap();
    let file = write_registry(&json);
    assert_eq!(ProcessRegistry::load(file.path()).unwrap(), ProcessRegistry::demo());
}
