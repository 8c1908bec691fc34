/*!
 * Simulation Configuration
 *
 * Algorithm choice, quanta and pacing for a simulation run.
 */

use crate::core::errors::SimError;
use crate::core::types::{SimResult, Tick};
use crate::scheduler::{Algorithm, PolicyParams, DEFAULT_TIME_QUANTUM, LOW_QUANTUM, MEDIUM_QUANTUM};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Default pause between automatic ticks
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(800);

/// How the binary drives the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Advance automatically once per tick interval
    Run,
    /// Advance only on explicit commands
    Step,
}

impl FromStr for RunMode {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "run" | "auto" => Ok(Self::Run),
            "step" | "manual" => Ok(Self::Step),
            _ => Err(SimError::Configuration(
                format!("Invalid mode '{}'. Valid: run, step", s).into(),
            )),
        }
    }
}

/// Configuration for a simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    pub algorithm: Algorithm,

    /// Round-Robin time quantum (default: 4)
    pub time_quantum: Tick,

    /// Multilevel-queue Medium class quantum (default: 3)
    pub medium_quantum: Tick,

    /// Multilevel-queue Low class quantum (default: 5)
    pub low_quantum: Tick,

    /// Pause between automatic ticks (default: 800ms)
    pub tick_interval: Duration,

    pub mode: RunMode,
}

impl SimulationConfig {
    /// Default configuration for an algorithm
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            time_quantum: DEFAULT_TIME_QUANTUM,
            medium_quantum: MEDIUM_QUANTUM,
            low_quantum: LOW_QUANTUM,
            tick_interval: DEFAULT_TICK_INTERVAL,
            mode: RunMode::Run,
        }
    }

    /// Configuration with no pacing delay (testing and batch runs)
    pub fn immediate(algorithm: Algorithm) -> Self {
        Self {
            tick_interval: Duration::from_millis(1),
            ..Self::new(algorithm)
        }
    }

    /// Read configuration from `SIM_*` environment variables
    ///
    /// - SIM_ALGORITHM: fcfs | sjf | rr | priority | mlq (default: fcfs)
    /// - SIM_TIME_QUANTUM: Round-Robin quantum in ticks (default: 4)
    /// - SIM_MLQ_MEDIUM / SIM_MLQ_LOW: class quanta (default: 3 / 5)
    /// - SIM_TICK_INTERVAL_MS: pacing interval (default: 800)
    /// - SIM_MODE: run | step (default: run)
    pub fn from_env() -> SimResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> SimResult<Self> {
        let mut config = Self::new(Algorithm::Fcfs);

        if let Some(value) = lookup("SIM_ALGORITHM") {
            config.algorithm = value.parse()?;
        }
        if let Some(value) = lookup("SIM_TIME_QUANTUM") {
            config.time_quantum = parse_number("SIM_TIME_QUANTUM", &value)?;
        }
        if let Some(value) = lookup("SIM_MLQ_MEDIUM") {
            config.medium_quantum = parse_number("SIM_MLQ_MEDIUM", &value)?;
        }
        if let Some(value) = lookup("SIM_MLQ_LOW") {
            config.low_quantum = parse_number("SIM_MLQ_LOW", &value)?;
        }
        if let Some(value) = lookup("SIM_TICK_INTERVAL_MS") {
            let millis = parse_number("SIM_TICK_INTERVAL_MS", &value)?;
            config.tick_interval = Duration::from_millis(millis);
        }
        if let Some(value) = lookup("SIM_MODE") {
            config.mode = value.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject quanta the selected algorithm cannot run with
    pub fn validate(&self) -> SimResult<()> {
        self.policy_params().validate_for(self.algorithm)
    }

    /// Initial policy parameters for this configuration
    pub fn policy_params(&self) -> PolicyParams {
        PolicyParams {
            time_quantum: self.time_quantum,
            ..PolicyParams::multilevel(self.medium_quantum, self.low_quantum)
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(Algorithm::Fcfs)
    }
}

fn parse_number(key: &str, value: &str) -> SimResult<u64> {
    value.trim().parse().map_err(|_| {
        SimError::Configuration(
            format!("{} must be a non-negative integer, got '{}'", key, value).into(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.time_quantum, 4);
        assert_eq!(config.tick_interval, Duration::from_millis(800));
    }

    #[test]
    fn test_overrides() {
        let config = SimulationConfig::from_lookup(lookup(&[
            ("SIM_ALGORITHM", "rr"),
            ("SIM_TIME_QUANTUM", "2"),
            ("SIM_TICK_INTERVAL_MS", "50"),
            ("SIM_MODE", "step"),
        ]))
        .unwrap();

        assert_eq!(config.algorithm, Algorithm::RoundRobin);
        assert_eq!(config.policy_params().time_quantum, 2);
        assert_eq!(config.tick_interval, Duration::from_millis(50));
        assert_eq!(config.mode, RunMode::Step);
    }

    #[test]
    fn test_unparseable_value() {
        let err =
            SimulationConfig::from_lookup(lookup(&[("SIM_TIME_QUANTUM", "two")])).unwrap_err();
        assert!(matches!(err, SimError::Configuration(_)));
    }

    #[test]
    fn test_zero_quantum_for_rr() {
        let err = SimulationConfig::from_lookup(lookup(&[
            ("SIM_ALGORITHM", "rr"),
            ("SIM_TIME_QUANTUM", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, SimError::InvalidParameter(_)));
    }

    #[test]
    fn test_mlq_quanta_carried_into_params() {
        let config = SimulationConfig::from_lookup(lookup(&[
            ("SIM_ALGORITHM", "mlq"),
            ("SIM_MLQ_MEDIUM", "2"),
            ("SIM_MLQ_LOW", "7"),
        ]))
        .unwrap();
        let params = config.policy_params();
        assert_eq!(params.mlq.medium_quantum, 2);
        assert_eq!(params.mlq.low_quantum, 7);
    }
}
