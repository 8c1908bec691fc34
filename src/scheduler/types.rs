/*!
 * Scheduler Types
 * Algorithm tags and the per-algorithm parameters carried between ticks
 */

use crate::core::errors::SimError;
use crate::core::types::{SimResult, Tick};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Default Round-Robin time quantum
pub const DEFAULT_TIME_QUANTUM: Tick = 4;

/// Multilevel-queue quantum for the Medium class
pub const MEDIUM_QUANTUM: Tick = 3;

/// Multilevel-queue quantum for the Low class
pub const LOW_QUANTUM: Tick = 5;

/// Scheduling discipline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// First-Come-First-Served, non-preemptive
    Fcfs,
    /// Shortest-Job-First, non-preemptive
    Sjf,
    /// Round-Robin with a fixed time quantum
    RoundRobin,
    /// Priority (lower value first), non-preemptive
    Priority,
    /// Multilevel queue with High/Medium/Low classes
    MultilevelQueue,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::RoundRobin,
        Algorithm::Priority,
        Algorithm::MultilevelQueue,
    ];

    /// Short tag used in configuration and serialized output
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::RoundRobin => "rr",
            Self::Priority => "priority",
            Self::MultilevelQueue => "mlq",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS (First Come First Serve)",
            Self::Sjf => "SJF (Shortest Job First)",
            Self::RoundRobin => "Round Robin",
            Self::Priority => "Priority Scheduling",
            Self::MultilevelQueue => "Multilevel Queue",
        }
    }
}

impl FromStr for Algorithm {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::Sjf),
            "rr" | "round_robin" | "roundrobin" => Ok(Self::RoundRobin),
            "priority" | "prio" => Ok(Self::Priority),
            "mlq" | "multilevel" => Ok(Self::MultilevelQueue),
            _ => Err(SimError::Configuration(
                format!("Invalid algorithm '{}'. Valid: fcfs, sjf, rr, priority, mlq", s).into(),
            )),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Algorithm {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Quantum counters for the two time-sliced multilevel classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MlqQuanta {
    pub medium_quantum: Tick,
    pub low_quantum: Tick,
    pub medium_remaining: Tick,
    pub low_remaining: Tick,
}

impl Default for MlqQuanta {
    fn default() -> Self {
        Self {
            medium_quantum: MEDIUM_QUANTUM,
            low_quantum: LOW_QUANTUM,
            medium_remaining: 0,
            low_remaining: 0,
        }
    }
}

/// Parameters threaded through consecutive ticks
///
/// FCFS, SJF and Priority ignore every field. Round-Robin uses
/// `time_quantum`/`quantum_remaining`; the multilevel queue uses `mlq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyParams {
    pub time_quantum: Tick,
    pub quantum_remaining: Tick,
    pub mlq: MlqQuanta,
}

impl PolicyParams {
    /// Round-Robin parameters with a fresh counter
    pub fn round_robin(time_quantum: Tick) -> Self {
        Self {
            time_quantum,
            ..Self::default()
        }
    }

    /// Multilevel-queue parameters with custom class quanta
    pub fn multilevel(medium_quantum: Tick, low_quantum: Tick) -> Self {
        Self {
            mlq: MlqQuanta {
                medium_quantum,
                low_quantum,
                ..MlqQuanta::default()
            },
            ..Self::default()
        }
    }

    /// Same configuration with every running counter cleared
    #[must_use]
    pub fn fresh(&self) -> Self {
        Self {
            time_quantum: self.time_quantum,
            quantum_remaining: 0,
            mlq: MlqQuanta {
                medium_remaining: 0,
                low_remaining: 0,
                ..self.mlq
            },
        }
    }

    /// Reject parameters the given algorithm cannot tick with
    pub fn validate_for(&self, algorithm: Algorithm) -> SimResult<()> {
        match algorithm {
            Algorithm::RoundRobin if self.time_quantum < 1 => Err(SimError::invalid_parameter(
                format!("time quantum {} is below 1", self.time_quantum),
            )),
            Algorithm::MultilevelQueue if self.mlq.medium_quantum < 1 => {
                Err(SimError::invalid_parameter(format!(
                    "medium queue quantum {} is below 1",
                    self.mlq.medium_quantum
                )))
            }
            Algorithm::MultilevelQueue if self.mlq.low_quantum < 1 => {
                Err(SimError::invalid_parameter(format!(
                    "low queue quantum {} is below 1",
                    self.mlq.low_quantum
                )))
            }
            _ => Ok(()),
        }
    }
}

impl Default for PolicyParams {
    fn default() -> Self {
        Self {
            time_quantum: DEFAULT_TIME_QUANTUM,
            quantum_remaining: 0,
            mlq: MlqQuanta::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_round_trips_through_tag() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.as_str().parse::<Algorithm>().unwrap(), algorithm);
        }
        assert_eq!("Round_Robin".parse::<Algorithm>().unwrap(), Algorithm::RoundRobin);
        assert!(matches!(
            "lottery".parse::<Algorithm>(),
            Err(SimError::Configuration(_))
        ));
    }

    #[test]
    fn test_algorithm_serde_uses_tag() {
        let json = serde_json::to_string(&Algorithm::MultilevelQueue).unwrap();
        assert_eq!(json, "\"mlq\"");
        let back: Algorithm = serde_json::from_str("\"sjf\"").unwrap();
        assert_eq!(back, Algorithm::Sjf);
    }

    #[test]
    fn test_zero_quantum_rejected_only_for_rr() {
        let params = PolicyParams::round_robin(0);
        assert!(params.validate_for(Algorithm::RoundRobin).is_err());
        assert!(params.validate_for(Algorithm::Fcfs).is_ok());
        assert!(params.validate_for(Algorithm::MultilevelQueue).is_ok());
    }

    #[test]
    fn test_zero_class_quantum_rejected_for_mlq() {
        let params = PolicyParams::multilevel(3, 0);
        assert!(matches!(
            params.validate_for(Algorithm::MultilevelQueue),
            Err(SimError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_fresh_clears_counters() {
        let mut params = PolicyParams::round_robin(2);
        params.quantum_remaining = 1;
        params.mlq.low_remaining = 4;
        let fresh = params.fresh();
        assert_eq!(fresh.time_quantum, 2);
        assert_eq!(fresh.quantum_remaining, 0);
        assert_eq!(fresh.mlq.low_remaining, 0);
        assert_eq!(fresh.mlq.low_quantum, LOW_QUANTUM);
    }
}
