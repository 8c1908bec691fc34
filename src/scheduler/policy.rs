/*!
 * Scheduling Disciplines
 * The small capability set that distinguishes one algorithm from another
 *
 * Every algorithm shares the same tick skeleton (see `engine`). What varies
 * is how the ready queue is ordered and picked from, whether a process runs
 * under a time slice, and whether a ready process may displace the running
 * one mid-slice.
 */

use super::types::{Algorithm, PolicyParams};
use crate::core::types::Tick;
use crate::process::{Process, QueueClass};
use std::collections::VecDeque;

/// How the ready queue is arranged and which entry is dispatched next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOrder {
    /// Arrival/requeue order, head first
    Fifo,
    /// Stable ascending burst time, head first
    ShortestBurst,
    /// Stable ascending priority value, unset last, head first
    HighestPriority,
    /// Queue kept in FIFO order; the first process of the most urgent
    /// non-empty class is picked
    StrictClass,
}

impl SelectionOrder {
    /// Reorder the ready queue before selection
    pub fn arrange(self, queue: &mut VecDeque<Process>) {
        match self {
            Self::Fifo | Self::StrictClass => {}
            Self::ShortestBurst => queue.make_contiguous().sort_by_key(|p| p.burst_time),
            Self::HighestPriority => queue.make_contiguous().sort_by_key(Process::priority_key),
        }
    }

    /// Index of the process to dispatch next
    pub fn pick(self, queue: &VecDeque<Process>) -> Option<usize> {
        match self {
            Self::StrictClass => QueueClass::ORDER
                .iter()
                .find_map(|class| queue.iter().position(|p| p.class() == *class)),
            _ if queue.is_empty() => None,
            _ => Some(0),
        }
    }
}

/// Time-slice bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantumRule {
    /// No slicing; a dispatched process keeps the CPU until it completes
    RunToCompletion,
    /// One shared counter reset to `time_quantum` on every dispatch
    Fixed,
    /// High runs unsliced; Medium and Low each use their own counter
    PerClass,
}

impl QuantumRule {
    /// Fresh slice length for a process being dispatched
    pub fn slice_for(self, process: &Process, params: &PolicyParams) -> Option<Tick> {
        match (self, process.class()) {
            (Self::RunToCompletion, _) => None,
            (Self::Fixed, _) => Some(params.time_quantum),
            (Self::PerClass, QueueClass::High) => None,
            (Self::PerClass, QueueClass::Medium) => Some(params.mlq.medium_quantum),
            (Self::PerClass, QueueClass::Low) => Some(params.mlq.low_quantum),
        }
    }

    /// Counter tracking the running slice of `process`, if it is sliced
    pub fn counter<'a>(
        self,
        process: &Process,
        params: &'a mut PolicyParams,
    ) -> Option<&'a mut Tick> {
        match (self, process.class()) {
            (Self::RunToCompletion, _) => None,
            (Self::Fixed, _) => Some(&mut params.quantum_remaining),
            (Self::PerClass, QueueClass::High) => None,
            (Self::PerClass, QueueClass::Medium) => Some(&mut params.mlq.medium_remaining),
            (Self::PerClass, QueueClass::Low) => Some(&mut params.mlq.low_remaining),
        }
    }
}

/// Whether a ready process may displace the running one before its slice ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreemptionRule {
    Never,
    /// A ready High-class process displaces a running Medium/Low process
    HighClassReady,
}

impl PreemptionRule {
    pub fn should_preempt(self, running: &Process, ready: &VecDeque<Process>) -> bool {
        match self {
            Self::Never => false,
            Self::HighClassReady => {
                running.class() != QueueClass::High
                    && ready.iter().any(|p| p.class() == QueueClass::High)
            }
        }
    }
}

/// Capability set of one algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discipline {
    pub order: SelectionOrder,
    pub quantum: QuantumRule,
    pub preemption: PreemptionRule,
}

impl Algorithm {
    pub const fn discipline(self) -> Discipline {
        match self {
            Algorithm::Fcfs => Discipline {
                order: SelectionOrder::Fifo,
                quantum: QuantumRule::RunToCompletion,
                preemption: PreemptionRule::Never,
            },
            Algorithm::Sjf => Discipline {
                order: SelectionOrder::ShortestBurst,
                quantum: QuantumRule::RunToCompletion,
                preemption: PreemptionRule::Never,
            },
            Algorithm::RoundRobin => Discipline {
                order: SelectionOrder::Fifo,
                quantum: QuantumRule::Fixed,
                preemption: PreemptionRule::Never,
            },
            Algorithm::Priority => Discipline {
                order: SelectionOrder::HighestPriority,
                quantum: QuantumRule::RunToCompletion,
                preemption: PreemptionRule::Never,
            },
            Algorithm::MultilevelQueue => Discipline {
                order: SelectionOrder::StrictClass,
                quantum: QuantumRule::PerClass,
                preemption: PreemptionRule::HighClassReady,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(processes: Vec<Process>) -> VecDeque<Process> {
        VecDeque::from(processes)
    }

    #[test]
    fn test_shortest_burst_is_stable() {
        let mut q = queue(vec![
            Process::new(1, "A", 0, 4),
            Process::new(2, "B", 0, 2),
            Process::new(3, "C", 0, 4),
            Process::new(4, "D", 0, 2),
        ]);
        SelectionOrder::ShortestBurst.arrange(&mut q);
        let ids: Vec<_> = q.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_unset_priority_sorts_last() {
        let mut q = queue(vec![
            Process::new(1, "A", 0, 1),
            Process::new(2, "B", 0, 1).with_priority(5),
            Process::new(3, "C", 0, 1).with_priority(0),
        ]);
        SelectionOrder::HighestPriority.arrange(&mut q);
        let ids: Vec<_> = q.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_strict_class_pick() {
        let q = queue(vec![
            Process::new(1, "A", 0, 1).with_queue_class(QueueClass::Low),
            Process::new(2, "B", 0, 1).with_queue_class(QueueClass::Medium),
            Process::new(3, "C", 0, 1).with_queue_class(QueueClass::Medium),
        ]);
        assert_eq!(SelectionOrder::StrictClass.pick(&q), Some(1));
        assert_eq!(SelectionOrder::Fifo.pick(&q), Some(0));
        assert_eq!(SelectionOrder::StrictClass.pick(&VecDeque::new()), None);
    }

    #[test]
    fn test_per_class_slices() {
        let params = PolicyParams::default();
        let high = Process::new(1, "H", 0, 1);
        let low = Process::new(2, "L", 0, 1).with_queue_class(QueueClass::Low);
        assert_eq!(QuantumRule::PerClass.slice_for(&high, &params), None);
        assert_eq!(QuantumRule::PerClass.slice_for(&low, &params), Some(5));
        assert_eq!(QuantumRule::Fixed.slice_for(&high, &params), Some(4));
    }

    #[test]
    fn test_high_class_preemption() {
        let low = Process::new(1, "L", 0, 9).with_queue_class(QueueClass::Low);
        let high = Process::new(2, "H", 3, 2);
        let medium = Process::new(3, "M", 3, 2).with_queue_class(QueueClass::Medium);

        let rule = PreemptionRule::HighClassReady;
        assert!(rule.should_preempt(&low, &queue(vec![high.clone()])));
        assert!(!rule.should_preempt(&low, &queue(vec![medium])));
        assert!(!rule.should_preempt(&high, &queue(vec![high.clone()])));
        assert!(!PreemptionRule::Never.should_preempt(&low, &queue(vec![high])));
    }
}
