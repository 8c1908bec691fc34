/*!
 * Process Types
 * Static process descriptions and the raw input they are validated from
 */

use crate::core::data_structures::InlineString;
use crate::core::types::{Priority, ProcessId, Tick, UNSET_PRIORITY};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Display palette assigned by id when a process has no explicit colour
pub const PALETTE: [&str; 8] = [
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899", "#06b6d4", "#84cc16",
];

/// Palette colour for a process id
#[inline]
pub fn palette_color(id: ProcessId) -> &'static str {
    PALETTE[id as usize % PALETTE.len()]
}

/// Multilevel-queue class
///
/// Serialized as its index (0, 1, 2) so registries written out by the
/// simulator load back through `ProcessSpec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QueueClass {
    High = 0,
    Medium = 1,
    Low = 2,
}

impl QueueClass {
    /// Strict dispatch order, most urgent first
    pub const ORDER: [QueueClass; 3] = [QueueClass::High, QueueClass::Medium, QueueClass::Low];

    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Self::High),
            1 => Some(Self::Medium),
            2 => Some(Self::Low),
            _ => None,
        }
    }

    #[inline(always)]
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for QueueClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for QueueClass {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.index())
    }
}

impl<'de> Deserialize<'de> for QueueClass {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let index = i64::deserialize(deserializer)?;
        Self::from_index(index).ok_or_else(|| {
            serde::de::Error::custom(format!("queue class {} is not one of 0, 1, 2", index))
        })
    }
}

/// A process in the registry or in a scheduler snapshot
///
/// Only `remaining_time` ever changes, and only inside scheduler states.
/// Registry copies always hold `remaining_time == burst_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub id: ProcessId,
    pub name: InlineString,
    pub burst_time: Tick,
    pub arrival_time: Tick,
    pub remaining_time: Tick,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_class: Option<QueueClass>,
    pub color: InlineString,
}

impl Process {
    /// Create a fresh process with full remaining time and palette colour
    pub fn new(
        id: ProcessId,
        name: impl Into<InlineString>,
        arrival_time: Tick,
        burst_time: Tick,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            burst_time,
            arrival_time,
            remaining_time: burst_time,
            priority: None,
            queue_class: None,
            color: palette_color(id).into(),
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn with_queue_class(mut self, class: QueueClass) -> Self {
        self.queue_class = Some(class);
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<InlineString>) -> Self {
        self.color = color.into();
        self
    }

    /// Priority used for ordering; unset sorts last
    #[inline(always)]
    pub fn priority_key(&self) -> Priority {
        self.priority.unwrap_or(UNSET_PRIORITY)
    }

    /// Queue class used by the multilevel queue; unset means High
    #[inline(always)]
    pub fn class(&self) -> QueueClass {
        self.queue_class.unwrap_or(QueueClass::High)
    }

    #[inline(always)]
    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }
}

/// Raw process description as supplied by a caller or a registry file
///
/// Fields are signed so malformed input can be reported as an
/// `InvalidRegistry` error instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSpec {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub burst_time: i64,
    pub arrival_time: i64,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default, alias = "queue")]
    pub queue_class: Option<i64>,
    #[serde(default)]
    pub color: Option<String>,
}

impl ProcessSpec {
    pub fn new(id: i64, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id,
            name: None,
            burst_time,
            arrival_time,
            priority: None,
            queue_class: None,
            color: None,
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn with_queue_class(mut self, class: i64) -> Self {
        self.queue_class = Some(class);
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Single-field edit applied to a registry process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ProcessUpdate {
    BurstTime(i64),
    ArrivalTime(i64),
    Priority(i64),
    QueueClass(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_process_defaults() {
        let p = Process::new(3, "P3", 2, 8);
        assert_eq!(p.remaining_time, 8);
        assert_eq!(p.priority_key(), UNSET_PRIORITY);
        assert_eq!(p.class(), QueueClass::High);
        assert_eq!(p.color, palette_color(3));
    }

    #[test]
    fn test_queue_class_from_index() {
        assert_eq!(QueueClass::from_index(1), Some(QueueClass::Medium));
        assert_eq!(QueueClass::from_index(3), None);
        assert_eq!(QueueClass::from_index(-1), None);
        assert!(QueueClass::High < QueueClass::Low);
    }

    #[test]
    fn test_spec_accepts_legacy_queue_key() {
        let spec: ProcessSpec =
            serde_json::from_str(r#"{"id":1,"burstTime":4,"arrivalTime":0,"queue":2}"#).unwrap();
        assert_eq!(spec.queue_class, Some(2));
        assert_eq!(spec.name, None);
    }

    #[test]
    fn test_queue_class_serializes_as_index() {
        let p = Process::new(1, "P1", 0, 2).with_queue_class(QueueClass::Low);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["queueClass"], 2);
        assert_eq!(QueueClass::Low.to_string(), "low");

        let back: Process = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);
        assert!(serde_json::from_str::<QueueClass>("7").is_err());
    }
}
