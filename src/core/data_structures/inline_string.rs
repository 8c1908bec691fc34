/*!
 * Inline String Optimization
 * Zero-allocation strings for process labels and error messages
 */

use serde::{Deserialize, Serialize};
use smartstring::alias::String as SmartString;
use std::fmt;

/// Inline-optimized string that stores short strings (≤23 bytes) without heap allocation
///
/// Process names and colours are cloned into every snapshot the simulator
/// produces, so keeping them inline keeps history snapshots allocation-light.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct InlineString {
    inner: SmartString,
}

impl InlineString {
    /// Create new empty string
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: SmartString::new(),
        }
    }

    /// Get string slice
    #[inline(always)]
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }

    /// Check if string is stored inline (no heap allocation)
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.inner.is_inline()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<&str> for InlineString {
    #[inline]
    fn from(s: &str) -> Self {
        Self {
            inner: SmartString::from(s),
        }
    }
}

impl From<String> for InlineString {
    #[inline]
    fn from(s: String) -> Self {
        Self {
            inner: SmartString::from(s),
        }
    }
}

impl From<InlineString> for String {
    #[inline]
    fn from(s: InlineString) -> Self {
        s.inner.into()
    }
}

impl AsRef<str> for InlineString {
    #[inline(always)]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::ops::Deref for InlineString {
    type Target = str;

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for InlineString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<str> for InlineString {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for InlineString {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_labels_stay_inline() {
        let name = InlineString::from("P12");
        assert!(name.is_inline());
        assert_eq!(name, "P12");

        let color = InlineString::from("#3b82f6");
        assert!(color.is_inline());
    }

    #[test]
    fn test_long_string_heap_allocated() {
        let long = InlineString::from(
            "duplicate process id 7 appears more than once in the registry",
        );
        assert!(!long.is_inline());
        assert!(long.contains("duplicate"));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let name = InlineString::from("P1");
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"P1\"");
        let back: InlineString = serde_json::from_str("\"P2\"").unwrap();
        assert_eq!(back, "P2");
    }
}
