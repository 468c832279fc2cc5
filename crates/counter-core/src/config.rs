//! Per-counter configuration.

use std::fmt;

/// What happens when an increment would leave the i64 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverflowPolicy {
    /// Clamp to `i64::MIN` / `i64::MAX`.
    #[default]
    Saturate,
    /// Two's-complement wrap-around.
    Wrap,
    /// Leave the value unchanged and report
    /// [`CounterError::Overflow`](crate::CounterError::Overflow).
    Reject,
}

impl OverflowPolicy {
    /// Applies the policy to `value + delta`.
    ///
    /// Returns `None` only for [`OverflowPolicy::Reject`] when the sum overflows.
    pub fn apply(self, value: i64, delta: i64) -> Option<i64> {
        match self {
            OverflowPolicy::Saturate => Some(value.saturating_add(delta)),
            OverflowPolicy::Wrap => Some(value.wrapping_add(delta)),
            OverflowPolicy::Reject => value.checked_add(delta),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OverflowPolicy::Saturate => "saturate",
            OverflowPolicy::Wrap => "wrap",
            OverflowPolicy::Reject => "reject",
        }
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration fixed at counter creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterConfig {
    pub overflow: OverflowPolicy,
}

impl CounterConfig {
    pub fn with_overflow(overflow: OverflowPolicy) -> Self {
        Self { overflow }
    }
}
