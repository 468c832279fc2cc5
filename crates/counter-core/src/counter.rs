//! Counter state and its mutation rules.

use std::fmt;

use log::trace;

use crate::config::CounterConfig;
use crate::error::{CounterError, CounterResult};

/// Change-notification slot. Receives the new value after each successful
/// mutation.
pub type ChangeCallback = Box<dyn FnMut(i64) + Send>;

/// A 64-bit signed counter with an optional label and a single
/// change-notification slot.
///
/// The value only changes through [`increment`](Self::increment) and
/// [`reset`](Self::reset). Both notify the registered callback, if any,
/// after the new value is stored and before returning.
pub struct Counter {
    value: i64,
    label: Option<String>,
    on_change: Option<ChangeCallback>,
    config: CounterConfig,
}

impl Counter {
    pub fn new(initial: i64) -> Self {
        Self::with_config(initial, CounterConfig::default())
    }

    pub fn with_config(initial: i64, config: CounterConfig) -> Self {
        Self {
            value: initial,
            label: None,
            on_change: None,
            config,
        }
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Adds `delta` to the value according to the configured overflow policy.
    ///
    /// Returns the new value. With
    /// [`OverflowPolicy::Reject`](crate::OverflowPolicy::Reject) an
    /// overflowing delta leaves the value unchanged and the callback is not
    /// invoked.
    pub fn increment(&mut self, delta: i64) -> CounterResult<i64> {
        let next = self
            .config
            .overflow
            .apply(self.value, delta)
            .ok_or_else(|| CounterError::overflow(self.value, delta))?;

        if self.value.checked_add(delta).is_none() {
            trace!(
                "Counter overflow handled by {} policy: {} + {} -> {}",
                self.config.overflow,
                self.value,
                delta,
                next
            );
        }

        self.value = next;
        self.notify();
        Ok(next)
    }

    /// Sets the value to zero, not to the initial value.
    pub fn reset(&mut self) {
        self.value = 0;
        self.notify();
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Replaces the label. An empty string clears it.
    pub fn set_label(&mut self, label: impl Into<String>) {
        let label = label.into();
        self.label = if label.is_empty() { None } else { Some(label) };
    }

    /// Installs or clears the change callback. A new callback replaces the
    /// previous one.
    pub fn set_on_change(&mut self, callback: Option<ChangeCallback>) {
        self.on_change = callback;
    }

    pub fn has_on_change(&self) -> bool {
        self.on_change.is_some()
    }

    fn notify(&mut self) {
        if let Some(callback) = self.on_change.as_mut() {
            callback(self.value);
        }
    }
}

impl fmt::Debug for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Counter")
            .field("value", &self.value)
            .field("label", &self.label)
            .field("on_change", &self.on_change.is_some())
            .field("config", &self.config)
            .finish()
    }
}
