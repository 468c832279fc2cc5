//! Counter state machine exposed through the `counter-ffi` C ABI.
//!
//! This crate holds everything about a counter that does not depend on
//! the language boundary:
//!
//! - [`Counter`]: value, optional label and the single change-notification slot
//! - [`CounterConfig`] / [`OverflowPolicy`]: how additions behave at the i64 limits
//! - [`CounterError`]: failures the state machine itself can report
//!
//! # Example
//!
//! ```
//! use counter_core::Counter;
//!
//! let mut counter = Counter::new(42);
//! counter.increment(5).unwrap();
//! counter.increment(-2).unwrap();
//! assert_eq!(counter.value(), 45);
//!
//! counter.reset();
//! assert_eq!(counter.value(), 0);
//! ```

mod config;
mod counter;
mod error;

pub use config::{CounterConfig, OverflowPolicy};
pub use counter::{ChangeCallback, Counter};
pub use error::{CounterError, CounterResult};
