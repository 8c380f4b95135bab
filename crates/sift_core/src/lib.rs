//! Sift Core Runtime
//!
//! Foundational primitives shared by the Sift crates:
//!
//! - **Events**: keyboard events carrying default-action and propagation flags
//! - **Timers**: a virtual-clock timer queue with cancelable handles
//! - **Debounce**: cancel-and-restart scheduling on top of the timer queue
//!
//! Everything here is single-threaded. Time only moves when the host calls
//! [`TimerQueue::advance`], which keeps debounced behavior deterministic.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use sift_core::timer::{Debouncer, TimerQueue};
//!
//! let mut queue = TimerQueue::new();
//! let mut debounce = Debouncer::new(Duration::from_millis(150));
//!
//! debounce.trigger(&mut queue, "first");
//! debounce.trigger(&mut queue, "second");
//!
//! let fired = queue.advance(Duration::from_millis(150));
//! assert_eq!(fired.len(), 1);
//! assert_eq!(fired[0].1, "second");
//! ```

pub mod events;
pub mod timer;

pub use events::{Key, KeyEvent};
pub use timer::{Debouncer, PendingTimer, TimerId, TimerQueue};
