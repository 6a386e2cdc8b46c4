//! [`Scheduler`] over browser timeouts.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Weak;
use std::time::Duration;

use folio_core::{Scheduler, TimerHandle};
use gloo::timers::callback::Timeout;

use crate::runtime::Runtime;

/// Browser timers that call back into the runtime when they fire.
///
/// Each pending timer owns its [`Timeout`]; removing it from the table
/// clears the browser timeout and frees the callback.
pub struct WebScheduler {
    runtime: Weak<RefCell<Runtime>>,
    next_id: u64,
    pending: HashMap<TimerHandle, Timeout>,
}

impl WebScheduler {
    /// Creates a scheduler whose timers fire into `runtime`. A dangling
    /// `Weak` is allowed; fired timers are then dropped.
    #[must_use]
    pub fn new(runtime: Weak<RefCell<Runtime>>) -> Self {
        Self {
            runtime,
            next_id: 0,
            pending: HashMap::new(),
        }
    }

    /// Forgets a handle whose timeout already ran. Returns false if it was
    /// cancelled in the meantime.
    pub fn settle(&mut self, handle: TimerHandle) -> bool {
        self.pending.remove(&handle).is_some()
    }

    /// Number of timers scheduled and not yet settled or cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Scheduler for WebScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);

        let runtime = self.runtime.clone();
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let timeout = Timeout::new(millis, move || {
            if let Some(runtime) = runtime.upgrade() {
                Runtime::fire(&runtime, handle);
            }
        });
        self.pending.insert(handle, timeout);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if self.pending.remove(&handle).is_some() {
            tracing::trace!(timer = handle.0, "timeout cleared");
        }
    }
}
