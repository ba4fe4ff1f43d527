//! Single-slot pending invocation
//!
//! Holds at most one scheduled call. Installing a new one aborts the timer of
//! the one it replaces, so a superseded call can never fire.

use tokio::task::JoinHandle;

/// A scheduled, not-yet-fired call
struct Pending<A> {
    generation: u64,
    args: A,
    timer: JoinHandle<()>,
}

/// Replace-and-cancel-previous slot
pub(crate) struct PendingSlot<A> {
    next_generation: u64,
    pending: Option<Pending<A>>,
}

impl<A> PendingSlot<A> {
    pub(crate) fn new() -> Self {
        Self {
            next_generation: 0,
            pending: None,
        }
    }

    /// Reserve the generation number for the next scheduled call
    pub(crate) fn next_generation(&mut self) -> u64 {
        self.next_generation = self.next_generation.wrapping_add(1);
        self.next_generation
    }

    /// Install a scheduled call, aborting whatever it replaces
    ///
    /// Returns true if a pending call was superseded.
    pub(crate) fn replace(&mut self, generation: u64, args: A, timer: JoinHandle<()>) -> bool {
        let superseded = self.pending.replace(Pending {
            generation,
            args,
            timer,
        });

        match superseded {
            Some(old) => {
                old.timer.abort();
                true
            }
            None => false,
        }
    }

    /// Hand the arguments to the timer that owns `generation`
    ///
    /// Called by the timer itself once its window elapsed. The timer is not
    /// aborted: it goes on to run the action outside the slot.
    pub(crate) fn claim(&mut self, generation: u64) -> Option<A> {
        if self.pending.as_ref().map(|pending| pending.generation) != Some(generation) {
            return None;
        }
        self.pending.take().map(|pending| pending.args)
    }

    /// Take the pending arguments and abort their timer
    pub(crate) fn take(&mut self) -> Option<A> {
        self.pending.take().map(|pending| {
            pending.timer.abort();
            pending.args
        })
    }

    /// Drop the pending call, if any. Returns true if one was pending.
    pub(crate) fn clear(&mut self) -> bool {
        self.take().is_some()
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<A> Drop for PendingSlot<A> {
    fn drop(&mut self) {
        self.clear();
    }
}
