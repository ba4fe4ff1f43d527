//! Debounced proxy around an arbitrary action
//!
//! A [`Debouncer`] defers running its action until `delay` has elapsed without
//! another [`Debouncer::call`]. Calls made inside the window replace the
//! pending arguments and restart the window; superseded calls are dropped,
//! never queued.
//!
//! Once a window elapses the invocation leaves the slot and runs to completion
//! on its own task. Later calls never cancel or wait for it, so actions from
//! distinct windows may overlap.

use crate::config::DebounceConfig;
use crate::error::ConfigError;
use crate::slot::PendingSlot;
use crate::Result;
use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::Mutex;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, trace};

type Action<A> = Arc<dyn Fn(A) -> BoxFuture<'static, ()> + Send + Sync>;

struct Inner<A> {
    /// Quiescence window
    delay: Duration,

    /// Wrapped action, captured at construction
    action: Action<A>,

    /// The single pending invocation
    slot: Mutex<PendingSlot<A>>,

    /// Runtime the timers are spawned on
    runtime: Handle,
}

/// Debounced proxy
///
/// Cloning yields another handle to the same instance. The pending timer is
/// released when [`Debouncer::dispose`] is called or when the last handle is
/// dropped, whichever comes first.
pub struct Debouncer<A> {
    inner: Arc<Inner<A>>,
}

/// Non-owning handle to a [`Debouncer`]
///
/// Lets an action call its own debouncer without keeping it alive.
pub struct WeakDebouncer<A> {
    inner: Weak<Inner<A>>,
}

impl<A: Send + 'static> Debouncer<A> {
    /// Wrap `action` in a debounced proxy
    ///
    /// Fails if the config is invalid or if there is no tokio runtime to
    /// schedule timers on.
    pub fn new<F, Fut>(config: DebounceConfig, action: F) -> Result<Self>
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::from_action(config, Arc::new(move |args| action(args).boxed()))
    }

    /// Wrap `action` and deliver each dispatched invocation's output
    ///
    /// Outputs arrive in completion order and are passed through untouched,
    /// so an action returning `Result` surfaces its errors to the receiver.
    /// If the receiver is dropped, outputs are discarded.
    pub fn with_outcomes<F, Fut, R>(
        config: DebounceConfig,
        action: F,
    ) -> Result<(Self, mpsc::UnboundedReceiver<R>)>
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: Send + 'static,
    {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        let debouncer = Self::from_action(
            config,
            Arc::new(move |args| {
                let running = action(args);
                let outcome_tx = outcome_tx.clone();
                async move {
                    if outcome_tx.send(running.await).is_err() {
                        trace!("Outcome receiver dropped, discarding result");
                    }
                }
                .boxed()
            }),
        )?;

        Ok((debouncer, outcome_rx))
    }

    fn from_action(config: DebounceConfig, action: Action<A>) -> Result<Self> {
        let delay = config.delay()?;
        let runtime = Handle::try_current().map_err(|_| ConfigError::NoRuntime)?;

        debug!("Created debouncer (delay: {:?})", delay);

        Ok(Self {
            inner: Arc::new(Inner {
                delay,
                action,
                slot: Mutex::new(PendingSlot::new()),
                runtime,
            }),
        })
    }

    /// Request an invocation with `args`
    ///
    /// Replaces any pending invocation and restarts the window. Never blocks.
    pub fn call(&self, args: A) {
        schedule(&self.inner, args);
    }

    /// Dispatch the pending invocation now instead of waiting out the window
    ///
    /// Returns false if nothing was pending.
    pub fn flush(&self) -> bool {
        let taken = self.inner.slot.lock().take();
        let Some(args) = taken else {
            return false;
        };

        debug!("Flushing pending invocation");
        let action = Arc::clone(&self.inner.action);
        self.inner.runtime.spawn(async move { action(args).await });
        true
    }

    pub fn downgrade(&self) -> WeakDebouncer<A> {
        WeakDebouncer {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl<A> Debouncer<A> {
    /// Drop the pending invocation without running it
    ///
    /// Returns true if an invocation was pending. Safe to call at any time.
    pub fn cancel(&self) -> bool {
        let cancelled = self.inner.slot.lock().clear();
        if cancelled {
            debug!("Cancelled pending invocation");
        }
        cancelled
    }

    /// Release the pending timer, if any
    pub fn dispose(&self) {
        self.cancel();
    }

    pub fn is_pending(&self) -> bool {
        self.inner.slot.lock().is_pending()
    }

    pub fn delay(&self) -> Duration {
        self.inner.delay
    }
}

impl<A> Clone for Debouncer<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> fmt::Debug for Debouncer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.inner.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}

impl<A: Send + 'static> WeakDebouncer<A> {
    pub fn upgrade(&self) -> Option<Debouncer<A>> {
        self.inner.upgrade().map(|inner| Debouncer { inner })
    }

    /// Call through to the debouncer if it is still alive
    ///
    /// Returns false if the debouncer has been dropped.
    pub fn call(&self, args: A) -> bool {
        match self.inner.upgrade() {
            Some(inner) => {
                schedule(&inner, args);
                true
            }
            None => false,
        }
    }
}

impl<A> Clone for WeakDebouncer<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

/// Start a new window for `args`, superseding the pending one
fn schedule<A: Send + 'static>(inner: &Arc<Inner<A>>, args: A) {
    let deadline = Instant::now() + inner.delay;
    let weak = Arc::downgrade(inner);

    // Spawn under the lock so the timer cannot claim before it is installed
    let mut slot = inner.slot.lock();
    let generation = slot.next_generation();
    let timer = inner.runtime.spawn(async move {
        tokio::time::sleep_until(deadline).await;
        fire(weak, generation).await;
    });

    if slot.replace(generation, args, timer) {
        trace!("Invocation {} superseded the pending one", generation);
    }
}

/// Timer body: run the action if this timer still owns the slot
async fn fire<A: Send + 'static>(inner: Weak<Inner<A>>, generation: u64) {
    let Some(inner) = inner.upgrade() else {
        trace!("Debouncer dropped before invocation {} fired", generation);
        return;
    };

    let claimed = inner.slot.lock().claim(generation);
    let Some(args) = claimed else {
        return;
    };

    // Only the action outlives this point; the slot is free for new calls
    let action = Arc::clone(&inner.action);
    drop(inner);

    debug!("Dispatching invocation {}", generation);
    action(args).await;
}
