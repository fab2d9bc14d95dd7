//! Interrupt signalling between the signal handler and the chat loop.
//!
//! An [`Interrupt`] is armed while a turn is in flight or a reply is being typed.  The first
//! signal while armed cancels that work; any other signal is left to the caller, which exits.

use std::pin::pin;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

/// Shared Ctrl+C state for one chat loop.
#[derive(Debug, Default)]
pub struct Interrupt {
    armed: AtomicBool,
    fired: AtomicBool,
    notify: Notify,
}

impl Interrupt {
    /// Creates a disarmed interrupt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the interrupt for a new piece of cancellable work and clears any earlier signal.
    pub fn arm(&self) {
        self.fired.store(false, Ordering::SeqCst);
        self.armed.store(true, Ordering::SeqCst);
    }

    /// Disarms the interrupt; signals are no longer absorbed.
    pub fn disarm(&self) {
        self.armed.store(false, Ordering::SeqCst);
        self.fired.store(false, Ordering::SeqCst);
    }

    /// Records a signal.
    ///
    /// Returns `true` when the signal cancelled armed work.  Returns `false` when nothing was
    /// armed or a signal had already fired; the caller should then terminate.
    pub fn trigger(&self) -> bool {
        if !self.armed.load(Ordering::SeqCst) {
            return false;
        }
        if self.fired.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.notify.notify_waiters();
        true
    }

    /// Whether a signal fired since the last `arm`.
    pub fn is_set(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// The flag the typewriter polls between characters.
    pub fn flag(&self) -> &AtomicBool {
        &self.fired
    }

    /// Completes once a signal fires; immediately if one already has.
    pub async fn wait(&self) {
        loop {
            let mut notified = pin!(self.notify.notified());
            notified.as_mut().enable();
            if self.is_set() {
                return;
            }
            notified.await;
        }
    }
}
