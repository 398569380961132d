// src/signal.rs

//! Operator interrupt routing.
//!
//! Ctrl+C is honoured at exactly two points: while the dev server is in the
//! foreground it stops the server (a clean stop), anywhere else it cancels
//! the whole run. A single listener decides which of the two a given
//! interrupt belongs to.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct Inner {
    foreground: AtomicBool,
    cancel: Notify,
    foreground_stop: Notify,
}

/// Cloneable handle shared by the dispatcher and the dev-server step.
#[derive(Debug, Clone, Default)]
pub struct Interrupts {
    inner: Arc<Inner>,
}

impl Interrupts {
    /// Handle with no OS listener attached; interrupts only come from
    /// [`Interrupts::raise`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle wired to the process's Ctrl+C signal.
    ///
    /// The OS handler is registered before this returns, so an interrupt
    /// that arrives before the first step yields is still routed here
    /// instead of killing the process.
    pub fn listen() -> Self {
        let interrupts = Self::new();
        let handle = interrupts.clone();

        #[cfg(unix)]
        let listener = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt());
        #[cfg(windows)]
        let listener = tokio::signal::windows::ctrl_c();

        match listener {
            Ok(mut stream) => {
                tokio::spawn(async move {
                    while stream.recv().await.is_some() {
                        handle.raise();
                    }
                    debug!("interrupt stream closed");
                });
            }
            Err(e) => warn!(error = %e, "failed to listen for Ctrl+C"),
        }
        interrupts
    }

    /// Deliver one interrupt to whichever party currently owns it.
    pub fn raise(&self) {
        if self.inner.foreground.load(Ordering::SeqCst) {
            debug!("interrupt routed to foreground process");
            self.inner.foreground_stop.notify_one();
        } else {
            debug!("interrupt routed to dispatcher");
            self.inner.cancel.notify_one();
        }
    }

    /// Resolves when the run as a whole has been cancelled.
    pub async fn cancelled(&self) {
        self.inner.cancel.notified().await;
    }

    /// Claim interrupts for a foreground process until the guard is dropped.
    pub fn foreground(&self) -> ForegroundGuard {
        self.inner.foreground.store(true, Ordering::SeqCst);
        ForegroundGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn in_foreground(&self) -> bool {
        self.inner.foreground.load(Ordering::SeqCst)
    }
}

/// Routes interrupts to the foreground process while alive.
#[derive(Debug)]
pub struct ForegroundGuard {
    inner: Arc<Inner>,
}

impl ForegroundGuard {
    /// Resolves when an interrupt arrives for the foreground process.
    pub async fn stopped(&self) {
        self.inner.foreground_stop.notified().await;
    }
}

impl Drop for ForegroundGuard {
    fn drop(&mut self) {
        self.inner.foreground.store(false, Ordering::SeqCst);
    }
}
