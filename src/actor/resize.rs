//! Resize Watcher: Dedicated thread polling terminal dimensions.
//!
//! Samples the terminal size on a fixed interval (250 ms by default) and,
//! when it changes, invokes the callback from its own thread. The callback
//! exclusively owns the resize-and-redraw cycle; the shell wires it to lock
//! the shared workspace, resize the screen buffer, re-bound every view,
//! redraw, and flush. There is no coordination signal back to the main loop
//! beyond that shared state.

use crossterm::terminal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::debug;

/// Default polling interval for terminal-size changes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Background poller that detects terminal-size changes.
pub struct ResizeWatcher {
    /// Handle to the watcher thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl ResizeWatcher {
    /// Spawn the watcher thread.
    ///
    /// `on_change` runs on the watcher thread with the new `(width, height)`
    /// every time the polled size differs from the last observed size. It
    /// must serialize against the main loop itself (the shell passes a
    /// closure that takes the workspace mutex).
    ///
    /// The watcher runs for the process lifetime unless [`join`](Self::join)
    /// is called; dropping it only signals shutdown.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the thread.
    pub fn spawn<F>(interval: Duration, mut on_change: F) -> Self
    where
        F: FnMut(u16, u16) + Send + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("termgrid-resize".to_string())
            .spawn(move || {
                let (mut width, mut height) = terminal::size().unwrap_or((0, 0));

                loop {
                    if shutdown_clone.load(Ordering::Relaxed) {
                        break;
                    }

                    if let Ok((w2, h2)) = terminal::size() {
                        if w2 != width || h2 != height {
                            debug!(width = w2, height = h2, "terminal resized");
                            on_change(w2, h2);
                            width = w2;
                            height = h2;
                        }
                    }

                    thread::sleep(interval);
                }
            })
            .expect("failed to spawn resize watcher thread");

        Self {
            handle: Some(handle),
            shutdown,
        }
    }

    /// Signal the watcher to shut down.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the watcher thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ResizeWatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}
