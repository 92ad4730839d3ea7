//! Periodic refresh scheduling
//!
//! Two plain worker threads: one firing notification fetch rounds at
//! the configured interval, one refreshing account user details on a
//! slower cadence. Each thread parks on a channel so shutdown is
//! immediate instead of waiting out the interval.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::debug;

use crate::models::ACCOUNT_REFRESH_INTERVAL_MS;

/// Handle to the running refresh threads.
///
/// Changing the fetch interval means shutting the scheduler down and
/// starting a new one; the threads themselves never reconfigure.
pub struct RefreshScheduler {
    stop_senders: Vec<Sender<()>>,
    handles: Vec<JoinHandle<()>>,
}

impl RefreshScheduler {
    /// Start both refresh threads.
    ///
    /// `on_refresh` fires immediately and then every `fetch_interval_ms`;
    /// `on_account_refresh` fires immediately and then hourly.
    pub fn start<F, G>(fetch_interval_ms: u64, on_refresh: F, on_account_refresh: G) -> Self
    where
        F: Fn() + Send + 'static,
        G: Fn() + Send + 'static,
    {
        debug!("Starting refresh scheduler (interval {fetch_interval_ms}ms)");
        let mut stop_senders = Vec::new();
        let mut handles = Vec::new();

        let (fetch_tx, fetch_rx) = mpsc::channel();
        stop_senders.push(fetch_tx);
        handles.push(thread::spawn(move || {
            let interval = Duration::from_millis(fetch_interval_ms);
            loop {
                on_refresh();
                match fetch_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    _ => break,
                }
            }
        }));

        let (account_tx, account_rx) = mpsc::channel();
        stop_senders.push(account_tx);
        handles.push(thread::spawn(move || {
            let interval = Duration::from_millis(ACCOUNT_REFRESH_INTERVAL_MS);
            loop {
                on_account_refresh();
                match account_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    _ => break,
                }
            }
        }));

        Self {
            stop_senders,
            handles,
        }
    }

    /// Stop both threads and wait for them to exit
    pub fn shutdown(mut self) {
        debug!("Stopping refresh scheduler");
        for sender in self.stop_senders.drain(..) {
            // A thread that already exited has dropped its receiver
            let _ = sender.send(());
        }
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_fires_immediately_and_shuts_down() {
        let refreshes = Arc::new(AtomicUsize::new(0));
        let account_refreshes = Arc::new(AtomicUsize::new(0));

        let r = Arc::clone(&refreshes);
        let a = Arc::clone(&account_refreshes);
        let scheduler = RefreshScheduler::start(
            3_600_000,
            move || {
                r.fetch_add(1, Ordering::SeqCst);
            },
            move || {
                a.fetch_add(1, Ordering::SeqCst);
            },
        );

        // Both callbacks fire once at startup
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while (refreshes.load(Ordering::SeqCst) == 0
            || account_refreshes.load(Ordering::SeqCst) == 0)
            && std::time::Instant::now() < deadline
        {
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
        assert_eq!(account_refreshes.load(Ordering::SeqCst), 1);

        scheduler.shutdown();
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    }
}
