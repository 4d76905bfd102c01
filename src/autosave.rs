//! Periodic background persistence of the shared contact store.
//!
//! The loop waits on a stop channel for one interval at a time. A timeout is a
//! tick: the store is saved when it holds at least one contact. Receiving the
//! stop signal (or losing the sender) ends the loop without a final save.

use crate::prelude::{AppError, ContactStorage, SharedStore};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutosaveState {
    Idle,
    Waiting,
    Saving,
    Stopped,
}

#[derive(Debug, Clone)]
pub struct AutosaveStatus {
    pub state: AutosaveState,
    pub ticks: u64,
    pub saves: u64,
    pub skipped: u64,
    pub failures: u64,
    pub last_saved_at: Option<DateTime<Utc>>,
}

impl Default for AutosaveStatus {
    fn default() -> Self {
        Self {
            state: AutosaveState::Idle,
            ticks: 0,
            saves: 0,
            skipped: 0,
            failures: 0,
            last_saved_at: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Stopped,
    TimedOut,
}

pub struct Autosave {
    store: SharedStore,
    storage: Arc<dyn ContactStorage + Send + Sync>,
    interval: Duration,
}

impl Autosave {
    pub fn new(
        store: SharedStore,
        storage: impl ContactStorage + Send + Sync + 'static,
        interval: Duration,
    ) -> Self {
        Self {
            store,
            storage: Arc::new(storage),
            interval,
        }
    }

    pub fn spawn(self) -> Result<AutosaveHandle, AppError> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let (done_tx, done_rx) = mpsc::channel::<()>();
        let status = Arc::new(Mutex::new(AutosaveStatus::default()));
        let thread_status = Arc::clone(&status);

        let thread = thread::Builder::new()
            .name("autosave".to_string())
            .spawn(move || {
                self.run(&stop_rx, &thread_status);
                // Dropping the sender is what `stop_and_join` waits for
                drop(done_tx);
            })?;

        Ok(AutosaveHandle {
            stop_tx: Some(stop_tx),
            done_rx,
            thread: Some(thread),
            status,
        })
    }

    fn run(&self, stop_rx: &Receiver<()>, status: &Mutex<AutosaveStatus>) {
        debug!(
            "autosave started for {} every {:?}",
            self.storage.location(),
            self.interval
        );
        update(status, |s| s.state = AutosaveState::Waiting);

        loop {
            match stop_rx.recv_timeout(self.interval) {
                Err(RecvTimeoutError::Timeout) => self.tick(status),
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        update(status, |s| s.state = AutosaveState::Stopped);
        debug!("autosave stopped");
    }

    fn tick(&self, status: &Mutex<AutosaveStatus>) {
        update(status, |s| s.ticks += 1);

        let store = match self.store.lock() {
            Ok(store) => store,
            Err(e) => {
                self.report_failure(status, &AppError::from(e));
                return;
            }
        };

        if store.is_empty() {
            update(status, |s| s.skipped += 1);
            debug!("autosave skipped, no contacts");
            return;
        }

        update(status, |s| s.state = AutosaveState::Saving);
        // The lock is held for the whole write so saves never interleave
        let result = store.save_to(self.storage.as_ref());
        let count = store.len();

        match result {
            Ok(()) => {
                update(status, |s| {
                    s.saves += 1;
                    s.last_saved_at = Some(Utc::now());
                    s.state = AutosaveState::Waiting;
                });
                info!("autosaved {} contacts to {}", count, self.storage.location());
                println!("\n(Autosaved contacts to {})", self.storage.location());
            }
            Err(e) => self.report_failure(status, &e),
        }
    }

    fn report_failure(&self, status: &Mutex<AutosaveStatus>, err: &AppError) {
        update(status, |s| {
            s.failures += 1;
            s.state = AutosaveState::Waiting;
        });
        warn!("autosave to {} failed: {}", self.storage.location(), err);
        println!("\nError during autosave!");
    }
}

fn update(status: &Mutex<AutosaveStatus>, f: impl FnOnce(&mut AutosaveStatus)) {
    let mut status = status.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut status);
}

/// Owner of a running autosave loop. Dropping it stops the loop without waiting.
pub struct AutosaveHandle {
    stop_tx: Option<Sender<()>>,
    done_rx: Receiver<()>,
    thread: Option<JoinHandle<()>>,
    status: Arc<Mutex<AutosaveStatus>>,
}

impl AutosaveHandle {
    pub fn status(&self) -> AutosaveStatus {
        self.status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Signals the loop to stop and waits at most `timeout` for it to finish.
    /// On timeout the thread is left to finish on its own.
    pub fn stop_and_join(mut self, timeout: Duration) -> JoinOutcome {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }

        match self.done_rx.recv_timeout(timeout) {
            Err(RecvTimeoutError::Timeout) => {
                warn!("autosave did not stop within {:?}", timeout);
                drop(self.thread.take());
                JoinOutcome::TimedOut
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if let Some(thread) = self.thread.take()
                    && thread.join().is_err()
                {
                    warn!("autosave thread panicked");
                }
                JoinOutcome::Stopped
            }
        }
    }
}

impl Drop for AutosaveHandle {
    fn drop(&mut self) {
        drop(self.stop_tx.take());
    }
}
