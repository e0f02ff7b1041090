//! One-shot asynchronous unit of work.
//!
//! A `Task` starts executing on its own thread the moment it is spawned.
//! The result travels through a capacity-one channel acting as a
//! single-slot handoff cell: the control thread polls the cell without
//! blocking, and the cell itself (not caller discipline) enforces that a
//! completed result is delivered exactly once. `wait` is the blocking
//! counterpart, used only inside fan-in workers, never on the control
//! thread.

use std::error::Error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// The work function panicked; the payload message is preserved.
    Panicked(String),
    /// The worker vanished without delivering a result.
    Abandoned,
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Panicked(message) => write!(f, "task worker panicked: {}", message),
            Self::Abandoned => write!(f, "task worker exited without a result"),
        }
    }
}

impl Error for TaskError {}

pub struct Task<T> {
    slot: Receiver<thread::Result<T>>,
    consumed: bool,
}

impl<T: Send + 'static> Task<T> {
    /// Begins executing `work` on a new thread immediately.
    pub fn spawn<F>(work: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (sender, slot) = mpsc::sync_channel(1);

        thread::spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(work));
            // The receiver may already be gone; the result is then dropped.
            let _ = sender.send(outcome);
        });

        Self {
            slot,
            consumed: false,
        }
    }

    /// Non-blocking completion check.
    ///
    /// Returns `None` while the work is still running, then the result
    /// exactly once; every later call returns `None` again. A panic in the
    /// work function surfaces here as `TaskError::Panicked`.
    pub fn poll_completion(&mut self) -> Option<Result<T, TaskError>> {
        if self.consumed {
            return None;
        }

        match self.slot.try_recv() {
            Ok(outcome) => {
                self.consumed = true;
                Some(unpack(outcome))
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.consumed = true;
                Some(Err(TaskError::Abandoned))
            }
        }
    }

    /// Blocks until the work finishes and returns its result.
    pub fn wait(self) -> Result<T, TaskError> {
        if self.consumed {
            return Err(TaskError::Abandoned);
        }

        match self.slot.recv() {
            Ok(outcome) => unpack(outcome),
            Err(_) => Err(TaskError::Abandoned),
        }
    }
}

fn unpack<T>(outcome: thread::Result<T>) -> Result<T, TaskError> {
    match outcome {
        Ok(value) => Ok(value),
        Err(payload) => {
            let message = if let Some(text) = payload.downcast_ref::<&str>() {
                (*text).to_string()
            } else if let Some(text) = payload.downcast_ref::<String>() {
                text.clone()
            } else {
                "unknown panic payload".to_string()
            };
            Err(TaskError::Panicked(message))
        }
    }
}
