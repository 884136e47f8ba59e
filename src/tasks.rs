use std::time::Duration;
use std::{error, fmt};
use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::task::JoinHandle;
use tokio::time;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskError {
    UiGone,
    Failed,
    TimedOut,
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TaskError::*;
        match self {
            UiGone => write!(f, "UI executor is gone"),
            Failed => write!(f, "Background task failed"),
            TimedOut => write!(f, "Background task timed out"),
        }
    }
}

impl error::Error for TaskError {}

type UiJob<S> = Box<dyn FnOnce(&mut S) + Send>;

/// Stand-in for the toolkit's event-dispatch thread: closures posted from
/// anywhere run when the owner drains them on the UI thread.
pub struct UiExecutor<S> {
    tx: mpsc::Sender<UiJob<S>>,
    rx: mpsc::Receiver<UiJob<S>>,
}

impl<S: 'static> UiExecutor<S> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(64);
        Self { tx, rx }
    }

    pub fn handle(&self) -> UiHandle<S> {
        UiHandle { tx: self.tx.clone() }
    }

    /// Drains everything posted so far against the UI-owned state. Must only
    /// be called from the thread that owns `state`.
    pub fn run_pending(&mut self, state: &mut S) -> usize {
        let mut ran = 0;
        loop {
            match self.rx.try_recv() {
                Ok(job) => {
                    job(state);
                    ran += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return ran,
            }
        }
    }
}

impl<S: 'static> Default for UiExecutor<S> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct UiHandle<S> {
    tx: mpsc::Sender<UiJob<S>>,
}

impl<S> Clone for UiHandle<S> {
    fn clone(&self) -> Self {
        Self { tx: self.tx.clone() }
    }
}

impl<S: 'static> UiHandle<S> {
    pub fn post(&self, job: impl FnOnce(&mut S) + Send + 'static) -> Result<(), TaskError> {
        self.tx.try_send(Box::new(job)).map_err(|_| TaskError::UiGone)
    }
}

/// A fire-and-forget background job whose outcome is marshaled back onto the
/// UI thread, with explicit cancellation and an optional timeout.
pub struct BackgroundTask {
    handle: JoinHandle<()>,
}

impl BackgroundTask {
    pub fn spawn<S, T, W, C>(ui: UiHandle<S>, timeout: Option<Duration>, work: W, complete: C) -> Self
    where
        S: 'static,
        T: Send + 'static,
        W: FnOnce() -> T + Send + 'static,
        C: FnOnce(&mut S, Result<T, TaskError>) + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let work = tokio::task::spawn_blocking(work);
            let result = match timeout {
                Some(limit) => match time::timeout(limit, work).await {
                    Ok(joined) => joined.map_err(|_| TaskError::Failed),
                    Err(_) => Err(TaskError::TimedOut),
                },
                None => work.await.map_err(|_| TaskError::Failed),
            };
            ui.post(move |state| complete(state, result)).ok();
        });
        Self { handle }
    }

    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
