use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Identifies one armed tick. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub u64);

/// Delivered to the host event loop when an armed delay elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent {
    pub handle: TickHandle,
}

/// Arms and disarms the deferred tick callback of a timer.
pub trait Scheduler {
    fn after(&mut self, delay: Duration) -> TickHandle;
    fn cancel(&mut self, handle: TickHandle);
}

pub type TickSender = mpsc::UnboundedSender<TickEvent>;
pub type TickReceiver = mpsc::UnboundedReceiver<TickEvent>;

pub fn create_tick_channel() -> (TickSender, TickReceiver) {
    mpsc::unbounded_channel()
}

/// Sleeps on the tokio runtime and posts a [`TickEvent`] on the channel.
///
/// Must be used from within a tokio runtime.
pub struct TokioScheduler {
    tx: TickSender,
    next_id: u64,
    pending: HashMap<TickHandle, JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(tx: TickSender) -> Self {
        Self {
            tx,
            next_id: 0,
            pending: HashMap::new(),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.values().filter(|task| !task.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn after(&mut self, delay: Duration) -> TickHandle {
        self.pending.retain(|_, task| !task.is_finished());

        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(TickEvent { handle }).is_err() {
                tracing::debug!(?handle, "tick receiver dropped");
            }
        });
        self.pending.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if let Some(task) = self.pending.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.pending.drain() {
            task.abort();
        }
    }
}

/// Records armed and cancelled ticks without any clock; the caller decides
/// when a tick fires. Used to drive a timer deterministically.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pub armed: Vec<TickHandle>,
    pub cancelled: Vec<TickHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently armed handle that has not been cancelled.
    pub fn last_armed(&self) -> Option<TickHandle> {
        self.armed
            .iter()
            .rev()
            .find(|h| !self.cancelled.contains(*h))
            .copied()
    }
}

impl Scheduler for ManualScheduler {
    fn after(&mut self, _delay: Duration) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.armed.push(handle);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.cancelled.push(handle);
    }
}
