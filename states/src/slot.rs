use log::debug;
use tokio_util::sync::CancellationToken;

use crate::{Error, TaskHandle, TaskId};

/// Tracks the latest request of one kind.
///
/// Only the most recently started task may publish its result. Starting a new
/// task cancels the previous one; a result that comes back for an older
/// generation is rejected by [`TaskSlot::accept`].
#[derive(Debug)]
pub struct TaskSlot {
    kind: &'static str,
    generation: u64,
    running: Option<TaskHandle>,
}

impl TaskSlot {
    /// An idle slot for requests of `kind`.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            generation: 0,
            running: None,
        }
    }

    /// Whether a started task has not been accepted or cancelled yet.
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Starts a new task, cancelling the one in flight.
    pub fn start(&mut self) -> TaskHandle {
        if let Some(previous) = self.running.take() {
            debug!("cancelling {} in favour of a newer request", previous.id());
            previous.cancel();
        }

        self.generation = self.generation.saturating_add(1);
        let handle = TaskHandle::new(
            TaskId::new(self.kind, self.generation),
            CancellationToken::new(),
        );
        self.running = Some(handle.clone());
        handle
    }

    /// Whether `id` belongs to the most recently started task of this slot.
    pub fn is_current(&self, id: TaskId) -> bool {
        id.kind() == self.kind && id.generation() == self.generation
    }

    /// Marks `id` as finished if it is still the latest task.
    ///
    /// Errors when a newer task was started meanwhile or when the task was
    /// cancelled; the caller must then drop its result.
    pub fn accept(&mut self, id: TaskId) -> Result<(), Error> {
        if !self.is_current(id) {
            return Err(Error::superseded(id, self.generation));
        }

        match self.running.take() {
            Some(handle) if handle.is_cancelled() => Err(Error::cancelled(id)),
            Some(_) => Ok(()),
            // Already accepted once: a second completion is treated as stale.
            None => Err(Error::superseded(id, self.generation)),
        }
    }
}
