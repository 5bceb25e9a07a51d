//! Identifiers and handles for spawned page requests.

use std::fmt;

use tokio_util::sync::CancellationToken;

/// Identifies one request issued by a flow.
///
/// `kind` names the flow that issued it (`"search"`), `generation` orders
/// requests of the same kind: a higher generation was issued later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    kind: &'static str,
    generation: u64,
}

impl TaskId {
    /// Creates an id; normally only [`crate::TaskSlot::start`] does this.
    pub fn new(kind: &'static str, generation: u64) -> Self {
        Self { kind, generation }
    }

    /// Name of the flow that issued the request.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Position of the request among those of the same kind, starting at 1.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.generation)
    }
}

/// A request in flight together with its cancellation token.
///
/// Cancellation is cooperative: the request future is driven through
/// [`TaskHandle::run_until_cancelled`], which stops polling it once the token
/// fires. Clones share the same token, so the slot that keeps one clone can
/// cancel the request whose future holds another.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
}

impl TaskHandle {
    /// Pairs `id` with the token that cancels it.
    pub fn new(id: TaskId, cancel_token: CancellationToken) -> Self {
        Self { id, cancel_token }
    }

    /// The id results of this task are reported under.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Cancels this task and every clone of the handle.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    /// Whether [`TaskHandle::cancel`] was called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Drives `fut` unless the task is cancelled first, in which case `fut`
    /// is dropped and `None` is returned.
    pub async fn run_until_cancelled<F: Future>(&self, fut: F) -> Option<F::Output> {
        self.cancel_token.run_until_cancelled(fut).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_id_accessors() {
        let id = TaskId::new("search", 42);
        assert_eq!(id.kind(), "search");
        assert_eq!(id.generation(), 42);
        assert_eq!(id.to_string(), "search#42");
    }

    #[test]
    fn task_id_equality() {
        let a = TaskId::new("search", 1);
        assert_eq!(a, TaskId::new("search", 1));
        assert_ne!(a, TaskId::new("search", 2));
        assert_ne!(a, TaskId::new("add", 1));
    }

    #[test]
    fn task_handle_cancel_is_shared_between_clones() {
        let handle = TaskHandle::new(TaskId::new("search", 1), CancellationToken::new());
        let clone = handle.clone();

        assert!(!clone.is_cancelled());
        handle.cancel();
        assert!(clone.is_cancelled());
    }

    #[tokio::test]
    async fn run_until_cancelled_drops_work_after_cancel() {
        let handle = TaskHandle::new(TaskId::new("search", 1), CancellationToken::new());
        assert_eq!(handle.run_until_cancelled(async { 7 }).await, Some(7));

        handle.cancel();
        assert_eq!(handle.run_until_cancelled(async { 7 }).await, None);
    }
}
