use thiserror::Error;

use crate::TaskId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("task {id:?} was superseded by generation {current}")]
    Superseded { id: TaskId, current: u64 },
    #[error("task {id:?} was cancelled")]
    Cancelled { id: TaskId },
}

impl Error {
    pub fn superseded(id: TaskId, current: u64) -> Self {
        Self::Superseded { id, current }
    }

    pub fn cancelled(id: TaskId) -> Self {
        Self::Cancelled { id }
    }
}
