//! Latest-only bookkeeping for asynchronous page work.
//!
//! Every flow that issues requests (the document search, for now) owns a
//! [`TaskSlot`]. Starting a task bumps the slot's generation and cancels the
//! task that was running before; results carry their [`TaskId`] back and are
//! only applied while that id is still current.
//!
//! ```
//! use tags_states::TaskSlot;
//!
//! let mut slot = TaskSlot::new("search");
//! let older = slot.start();
//! let newer = slot.start();
//!
//! assert!(older.is_cancelled());
//! assert!(slot.accept(older.id()).is_err());
//! assert!(slot.accept(newer.id()).is_ok());
//! ```

mod error;
mod slot;
mod task;

pub use error::Error;
pub use slot::TaskSlot;
pub use task::{TaskHandle, TaskId};
