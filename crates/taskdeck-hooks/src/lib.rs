//! State-management primitives for taskdeck
//!
//! This crate provides an observable controller for asynchronous operations
//! (with retry and polling) plus small leaf utilities used by the terminal UI:
//! debounced values, toggles, and values synchronized with a local JSON store.

mod debounce;
mod error;
mod operation;
mod options;
mod poll;
mod state;
mod storage;
mod toggle;

pub use debounce::Debounce;
pub use error::{OperationError, Result, StorageError};
pub use operation::{AsyncOperation, OperationFuture};
pub use options::{DEFAULT_RETRY_DELAY, ErrorCallback, ErrorPolicy, OperationOptions, SuccessCallback};
pub use poll::{MIN_POLL_INTERVAL, PollHandle};
pub use state::OperationState;
pub use storage::{LocalStore, Persisted};
pub use toggle::Toggle;
