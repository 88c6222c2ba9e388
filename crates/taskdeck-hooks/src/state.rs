//! Observable state of an asynchronous operation

use crate::OperationError;

/// The `{data, loading, error}` triple tracked per operation.
///
/// `loading` is `true` only between the start of an invocation and its
/// settlement. A settled state holds either `data` or `error` (or neither
/// before the first invocation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationState<T> {
    /// Value of the most recent successful settlement.
    pub data: Option<T>,
    /// Whether an invocation is pending.
    pub loading: bool,
    /// Failure of the most recent settlement.
    pub error: Option<OperationError>,
}

impl<T> Default for OperationState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> OperationState<T> {
    /// Fresh state: nothing loaded, nothing pending.
    #[must_use]
    pub fn initial() -> Self {
        Self::default()
    }

    /// True when no invocation has settled or been started since creation or reset.
    #[must_use]
    pub const fn is_initial(&self) -> bool {
        self.data.is_none() && !self.loading && self.error.is_none()
    }

    /// Error message of the last failed settlement.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(OperationError::message)
    }

    pub(crate) fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub(crate) fn succeed(&mut self, value: T) {
        self.data = Some(value);
        self.error = None;
        self.loading = false;
    }

    pub(crate) fn fail(&mut self, error: OperationError, clear_data: bool) {
        if clear_data {
            self.data = None;
        }
        self.error = Some(error);
        self.loading = false;
    }
}
