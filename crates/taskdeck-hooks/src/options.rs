//! Operation configuration

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::OperationError;

/// Callback invoked with the value of a successful settlement.
pub type SuccessCallback<T> = Arc<dyn Fn(&T) + Send + Sync>;
/// Callback invoked with the error of a failed settlement.
pub type ErrorCallback = Arc<dyn Fn(&OperationError) + Send + Sync>;

/// Default wait before each retry.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// What happens to previously loaded data when an invocation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Keep the last successful value next to the error.
    #[default]
    KeepData,
    /// Drop the last successful value.
    ClearData,
}

/// Configuration for an [`AsyncOperation`](crate::AsyncOperation).
pub struct OperationOptions<T> {
    /// Whether `mount` starts an invocation right away.
    pub immediate: bool,
    /// Called after every successful settlement.
    pub on_success: Option<SuccessCallback<T>>,
    /// Called after every failed settlement.
    pub on_error: Option<ErrorCallback>,
    /// Number of retries allowed after an explicit `execute`.
    pub retry_count: u32,
    /// Wait before each retry.
    pub retry_delay: Duration,
    /// Whether a failing `execute` spends the retry budget on its own.
    pub auto_retry: bool,
    /// Data handling on failure.
    pub error_policy: ErrorPolicy,
}

impl<T> Default for OperationOptions<T> {
    fn default() -> Self {
        Self {
            immediate: false,
            on_success: None,
            on_error: None,
            retry_count: 0,
            retry_delay: DEFAULT_RETRY_DELAY,
            auto_retry: false,
            error_policy: ErrorPolicy::default(),
        }
    }
}

impl<T> Clone for OperationOptions<T> {
    fn clone(&self) -> Self {
        Self {
            immediate: self.immediate,
            on_success: self.on_success.clone(),
            on_error: self.on_error.clone(),
            retry_count: self.retry_count,
            retry_delay: self.retry_delay,
            auto_retry: self.auto_retry,
            error_policy: self.error_policy,
        }
    }
}

impl<T> fmt::Debug for OperationOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationOptions")
            .field("immediate", &self.immediate)
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("retry_count", &self.retry_count)
            .field("retry_delay", &self.retry_delay)
            .field("auto_retry", &self.auto_retry)
            .field("error_policy", &self.error_policy)
            .finish()
    }
}

impl<T> OperationOptions<T> {
    /// Start an invocation as soon as the operation is mounted.
    #[must_use]
    pub const fn immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }

    /// Register a success callback.
    #[must_use]
    pub fn on_success(mut self, callback: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(callback));
        self
    }

    /// Register an error callback.
    #[must_use]
    pub fn on_error(mut self, callback: impl Fn(&OperationError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(callback));
        self
    }

    /// Allow `count` retries, each preceded by `delay`.
    #[must_use]
    pub const fn retry(mut self, count: u32, delay: Duration) -> Self {
        self.retry_count = count;
        self.retry_delay = delay;
        self
    }

    /// Let `execute` retry by itself until the budget is spent.
    #[must_use]
    pub const fn auto_retry(mut self, enabled: bool) -> Self {
        self.auto_retry = enabled;
        self
    }

    /// Choose what happens to loaded data on failure.
    #[must_use]
    pub const fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub(crate) fn clears_data_on_error(&self) -> bool {
        self.error_policy == ErrorPolicy::ClearData
    }
}
