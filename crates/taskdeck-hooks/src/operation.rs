//! Async operation controller
//!
//! An [`AsyncOperation`] wraps a caller-supplied asynchronous function and
//! tracks its [`OperationState`]. The state lives in a `tokio::sync::watch`
//! channel, so every transition is published to subscribers.
//!
//! Failures never escape: they are normalized into an [`OperationError`],
//! stored in the state, and signaled by returning `None`.
//!
//! Overlapping invocations are not deduplicated. Two concurrent `execute`
//! calls race and the one that settles last owns the final state. `reset`
//! does not cancel pending calls either; a call that settles after a reset
//! still writes its outcome.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::{OperationError, OperationOptions, OperationState};

/// Boxed future produced by a wrapped function.
pub type OperationFuture<T> = Pin<Box<dyn Future<Output = Result<T, OperationError>> + Send>>;

type OperationFn<A, T> = dyn Fn(A) -> OperationFuture<T> + Send + Sync;

/// Controller for a single logical asynchronous call.
///
/// Cloning the controller yields another handle to the same state.
pub struct AsyncOperation<A, T> {
    inner: Arc<Inner<A, T>>,
}

struct Inner<A, T> {
    func: Box<OperationFn<A, T>>,
    options: OperationOptions<T>,
    state: watch::Sender<OperationState<T>>,
    control: Mutex<Control<A>>,
    invocations: AtomicU64,
}

struct Control<A> {
    last_args: Option<A>,
    retries_used: u32,
}

impl<A, T> Clone for AsyncOperation<A, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, T> fmt::Debug for AsyncOperation<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncOperation")
            .field("options", &self.inner.options)
            .field("loading", &self.inner.state.borrow().loading)
            .field("invocations", &self.invocations())
            .finish_non_exhaustive()
    }
}

impl<A, T> AsyncOperation<A, T>
where
    A: Clone + Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Wrap `func` with the given options.
    ///
    /// The error type of `func` only needs to be displayable; its message
    /// becomes the [`OperationError`] stored on failure.
    pub fn new<F, Fut, E>(func: F, options: OperationOptions<T>) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: fmt::Display + 'static,
    {
        let func: Box<OperationFn<A, T>> = Box::new(move |args: A| -> OperationFuture<T> {
            let fut = func(args);
            Box::pin(async move { fut.await.map_err(|err| OperationError::from_display(&err)) })
        });
        let (state, _) = watch::channel(OperationState::initial());
        Self {
            inner: Arc::new(Inner {
                func,
                options,
                state,
                control: Mutex::new(Control {
                    last_args: None,
                    retries_used: 0,
                }),
                invocations: AtomicU64::new(0),
            }),
        }
    }

    /// Start the first invocation when the operation was configured as immediate.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(&self, args: A) -> Option<JoinHandle<Option<T>>> {
        self.inner
            .options
            .immediate
            .then(|| self.spawn_execute(args))
    }

    /// Invoke the wrapped function with `args`.
    ///
    /// Returns the resolved value, or `None` when the call failed. An explicit
    /// `execute` refills the retry budget.
    pub async fn execute(&self, args: A) -> Option<T> {
        {
            let mut control = self.inner.control();
            control.last_args = Some(args.clone());
            control.retries_used = 0;
        }
        self.inner.state.send_modify(OperationState::begin);

        let mut outcome = self.inner.attempt(args.clone()).await;
        if self.inner.options.auto_retry {
            for _ in 0..self.inner.options.retry_count {
                if outcome.is_ok() {
                    break;
                }
                self.inner.consume_retry();
                tokio::time::sleep(self.inner.options.retry_delay).await;
                outcome = self.inner.attempt(args.clone()).await;
            }
        }
        self.inner.settle(outcome)
    }

    /// Re-invoke with the arguments of the last `execute`.
    ///
    /// Waits `retry_delay` first. Once the retry budget is spent, or when
    /// nothing was executed since creation or the last reset, this is a
    /// no-op returning `None`.
    pub async fn retry(&self) -> Option<T> {
        let args = {
            let mut control = self.inner.control();
            let args = control.last_args.clone()?;
            if control.retries_used >= self.inner.options.retry_count {
                debug!(
                    retry_count = self.inner.options.retry_count,
                    "retry budget exhausted"
                );
                return None;
            }
            control.retries_used += 1;
            args
        };
        self.inner.state.send_modify(OperationState::begin);
        tokio::time::sleep(self.inner.options.retry_delay).await;
        let outcome = self.inner.attempt(args).await;
        self.inner.settle(outcome)
    }

    /// Spawn `execute` on the current runtime.
    pub fn spawn_execute(&self, args: A) -> JoinHandle<Option<T>> {
        let operation = self.clone();
        tokio::spawn(async move { operation.execute(args).await })
    }

    /// Spawn `retry` on the current runtime.
    pub fn spawn_retry(&self) -> JoinHandle<Option<T>> {
        let operation = self.clone();
        tokio::spawn(async move { operation.retry().await })
    }

    /// Restore the initial state and forget the last arguments.
    pub fn reset(&self) {
        {
            let mut control = self.inner.control();
            control.last_args = None;
            control.retries_used = 0;
        }
        self.inner.state.send_replace(OperationState::initial());
    }

    /// Overwrite `data` without going through the wrapped function.
    pub fn set_data(&self, value: T) {
        self.inner.state.send_modify(|state| state.data = Some(value));
    }

    /// Clone of the current state.
    #[must_use]
    pub fn snapshot(&self) -> OperationState<T> {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified after every state transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<OperationState<T>> {
        self.inner.state.subscribe()
    }

    /// Retries left before `retry` turns into a no-op.
    #[must_use]
    pub fn retries_remaining(&self) -> u32 {
        let used = self.inner.control().retries_used;
        self.inner.options.retry_count.saturating_sub(used)
    }

    /// Whether `retry` would invoke the wrapped function.
    #[must_use]
    pub fn can_retry(&self) -> bool {
        let control = self.inner.control();
        control.last_args.is_some() && control.retries_used < self.inner.options.retry_count
    }
}

impl<A, T> AsyncOperation<A, T> {
    /// Whether an invocation is pending.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    /// Total number of times the wrapped function was called.
    #[must_use]
    pub fn invocations(&self) -> u64 {
        self.inner.invocations.load(Ordering::Relaxed)
    }
}

impl<A, T: Clone> Inner<A, T> {
    fn control(&self) -> MutexGuard<'_, Control<A>> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn attempt(&self, args: A) -> Result<T, OperationError> {
        let attempt = self.invocations.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(attempt, "invoking wrapped operation");
        (self.func)(args).await
    }

    /// Record a spent retry. Auto-retry loops bound themselves.
    fn consume_retry(&self) {
        let mut control = self.control();
        control.retries_used = control.retries_used.saturating_add(1).min(self.options.retry_count);
    }

    fn settle(&self, outcome: Result<T, OperationError>) -> Option<T> {
        match outcome {
            Ok(value) => {
                self.state.send_modify(|state| state.succeed(value.clone()));
                debug!("operation settled successfully");
                if let Some(callback) = &self.options.on_success {
                    callback(&value);
                }
                Some(value)
            }
            Err(error) => {
                let clear = self.options.clears_data_on_error();
                self.state.send_modify(|state| state.fail(error.clone(), clear));
                debug!(error = %error, "operation settled with failure");
                if let Some(callback) = &self.options.on_error {
                    callback(&error);
                }
                None
            }
        }
    }
}
