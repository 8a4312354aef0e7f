//! Success/failure pipeline used for declarative error propagation.
//!
//! `Outcome<T, E>` is a plain `Result`; [`OutcomeExt`] adds the hook and
//! terminal operators the service layer composes with. [`AsyncOutcome`] is the
//! suspending variant: each step runs strictly after the previous one, and a
//! failure skips every later `map`/`chain` while still firing `tap_error`.

use std::future::{Future, IntoFuture};

use futures::future::{self, BoxFuture, FutureExt};

pub type Outcome<T, E> = Result<T, E>;

pub trait OutcomeExt<T, E>: Sized {
    /// Sequential dependent step, invoked only on success.
    fn chain<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Outcome<U, E>;

    /// Observe the success value without altering it.
    fn tap<F>(self, f: F) -> Outcome<T, E>
    where
        F: FnOnce(&T);

    /// Observe the failure value without altering it.
    fn tap_error<F>(self, f: F) -> Outcome<T, E>
    where
        F: FnOnce(&E);

    /// Terminal consumption: exactly one branch runs.
    fn fold<R, FE, FT>(self, on_failure: FE, on_success: FT) -> R
    where
        FE: FnOnce(E) -> R,
        FT: FnOnce(T) -> R;
}

impl<T, E> OutcomeExt<T, E> for Outcome<T, E> {
    fn chain<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Outcome<U, E>,
    {
        self.and_then(f)
    }

    fn tap<F>(self, f: F) -> Outcome<T, E>
    where
        F: FnOnce(&T),
    {
        if let Ok(v) = &self {
            f(v);
        }
        self
    }

    fn tap_error<F>(self, f: F) -> Outcome<T, E>
    where
        F: FnOnce(&E),
    {
        if let Err(e) = &self {
            f(e);
        }
        self
    }

    fn fold<R, FE, FT>(self, on_failure: FE, on_success: FT) -> R
    where
        FE: FnOnce(E) -> R,
        FT: FnOnce(T) -> R,
    {
        match self {
            Ok(v) => on_success(v),
            Err(e) => on_failure(e),
        }
    }
}

/// Asynchronous outcome: a boxed future resolving to an [`Outcome`].
///
/// Awaiting an `AsyncOutcome` yields the underlying `Outcome`.
#[must_use = "an AsyncOutcome does nothing until awaited or folded"]
pub struct AsyncOutcome<'a, T, E> {
    inner: BoxFuture<'a, Outcome<T, E>>,
}

impl<'a, T, E> AsyncOutcome<'a, T, E>
where
    T: Send + 'a,
    E: Send + 'a,
{
    pub fn new<Fut>(fut: Fut) -> Self
    where
        Fut: Future<Output = Outcome<T, E>> + Send + 'a,
    {
        Self { inner: fut.boxed() }
    }

    pub fn ready(outcome: Outcome<T, E>) -> Self {
        Self::new(future::ready(outcome))
    }

    pub fn success(value: T) -> Self {
        Self::ready(Ok(value))
    }

    pub fn failure(error: E) -> Self {
        Self::ready(Err(error))
    }

    pub fn map<U, F>(self, f: F) -> AsyncOutcome<'a, U, E>
    where
        U: Send + 'a,
        F: FnOnce(T) -> U + Send + 'a,
    {
        AsyncOutcome::new(async move { self.inner.await.map(f) })
    }

    /// Suspending dependent step; waits for `f`'s future before continuing.
    pub fn chain<U, F, Fut>(self, f: F) -> AsyncOutcome<'a, U, E>
    where
        U: Send + 'a,
        F: FnOnce(T) -> Fut + Send + 'a,
        Fut: Future<Output = Outcome<U, E>> + Send + 'a,
    {
        AsyncOutcome::new(async move {
            match self.inner.await {
                Ok(v) => f(v).await,
                Err(e) => Err(e),
            }
        })
    }

    /// Synchronous dependent step inside an async pipeline.
    pub fn chain_sync<U, F>(self, f: F) -> AsyncOutcome<'a, U, E>
    where
        U: Send + 'a,
        F: FnOnce(T) -> Outcome<U, E> + Send + 'a,
    {
        AsyncOutcome::new(async move { self.inner.await.and_then(f) })
    }

    pub fn tap<F>(self, f: F) -> Self
    where
        F: FnOnce(&T) + Send + 'a,
    {
        AsyncOutcome::new(async move { self.inner.await.tap(f) })
    }

    pub fn tap_error<F>(self, f: F) -> Self
    where
        F: FnOnce(&E) + Send + 'a,
    {
        AsyncOutcome::new(async move { self.inner.await.tap_error(f) })
    }

    pub async fn fold<R, FE, FT>(self, on_failure: FE, on_success: FT) -> R
    where
        FE: FnOnce(E) -> R,
        FT: FnOnce(T) -> R,
    {
        self.inner.await.fold(on_failure, on_success)
    }
}

impl<'a, T, E> IntoFuture for AsyncOutcome<'a, T, E> {
    type Output = Outcome<T, E>;
    type IntoFuture = BoxFuture<'a, Outcome<T, E>>;

    fn into_future(self) -> Self::IntoFuture {
        self.inner
    }
}
