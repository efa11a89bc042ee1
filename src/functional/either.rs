use std::any::Any;
use std::panic::{self, UnwindSafe};

use super::catch::{Caught, is_fatal};

/// A value that is either a failure (`Left`) or a success (`Right`).
///
/// Combinators are right-biased: `map`, `flat_map` and friends act on the
/// `Right` value and pass a `Left` through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

pub use Either::{Left, Right};

pub fn left<L, R>(value: L) -> Either<L, R> {
    Left(value)
}

pub fn right<L, R>(value: R) -> Either<L, R> {
    Right(value)
}

impl<L, R> Either<L, R> {
    pub fn is_left(&self) -> bool {
        matches!(self, Left(_))
    }

    pub fn is_right(&self) -> bool {
        matches!(self, Right(_))
    }

    /// Applies `on_left` to a `Left` or `on_right` to a `Right`.
    ///
    /// ```
    /// use cwhistory::functional::{Either, Left};
    ///
    /// let result: Either<&str, i32> = Left("boom");
    /// let text = result.fold(|e| format!("failed: {e}"), |v| format!("got {v}"));
    /// assert_eq!(text, "failed: boom");
    /// ```
    pub fn fold<T>(self, on_left: impl FnOnce(L) -> T, on_right: impl FnOnce(R) -> T) -> T {
        match self {
            Left(l) => on_left(l),
            Right(r) => on_right(r),
        }
    }

    pub fn swap(self) -> Either<R, L> {
        match self {
            Left(l) => Right(l),
            Right(r) => Left(r),
        }
    }

    pub fn map<R2>(self, f: impl FnOnce(R) -> R2) -> Either<L, R2> {
        match self {
            Left(l) => Left(l),
            Right(r) => Right(f(r)),
        }
    }

    pub fn map_left<L2>(self, f: impl FnOnce(L) -> L2) -> Either<L2, R> {
        match self {
            Left(l) => Left(f(l)),
            Right(r) => Right(r),
        }
    }

    pub fn bimap<L2, R2>(
        self,
        on_left: impl FnOnce(L) -> L2,
        on_right: impl FnOnce(R) -> R2,
    ) -> Either<L2, R2> {
        match self {
            Left(l) => Left(on_left(l)),
            Right(r) => Right(on_right(r)),
        }
    }

    /// Sequences a dependent step. A `Left` is moved through as is and `f`
    /// is never called.
    pub fn flat_map<R2>(self, f: impl FnOnce(R) -> Either<L, R2>) -> Either<L, R2> {
        match self {
            Left(l) => Left(l),
            Right(r) => f(r),
        }
    }

    /// Replaces a `Left` with the outcome of `f`. A `Right` is kept.
    pub fn handle_error_with<L2>(self, f: impl FnOnce(L) -> Either<L2, R>) -> Either<L2, R> {
        match self {
            Left(l) => f(l),
            Right(r) => Right(r),
        }
    }

    pub fn get_or_else(self, default: impl FnOnce() -> R) -> R {
        match self {
            Left(_) => default(),
            Right(r) => r,
        }
    }

    pub fn get_or_handle(self, f: impl FnOnce(L) -> R) -> R {
        match self {
            Left(l) => f(l),
            Right(r) => r,
        }
    }

    /// Turns a `Right` into `Left(on_fail())` when `predicate` rejects it.
    pub fn filter_or_else(
        self,
        predicate: impl FnOnce(&R) -> bool,
        on_fail: impl FnOnce() -> L,
    ) -> Either<L, R> {
        match self {
            Right(r) if predicate(&r) => Right(r),
            Right(_) => Left(on_fail()),
            Left(l) => Left(l),
        }
    }

    /// Combines two successes. The first `Left` encountered wins.
    pub fn zip_with<R2, T>(
        self,
        other: Either<L, R2>,
        f: impl FnOnce(R, R2) -> T,
    ) -> Either<L, T> {
        self.flat_map(|a| other.map(|b| f(a, b)))
    }

    pub fn left(self) -> Option<L> {
        match self {
            Left(l) => Some(l),
            Right(_) => None,
        }
    }

    pub fn right(self) -> Option<R> {
        match self {
            Left(_) => None,
            Right(r) => Some(r),
        }
    }

    pub fn if_left(self, f: impl FnOnce(&L)) -> Self {
        if let Left(l) = &self {
            f(l);
        }
        self
    }

    pub fn if_right(self, f: impl FnOnce(&R)) -> Self {
        if let Right(r) = &self {
            f(r);
        }
        self
    }

    pub fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Left(l) => Left(l),
            Right(r) => Right(r),
        }
    }

    pub fn into_result(self) -> Result<R, L> {
        match self {
            Left(l) => Err(l),
            Right(r) => Ok(r),
        }
    }
}

impl<R> Either<Caught, R> {
    /// Runs `f`, turning a panic into `Left(Caught)`.
    ///
    /// Panics raised with a [`Fatal`](super::Fatal) or
    /// [`Cancelled`](super::Cancelled) payload are not captured and keep
    /// unwinding.
    pub fn catch<F>(f: F) -> Self
    where
        F: FnOnce() -> R + UnwindSafe,
    {
        match panic::catch_unwind(f) {
            Ok(value) => Right(value),
            Err(payload) => Left(Caught::from_payload(rethrow_fatal(payload))),
        }
    }
}

fn rethrow_fatal(payload: Box<dyn Any + Send>) -> Box<dyn Any + Send> {
    if is_fatal(payload.as_ref()) {
        panic::resume_unwind(payload);
    }
    payload
}

impl<L, R> From<Result<R, L>> for Either<L, R> {
    fn from(result: Result<R, L>) -> Self {
        match result {
            Ok(r) => Right(r),
            Err(l) => Left(l),
        }
    }
}

impl<L, R> From<Either<L, R>> for Result<R, L> {
    fn from(either: Either<L, R>) -> Self {
        either.into_result()
    }
}
