/// Error taxonomy for the interval set. A broken structural invariant
/// (`InvariantViolation`) is deliberately not a variant here: it is a bug
/// in this crate, not a condition callers can recover from, and is
/// reported with `.expect(...)` at the point it is detected.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalError {
    #[error("interval endpoints must satisfy min < max")]
    IllegalInterval,

    /// Rust's `&I`/`Option<I>` make a literal null argument
    /// unrepresentable at the navigator call sites this would otherwise
    /// guard, so this crate never constructs it; it remains available to
    /// callers implementing their own `IntervalLike`.
    #[error("a finite value was required but an unbounded endpoint was given")]
    NullArgument,

    #[error("operation invoked on an empty set")]
    EmptySet,

    #[error("this navigator view is not implemented")]
    UnsupportedOperation,

    #[error("the set was structurally modified during iteration")]
    ConcurrentModification,
}
