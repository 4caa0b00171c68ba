#![forbid(unsafe_code)]

//! Reversible command kinds.
//!
//! A [`Command`] describes one kind of reversible edit against some external
//! state `S`. It is executed once per invocation through an
//! [`Invoker`](crate::Invoker); the record it returns is kept by the history
//! and handed back to [`Command::discard`] when the entry is undone.
//!
//! # Invariants
//!
//! - `exec(args)` followed by `discard(record)` restores the prior state
//!   exactly, provided nothing else mutated the state in between.
//! - Re-running `exec` with the same args on the same state yields the same
//!   effect (redo relies on this).
//! - A record is never mutated after `exec` returns it. The history shares
//!   it behind an [`Arc`](std::sync::Arc) and only lends `&Record`.
//!
//! # Failure Modes
//!
//! - **Unknown target**: the args name something the state does not hold.
//!   `exec` returns [`CommandError::UnknownTarget`] and nothing is recorded.
//! - **Partial effect**: a failing `exec` may leave the state half-modified.
//!   The history does not roll it back.

use std::fmt;

use crate::error::CommandError;

/// Result of a command's `exec` or `discard`.
pub type CommandResult<T = ()> = Result<T, CommandError>;

/// A reversible operation kind over state `S`.
pub trait Command<S>: Send + Sync + 'static {
    /// Call-site arguments. Stored by the history for redo.
    type Args: Send + Sync + 'static;

    /// Everything `discard` needs to reverse one `exec`.
    type Record: Send + Sync + 'static;

    /// Apply the effect and return the reversal record.
    fn exec(&self, state: &mut S, args: &Self::Args) -> CommandResult<Self::Record>;

    /// Reverse one earlier `exec` using its record.
    fn discard(&self, state: &mut S, record: &Self::Record) -> CommandResult;

    /// Whether consecutive invocations of one registration coalesce into a
    /// single history entry.
    fn mergeable(&self) -> bool {
        false
    }

    /// Short name used in log output.
    fn name(&self) -> &'static str {
        "command"
    }
}

/// Callback type for a closure-built command's forward effect.
pub type ExecFn<S, A, R> = Box<dyn Fn(&mut S, &A) -> CommandResult<R> + Send + Sync>;
/// Callback type for a closure-built command's reverse effect.
pub type DiscardFn<S, R> = Box<dyn Fn(&mut S, &R) -> CommandResult + Send + Sync>;

/// A [`Command`] assembled from a pair of closures.
///
/// ```
/// use pxed_history::{FnCommand, register, EditStack};
/// use std::num::NonZeroUsize;
///
/// let set = register(
///     FnCommand::new(
///         "set",
///         |value: &mut i32, next: &i32| Ok(std::mem::replace(value, *next)),
///         |value: &mut i32, prev: &i32| {
///             *value = *prev;
///             Ok(())
///         },
///     )
///     .with_merging(),
/// );
///
/// let mut stack = EditStack::new(NonZeroUsize::new(8).unwrap());
/// let mut value = 0;
/// set.invoke(&mut stack, &mut value, 5).unwrap();
/// stack.undo(&mut value).unwrap();
/// assert_eq!(value, 0);
/// ```
pub struct FnCommand<S, A, R> {
    name: &'static str,
    exec: ExecFn<S, A, R>,
    discard: DiscardFn<S, R>,
    mergeable: bool,
}

impl<S, A, R> FnCommand<S, A, R> {
    /// Build a non-mergeable command from `exec` and `discard` closures.
    pub fn new<E, D>(name: &'static str, exec: E, discard: D) -> Self
    where
        E: Fn(&mut S, &A) -> CommandResult<R> + Send + Sync + 'static,
        D: Fn(&mut S, &R) -> CommandResult + Send + Sync + 'static,
    {
        Self {
            name,
            exec: Box::new(exec),
            discard: Box::new(discard),
            mergeable: false,
        }
    }

    /// Mark the command as mergeable.
    #[must_use]
    pub fn with_merging(mut self) -> Self {
        self.mergeable = true;
        self
    }
}

impl<S, A, R> fmt::Debug for FnCommand<S, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCommand")
            .field("name", &self.name)
            .field("mergeable", &self.mergeable)
            .finish_non_exhaustive()
    }
}

impl<S, A, R> Command<S> for FnCommand<S, A, R>
where
    S: 'static,
    A: Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    type Args = A;
    type Record = R;

    fn exec(&self, state: &mut S, args: &A) -> CommandResult<R> {
        (self.exec)(state, args)
    }

    fn discard(&self, state: &mut S, record: &R) -> CommandResult {
        (self.discard)(state, record)
    }

    fn mergeable(&self) -> bool {
        self.mergeable
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
