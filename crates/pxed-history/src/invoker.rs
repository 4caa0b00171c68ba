#![forbid(unsafe_code)]

//! Command registration and invocation.
//!
//! [`register`] turns a [`Command`] into an [`Invoker`] carrying a fresh
//! [`Tag`]. Every call to [`Invoker::invoke`] runs the command once and
//! records the result on an [`EditStack`]:
//!
//! ```text
//! invoke(args)
//!   │
//!   ├─ record = exec(state, &args)        (error: nothing recorded)
//!   ├─ undo   = || discard(state, &record)
//!   ├─ redo   = || exec(state, &args)
//!   └─ stack.execute(tag, mergeable, undo, redo)
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::warn;

use crate::command::Command;
use crate::error::Result;
use crate::stack::EditStack;
use crate::tag::Tag;

/// Register a command, allocating the tag its invocations share.
///
/// Registering the same command twice yields two invokers whose entries
/// never merge with each other.
pub fn register<S, C>(command: C) -> Invoker<S, C>
where
    S: 'static,
    C: Command<S>,
{
    Invoker {
        command: Arc::new(command),
        tag: Tag::fresh(),
        _state: PhantomData,
    }
}

/// Handle that runs one registered command and records it.
///
/// Cloning is cheap; clones share the command and the tag.
pub struct Invoker<S, C> {
    command: Arc<C>,
    tag: Tag,
    _state: PhantomData<fn(&mut S)>,
}

impl<S, C> Clone for Invoker<S, C> {
    fn clone(&self) -> Self {
        Self {
            command: Arc::clone(&self.command),
            tag: self.tag,
            _state: PhantomData,
        }
    }
}

impl<S, C> fmt::Debug for Invoker<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invoker")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

impl<S, C> Invoker<S, C>
where
    S: 'static,
    C: Command<S>,
{
    #[must_use]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    #[must_use]
    pub fn command(&self) -> &C {
        &self.command
    }

    /// Run the command against `state` and record it on `stack`.
    ///
    /// Returns the record produced by this call's `exec`, shared with the
    /// history. If `exec` fails the error is returned and `stack` is left
    /// exactly as it was.
    pub fn invoke(
        &self,
        stack: &mut EditStack<S>,
        state: &mut S,
        args: C::Args,
    ) -> Result<Arc<C::Record>> {
        let record = match self.command.exec(state, &args) {
            Ok(record) => Arc::new(record),
            Err(err) => {
                warn!(
                    command = self.command.name(),
                    tag = %self.tag,
                    error = %err,
                    "command failed"
                );
                return Err(err.into());
            }
        };

        let undo = {
            let command = Arc::clone(&self.command);
            let record = Arc::clone(&record);
            move |state: &mut S| command.discard(state, &record)
        };
        let redo = {
            let command = Arc::clone(&self.command);
            move |state: &mut S| command.exec(state, &args).map(drop)
        };

        stack.execute(self.tag, self.command.mergeable(), undo, redo);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::FnCommand;
    use crate::error::{CommandError, HistoryError};
    use std::num::NonZeroUsize;

    fn stack(n: usize) -> EditStack<i32> {
        EditStack::new(NonZeroUsize::new(n).unwrap())
    }

    fn setter() -> FnCommand<i32, i32, i32> {
        FnCommand::new(
            "set",
            |value: &mut i32, next: &i32| Ok(std::mem::replace(value, *next)),
            |value: &mut i32, prev: &i32| {
                *value = *prev;
                Ok(())
            },
        )
    }

    #[test]
    fn invoke_returns_record() {
        let set = register(setter());
        let mut history = stack(4);
        let mut value = 10;
        let prev = set.invoke(&mut history, &mut value, 20).unwrap();
        assert_eq!(*prev, 10);
        assert_eq!(value, 20);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn undo_uses_stored_record_and_redo_uses_stored_args() {
        let set = register(setter());
        let mut history = stack(4);
        let mut value = 1;
        set.invoke(&mut history, &mut value, 2).unwrap();
        history.undo(&mut value).unwrap();
        assert_eq!(value, 1);
        history.redo(&mut value).unwrap();
        assert_eq!(value, 2);
    }

    #[test]
    fn mergeable_registration_coalesces() {
        let set = register(setter().with_merging());
        let mut history = stack(4);
        let mut value = 0;
        for next in 1..=5 {
            set.invoke(&mut history, &mut value, next).unwrap();
        }
        assert_eq!(history.len(), 1);
        history.undo(&mut value).unwrap();
        assert_eq!(value, 0);
        history.redo(&mut value).unwrap();
        assert_eq!(value, 5);
    }

    #[test]
    fn separate_registrations_do_not_merge() {
        let first = register(setter().with_merging());
        let second = register(setter().with_merging());
        assert_ne!(first.tag(), second.tag());

        let mut history = stack(4);
        let mut value = 0;
        first.invoke(&mut history, &mut value, 1).unwrap();
        second.invoke(&mut history, &mut value, 2).unwrap();
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn clones_share_tag() {
        let set = register(setter().with_merging());
        let copy = set.clone();
        assert_eq!(set.tag(), copy.tag());

        let mut history = stack(4);
        let mut value = 0;
        set.invoke(&mut history, &mut value, 1).unwrap();
        copy.invoke(&mut history, &mut value, 2).unwrap();
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn failed_exec_records_nothing() {
        let checked = register(FnCommand::new(
            "checked",
            |value: &mut i32, next: &i32| {
                if *next < 0 {
                    return Err(CommandError::InvalidArgument(format!("{next} < 0")));
                }
                Ok(std::mem::replace(value, *next))
            },
            |value: &mut i32, prev: &i32| {
                *value = *prev;
                Ok(())
            },
        ));
        let mut history = stack(4);
        let mut value = 3;
        checked.invoke(&mut history, &mut value, 4).unwrap();
        history.undo(&mut value).unwrap();

        let err = checked.invoke(&mut history, &mut value, -1).unwrap_err();
        assert!(matches!(
            err,
            HistoryError::Command(CommandError::InvalidArgument(_))
        ));
        // The pending redo entry survives a failed invoke.
        assert!(history.can_redo());
        assert_eq!(history.len(), 1);
        assert_eq!(value, 3);
    }
}
