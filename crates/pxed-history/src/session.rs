#![forbid(unsafe_code)]

//! Document state paired with its edit history and a change counter.
//!
//! A [`Session`] is what a presentation layer holds: it owns the state the
//! commands mutate, the [`EditStack`] recording them, and a `version` that
//! increases by one after every successful `run`, `undo`, or `redo`. A
//! renderer compares versions to decide whether to redraw.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use tracing::debug;

use crate::command::Command;
use crate::config::HistoryConfig;
use crate::error::Result;
use crate::invoker::Invoker;
use crate::stack::EditStack;

/// State, history, and change version owned together.
pub struct Session<S> {
    state: S,
    history: EditStack<S>,
    version: u64,
}

impl<S: fmt::Debug> fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("history", &self.history)
            .field("version", &self.version)
            .finish()
    }
}

impl<S: 'static> Session<S> {
    #[must_use]
    pub fn new(state: S, capacity: NonZeroUsize) -> Self {
        Self {
            state,
            history: EditStack::new(capacity),
            version: 0,
        }
    }

    pub fn from_config(state: S, config: &HistoryConfig) -> Result<Self> {
        Ok(Self {
            state,
            history: EditStack::from_config(config)?,
            version: 0,
        })
    }

    /// Run a registered command against the state and record it.
    pub fn run<C>(&mut self, invoker: &Invoker<S, C>, args: C::Args) -> Result<Arc<C::Record>>
    where
        C: Command<S>,
    {
        let record = invoker.invoke(&mut self.history, &mut self.state, args)?;
        self.bump();
        Ok(record)
    }

    pub fn undo(&mut self) -> Result<()> {
        self.history.undo(&mut self.state)?;
        self.bump();
        Ok(())
    }

    pub fn redo(&mut self) -> Result<()> {
        self.history.redo(&mut self.state)?;
        self.bump();
        Ok(())
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of committed mutations since the state was opened.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    #[must_use]
    pub fn history(&self) -> &EditStack<S> {
        &self.history
    }

    /// Mutable access for changes that are not part of the history.
    ///
    /// Does not bump the version. Anything changed here must not be
    /// something a recorded command's `discard` depends on.
    pub fn state_mut_untracked(&mut self) -> &mut S {
        &mut self.state
    }

    /// Forget all history; state and version are kept.
    pub fn clear_history(&mut self) {
        self.history = self.history.reset();
    }

    /// Swap in a new document, clearing history and restarting the version.
    pub fn replace_state(&mut self, state: S) -> S {
        self.clear_history();
        self.version = 0;
        debug!("session state replaced");
        std::mem::replace(&mut self.state, state)
    }

    fn bump(&mut self) {
        self.version += 1;
    }
}
