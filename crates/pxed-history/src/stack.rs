#![forbid(unsafe_code)]

//! Bounded edit stack with a single undo/redo cursor.
//!
//! [`EditStack`] keeps one ordered sequence of history entries and a cursor
//! `current` that splits it into applied entries (undoable) and pending
//! entries (redoable):
//!
//! ```text
//!            applied              pending
//!   ┌──────┬──────┬──────┐┌──────┬──────┐
//!   │  e0  │  e1  │  e2  ││  e3  │  e4  │
//!   └──────┴──────┴──────┘└──────┴──────┘
//!                        ▲
//!                     current = 3
//!
//! execute(e5)  <-- drops e3, e4 (new branch)
//!   ┌──────┬──────┬──────┬──────┐
//!   │  e0  │  e1  │  e2  │  e5  │
//!   └──────┴──────┴──────┴──────┘
//!                               ▲
//!                            current = 4
//! ```
//!
//! # Invariants
//!
//! 1. `current <= entries.len() <= capacity` after every operation.
//! 2. `execute` always leaves `current == entries.len()`.
//! 3. Two adjacent entries never share a tag when that tag's command is
//!    mergeable and the second was executed directly after the first.
//! 4. A refused `undo`/`redo` leaves entries and cursor untouched.
//!
//! # Memory Model
//!
//! Entries live in a `VecDeque` so eviction of the oldest entry is O(1).
//! Entries removed by truncation or eviction are dropped; their `discard` is
//! never called. Records are released by `Drop` when the last entry holding
//! them goes away.

use std::collections::VecDeque;
use std::fmt;
use std::num::NonZeroUsize;

use tracing::{debug, trace, warn};

use crate::command::CommandResult;
use crate::config::{DEFAULT_CAPACITY, HistoryConfig};
use crate::error::{HistoryError, HistoryOp, Result};
use crate::tag::Tag;

/// Zero-argument replay of a stored effect against the state.
pub type Replay<S> = Box<dyn Fn(&mut S) -> CommandResult + Send + Sync>;

/// One slot of history: how to reverse it, how to re-apply it, and which
/// registration produced it.
struct HistoryEntry<S> {
    undo: Replay<S>,
    redo: Replay<S>,
    tag: Tag,
}

impl<S> HistoryEntry<S> {
    fn tag(&self) -> Tag {
        self.tag
    }
}

/// What `execute` did with the new entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    /// Pushed as a new entry.
    Appended,
    /// Pushed as a new entry and the oldest entry was evicted.
    AppendedWithEviction,
    /// Folded into the previous entry of the same registration.
    Merged,
}

/// Bounded undo/redo history over external state `S`.
pub struct EditStack<S> {
    /// History entries, oldest at the front.
    entries: VecDeque<HistoryEntry<S>>,
    /// Number of applied entries.
    current: usize,
    /// Maximum number of entries retained.
    capacity: NonZeroUsize,
}

impl<S> fmt::Debug for EditStack<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditStack")
            .field("len", &self.entries.len())
            .field("current", &self.current)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<S> Default for EditStack<S> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<S> EditStack<S> {
    /// Create an empty stack that retains at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.get().min(256)),
            current: 0,
            capacity,
        }
    }

    /// Create an empty stack from configuration.
    pub fn from_config(config: &HistoryConfig) -> Result<Self> {
        Ok(Self::new(config.validate()?))
    }

    /// A fresh empty stack with the same capacity.
    ///
    /// Callers holding the old stack replace it with the returned value.
    /// Capacity is fixed for the life of a history, so the reset stack
    /// reuses it rather than taking one; to start over with a different
    /// capacity, build a new stack with [`EditStack::new`].
    #[must_use]
    pub fn reset(&self) -> Self {
        debug!(
            dropped = self.entries.len(),
            capacity = self.capacity.get(),
            "history reset"
        );
        Self::new(self.capacity)
    }

    /// Replace `self` with [`reset`](Self::reset) in place.
    pub fn clear(&mut self) {
        *self = self.reset();
    }

    // ========================================================================
    // Core Operations
    // ========================================================================

    /// Record an already-applied effect.
    ///
    /// Drops any pending redo entries, then either folds the new entry into
    /// the previous one (same tag, `mergeable`) or appends it, evicting the
    /// oldest entry when the stack is full. A merged entry keeps its original
    /// `undo` and takes the new `redo`.
    pub fn execute<U, R>(&mut self, tag: Tag, mergeable: bool, undo: U, redo: R) -> Recorded
    where
        U: Fn(&mut S) -> CommandResult + Send + Sync + 'static,
        R: Fn(&mut S) -> CommandResult + Send + Sync + 'static,
    {
        self.truncate_redo();

        if mergeable && self.current == self.entries.len() {
            if let Some(last) = self.entries.back_mut() {
                if last.tag == tag {
                    last.redo = Box::new(redo);
                    debug!(
                        tag = %tag,
                        current = self.current,
                        len = self.entries.len(),
                        "history entry merged"
                    );
                    return Recorded::Merged;
                }
            }
        }

        self.entries.push_back(HistoryEntry {
            undo: Box::new(undo),
            redo: Box::new(redo),
            tag,
        });

        let recorded = if self.entries.len() > self.capacity.get() {
            if let Some(evicted) = self.entries.pop_front() {
                trace!(evicted = %evicted.tag, "history entry evicted");
            }
            self.current = self.capacity.get();
            Recorded::AppendedWithEviction
        } else {
            self.current += 1;
            Recorded::Appended
        };

        debug!(
            tag = %tag,
            current = self.current,
            len = self.entries.len(),
            capacity = self.capacity.get(),
            evicted = recorded == Recorded::AppendedWithEviction,
            "history entry appended"
        );
        recorded
    }

    /// Reverse the most recently applied entry.
    ///
    /// Fails with [`HistoryError::InvalidOperation`] when nothing is applied.
    /// When the entry's `discard` fails the error is returned and the cursor
    /// stays put.
    pub fn undo(&mut self, state: &mut S) -> Result<()> {
        let Some(entry) = self
            .current
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
        else {
            return Err(self.refuse(HistoryOp::Undo));
        };

        if let Err(err) = (entry.undo)(state) {
            warn!(tag = %entry.tag, error = %err, "undo failed");
            return Err(err.into());
        }
        self.current -= 1;

        debug!(
            current = self.current,
            len = self.entries.len(),
            "history undo"
        );
        Ok(())
    }

    /// Re-apply the first pending entry.
    ///
    /// Fails with [`HistoryError::InvalidOperation`] when nothing is pending.
    /// When the replayed `exec` fails the error is returned and the cursor
    /// stays put.
    pub fn redo(&mut self, state: &mut S) -> Result<()> {
        let Some(entry) = self.entries.get(self.current) else {
            return Err(self.refuse(HistoryOp::Redo));
        };

        if let Err(err) = (entry.redo)(state) {
            warn!(tag = %entry.tag, error = %err, "redo failed");
            return Err(err.into());
        }
        self.current += 1;

        debug!(
            current = self.current,
            len = self.entries.len(),
            "history redo"
        );
        Ok(())
    }

    /// Check if undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    /// Check if redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.current < self.entries.len()
    }

    // ========================================================================
    // Info
    // ========================================================================

    /// Number of entries, applied and pending.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of applied entries.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Entries available for undo.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.current
    }

    /// Entries available for redo.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.entries.len() - self.current
    }

    /// Tags of all entries, oldest first.
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.entries.iter().map(HistoryEntry::tag)
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Drop every pending entry. Their records are released, not discarded.
    fn truncate_redo(&mut self) {
        let pending = self.entries.len() - self.current;
        if pending > 0 {
            self.entries.truncate(self.current);
            trace!(dropped = pending, "redo branch truncated");
        }
    }

    fn refuse(&self, op: HistoryOp) -> HistoryError {
        warn!(
            op = %op,
            current = self.current,
            len = self.entries.len(),
            "history operation refused"
        );
        HistoryError::InvalidOperation {
            op,
            current: self.current,
            len: self.entries.len(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
