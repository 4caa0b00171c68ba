#![forbid(unsafe_code)]

//! Registration identity for commands.
//!
//! A [`Tag`] is allocated once per call to [`register`](crate::register) and
//! shared by every invocation made through the resulting invoker. Two history
//! entries may only merge when their tags are equal, so independently
//! registered commands never coalesce even if they do the same thing.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TAG: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of one command registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(u64);

impl Tag {
    /// Allocate a tag that has never been handed out before in this process.
    #[must_use]
    pub fn fresh() -> Self {
        Self(NEXT_TAG.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw counter value, for logging.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cmd#{}", self.0)
    }
}
