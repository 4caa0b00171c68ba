#![forbid(unsafe_code)]

//! Pixed edit history.
//!
//! A bounded undo/redo engine for reversible edits against external state.
//!
//! # Key Components
//!
//! - [`Command`] - A reversible operation kind (`exec`, `discard`, `mergeable`)
//! - [`FnCommand`] - A command assembled from two closures
//! - [`register`] / [`Invoker`] - Bind a command to a fresh [`Tag`] and run it
//! - [`EditStack`] - The bounded history: truncation, merging, eviction
//! - [`Session`] - State + history + change version for a presentation layer
//! - [`HistoryConfig`] - Capacity configuration (TOML/JSON with `config`)
//!
//! # Example
//!
//! ```
//! use pxed_history::{FnCommand, Session, register};
//! use std::num::NonZeroUsize;
//!
//! let push = register(FnCommand::new(
//!     "push",
//!     |items: &mut Vec<u32>, item: &u32| {
//!         items.push(*item);
//!         Ok(())
//!     },
//!     |items: &mut Vec<u32>, _: &()| {
//!         items.pop();
//!         Ok(())
//!     },
//! ));
//!
//! let mut session = Session::new(Vec::new(), NonZeroUsize::new(2).unwrap());
//! for item in 1..=3 {
//!     session.run(&push, item).unwrap();
//! }
//! assert_eq!(session.state(), &vec![1, 2, 3]);
//!
//! // Only two entries are retained.
//! session.undo().unwrap();
//! session.undo().unwrap();
//! assert!(!session.can_undo());
//! assert_eq!(session.state(), &vec![1]);
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod invoker;
pub mod session;
pub mod stack;
pub mod tag;

pub use command::{Command, CommandResult, FnCommand};
pub use config::{DEFAULT_CAPACITY, HistoryConfig};
#[cfg(feature = "config")]
pub use error::ConfigError;
pub use error::{CommandError, HistoryError, HistoryOp, Result};
pub use invoker::{Invoker, register};
pub use session::Session;
pub use stack::{EditStack, Recorded};
pub use tag::Tag;
