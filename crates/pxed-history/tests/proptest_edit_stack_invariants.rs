#![forbid(unsafe_code)]

//! Property tests for [`EditStack`] invariants.
//!
//! Validates against a snapshot-based reference model:
//! - Random execute/undo/redo sequences leave the same state as the model.
//! - `current <= len <= capacity` after every operation.
//! - Refused undo/redo never change entries, cursor, or state.
//! - A new execute always leaves nothing to redo.

use std::num::NonZeroUsize;

use proptest::prelude::*;

use pxed_history::{EditStack, FnCommand, Invoker, register};

// ============================================================================
// Strategy helpers
// ============================================================================

const SLOTS: usize = 3;

type Slots = [u8; SLOTS];
type SetCmd = FnCommand<Slots, u8, u8>;

/// Operations that can be performed on an EditStack.
#[derive(Debug, Clone)]
enum Op {
    /// Set `slot` to `value` through that slot's registration.
    Set { slot: usize, value: u8 },
    Undo,
    Redo,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..SLOTS, any::<u8>()).prop_map(|(slot, value)| Op::Set { slot, value }),
        2 => Just(Op::Undo),
        2 => Just(Op::Redo),
    ]
}

fn ops_strategy(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 1..=max_len)
}

/// Slot 0 is mergeable; the others are not.
fn registrations() -> Vec<Invoker<Slots, SetCmd>> {
    (0..SLOTS)
        .map(|slot| {
            let cmd = FnCommand::new(
                "set-slot",
                move |slots: &mut Slots, value: &u8| Ok(std::mem::replace(&mut slots[slot], *value)),
                move |slots: &mut Slots, prev: &u8| {
                    slots[slot] = *prev;
                    Ok(())
                },
            );
            register(if slot == 0 { cmd.with_merging() } else { cmd })
        })
        .collect()
}

// ============================================================================
// Reference model
// ============================================================================

/// Each entry remembers the state before it was first applied and after it
/// was last applied.
#[derive(Debug, Default)]
struct Model {
    entries: Vec<(usize, Slots, Slots)>,
    current: usize,
}

impl Model {
    fn set(&mut self, capacity: usize, state: &mut Slots, slot: usize, value: u8) {
        let before = *state;
        state[slot] = value;
        self.entries.truncate(self.current);
        match self.entries.last_mut() {
            Some((last_slot, _, after)) if slot == 0 && *last_slot == 0 => *after = *state,
            _ => {
                self.entries.push((slot, before, *state));
                if self.entries.len() > capacity {
                    self.entries.remove(0);
                } else {
                    self.current += 1;
                }
            }
        }
    }

    fn undo(&mut self, state: &mut Slots) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        *state = self.entries[self.current].1;
        true
    }

    fn redo(&mut self, state: &mut Slots) -> bool {
        if self.current == self.entries.len() {
            return false;
        }
        *state = self.entries[self.current].2;
        self.current += 1;
        true
    }
}

// ============================================================================
// Invariant 1: the engine tracks the reference model exactly
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn matches_reference_model(
        capacity in 1usize..6,
        ops in ops_strategy(80)
    ) {
        let invokers = registrations();
        let mut stack = EditStack::new(NonZeroUsize::new(capacity).unwrap());
        let mut model = Model::default();
        let mut actual: Slots = [0; SLOTS];
        let mut expected: Slots = [0; SLOTS];

        for op in &ops {
            match op {
                Op::Set { slot, value } => {
                    invokers[*slot].invoke(&mut stack, &mut actual, *value).unwrap();
                    model.set(capacity, &mut expected, *slot, *value);
                }
                Op::Undo => {
                    let ok = stack.undo(&mut actual).is_ok();
                    prop_assert_eq!(ok, model.undo(&mut expected));
                }
                Op::Redo => {
                    let ok = stack.redo(&mut actual).is_ok();
                    prop_assert_eq!(ok, model.redo(&mut expected));
                }
            }
            prop_assert_eq!(actual, expected, "state diverged after {:?}", op);
            prop_assert_eq!(stack.len(), model.entries.len());
            prop_assert_eq!(stack.current(), model.current);
        }
    }
}

// ============================================================================
// Invariant 2: cursor and length bounds
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn cursor_and_length_bounded(
        capacity in 1usize..10,
        ops in ops_strategy(100)
    ) {
        let invokers = registrations();
        let mut stack = EditStack::new(NonZeroUsize::new(capacity).unwrap());
        let mut slots: Slots = [0; SLOTS];

        for op in &ops {
            match op {
                Op::Set { slot, value } => {
                    invokers[*slot].invoke(&mut stack, &mut slots, *value).unwrap();
                    prop_assert!(!stack.can_redo());
                    prop_assert_eq!(stack.current(), stack.len());
                }
                Op::Undo => { let _ = stack.undo(&mut slots); }
                Op::Redo => { let _ = stack.redo(&mut slots); }
            }
            prop_assert!(stack.current() <= stack.len());
            prop_assert!(
                stack.len() <= capacity,
                "len {} exceeds capacity {} after {:?}",
                stack.len(), capacity, op
            );
            prop_assert_eq!(stack.can_undo(), stack.current() > 0);
            prop_assert_eq!(stack.can_redo(), stack.current() < stack.len());
        }
    }
}

// ============================================================================
// Invariant 3: refused operations are no-ops
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn refused_operations_change_nothing(
        ops in ops_strategy(60)
    ) {
        let invokers = registrations();
        let mut stack = EditStack::new(NonZeroUsize::new(4).unwrap());
        let mut slots: Slots = [0; SLOTS];

        for op in &ops {
            let before = (slots, stack.len(), stack.current());
            let refused = match op {
                Op::Set { slot, value } => {
                    invokers[*slot].invoke(&mut stack, &mut slots, *value).unwrap();
                    false
                }
                Op::Undo => stack.undo(&mut slots).is_err(),
                Op::Redo => stack.redo(&mut slots).is_err(),
            };
            if refused {
                prop_assert_eq!((slots, stack.len(), stack.current()), before);
            }
        }
    }
}

// ============================================================================
// Invariant 4: undo everything then redo everything returns to the tip
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn full_rewind_and_replay(
        sets in prop::collection::vec((0..SLOTS, any::<u8>()), 1..40)
    ) {
        let invokers = registrations();
        let mut stack = EditStack::new(NonZeroUsize::new(64).unwrap());
        let mut slots: Slots = [0; SLOTS];

        for (slot, value) in &sets {
            invokers[*slot].invoke(&mut stack, &mut slots, *value).unwrap();
        }
        let tip = slots;

        while stack.can_undo() {
            stack.undo(&mut slots).unwrap();
        }
        prop_assert_eq!(slots, [0; SLOTS]);

        while stack.can_redo() {
            stack.redo(&mut slots).unwrap();
        }
        prop_assert_eq!(slots, tip);
    }
}
