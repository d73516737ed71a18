//! Bidirectional cursor contract shared by both maps.
//!
//! A cursor is a position inside one map plus the map it belongs to. It
//! sits either on an entry or on the end sentinel (one past the last
//! entry). Stepping and dereferencing are checked:
//! - `current()` at the end sentinel fails with `InvalidOperation`.
//! - `move_next()` at the end sentinel fails with `InvalidOperation`.
//! - `move_prev()` on the first entry (or on the end sentinel of an empty
//!   map) fails with `InvalidOperation`.
//!
//! A failed step leaves the cursor where it was. Only the traversal order
//! differs between the maps.

use crate::error::MapError;

pub trait BidirectionalCursor {
    type Key;
    type Value;
    /// Copyable location token, usable after the cursor's borrow ends.
    type Position: Copy + Eq;

    /// Dereference: the entry under the cursor.
    fn current(&self) -> Result<(&Self::Key, &Self::Value), MapError>;

    /// Pre-increment.
    fn move_next(&mut self) -> Result<(), MapError>;

    /// Pre-decrement.
    fn move_prev(&mut self) -> Result<(), MapError>;

    fn position(&self) -> Self::Position;

    fn is_end(&self) -> bool;

    fn key(&self) -> Result<&Self::Key, MapError> {
        self.current().map(|(k, _)| k)
    }

    fn value(&self) -> Result<&Self::Value, MapError> {
        self.current().map(|(_, v)| v)
    }

    /// Post-increment: steps forward and returns the cursor as it was.
    fn post_next(&mut self) -> Result<Self, MapError>
    where
        Self: Clone,
    {
        let before = self.clone();
        self.move_next()?;
        Ok(before)
    }

    /// Post-decrement: steps backward and returns the cursor as it was.
    fn post_prev(&mut self) -> Result<Self, MapError>
    where
        Self: Clone,
    {
        let before = self.clone();
        self.move_prev()?;
        Ok(before)
    }

    /// Steps forward until the end sentinel and returns the number of steps.
    fn seek_end(&mut self) -> usize {
        let mut steps = 0;
        while self.move_next().is_ok() {
            steps += 1;
        }
        steps
    }

    /// Steps backward until the first entry and returns the number of steps.
    fn seek_begin(&mut self) -> usize {
        let mut steps = 0;
        while self.move_prev().is_ok() {
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal slice-backed cursor to exercise the provided methods.
    #[derive(Clone, Debug, PartialEq)]
    struct SliceCursor<'a> {
        items: &'a [(u32, char)],
        at: usize,
    }

    impl BidirectionalCursor for SliceCursor<'_> {
        type Key = u32;
        type Value = char;
        type Position = usize;

        fn current(&self) -> Result<(&u32, &char), MapError> {
            self.items
                .get(self.at)
                .map(|(k, v)| (k, v))
                .ok_or(MapError::InvalidOperation)
        }

        fn move_next(&mut self) -> Result<(), MapError> {
            if self.at >= self.items.len() {
                return Err(MapError::InvalidOperation);
            }
            self.at += 1;
            Ok(())
        }

        fn move_prev(&mut self) -> Result<(), MapError> {
            if self.at == 0 {
                return Err(MapError::InvalidOperation);
            }
            self.at -= 1;
            Ok(())
        }

        fn position(&self) -> usize {
            self.at
        }

        fn is_end(&self) -> bool {
            self.at == self.items.len()
        }
    }

    const ITEMS: [(u32, char); 3] = [(1, 'a'), (2, 'b'), (3, 'c')];

    /// Invariant: post-increment returns the old state and advances the cursor.
    #[test]
    fn post_steps_return_previous_state() {
        let mut c = SliceCursor { items: &ITEMS, at: 0 };
        let before = c.post_next().unwrap();
        assert_eq!(before.key(), Ok(&1));
        assert_eq!(c.key(), Ok(&2));

        let before = c.post_prev().unwrap();
        assert_eq!(before.value(), Ok(&'b'));
        assert_eq!(c.value(), Ok(&'a'));
    }

    /// Invariant: a failed post-step leaves the cursor unchanged.
    #[test]
    fn failed_post_step_does_not_move() {
        let mut c = SliceCursor { items: &ITEMS, at: 0 };
        assert_eq!(c.post_prev(), Err(MapError::InvalidOperation));
        assert_eq!(c.position(), 0);
    }

    /// Invariant: begin and end are `len` steps apart in both directions.
    #[test]
    fn seek_counts_steps() {
        let mut c = SliceCursor { items: &ITEMS, at: 0 };
        assert_eq!(c.seek_end(), ITEMS.len());
        assert!(c.is_end());
        assert_eq!(c.key(), Err(MapError::InvalidOperation));
        assert_eq!(c.seek_begin(), ITEMS.len());
        assert_eq!(c.position(), 0);
    }
}
