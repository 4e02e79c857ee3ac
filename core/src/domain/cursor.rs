//! Bidirectional cursor
//!
//! A user's own post stream and a merged news feed are navigated the same
//! way: `next()` walks towards older posts, `previous()` walks back towards
//! newer ones. `Cursor` is that shared capability and `CursorPosition` is the
//! index bookkeeping both implementations delegate to.
//!
//! ```text
//!   previous_index  next_index
//!          |        |
//!   [0] [1] [2] ^ [3] [4]
//!               cursor
//! ```

use crate::error::DomainError;

/// A bidirectional cursor over an ordered sequence.
///
/// Indices follow the list-iterator convention: the cursor sits between
/// `previous_index()` and `next_index()`, and `last_index()` is the index of
/// the element returned by the most recent `next()` or `previous()`.
pub trait Cursor {
    type Item;

    /// Reset to "before the first element".
    fn start_iteration(&mut self);

    fn has_next(&self) -> bool;

    fn has_previous(&self) -> bool;

    /// Step over the next element and return it.
    fn next(&mut self) -> Result<&Self::Item, DomainError>;

    /// Step back over the previous element and return it.
    fn previous(&mut self) -> Result<&Self::Item, DomainError>;

    fn next_index(&self) -> usize;

    /// `None` when the cursor sits before the first element.
    fn previous_index(&self) -> Option<usize>;

    /// `None` until `next()` or `previous()` has been called since the last
    /// restart.
    fn last_index(&self) -> Option<usize>;
}

/// Index bookkeeping for a [`Cursor`].
///
/// `previous_index` is always `next_index - 1`, so only `next` is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    next: usize,
    last: Option<usize>,
}

impl CursorPosition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn next_index(&self) -> usize {
        self.next
    }

    pub fn previous_index(&self) -> Option<usize> {
        self.next.checked_sub(1)
    }

    pub fn last_index(&self) -> Option<usize> {
        self.last
    }

    /// Move forward over one element and return its index.
    pub fn advance(&mut self) -> usize {
        let index = self.next;
        self.next += 1;
        self.last = Some(index);
        index
    }

    /// Move back over one element and return its index, or `None` at the
    /// start.
    pub fn retreat(&mut self) -> Option<usize> {
        let index = self.previous_index()?;
        self.next = index;
        self.last = Some(index);
        Some(index)
    }

    /// Account for an element inserted at index 0 so that the cursor keeps
    /// pointing at the same logical elements. A cursor that has not moved
    /// since its last reset stays before the (new) first element.
    pub fn shift_forward(&mut self) {
        if let Some(last) = self.last {
            self.next += 1;
            self.last = Some(last + 1);
        }
    }
}
