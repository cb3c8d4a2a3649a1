use std::{fmt, iter::FusedIterator};

use crate::node::{Arena, NodeIdx, HEADER};

/// In-order iterator over the elements between two positions.
pub struct Range<'a, T> {
    arena: &'a Arena<T>,
    front: NodeIdx,
    // exclusive
    back: NodeIdx,
}

/// In-order iterator over all elements.
pub struct Iter<'a, T> {
    range: Range<'a, T>,
    len: usize,
}

/// Owning in-order iterator.
pub struct IntoIter<T> {
    arena: Arena<T>,
    front: NodeIdx,
    back: NodeIdx,
    len: usize,
}

impl<'a, T> Range<'a, T> {
    pub(crate) fn new(arena: &'a Arena<T>, front: NodeIdx, back: NodeIdx) -> Self {
        Self { arena, front, back }
    }
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(
        arena: &'a Arena<T>,
        front: NodeIdx,
        back: NodeIdx,
        len: usize,
    ) -> Self {
        Self { range: Range::new(arena, front, back), len }
    }
}

impl<T> IntoIter<T> {
    pub(crate) fn new(arena: Arena<T>, len: usize) -> Self {
        let front = arena.leftmost();
        Self { arena, front, back: HEADER, len }
    }
}

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        let x = self.front;
        self.front = self.arena.successor(x);
        self.arena.val(x)
    }
}

impl<'a, T> DoubleEndedIterator for Range<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        self.back = self.arena.predecessor(self.back);
        self.arena.val(self.back)
    }
}

impl<T> FusedIterator for Range<'_, T> {}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<&'a T> {
        let val = self.range.next()?;
        self.len -= 1;
        Some(val)
    }
    fn size_hint(&self) -> (usize, Option<usize>) { (self.len, Some(self.len)) }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        let val = self.range.next_back()?;
        self.len -= 1;
        Some(val)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        // Taking a value leaves the links in place, so navigation still
        // works on the emptied slots.
        let x = self.front;
        self.front = self.arena.successor(x);
        self.len -= 1;
        self.arena.take_val(x)
    }
    fn size_hint(&self) -> (usize, Option<usize>) { (self.len, Some(self.len)) }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.back = self.arena.predecessor(self.back);
        self.len -= 1;
        self.arena.take_val(self.back)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> Clone for Range<'_, T> {
    fn clone(&self) -> Self { Self { ..*self } }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { range: self.range.clone(), len: self.len }
    }
}

impl<T: fmt::Debug> fmt::Debug for Range<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
