//! Red-black tree engine for ordered associative containers.
//!
//! One [`RbTree`] serves both unique-keyed and multi-keyed use: the
//! `*_unique` operations treat equivalent keys as duplicates, the
//! `*_multi` operations keep them side by side in insertion order.
//!
//! Nodes live in an arena and refer to each other by slot index. Slot 0 is
//! the header: it holds the root link and caches the leftmost and
//! rightmost nodes, and it is the position [`RbTree::end`] stands for.
//!
//! ```
//! use rb_tree::RbTree;
//!
//! let mut tree = RbTree::<i32>::new();
//! for k in [10, 20, 5, 15, 25, 3] {
//!     tree.insert_unique(k);
//! }
//! assert!(tree.iter().eq(&[3, 5, 10, 15, 20, 25]));
//!
//! assert_eq!(tree.erase_unique(&10), 1);
//! assert!(tree.iter().eq(&[3, 5, 15, 20, 25]));
//! tree.assert_invariants();
//! ```

use std::{fmt, mem};

use key_compare::{Compare, First, Identity, KeyOfValue, Less};

mod clone;
mod debug;
mod error;
mod insert;
mod iter;
mod navigate;
mod node;
mod remove;
mod rotate;
mod search;

pub use error::RbTreeError;
pub use iter::{IntoIter, Iter, Range};
pub use node::Color;

use node::{Arena, Node, NodeIdx, HEADER};

pub struct RbTree<T, KoV = Identity<T>, C = Less> {
    arena: Arena<T>,
    len: usize,
    max_len: usize,
    key_of: KoV,
    comp: C,
}

pub type RbSet<T> = RbTree<T>;
pub type RbMap<K, V> = RbTree<(K, V), First<K, V>, Less>;

/// A position in an [`RbTree`]: an element, or the past-the-end position.
///
/// A handle stays valid until its own element is erased or the tree is
/// cleared; other insertions and erasures do not affect it. A handle is
/// only meaningful for the tree it came from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    node: NodeIdx,
}

impl Handle {
    fn new(node: NodeIdx) -> Self { Self { node } }
}

fn default_max_len<T>() -> usize {
    isize::MAX as usize / mem::size_of::<Node<T>>().max(1) - 1
}

impl<T, KoV: Default, C: Default> RbTree<T, KoV, C> {
    pub fn new() -> Self { Self::with_parts(KoV::default(), C::default()) }
    pub fn with_capacity(cap: usize) -> Self {
        let mut tree = Self::new();
        tree.arena = Arena::with_capacity(cap);
        tree
    }
}

impl<T, KoV: Default, C: Default> Default for RbTree<T, KoV, C> {
    fn default() -> Self { Self::new() }
}

impl<T, KoV, C> RbTree<T, KoV, C> {
    pub fn with_parts(key_of: KoV, comp: C) -> Self {
        Self {
            arena: Arena::new(),
            len: 0,
            max_len: default_max_len::<T>(),
            key_of,
            comp,
        }
    }
    /// Lowers the number of elements the tree accepts. Insertions beyond
    /// it fail with [`RbTreeError::LengthExceeded`].
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len.min(default_max_len::<T>());
        self
    }

    pub fn len(&self) -> usize { self.len }
    pub fn is_empty(&self) -> bool { self.len == 0 }
    pub fn max_len(&self) -> usize { self.max_len }
    pub fn key_of(&self) -> &KoV { &self.key_of }
    pub fn key_comp(&self) -> &C { &self.comp }

    /// The position of the minimum, or [`end`](Self::end) when empty.
    pub fn begin(&self) -> Handle { Handle::new(self.arena.leftmost()) }
    pub fn end(&self) -> Handle { Handle::new(HEADER) }
    /// In-order successor; `next(end()) == end()`.
    pub fn next(&self, pos: Handle) -> Handle {
        Handle::new(self.arena.successor(pos.node))
    }
    /// In-order predecessor; `prev(end())` is the maximum and
    /// `prev(begin()) == end()`.
    pub fn prev(&self, pos: Handle) -> Handle {
        Handle::new(self.arena.predecessor(pos.node))
    }

    /// The element at `pos`, or `None` at [`end`](Self::end).
    pub fn get(&self, pos: Handle) -> Option<&T> { self.arena.val(pos.node) }
    /// Mutable access to the element at `pos`. Changing its key in a way
    /// that changes its order is a logic error.
    pub fn get_mut(&mut self, pos: Handle) -> Option<&mut T> {
        self.arena.val_mut(pos.node)
    }
    pub fn color(&self, pos: Handle) -> Option<Color> {
        self.arena.is_live(pos.node).then(|| self.arena.color(pos.node))
    }
    pub fn first(&self) -> Option<&T> { self.get(self.begin()) }
    pub fn last(&self) -> Option<&T> { self.get(self.prev(self.end())) }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.arena, self.arena.leftmost(), HEADER, self.len)
    }
    /// Elements in `[first, last)`. `last` must be reachable from `first`.
    pub fn range(&self, first: Handle, last: Handle) -> Range<'_, T> {
        Range::new(&self.arena, first.node, last.node)
    }

    /// Removes the element at `pos` and returns the position after it.
    ///
    /// # Panics
    /// Panics if `pos` is [`end`](Self::end) or no longer valid.
    pub fn erase(&mut self, pos: Handle) -> Handle { self.remove(pos).1 }

    /// Removes the element at `pos` and returns it with the position after
    /// it.
    ///
    /// # Panics
    /// Panics if `pos` is [`end`](Self::end) or no longer valid.
    pub fn remove(&mut self, pos: Handle) -> (T, Handle) {
        let z = pos.node;
        assert!(self.arena.is_live(z), "erasing an invalid position {z}");
        let next = self.arena.successor(z);
        self.arena.unlink(z);
        self.len -= 1;
        match self.arena.dealloc(z) {
            Some(val) => (val, Handle::new(next)),
            None => unreachable!(),
        }
    }

    /// Removes `[first, last)` and returns the number of removed elements.
    pub fn erase_range(&mut self, first: Handle, last: Handle) -> usize {
        if first == self.begin() && last == self.end() {
            let len = self.len;
            self.clear();
            return len;
        }
        let mut count = 0;
        let mut cur = first;
        while cur != last {
            cur = self.erase(cur);
            count += 1;
        }
        log::trace!("erased {count} elements from a range");
        count
    }

    pub fn clear(&mut self) {
        log::trace!("clearing {} elements", self.len);
        self.arena.clear();
        self.len = 0;
    }

    pub fn swap(&mut self, other: &mut Self) { mem::swap(self, other) }

    fn check_len(&self, additional: usize) -> Result<(), RbTreeError> {
        match self.len.checked_add(additional) {
            Some(new_len) if new_len <= self.max_len => Ok(()),
            _ => {
                log::debug!(
                    "rejecting {additional} insertions at length {}",
                    self.len
                );
                Err(RbTreeError::LengthExceeded {
                    len: self.len,
                    additional,
                    max_len: self.max_len,
                })
            }
        }
    }

    fn link_new(
        &mut self,
        (parent, side): (NodeIdx, node::Side),
        val: T,
    ) -> Result<NodeIdx, RbTreeError> {
        let x = self.arena.alloc(val)?;
        self.arena.link(parent, side, x);
        self.len += 1;
        Ok(x)
    }
}

impl<T, KoV, C> RbTree<T, KoV, C>
where
    KoV: KeyOfValue<Value = T>,
    C: Compare<KoV::Key>,
{
    /// The position of an element with a key equivalent to `key`, or
    /// [`end`](Self::end).
    pub fn find(&self, key: &KoV::Key) -> Handle {
        Handle::new(self.find_node(key))
    }
    pub fn contains_key(&self, key: &KoV::Key) -> bool {
        self.find_node(key) != HEADER
    }
    /// The first position whose key is not less than `key`.
    pub fn lower_bound(&self, key: &KoV::Key) -> Handle {
        Handle::new(self.lower_bound_node(key))
    }
    /// The first position whose key is greater than `key`.
    pub fn upper_bound(&self, key: &KoV::Key) -> Handle {
        Handle::new(self.upper_bound_node(key))
    }
    pub fn equal_range_multi(&self, key: &KoV::Key) -> (Handle, Handle) {
        (self.lower_bound(key), self.upper_bound(key))
    }
    pub fn equal_range_unique(&self, key: &KoV::Key) -> (Handle, Handle) {
        let first = self.find(key);
        if first == self.end() {
            (first, first)
        } else {
            (first, self.next(first))
        }
    }
    pub fn count_multi(&self, key: &KoV::Key) -> usize {
        let (first, last) = self.equal_range_multi(key);
        self.range(first, last).count()
    }
    pub fn count_unique(&self, key: &KoV::Key) -> usize {
        self.contains_key(key) as usize
    }

    /// Inserts `val` unless an equivalent key is present. Returns the
    /// position of the inserted or the already present element, and
    /// whether the insertion took place.
    ///
    /// # Panics
    /// Panics if the tree is at [`max_len`](Self::max_len) or node storage
    /// cannot be allocated; see
    /// [`try_insert_unique`](Self::try_insert_unique).
    pub fn insert_unique(&mut self, val: T) -> (Handle, bool) {
        self.try_insert_unique(val).unwrap_or_else(|e| panic!("{e}"))
    }
    pub fn try_insert_unique(
        &mut self,
        val: T,
    ) -> Result<(Handle, bool), RbTreeError> {
        self.check_len(1)?;
        match self.unique_pos(self.key_of.key(&val)) {
            Ok(pos) => Ok((Handle::new(self.link_new(pos, val)?), true)),
            Err(existing) => Ok((Handle::new(existing), false)),
        }
    }

    /// Inserts `val` after every element with an equivalent key.
    ///
    /// # Panics
    /// Same as [`insert_unique`](Self::insert_unique).
    pub fn insert_multi(&mut self, val: T) -> Handle {
        self.try_insert_multi(val).unwrap_or_else(|e| panic!("{e}"))
    }
    pub fn try_insert_multi(&mut self, val: T) -> Result<Handle, RbTreeError> {
        self.check_len(1)?;
        let pos = self.multi_pos(self.key_of.key(&val));
        Ok(Handle::new(self.link_new(pos, val)?))
    }

    /// Like [`insert_unique`](Self::insert_unique), but links `val` right
    /// before `hint` without a full descent when it belongs there.
    pub fn insert_unique_hint(&mut self, hint: Handle, val: T) -> Handle {
        self.try_insert_unique_hint(hint, val)
            .unwrap_or_else(|e| panic!("{e}"))
    }
    pub fn try_insert_unique_hint(
        &mut self,
        hint: Handle,
        val: T,
    ) -> Result<Handle, RbTreeError> {
        self.check_len(1)?;
        match self.unique_hint_pos(hint.node, self.key_of.key(&val)) {
            Ok(pos) => Ok(Handle::new(self.link_new(pos, val)?)),
            Err(existing) => Ok(Handle::new(existing)),
        }
    }

    /// Like [`insert_multi`](Self::insert_multi), but links `val` right
    /// before `hint` when it belongs there, even if that is not after
    /// every equivalent key.
    pub fn insert_multi_hint(&mut self, hint: Handle, val: T) -> Handle {
        self.try_insert_multi_hint(hint, val).unwrap_or_else(|e| panic!("{e}"))
    }
    pub fn try_insert_multi_hint(
        &mut self,
        hint: Handle,
        val: T,
    ) -> Result<Handle, RbTreeError> {
        self.check_len(1)?;
        let pos = self.multi_hint_pos(hint.node, self.key_of.key(&val));
        Ok(Handle::new(self.link_new(pos, val)?))
    }

    /// Inserts every element as by [`insert_unique`](Self::insert_unique)
    /// and returns how many were inserted. Sorted input takes the fast
    /// path of hinted insertion at the end.
    pub fn extend_unique<I: IntoIterator<Item = T>>(&mut self, iter: I) -> usize {
        self.try_extend_unique(iter).unwrap_or_else(|e| panic!("{e}"))
    }
    /// Elements before a failing one stay inserted.
    pub fn try_extend_unique<I: IntoIterator<Item = T>>(
        &mut self,
        iter: I,
    ) -> Result<usize, RbTreeError> {
        let iter = self.precheck_extend(iter)?;
        let mut count = 0;
        for val in iter {
            let len = self.len;
            self.try_insert_unique_hint(self.end(), val)?;
            count += self.len - len;
        }
        Ok(count)
    }

    pub fn extend_multi<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.try_extend_multi(iter).unwrap_or_else(|e| panic!("{e}"))
    }
    pub fn try_extend_multi<I: IntoIterator<Item = T>>(
        &mut self,
        iter: I,
    ) -> Result<(), RbTreeError> {
        for val in self.precheck_extend(iter)? {
            self.try_insert_multi_hint(self.end(), val)?;
        }
        Ok(())
    }

    fn precheck_extend<I: IntoIterator<Item = T>>(
        &self,
        iter: I,
    ) -> Result<I::IntoIter, RbTreeError> {
        let iter = iter.into_iter();
        if let (lo, Some(hi)) = iter.size_hint() {
            if lo == hi {
                self.check_len(lo)?;
            }
        }
        Ok(iter)
    }

    /// Removes the element with a key equivalent to `key`, if any, and
    /// returns the number of removed elements.
    pub fn erase_unique(&mut self, key: &KoV::Key) -> usize {
        let pos = self.find(key);
        if pos == self.end() {
            return 0;
        }
        self.erase(pos);
        1
    }
    /// Removes every element with a key equivalent to `key` and returns
    /// their number.
    pub fn erase_multi(&mut self, key: &KoV::Key) -> usize {
        let (first, last) = self.equal_range_multi(key);
        self.erase_range(first, last)
    }
}

impl<T: fmt::Debug, KoV, C> fmt::Debug for RbTree<T, KoV, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, KoV, C> PartialEq for RbTree<T, KoV, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, KoV, C> Eq for RbTree<T, KoV, C> {}

impl<'a, T, KoV, C> IntoIterator for &'a RbTree<T, KoV, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> { self.iter() }
}

impl<T, KoV, C> IntoIterator for RbTree<T, KoV, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> IntoIter<T> { IntoIter::new(self.arena, self.len) }
}
