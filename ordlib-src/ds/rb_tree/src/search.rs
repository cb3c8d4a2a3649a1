use key_compare::{Compare, KeyOfValue};

use crate::{
    node::{NodeIdx, Side, HEADER},
    RbTree,
};

type InsertPos = (NodeIdx, Side);

impl<T, KoV, C> RbTree<T, KoV, C>
where
    KoV: KeyOfValue<Value = T>,
    C: Compare<KoV::Key>,
{
    pub(crate) fn key(&self, x: NodeIdx) -> &KoV::Key {
        match self.arena.val(x) {
            Some(val) => self.key_of.key(val),
            None => unreachable!("slot {x} is not a data node"),
        }
    }
    fn less(&self, lhs: &KoV::Key, rhs: &KoV::Key) -> bool {
        self.comp.less(lhs, rhs)
    }

    /// First node whose key is not less than `key`.
    pub(crate) fn lower_bound_node(&self, key: &KoV::Key) -> NodeIdx {
        let mut y = HEADER;
        let mut x = self.arena.root();
        while let Some(n) = x {
            if !self.less(self.key(n), key) {
                y = n;
                x = self.arena.left(n);
            } else {
                x = self.arena.right(n);
            }
        }
        y
    }

    /// First node whose key is greater than `key`.
    pub(crate) fn upper_bound_node(&self, key: &KoV::Key) -> NodeIdx {
        let mut y = HEADER;
        let mut x = self.arena.root();
        while let Some(n) = x {
            if self.less(key, self.key(n)) {
                y = n;
                x = self.arena.left(n);
            } else {
                x = self.arena.right(n);
            }
        }
        y
    }

    pub(crate) fn find_node(&self, key: &KoV::Key) -> NodeIdx {
        let j = self.lower_bound_node(key);
        if j == HEADER || self.less(key, self.key(j)) {
            HEADER
        } else {
            j
        }
    }

    /// Leaf position for `key` after every equivalent key.
    pub(crate) fn multi_pos(&self, key: &KoV::Key) -> InsertPos {
        let mut pos = (HEADER, Side::Left);
        let mut x = self.arena.root();
        while let Some(n) = x {
            let side =
                if self.less(key, self.key(n)) { Side::Left } else { Side::Right };
            pos = (n, side);
            x = self.arena.child(n, side);
        }
        pos
    }

    /// Leaf position for `key`, or the node already holding an equivalent
    /// key.
    pub(crate) fn unique_pos(
        &self,
        key: &KoV::Key,
    ) -> Result<InsertPos, NodeIdx> {
        let (y, side) = self.multi_pos(key);
        let mut j = y;
        if side == Side::Left {
            if y == self.arena.leftmost() {
                return Ok((y, side));
            }
            j = self.arena.predecessor(y);
        }
        if self.less(self.key(j), key) {
            Ok((y, side))
        } else {
            Err(j)
        }
    }

    /// Leaf position right next to `hint` if `key` belongs there.
    fn hint_pos(
        &self,
        hint: NodeIdx,
        key: &KoV::Key,
        fits: impl Fn(&KoV::Key, &KoV::Key) -> bool,
    ) -> Option<InsertPos> {
        if self.len == 0 {
            return Some((HEADER, Side::Left));
        }
        if hint == self.arena.leftmost() {
            fits(key, self.key(hint)).then_some((hint, Side::Left))
        } else if hint == HEADER {
            let last = self.arena.rightmost();
            fits(self.key(last), key).then_some((last, Side::Right))
        } else {
            let before = self.arena.predecessor(hint);
            if !(fits(self.key(before), key) && fits(key, self.key(hint))) {
                return None;
            }
            // One of the two has a free slot on the facing side.
            if self.arena.right(before).is_none() {
                Some((before, Side::Right))
            } else {
                Some((hint, Side::Left))
            }
        }
    }

    pub(crate) fn unique_hint_pos(
        &self,
        hint: NodeIdx,
        key: &KoV::Key,
    ) -> Result<InsertPos, NodeIdx> {
        let fits = |lhs: &KoV::Key, rhs: &KoV::Key| self.less(lhs, rhs);
        match self.hint_pos(hint, key, fits) {
            Some(pos) => Ok(pos),
            None => self.unique_pos(key),
        }
    }

    pub(crate) fn multi_hint_pos(
        &self,
        hint: NodeIdx,
        key: &KoV::Key,
    ) -> InsertPos {
        let fits = |lhs: &KoV::Key, rhs: &KoV::Key| !self.less(rhs, lhs);
        self.hint_pos(hint, key, fits).unwrap_or_else(|| self.multi_pos(key))
    }
}

#[cfg(test)]
mod tests {
    use crate::{node::HEADER, RbTree};

    fn sample() -> RbTree<i32> {
        let mut tree = RbTree::new();
        for k in [10, 20, 20, 30, 40] {
            tree.insert_multi(k);
        }
        tree
    }

    #[test]
    fn bounds() {
        let tree = sample();
        let at = |x| tree.arena.val(x).copied();
        assert_eq!(at(tree.lower_bound_node(&20)), Some(20));
        assert_eq!(at(tree.upper_bound_node(&20)), Some(30));
        assert_eq!(at(tree.lower_bound_node(&5)), Some(10));
        assert_eq!(tree.lower_bound_node(&41), HEADER);
        assert_eq!(tree.upper_bound_node(&40), HEADER);
        assert_eq!(at(tree.upper_bound_node(&25)), Some(30));
        assert_eq!(tree.find_node(&25), HEADER);
        assert_eq!(at(tree.find_node(&30)), Some(30));
    }

    #[test]
    fn unique_positions() {
        let tree = sample();
        assert!(tree.unique_pos(&25).is_ok());
        assert!(tree.unique_pos(&5).is_ok());
        assert!(tree.unique_pos(&50).is_ok());
        let dup = tree.unique_pos(&20).unwrap_err();
        assert_eq!(tree.arena.val(dup), Some(&20));

        let empty = RbTree::<i32>::new();
        assert_eq!(empty.unique_pos(&1), Ok((HEADER, crate::node::Side::Left)));
    }

    #[test]
    fn hints() {
        let tree = sample();
        let end = HEADER;
        let first = tree.arena.leftmost();
        let thirty = tree.find_node(&30);

        // a fitting hint links next to it
        let (p, _) = tree.unique_hint_pos(end, &50).unwrap();
        assert_eq!(p, tree.arena.rightmost());
        let (p, side) = tree.unique_hint_pos(first, &5).unwrap();
        assert_eq!((p, side), (first, crate::node::Side::Left));
        let (p, _) = tree.unique_hint_pos(thirty, &25).unwrap();
        assert!(p == thirty || tree.arena.val(p) == Some(&20));

        // a bad hint falls back to a full descent
        assert_eq!(tree.unique_hint_pos(first, &25), tree.unique_pos(&25));
        assert!(tree.unique_hint_pos(thirty, &20).is_err());
        assert_eq!(tree.multi_hint_pos(end, &15), tree.multi_pos(&15));
    }
}
