use std::fmt::{self, Write};

use key_compare::{Compare, KeyOfValue};

use crate::{
    node::{Arena, Color, NodeIdx, Side, HEADER},
    RbTree,
};

/// Checks the links, colours and bookkeeping of `arena` holding `len`
/// elements, and panics at the first violation.
pub(crate) fn assert_arena<T>(arena: &Arena<T>, len: usize) {
    assert_eq!(arena.color(HEADER), Color::Red, "header must be red");
    assert_eq!(
        arena.slots(),
        len + arena.free_len() + 1,
        "slots are neither linked nor vacant"
    );
    let Some(root) = arena.root() else {
        assert_eq!(len, 0, "empty tree with a nonzero length");
        assert_eq!(arena.leftmost(), HEADER);
        assert_eq!(arena.rightmost(), HEADER);
        return;
    };
    assert_eq!(arena.parent(root), HEADER, "root {root} has a parent");
    assert_eq!(arena.color(root), Color::Black, "root must be black");
    assert_eq!(arena.leftmost(), arena.minimum(root), "stale leftmost");
    assert_eq!(arena.rightmost(), arena.maximum(root), "stale rightmost");
    let (count, _) = check_subtree(arena, root);
    assert_eq!(count, len, "linked nodes do not match the length");
}

/// Node count and black height of the subtree rooted at `x`.
fn check_subtree<T>(arena: &Arena<T>, x: NodeIdx) -> (usize, usize) {
    assert!(arena.is_live(x), "slot {x} is linked but vacant");
    let red = arena.color(x) == Color::Red;
    let mut count = 1;
    let mut heights = [0; 2];
    for side in [Side::Left, Side::Right] {
        let Some(c) = arena.child(x, side) else { continue };
        assert_eq!(arena.parent(c), x, "child {c} does not point back to {x}");
        if red {
            assert_eq!(
                arena.color(c),
                Color::Black,
                "red node {x} has a red child {c}"
            );
        }
        let (n, h) = check_subtree(arena, c);
        count += n;
        heights[side as usize] = h;
    }
    assert_eq!(heights[0], heights[1], "black heights differ below {x}");
    (count, heights[0] + (!red) as usize)
}

impl<T> Arena<T> {
    fn height_below(&self, x: Option<NodeIdx>) -> usize {
        x.map_or(0, |x| {
            let left = self.height_below(self.left(x));
            let right = self.height_below(self.right(x));
            1 + left.max(right)
        })
    }

    fn draw(
        &self,
        out: &mut String,
        x: NodeIdx,
        prefix: &str,
        side: Option<Side>,
    ) -> fmt::Result
    where
        T: fmt::Debug,
    {
        let (branch, right_pad, left_pad) = match side {
            None => ("", "", ""),
            Some(Side::Right) => ("┌── ", "    ", "│   "),
            Some(Side::Left) => ("└── ", "│   ", "    "),
        };
        if let Some(r) = self.right(x) {
            let prefix = format!("{prefix}{right_pad}");
            self.draw(out, r, &prefix, Some(Side::Right))?;
        }
        let color = match self.color(x) {
            Color::Red => 'R',
            Color::Black => 'B',
        };
        match self.val(x) {
            Some(val) => writeln!(out, "{prefix}{branch}{val:?} ({color})")?,
            None => unreachable!("slot {x} is linked but vacant"),
        }
        if let Some(l) = self.left(x) {
            let prefix = format!("{prefix}{left_pad}");
            self.draw(out, l, &prefix, Some(Side::Left))?;
        }
        Ok(())
    }
}

impl<T, KoV, C> RbTree<T, KoV, C> {
    /// Number of nodes on the longest path from the root; 0 when empty.
    pub fn height(&self) -> usize { self.arena.height_below(self.arena.root()) }

    /// Number of black nodes on any path from the root down to a missing
    /// child.
    pub fn black_height(&self) -> usize {
        let mut x = self.arena.root();
        let mut res = 0;
        while let Some(n) = x {
            if self.arena.color(n) == Color::Black {
                res += 1;
            }
            x = self.arena.left(n);
        }
        res
    }
}

impl<T: fmt::Debug, KoV, C> RbTree<T, KoV, C> {
    /// Renders the tree sideways: the right subtree above each node, the
    /// left one below, every node as `value (R)` or `value (B)`.
    pub fn visualize(&self) -> String {
        let mut res = String::new();
        if let Some(root) = self.arena.root() {
            // writing into a `String` does not fail
            let _ = self.arena.draw(&mut res, root, "", None);
        }
        res
    }
}

impl<T, KoV, C> RbTree<T, KoV, C>
where
    KoV: KeyOfValue<Value = T>,
    C: Compare<KoV::Key>,
{
    /// Panics unless the tree is a valid red-black tree with its elements
    /// in non-decreasing key order.
    pub fn assert_invariants(&self) {
        assert_arena(&self.arena, self.len);
        let vals: Vec<_> = self.iter().collect();
        for w in vals.windows(2) {
            let (prev, next) = (self.key_of.key(w[0]), self.key_of.key(w[1]));
            assert!(!self.comp.less(next, prev), "keys out of order");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{node::Color, RbTree};

    fn tree(keys: &[i32]) -> RbTree<i32> {
        let mut tree = RbTree::new();
        for &k in keys {
            tree.insert_unique(k);
        }
        tree
    }

    #[test]
    fn visualize() {
        assert_eq!(tree(&[]).visualize(), "");
        assert_eq!(
            tree(&[2, 1, 3]).visualize(),
            "┌── 3 (R)\n2 (B)\n└── 1 (R)\n"
        );
        assert_eq!(
            tree(&[2, 1, 3, 4]).visualize(),
            "    ┌── 4 (R)\n┌── 3 (B)\n2 (B)\n└── 1 (B)\n"
        );
        assert_eq!(
            tree(&[3, 1, 4, 2]).visualize(),
            "┌── 4 (B)\n3 (B)\n│   ┌── 2 (R)\n└── 1 (B)\n"
        );
    }

    #[test]
    fn heights() {
        assert_eq!((tree(&[]).height(), tree(&[]).black_height()), (0, 0));
        let t = tree(&[2, 1, 3, 4]);
        assert_eq!(t.height(), 3);
        assert_eq!(t.black_height(), 2);
        t.assert_invariants();
    }

    #[test]
    #[should_panic(expected = "root must be black")]
    fn red_root() {
        let mut t = tree(&[2, 1, 3]);
        let root = t.arena.root().unwrap();
        t.arena.set_color(root, Color::Red);
        t.assert_invariants();
    }

    #[test]
    #[should_panic(expected = "has a red child")]
    fn red_red() {
        let mut t = tree(&[2, 1, 3, 4]);
        let three = t.find(&3).node;
        t.arena.set_color(three, Color::Red);
        t.assert_invariants();
    }
}
