use crate::node::{Arena, Color, NodeIdx, Side, HEADER};

impl<T> Arena<T> {
    /// Unlinks `z` from the tree and restores the colour invariants.
    ///
    /// When `z` has two children, its in-order successor is relinked into
    /// the position of `z` and takes over its colour, so that no value is
    /// moved between slots. The slot of `z` is left detached.
    pub fn unlink(&mut self, z: NodeIdx) {
        debug_assert_ne!(z, HEADER);
        // `x` takes the structural place of the node physically removed
        // and lacks one black unit if that node was black.
        let (x, x_parent, removed) = match (self.left(z), self.right(z)) {
            (Some(zl), Some(zr)) => {
                let y = self.minimum(zr);
                let x = self.right(y);
                self.set_child(y, Side::Left, Some(zl));
                self.set_parent(zl, y);
                let x_parent = if y != zr {
                    let yp = self.parent(y);
                    if let Some(x) = x {
                        self.set_parent(x, yp);
                    }
                    self.set_child(yp, Side::Left, x);
                    self.set_child(y, Side::Right, Some(zr));
                    self.set_parent(zr, y);
                    yp
                } else {
                    y
                };
                let zp = self.parent(z);
                self.replace_child(zp, z, Some(y));
                self.set_parent(y, zp);
                let (zc, yc) = (self.color(z), self.color(y));
                self.set_color(y, zc);
                self.set_color(z, yc);
                // `z` has both children, so it is neither extreme.
                (x, x_parent, yc)
            }
            (zl, zr) => {
                let x = zl.or(zr);
                let x_parent = self.parent(z);
                if let Some(x) = x {
                    self.set_parent(x, x_parent);
                }
                self.replace_child(x_parent, z, x);
                if self.leftmost() == z {
                    let min = zr.map_or(x_parent, |r| self.minimum(r));
                    self.set_leftmost(min);
                }
                if self.rightmost() == z {
                    let max = zl.map_or(x_parent, |l| self.maximum(l));
                    self.set_rightmost(max);
                }
                (x, x_parent, self.color(z))
            }
        };
        if removed == Color::Black {
            self.rebalance_after_erase(x, x_parent);
        }
    }

    fn rebalance_after_erase(
        &mut self,
        mut x: Option<NodeIdx>,
        mut x_parent: NodeIdx,
    ) {
        while x != self.root() && self.color_of(x) == Color::Black {
            let side = if self.left(x_parent) == x {
                Side::Left
            } else {
                Side::Right
            };
            let far = side.flip();
            let mut w = self.sibling(x_parent, far);
            if self.color(w) == Color::Red {
                self.set_color(w, Color::Black);
                self.set_color(x_parent, Color::Red);
                self.rotate(x_parent, side);
                w = self.sibling(x_parent, far);
            }
            let near_child = self.child(w, side);
            let far_child = self.child(w, far);
            if self.color_of(near_child) == Color::Black
                && self.color_of(far_child) == Color::Black
            {
                self.set_color(w, Color::Red);
                x = Some(x_parent);
                x_parent = self.parent(x_parent);
            } else {
                if self.color_of(far_child) == Color::Black {
                    if let Some(near_child) = near_child {
                        self.set_color(near_child, Color::Black);
                    }
                    self.set_color(w, Color::Red);
                    self.rotate(w, far);
                    w = self.sibling(x_parent, far);
                }
                self.set_color(w, self.color(x_parent));
                self.set_color(x_parent, Color::Black);
                if let Some(far_child) = self.child(w, far) {
                    self.set_color(far_child, Color::Black);
                }
                self.rotate(x_parent, side);
                break;
            }
        }
        if let Some(x) = x {
            self.set_color(x, Color::Black);
        }
    }

    // A black-deficient position always has a sibling subtree of black
    // height at least one.
    fn sibling(&self, parent: NodeIdx, side: Side) -> NodeIdx {
        match self.child(parent, side) {
            Some(w) => w,
            None => unreachable!("deficient node {parent} has no sibling"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{debug::assert_arena, node::HEADER, RbTree};

    fn permutations(n: i32) -> Vec<Vec<i32>> {
        if n == 0 {
            return vec![vec![]];
        }
        let mut res = vec![];
        for p in permutations(n - 1) {
            for i in 0..=p.len() {
                let mut q = p.clone();
                q.insert(i, n);
                res.push(q);
            }
        }
        res
    }

    #[test]
    fn every_order() {
        // Inserting and erasing 1..=6 in every order reaches every fixup
        // case on both sides.
        let orders = permutations(6);
        for ins in orders.iter().step_by(7) {
            for del in &orders {
                let mut tree = RbTree::<i32>::new();
                for &k in ins {
                    tree.insert_unique(k);
                }
                let mut left = 6;
                for &k in del {
                    assert_eq!(tree.erase_unique(&k), 1);
                    left -= 1;
                    tree.assert_invariants();
                    assert_eq!(tree.len(), left);
                }
                assert_eq!(tree.begin(), tree.end());
            }
        }
    }

    #[test]
    fn two_children_keeps_slots() {
        let mut tree = RbTree::<i32>::new();
        let handles: Vec<_> =
            (0..15).map(|k| tree.insert_unique(k).0).collect();
        let root = tree.arena.root().unwrap();
        let root_val = *tree.arena.val(root).unwrap();
        let succ = handles[root_val as usize + 1];

        tree.erase(handles[root_val as usize]);
        tree.assert_invariants();
        // the successor node itself moved up; its handle still works
        assert_eq!(tree.arena.root(), Some(succ.node));
        assert_eq!(tree.get(succ), Some(&(root_val + 1)));
        for (k, &h) in handles.iter().enumerate() {
            if k as i32 != root_val {
                assert_eq!(tree.get(h), Some(&(k as i32)));
            }
        }
    }

    #[test]
    fn last_node() {
        let mut tree = RbTree::<i32>::new();
        let (h, _) = tree.insert_unique(1);
        tree.erase(h);
        assert_eq!(tree.arena.root(), None);
        assert_eq!(tree.arena.leftmost(), HEADER);
        assert_eq!(tree.arena.rightmost(), HEADER);
        assert_arena(&tree.arena, 0);
    }
}
