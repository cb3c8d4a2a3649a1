use crate::node::{Arena, Color, NodeIdx, Side, HEADER};

impl<T> Arena<T> {
    /// Links the detached node `x` as the `side` child of `parent`, or as
    /// the root when `parent` is the header, then rebalances.
    pub fn link(&mut self, parent: NodeIdx, side: Side, x: NodeIdx) {
        self.set_parent(x, parent);
        if parent == HEADER {
            debug_assert!(self.root().is_none());
            self.set_root(Some(x));
            self.set_leftmost(x);
            self.set_rightmost(x);
        } else {
            debug_assert!(self.child(parent, side).is_none());
            self.set_child(parent, side, Some(x));
            match side {
                Side::Left if parent == self.leftmost() => self.set_leftmost(x),
                Side::Right if parent == self.rightmost() => {
                    self.set_rightmost(x)
                }
                _ => {}
            }
        }
        self.rebalance_after_insert(x);
    }

    fn rebalance_after_insert(&mut self, mut x: NodeIdx) {
        self.set_color(x, Color::Red);
        // The header is red, so the root check has to come first.
        while Some(x) != self.root() && self.color(self.parent(x)) == Color::Red
        {
            let p = self.parent(x);
            let g = self.parent(p);
            let side = self.side_of(p);
            let uncle = self.child(g, side.flip());
            if let Some(uncle) =
                uncle.filter(|&u| self.color(u) == Color::Red)
            {
                self.set_color(p, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(g, Color::Red);
                x = g;
            } else {
                if self.side_of(x) != side {
                    // inner grandchild; make it an outer one
                    x = p;
                    self.rotate(x, side);
                }
                let p = self.parent(x);
                let g = self.parent(p);
                self.set_color(p, Color::Black);
                self.set_color(g, Color::Red);
                self.rotate(g, side.flip());
            }
        }
        if let Some(root) = self.root() {
            self.set_color(root, Color::Black);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::node::{Arena, Color, NodeIdx, Side, HEADER};

    // Plain descent with no comparator abstraction; enough to drive `link`.
    fn insert(arena: &mut Arena<i32>, v: i32) -> NodeIdx {
        let (mut parent, mut side) = (HEADER, Side::Left);
        let mut cur = arena.root();
        while let Some(x) = cur {
            parent = x;
            side = if v < *arena.val(x).unwrap() {
                Side::Left
            } else {
                Side::Right
            };
            cur = arena.child(x, side);
        }
        let x = arena.alloc(v).unwrap();
        arena.link(parent, side, x);
        x
    }

    fn shape(arena: &Arena<i32>, x: Option<NodeIdx>) -> String {
        match x {
            None => ".".to_owned(),
            Some(x) => {
                let c = match arena.color(x) {
                    Color::Red => 'r',
                    Color::Black => 'b',
                };
                let v = arena.val(x).unwrap();
                let l = shape(arena, arena.left(x));
                let r = shape(arena, arena.right(x));
                format!("({l} {v}{c} {r})")
            }
        }
    }

    fn build(keys: &[i32]) -> Arena<i32> {
        let mut arena = Arena::new();
        for &k in keys {
            insert(&mut arena, k);
        }
        arena
    }

    #[test]
    fn first_node() {
        let mut arena = Arena::new();
        let x = insert(&mut arena, 1);
        assert_eq!(arena.root(), Some(x));
        assert_eq!(arena.color(x), Color::Black);
        assert_eq!((arena.leftmost(), arena.rightmost()), (x, x));
        assert_eq!(arena.parent(x), HEADER);
    }

    #[test]
    fn outer_grandchild() {
        // single rotation at the grandparent
        let arena = build(&[1, 2, 3]);
        assert_eq!(shape(&arena, arena.root()), "((. 1r .) 2b (. 3r .))");
        let arena = build(&[3, 2, 1]);
        assert_eq!(shape(&arena, arena.root()), "((. 1r .) 2b (. 3r .))");
    }

    #[test]
    fn inner_grandchild() {
        // rotation at the parent, then at the grandparent
        let arena = build(&[3, 1, 2]);
        assert_eq!(shape(&arena, arena.root()), "((. 1r .) 2b (. 3r .))");
        let arena = build(&[1, 3, 2]);
        assert_eq!(shape(&arena, arena.root()), "((. 1r .) 2b (. 3r .))");
    }

    #[test]
    fn red_uncle() {
        // recolouring only; the root absorbs the red
        let arena = build(&[2, 1, 3, 4]);
        assert_eq!(
            shape(&arena, arena.root()),
            "((. 1b .) 2b (. 3b (. 4r .)))"
        );
    }

    #[test]
    fn cached_extremes() {
        let arena = build(&[5, 3, 8, 1, 9, 4]);
        assert_eq!(arena.val(arena.leftmost()), Some(&1));
        assert_eq!(arena.val(arena.rightmost()), Some(&9));
    }
}
