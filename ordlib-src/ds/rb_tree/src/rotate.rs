use crate::node::{Arena, NodeIdx, Side};

impl<T> Arena<T> {
    /// Moves `x` down to the `dir` side of its child on the other side,
    /// which takes the place of `x`.
    ///
    /// ```text
    ///       p                         p
    ///      / \                       / \
    ///     x   d   rotate(x, Left)   y   d
    ///    / \      ==============>  / \
    ///   a   y                     x   c
    ///      / \                   / \
    ///     b   c                 a   b
    /// ```
    ///
    /// `rotate(x, Right)` is the mirror image.
    pub fn rotate(&mut self, x: NodeIdx, dir: Side) {
        let Some(y) = self.child(x, dir.flip()) else {
            panic!("rotating {x} to the {dir:?} without a {:?} child", dir.flip());
        };
        let inner = self.child(y, dir);
        self.set_child(x, dir.flip(), inner);
        if let Some(inner) = inner {
            self.set_parent(inner, x);
        }
        let p = self.parent(x);
        self.set_parent(y, p);
        self.replace_child(p, x, Some(y));
        self.set_child(y, dir, Some(x));
        self.set_parent(x, y);
    }
}
