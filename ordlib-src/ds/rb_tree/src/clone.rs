use crate::{
    node::{Arena, Node, Side, HEADER},
    RbTree,
};

impl<T: Clone> Arena<T> {
    /// Copies the linked nodes in pre-order with an explicit stack. The
    /// copy has the same shape and colours, and no vacant slots.
    fn clone_tree(&self, len: usize) -> Self {
        let mut other = Arena::with_capacity(len);
        let Some(root) = self.root() else {
            return other;
        };
        let mut stack = vec![(root, HEADER, Side::Left)];
        while let Some((src, parent, side)) = stack.pop() {
            let val = match self.val(src) {
                Some(val) => val.clone(),
                None => unreachable!("slot {src} is linked but vacant"),
            };
            let x = other.push(Node::new(val, self.color(src), parent));
            if parent == HEADER {
                other.set_root(Some(x));
            } else {
                other.set_child(parent, side, Some(x));
            }
            for side in [Side::Right, Side::Left] {
                if let Some(child) = self.child(src, side) {
                    stack.push((child, x, side));
                }
            }
        }
        if let Some(root) = other.root() {
            other.set_leftmost(other.minimum(root));
            other.set_rightmost(other.maximum(root));
        }
        other
    }
}

impl<T: Clone, KoV: Clone, C: Clone> Clone for RbTree<T, KoV, C> {
    fn clone(&self) -> Self {
        log::trace!("cloning a tree of {} elements", self.len);
        Self {
            arena: self.arena.clone_tree(self.len),
            len: self.len,
            max_len: self.max_len,
            key_of: self.key_of.clone(),
            comp: self.comp.clone(),
        }
    }
}
