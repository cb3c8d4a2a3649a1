use crate::node::{Arena, Color, NodeIdx, HEADER};

impl<T> Arena<T> {
    pub fn minimum(&self, mut x: NodeIdx) -> NodeIdx {
        while let Some(left) = self.left(x) {
            x = left;
        }
        x
    }
    pub fn maximum(&self, mut x: NodeIdx) -> NodeIdx {
        while let Some(right) = self.right(x) {
            x = right;
        }
        x
    }

    fn is_header(&self, x: NodeIdx) -> bool {
        debug_assert!(x != HEADER || self.color(x) == Color::Red);
        x == HEADER
    }

    /// In-order successor. The successor of the maximum is the header, and
    /// the header is its own successor.
    pub fn successor(&self, mut x: NodeIdx) -> NodeIdx {
        if self.is_header(x) {
            return HEADER;
        }
        if let Some(right) = self.right(x) {
            return self.minimum(right);
        }
        loop {
            let p = self.parent(x);
            if p == HEADER || self.left(p) == Some(x) {
                return p;
            }
            x = p;
        }
    }

    /// In-order predecessor. The predecessor of the header is the maximum,
    /// and the predecessor of the minimum is the header.
    pub fn predecessor(&self, mut x: NodeIdx) -> NodeIdx {
        if self.is_header(x) {
            return self.rightmost();
        }
        if let Some(left) = self.left(x) {
            return self.maximum(left);
        }
        loop {
            let p = self.parent(x);
            if p == HEADER || self.right(p) == Some(x) {
                return p;
            }
            x = p;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::node::{Arena, NodeIdx, Side, HEADER};

    //       4
    //     /   \
    //    2     6
    //   / \     \
    //  1   3     7
    fn sample() -> (Arena<i32>, Vec<NodeIdx>) {
        let mut arena = Arena::new();
        let ids: Vec<_> = (0..=7).map(|v| arena.alloc(v).unwrap()).collect();
        arena.attach(HEADER, Side::Left, ids[4]);
        arena.attach(ids[4], Side::Left, ids[2]);
        arena.attach(ids[4], Side::Right, ids[6]);
        arena.attach(ids[2], Side::Left, ids[1]);
        arena.attach(ids[2], Side::Right, ids[3]);
        arena.attach(ids[6], Side::Right, ids[7]);
        arena.set_leftmost(ids[1]);
        arena.set_rightmost(ids[7]);
        (arena, ids)
    }

    #[test]
    fn forward_and_backward() {
        let (arena, ids) = sample();
        let val = |x| *arena.val(x).unwrap();

        let forward: Vec<_> = std::iter::successors(Some(arena.leftmost()), |&x| {
            Some(arena.successor(x)).filter(|&x| x != HEADER)
        })
        .map(val)
        .collect();
        assert_eq!(forward, [1, 2, 3, 4, 6, 7]);

        let backward: Vec<_> = std::iter::successors(
            Some(arena.predecessor(HEADER)),
            |&x| Some(arena.predecessor(x)).filter(|&x| x != HEADER),
        )
        .map(val)
        .collect();
        assert_eq!(backward, [7, 6, 4, 3, 2, 1]);

        assert_eq!(arena.minimum(ids[6]), ids[6]);
        assert_eq!(arena.maximum(ids[2]), ids[3]);
    }

    #[test]
    fn ends() {
        let (arena, ids) = sample();
        assert_eq!(arena.successor(ids[7]), HEADER);
        assert_eq!(arena.successor(HEADER), HEADER);
        assert_eq!(arena.predecessor(ids[1]), HEADER);
        assert_eq!(arena.predecessor(HEADER), ids[7]);

        let empty = Arena::<i32>::new();
        assert_eq!(empty.successor(HEADER), HEADER);
        assert_eq!(empty.predecessor(HEADER), HEADER);
    }
}
