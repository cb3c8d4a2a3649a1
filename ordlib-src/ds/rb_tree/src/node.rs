use std::collections::TryReserveError;

pub(crate) type NodeIdx = usize;

/// Slot of the header. The header is never a data node: its parent link
/// is the root (or itself when the tree is empty) and its children cache
/// the leftmost and rightmost data nodes.
pub(crate) const HEADER: NodeIdx = 0;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Color {
    Red,
    Black,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub fn flip(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

pub(crate) struct Node<T> {
    color: Color,
    // For a vacant slot, the next vacant slot (`HEADER` terminates).
    parent: NodeIdx,
    children: [Option<NodeIdx>; 2],
    val: Option<T>,
}

impl<T> Node<T> {
    fn header() -> Self {
        Self {
            color: Color::Red,
            parent: HEADER,
            children: [Some(HEADER); 2],
            val: None,
        }
    }
    pub fn new(val: T, color: Color, parent: NodeIdx) -> Self {
        Self { color, parent, children: [None; 2], val: Some(val) }
    }
}

pub(crate) struct Arena<T> {
    nodes: Vec<Node<T>>,
    free: Option<NodeIdx>,
}

impl<T> Arena<T> {
    pub fn new() -> Self { Self::with_capacity(0) }
    pub fn with_capacity(cap: usize) -> Self {
        let mut nodes = Vec::with_capacity(cap.saturating_add(1));
        nodes.push(Node::header());
        Self { nodes, free: None }
    }

    /// Drops every stored value exactly once and forgets all slots but the
    /// header.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[HEADER] = Node::header();
        self.free = None;
    }

    /// Stores `val` in a detached red node. Nothing is modified on failure.
    pub fn alloc(&mut self, val: T) -> Result<NodeIdx, TryReserveError> {
        let node = Node::new(val, Color::Red, HEADER);
        if let Some(x) = self.free {
            let next = self.nodes[x].parent;
            self.free = (next != HEADER).then_some(next);
            self.nodes[x] = node;
            return Ok(x);
        }
        reserve_slot(&mut self.nodes)?;
        Ok(self.push(node))
    }
    pub fn push(&mut self, node: Node<T>) -> NodeIdx {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Moves the value out of a node that has already been unlinked and
    /// puts its slot on the free list.
    pub fn dealloc(&mut self, x: NodeIdx) -> Option<T> {
        debug_assert_ne!(x, HEADER);
        let node = &mut self.nodes[x];
        let val = node.val.take();
        node.color = Color::Black;
        node.children = [None; 2];
        node.parent = self.free.unwrap_or(HEADER);
        self.free = Some(x);
        val
    }

    pub fn is_live(&self, x: NodeIdx) -> bool {
        x != HEADER && self.nodes.get(x).map_or(false, |n| n.val.is_some())
    }
    pub fn slots(&self) -> usize { self.nodes.len() }
    pub fn free_len(&self) -> usize {
        std::iter::successors(self.free, |&x| {
            let next = self.nodes[x].parent;
            (next != HEADER).then_some(next)
        })
        .count()
    }

    pub fn val(&self, x: NodeIdx) -> Option<&T> {
        self.nodes.get(x)?.val.as_ref()
    }
    pub fn val_mut(&mut self, x: NodeIdx) -> Option<&mut T> {
        self.nodes.get_mut(x)?.val.as_mut()
    }
    pub fn take_val(&mut self, x: NodeIdx) -> Option<T> {
        self.nodes.get_mut(x)?.val.take()
    }

    pub fn parent(&self, x: NodeIdx) -> NodeIdx { self.nodes[x].parent }
    pub fn set_parent(&mut self, x: NodeIdx, p: NodeIdx) {
        self.nodes[x].parent = p;
    }
    pub fn child(&self, x: NodeIdx, side: Side) -> Option<NodeIdx> {
        self.nodes[x].children[side as usize]
    }
    pub fn set_child(&mut self, x: NodeIdx, side: Side, c: Option<NodeIdx>) {
        self.nodes[x].children[side as usize] = c;
    }
    pub fn left(&self, x: NodeIdx) -> Option<NodeIdx> {
        self.child(x, Side::Left)
    }
    pub fn right(&self, x: NodeIdx) -> Option<NodeIdx> {
        self.child(x, Side::Right)
    }

    pub fn color(&self, x: NodeIdx) -> Color { self.nodes[x].color }
    /// Null children count as black.
    pub fn color_of(&self, x: Option<NodeIdx>) -> Color {
        x.map_or(Color::Black, |x| self.color(x))
    }
    pub fn set_color(&mut self, x: NodeIdx, color: Color) {
        debug_assert_ne!(x, HEADER);
        self.nodes[x].color = color;
    }

    /// Which child of its parent `x` is. `x` must not be the root.
    pub fn side_of(&self, x: NodeIdx) -> Side {
        if self.left(self.parent(x)) == Some(x) {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub fn root(&self) -> Option<NodeIdx> {
        let root = self.nodes[HEADER].parent;
        (root != HEADER).then_some(root)
    }
    pub fn set_root(&mut self, root: Option<NodeIdx>) {
        self.nodes[HEADER].parent = root.unwrap_or(HEADER);
    }
    pub fn leftmost(&self) -> NodeIdx { self.left(HEADER).unwrap_or(HEADER) }
    pub fn rightmost(&self) -> NodeIdx {
        self.right(HEADER).unwrap_or(HEADER)
    }
    pub fn set_leftmost(&mut self, x: NodeIdx) {
        self.nodes[HEADER].children[0] = Some(x);
    }
    pub fn set_rightmost(&mut self, x: NodeIdx) {
        self.nodes[HEADER].children[1] = Some(x);
    }

    /// Points the link from `parent` that used to reach `old` at `new`
    /// instead. The header stands for the root link.
    pub fn replace_child(
        &mut self,
        parent: NodeIdx,
        old: NodeIdx,
        new: Option<NodeIdx>,
    ) {
        if parent == HEADER {
            self.set_root(new);
        } else if self.left(parent) == Some(old) {
            self.set_child(parent, Side::Left, new);
        } else {
            debug_assert_eq!(self.right(parent), Some(old));
            self.set_child(parent, Side::Right, new);
        }
    }
}

#[cfg(not(test))]
fn reserve_slot<T>(nodes: &mut Vec<Node<T>>) -> Result<(), TryReserveError> {
    nodes.try_reserve(1)
}

#[cfg(test)]
thread_local! {
    pub(crate) static FAIL_RESERVE: std::cell::Cell<bool> =
        std::cell::Cell::new(false);
}

// Fails on demand with the same error an oversized request yields.
#[cfg(test)]
fn reserve_slot<T>(nodes: &mut Vec<Node<T>>) -> Result<(), TryReserveError> {
    if FAIL_RESERVE.with(|f| f.get()) {
        return Vec::<u8>::new().try_reserve(usize::MAX);
    }
    nodes.try_reserve(1)
}

#[cfg(test)]
impl<T> Arena<T> {
    /// Links `x` below `parent` without any rebalancing or cache updates.
    pub fn attach(&mut self, parent: NodeIdx, side: Side, x: NodeIdx) {
        self.set_parent(x, parent);
        if parent == HEADER {
            self.set_root(Some(x));
        } else {
            self.set_child(parent, side, Some(x));
        }
    }
}

#[test]
fn slot_reuse() {
    let mut arena = Arena::new();
    let a = arena.alloc("a").unwrap();
    let b = arena.alloc("b").unwrap();
    assert_eq!((a, b), (1, 2));

    assert_eq!(arena.dealloc(a), Some("a"));
    assert_eq!(arena.dealloc(b), Some("b"));
    assert_eq!(arena.free_len(), 2);
    assert!(!arena.is_live(a));

    // LIFO reuse, no growth
    assert_eq!(arena.alloc("c").unwrap(), b);
    assert_eq!(arena.alloc("d").unwrap(), a);
    assert_eq!(arena.slots(), 3);
    assert_eq!(arena.free_len(), 0);
    assert_eq!(arena.val(a), Some(&"d"));
    assert_eq!(arena.color(a), Color::Red);
}

#[test]
fn empty_header() {
    let mut arena = Arena::<i32>::new();
    assert_eq!(arena.root(), None);
    assert_eq!(arena.leftmost(), HEADER);
    assert_eq!(arena.rightmost(), HEADER);
    assert_eq!(arena.color(HEADER), Color::Red);
    assert!(!arena.is_live(HEADER));

    let x = arena.alloc(1).unwrap();
    arena.clear();
    assert_eq!(arena.slots(), 1);
    assert!(!arena.is_live(x));
    assert_eq!(arena.val(x), None);
}

#[test]
fn failed_reserve() {
    let mut arena = Arena::new();
    let a = arena.alloc(1).unwrap();
    arena.dealloc(a);

    FAIL_RESERVE.with(|f| f.set(true));
    assert_eq!(arena.alloc(2).unwrap(), a);
    assert!(arena.alloc(3).is_err());
    FAIL_RESERVE.with(|f| f.set(false));

    assert_eq!(arena.slots(), 2);
    assert_eq!(arena.free_len(), 0);
    assert_eq!(arena.val(a), Some(&2));
    assert_eq!(arena.alloc(4).unwrap(), 2);
}
