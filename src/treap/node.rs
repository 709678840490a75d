/// A struct representing an internal node of a treap. Children are indices into the node pool of
/// the owning tree.
#[derive(Clone, Debug)]
pub struct Node<E> {
    pub entry: E,
    pub priority: u32,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

impl<E> Node<E> {
    pub fn new(entry: E, priority: u32) -> Self {
        Node {
            entry,
            priority,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}
