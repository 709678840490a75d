use crate::treap::tree::{BinaryTree, Pool};
use std::vec::Vec;

// In-order traversal state. `stack` holds the ancestors whose right subtrees have not been
// visited yet and `current` is the node yielded next.
#[derive(Clone, Debug)]
struct Cursor {
    stack: Vec<usize>,
    current: Option<usize>,
}

impl Cursor {
    fn new<E>(pool: &Pool<E>, root: Option<usize>) -> Self {
        let mut cursor = Cursor {
            stack: Vec::new(),
            current: None,
        };
        cursor.seek_leftmost(pool, root);
        cursor
    }

    fn seek_leftmost<E>(&mut self, pool: &Pool<E>, mut curr: Option<usize>) {
        while let Some(index) = curr {
            self.stack.push(index);
            curr = pool[index].left;
        }
        self.current = self.stack.pop();
    }

    fn advance<E>(&mut self, pool: &Pool<E>) -> Option<usize> {
        let index = self.current?;
        self.seek_leftmost(pool, pool[index].right);
        Some(index)
    }
}

/// An iterator over the entries of a `BinaryTree<E>` in key order.
///
/// The iterator borrows the tree, so the tree cannot be mutated while it is being traversed.
pub struct Iter<'a, E: 'a> {
    pool: &'a Pool<E>,
    cursor: Cursor,
}

impl<'a, E: 'a> Iter<'a, E> {
    pub(crate) fn new(pool: &'a Pool<E>, root: Option<usize>) -> Self {
        Iter {
            pool,
            cursor: Cursor::new(pool, root),
        }
    }

    /// Returns `true` if the iterator has not yielded every entry yet.
    pub fn has_next(&self) -> bool {
        self.cursor.current.is_some()
    }
}

impl<'a, E: 'a> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        let pool = self.pool;
        self.cursor.advance(pool).map(|index| &pool[index].entry)
    }
}

impl<'a, E: 'a> Clone for Iter<'a, E> {
    fn clone(&self) -> Self {
        Iter {
            pool: self.pool,
            cursor: self.cursor.clone(),
        }
    }
}

/// An owning iterator over the entries of a `BinaryTree<E>` in key order.
///
/// The iterator keeps its own handle on the node pool, so it keeps yielding the snapshot it was
/// created from even if other versions of the tree are mutated afterwards.
pub struct IntoIter<E> {
    tree: BinaryTree<E>,
    cursor: Cursor,
}

impl<E> IntoIter<E> {
    pub(crate) fn new(tree: BinaryTree<E>) -> Self {
        let cursor = Cursor::new(tree.pool(), tree.root());
        IntoIter { tree, cursor }
    }

    /// Returns `true` if the iterator has not yielded every entry yet.
    pub fn has_next(&self) -> bool {
        self.cursor.current.is_some()
    }
}

impl<E: Clone> Iterator for IntoIter<E> {
    type Item = E;

    fn next(&mut self) -> Option<Self::Item> {
        let pool = self.tree.pool();
        self.cursor
            .advance(pool)
            .map(|index| pool[index].entry.clone())
    }
}
