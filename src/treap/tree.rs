use crate::config::Config;
use crate::pool::NodePool;
use crate::treap::entry::Entry;
use crate::treap::iter::{IntoIter, Iter};
use crate::treap::node::Node;
use log::debug;
use rand::{Rng, XorShiftRng};
use std::cmp::Ordering;
use std::mem;
use std::rc::Rc;

pub type Pool<E> = NodePool<Node<E>>;

/// A treap whose nodes live in a reference counted node pool.
///
/// Every node satisfies the binary search tree property on the keys of its entries and the
/// max-heap property on its randomly generated priority. Cloning a tree only bumps the reference
/// count of its pool; the first mutation of a tree whose pool is shared copies the whole pool,
/// so two versions of a tree never observe each other's writes.
///
/// Priorities are drawn from an explicit `XorShiftRng` configured through `Config`. The shape of
/// the tree, and therefore the running time of its operations, is probabilistic: the expected
/// height is logarithmic in the number of nodes, but no bound holds against adversarial input.
pub struct BinaryTree<E> {
    root: Option<usize>,
    pool: Rc<Pool<E>>,
    rng: XorShiftRng,
}

fn make_unique<E: Clone>(pool: &mut Rc<Pool<E>>) -> &mut Pool<E> {
    if Rc::strong_count(pool) > 1 {
        debug!("copying shared node pool of {} nodes before mutation", pool.len());
    }
    Rc::make_mut(pool)
}

fn find<E: Entry>(
    pool: &Pool<E>,
    root: Option<usize>,
    key: &E::Key,
) -> (Option<usize>, Option<usize>) {
    let mut parent = None;
    let mut curr = root;
    while let Some(index) = curr {
        let node = &pool[index];
        match key.cmp(node.entry.get_key()) {
            Ordering::Less => {
                parent = curr;
                curr = node.left;
            },
            Ordering::Greater => {
                parent = curr;
                curr = node.right;
            },
            Ordering::Equal => return (parent, curr),
        }
    }
    (parent, None)
}

// Points whichever link referenced `old_child` (a child slot of `parent`, or the root) at
// `new_child`.
fn replace_child<E>(
    pool: &mut Pool<E>,
    root: &mut Option<usize>,
    parent: Option<usize>,
    old_child: usize,
    new_child: Option<usize>,
) {
    match parent {
        None => *root = new_child,
        Some(parent) => {
            let node = &mut pool[parent];
            if node.left == Some(old_child) {
                node.left = new_child;
            } else {
                node.right = new_child;
            }
        },
    }
}

// precondition: `b` is the right child of `a`
fn rotate_left<E>(
    pool: &mut Pool<E>,
    root: &mut Option<usize>,
    a: usize,
    b: usize,
    a_parent: Option<usize>,
) {
    debug_assert_eq!(pool[a].right, Some(b));
    pool[a].right = pool[b].left;
    pool[b].left = Some(a);
    replace_child(pool, root, a_parent, a, Some(b));
}

// precondition: `a` is the left child of `b`
fn rotate_right<E>(
    pool: &mut Pool<E>,
    root: &mut Option<usize>,
    b: usize,
    a: usize,
    b_parent: Option<usize>,
) {
    debug_assert_eq!(pool[b].left, Some(a));
    pool[b].left = pool[a].right;
    pool[a].right = Some(b);
    replace_child(pool, root, b_parent, b, Some(a));
}

// Frees the slot of an unlinked node. The last slot of the pool is moved into the freed slot so
// the pool stays dense.
fn release<E: Entry>(pool: &mut Pool<E>, root: &mut Option<usize>, index: usize) -> E {
    let last = pool.len() - 1;
    if index != last {
        let (parent, target) = find(pool, *root, pool[last].entry.get_key());
        debug_assert_eq!(target, Some(last));
        replace_child(pool, root, parent, last, Some(index));
        pool.swap(index, last);
    }
    pool.pop().entry
}

impl<E> BinaryTree<E> {
    /// Constructs a new, empty tree with the default `Config`.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Constructs a new, empty tree with a pre-sized pool and the priority generator described by
    /// `config`.
    pub fn with_config(config: &Config) -> Self {
        BinaryTree {
            root: None,
            pool: Rc::new(NodePool::with_capacity(config.capacity)),
            rng: config.rng(),
        }
    }

    /// Returns the index of the root node, or `None` if the tree is empty.
    pub fn root(&self) -> Option<usize> {
        self.root
    }

    /// Returns the node pool of the tree.
    pub fn pool(&self) -> &Pool<E> {
        &self.pool
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns `true` if both trees currently read from the same node pool.
    pub fn shares_pool_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.pool, &other.pool)
    }

    /// Removes every node. Other versions sharing the pool are unaffected.
    pub fn clear(&mut self) {
        self.root = None;
        self.pool = Rc::new(NodePool::new());
    }

    /// Returns an iterator over the entries of the tree in key order.
    pub fn iter(&self) -> Iter<'_, E> {
        Iter::new(&self.pool, self.root)
    }
}

impl<E: Entry> BinaryTree<E> {
    /// Returns the index of the parent of the node holding `key` and the index of the node
    /// itself. If the key is absent, the second index is `None` and the first is the node the key
    /// would be attached to.
    pub fn find(&self, key: &E::Key) -> (Option<usize>, Option<usize>) {
        find(&self.pool, self.root, key)
    }

    pub fn get(&self, key: &E::Key) -> Option<&E> {
        self.find(key).1.map(|index| &self.pool[index].entry)
    }

    pub fn contains(&self, key: &E::Key) -> bool {
        self.find(key).1.is_some()
    }

    pub fn min(&self) -> Option<&E> {
        let mut curr = self.root?;
        while let Some(left) = self.pool[curr].left {
            curr = left;
        }
        Some(&self.pool[curr].entry)
    }

    pub fn max(&self) -> Option<&E> {
        let mut curr = self.root?;
        while let Some(right) = self.pool[curr].right {
            curr = right;
        }
        Some(&self.pool[curr].entry)
    }

    /// Returns the entry with the least key greater than or equal to `key`.
    pub fn ceil(&self, key: &E::Key) -> Option<&E> {
        let mut ret = None;
        let mut curr = self.root;
        while let Some(index) = curr {
            let node = &self.pool[index];
            match key.cmp(node.entry.get_key()) {
                Ordering::Less => {
                    ret = Some(&node.entry);
                    curr = node.left;
                },
                Ordering::Greater => curr = node.right,
                Ordering::Equal => return Some(&node.entry),
            }
        }
        ret
    }

    /// Returns the entry with the greatest key less than or equal to `key`.
    pub fn floor(&self, key: &E::Key) -> Option<&E> {
        let mut ret = None;
        let mut curr = self.root;
        while let Some(index) = curr {
            let node = &self.pool[index];
            match key.cmp(node.entry.get_key()) {
                Ordering::Less => curr = node.left,
                Ordering::Greater => {
                    ret = Some(&node.entry);
                    curr = node.right;
                },
                Ordering::Equal => return Some(&node.entry),
            }
        }
        ret
    }
}

impl<E: Entry + Clone> BinaryTree<E> {
    /// Inserts an entry. Returns `false` and leaves the tree untouched if an entry with the same
    /// key already exists.
    ///
    /// The new leaf is rotated up while its priority exceeds the priority of its parent.
    pub fn insert(&mut self, entry: E) -> bool {
        let mut path = Vec::new();
        let mut is_left = false;
        let mut curr = self.root;
        while let Some(index) = curr {
            let node = &self.pool[index];
            match entry.get_key().cmp(node.entry.get_key()) {
                Ordering::Less => {
                    is_left = true;
                    curr = node.left;
                },
                Ordering::Greater => {
                    is_left = false;
                    curr = node.right;
                },
                Ordering::Equal => return false,
            }
            path.push(index);
        }

        let priority = self.rng.next_u32();
        let BinaryTree {
            ref mut root,
            ref mut pool,
            ..
        } = *self;
        let pool = make_unique(pool);
        let index = pool.push(Node::new(entry, priority));
        match path.last() {
            Some(&parent) if is_left => pool[parent].left = Some(index),
            Some(&parent) => pool[parent].right = Some(index),
            None => *root = Some(index),
        }

        while let Some(parent) = path.pop() {
            if pool[index].priority <= pool[parent].priority {
                break;
            }
            let grandparent = path.last().cloned();
            if pool[parent].right == Some(index) {
                rotate_left(pool, root, parent, index, grandparent);
            } else {
                rotate_right(pool, root, parent, index, grandparent);
            }
        }
        true
    }

    /// Inserts an entry, replacing and returning the entry with the same key if one exists.
    pub fn replace(&mut self, entry: E) -> Option<E> {
        match self.find(entry.get_key()).1 {
            Some(index) => {
                let pool = make_unique(&mut self.pool);
                Some(mem::replace(&mut pool[index].entry, entry))
            },
            None => {
                self.insert(entry);
                None
            },
        }
    }

    /// Removes and returns the entry with a particular key. Returns `None` and leaves the tree
    /// untouched if the key is absent.
    ///
    /// A node with two children is rotated down towards its child of higher priority until it
    /// has at most one child, at which point it is spliced out.
    pub fn remove(&mut self, key: &E::Key) -> Option<E> {
        let (mut parent, target) = self.find(key);
        let target = target?;

        let BinaryTree {
            ref mut root,
            ref mut pool,
            ..
        } = *self;
        let pool = make_unique(pool);
        loop {
            match (pool[target].left, pool[target].right) {
                (Some(left), Some(right)) => {
                    if pool[left].priority > pool[right].priority {
                        rotate_right(pool, root, target, left, parent);
                        parent = Some(left);
                    } else {
                        rotate_left(pool, root, target, right, parent);
                        parent = Some(right);
                    }
                },
                (child, None) | (None, child) => {
                    replace_child(pool, root, parent, target, child);
                    break;
                },
            }
        }
        Some(release(pool, root, target))
    }

    /// Returns a mutable reference to the entry with a particular key.
    ///
    /// Callers must not change the key of the entry.
    pub fn get_mut(&mut self, key: &E::Key) -> Option<&mut E> {
        let index = self.find(key).1?;
        Some(&mut make_unique(&mut self.pool)[index].entry)
    }
}

impl<E> Clone for BinaryTree<E> {
    fn clone(&self) -> Self {
        BinaryTree {
            root: self.root,
            pool: Rc::clone(&self.pool),
            rng: self.rng.clone(),
        }
    }
}

impl<E> Default for BinaryTree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> IntoIterator for BinaryTree<E> {
    type Item = E;
    type IntoIter = IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, E: 'a> IntoIterator for &'a BinaryTree<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{rotate_left, rotate_right, BinaryTree, Pool};
    use crate::config::Config;
    use crate::pool::NodePool;
    use crate::treap::entry::{Entry, MapEntry, SetEntry};
    use crate::treap::node::Node;
    use rand::{Rng, SeedableRng, XorShiftRng};
    use std::collections::BTreeSet;

    // Walks the subtree rooted at `index`, asserting both the search tree and the heap property.
    // Returns the number of nodes visited.
    fn check_subtree<E: Entry>(
        pool: &Pool<E>,
        index: Option<usize>,
        lower: Option<&E::Key>,
        upper: Option<&E::Key>,
        max_priority: u32,
    ) -> usize {
        match index {
            None => 0,
            Some(index) => {
                let node = &pool[index];
                let key = node.entry.get_key();
                if let Some(lower) = lower {
                    assert!(lower < key);
                }
                if let Some(upper) = upper {
                    assert!(key < upper);
                }
                assert!(node.priority <= max_priority);
                1 + check_subtree(pool, node.left, lower, Some(key), node.priority)
                    + check_subtree(pool, node.right, Some(key), upper, node.priority)
            },
        }
    }

    fn check_invariants<E: Entry>(tree: &BinaryTree<E>) -> usize {
        check_subtree(tree.pool(), tree.root(), None, None, u32::max_value())
    }

    fn seeded() -> BinaryTree<SetEntry<u32>> {
        BinaryTree::with_config(&Config::new().seed([1, 1, 1, 1]))
    }

    fn keys(tree: &BinaryTree<SetEntry<u32>>) -> Vec<u32> {
        tree.iter().map(|entry| entry.0).collect()
    }

    #[test]
    fn test_empty() {
        let tree: BinaryTree<SetEntry<u32>> = BinaryTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.find(&1), (None, None));
        assert_eq!(tree.min(), None);
        assert_eq!(tree.max(), None);
    }

    #[test]
    fn test_rotate_left_right() {
        let mut pool: Pool<SetEntry<u32>> = NodePool::new();
        let a = pool.push(Node::new(SetEntry(2), 0));
        let b = pool.push(Node::new(SetEntry(4), 0));
        let c = pool.push(Node::new(SetEntry(3), 0));
        pool[a].right = Some(b);
        pool[b].left = Some(c);
        let mut root = Some(a);

        rotate_left(&mut pool, &mut root, a, b, None);
        assert_eq!(root, Some(b));
        assert_eq!(pool[b].left, Some(a));
        assert_eq!(pool[a].right, Some(c));

        rotate_right(&mut pool, &mut root, b, a, None);
        assert_eq!(root, Some(a));
        assert_eq!(pool[a].right, Some(b));
        assert_eq!(pool[b].left, Some(c));
    }

    #[test]
    fn test_rotate_reattaches_parent() {
        let mut pool: Pool<SetEntry<u32>> = NodePool::new();
        let p = pool.push(Node::new(SetEntry(10), 0));
        let a = pool.push(Node::new(SetEntry(2), 0));
        let b = pool.push(Node::new(SetEntry(4), 0));
        pool[p].left = Some(a);
        pool[a].right = Some(b);
        let mut root = Some(p);

        rotate_left(&mut pool, &mut root, a, b, Some(p));
        assert_eq!(root, Some(p));
        assert_eq!(pool[p].left, Some(b));
        assert_eq!(pool[b].left, Some(a));
        assert_eq!(pool[a].right, None);
    }

    #[test]
    fn test_find() {
        let mut tree = seeded();
        for key in &[5, 3, 8] {
            tree.insert(SetEntry(*key));
        }
        let (parent, target) = tree.find(&3);
        assert!(target.is_some());
        let (_, root_target) = tree.find(&tree.pool()[tree.root().unwrap()].entry.0);
        assert_eq!(root_target, tree.root());
        assert_eq!(tree.find(&tree.pool()[tree.root().unwrap()].entry.0).0, None);
        if let Some(parent) = parent {
            let node = &tree.pool()[parent];
            assert!(node.left == target || node.right == target);
        }

        let (parent, target) = tree.find(&4);
        assert_eq!(target, None);
        assert!(parent.is_some());
    }

    #[test]
    fn test_insert_duplicate() {
        let mut tree = seeded();
        assert!(tree.insert(SetEntry(1)));
        assert!(!tree.insert(SetEntry(1)));
        assert_eq!(tree.pool().len(), 1);
        assert!(tree.pool()[0].is_leaf());
    }

    #[test]
    fn test_replace() {
        let mut tree = BinaryTree::new();
        assert_eq!(tree.replace(MapEntry { key: 1, value: 'a' }), None);
        assert_eq!(
            tree.replace(MapEntry { key: 1, value: 'b' }),
            Some(MapEntry { key: 1, value: 'a' }),
        );
        assert_eq!(tree.get(&1).map(|entry| entry.value), Some('b'));
        assert_eq!(tree.pool().len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut tree = seeded();
        for key in &[5, 3, 8, 1, 4] {
            tree.insert(SetEntry(*key));
        }
        assert_eq!(tree.remove(&3), Some(SetEntry(3)));
        assert_eq!(tree.remove(&3), None);
        assert_eq!(keys(&tree), vec![1, 4, 5, 8]);
        assert_eq!(check_invariants(&tree), 4);
        assert_eq!(tree.pool().len(), 4);
    }

    #[test]
    fn test_remove_root_until_empty() {
        let mut tree = seeded();
        for key in 0..64 {
            tree.insert(SetEntry(key));
        }
        while let Some(root) = tree.root() {
            let key = tree.pool()[root].entry.0;
            assert_eq!(tree.remove(&key), Some(SetEntry(key)));
            check_invariants(&tree);
        }
        assert!(tree.is_empty());
        assert!(tree.pool().is_empty());
    }

    #[test]
    fn test_get_mut() {
        let mut tree = BinaryTree::new();
        tree.insert(MapEntry { key: 1, value: 1 });
        tree.get_mut(&1).unwrap().value = 3;
        assert_eq!(tree.get(&1).map(|entry| entry.value), Some(3));
        assert!(tree.get_mut(&2).is_none());
    }

    #[test]
    fn test_min_max_floor_ceil() {
        let mut tree = seeded();
        for key in &[1, 3, 5] {
            tree.insert(SetEntry(*key));
        }
        assert_eq!(tree.min(), Some(&SetEntry(1)));
        assert_eq!(tree.max(), Some(&SetEntry(5)));

        assert_eq!(tree.floor(&0), None);
        assert_eq!(tree.floor(&4), Some(&SetEntry(3)));
        assert_eq!(tree.floor(&6), Some(&SetEntry(5)));

        assert_eq!(tree.ceil(&0), Some(&SetEntry(1)));
        assert_eq!(tree.ceil(&4), Some(&SetEntry(5)));
        assert_eq!(tree.ceil(&6), None);
    }

    #[test]
    fn test_random_operations_keep_invariants() {
        let mut rng: XorShiftRng = SeedableRng::from_seed([3, 1, 4, 1]);
        let mut tree = seeded();
        let mut expected = BTreeSet::new();
        for _ in 0..2_000 {
            let key = rng.gen_range(0, 500);
            if rng.gen::<bool>() {
                assert_eq!(tree.insert(SetEntry(key)), expected.insert(key));
            } else {
                assert_eq!(tree.remove(&key).is_some(), expected.remove(&key));
            }
            assert_eq!(tree.pool().len(), expected.len());
        }
        assert_eq!(check_invariants(&tree), expected.len());
        assert_eq!(keys(&tree), expected.into_iter().collect::<Vec<u32>>());
    }

    #[test]
    fn test_clone_on_write() {
        let mut tree = seeded();
        for key in 0..10 {
            tree.insert(SetEntry(key));
        }
        let mut copy = tree.clone();
        assert!(copy.shares_pool_with(&tree));

        assert!(!copy.insert(SetEntry(5)));
        assert_eq!(copy.remove(&100), None);
        assert!(copy.shares_pool_with(&tree));

        copy.insert(SetEntry(100));
        copy.remove(&0);
        assert!(!copy.shares_pool_with(&tree));
        assert_eq!(keys(&tree), (0..10).collect::<Vec<u32>>());
        assert_eq!(keys(&copy), (1..10).chain(100..101).collect::<Vec<u32>>());
        check_invariants(&tree);
        check_invariants(&copy);
    }

    #[test]
    fn test_clear() {
        let mut tree = seeded();
        tree.insert(SetEntry(1));
        let copy = tree.clone();
        tree.clear();
        assert!(tree.is_empty());
        assert!(copy.contains(&1));
    }
}
