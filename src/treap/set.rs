use crate::collection::{self, Builder, Set};
use crate::config::Config;
use crate::error::Result;
use crate::treap::builder::TreeBuilder;
use crate::treap::dot;
use crate::treap::entry::SetEntry;
use crate::treap::iter::{IntoIter, Iter};
use crate::treap::mutable_set::MutableTreeSet;
use crate::treap::tree::BinaryTree;
use std::fmt;
use std::io::{self, Write};
use std::iter::FromIterator;
use std::ops::{Add, BitAnd, Sub};
use std::path::Path;

/// A persistent ordered set implemented by a treap.
///
/// A treap is a tree that satisfies both the binary search tree property and a heap property. Each
/// node has a key and a priority. The key of any node is greater than all keys in its left subtree
/// and less than all keys occuring in its right subtree. The priority of a node is greater than
/// the priority of all nodes in its subtrees. By randomly generating priorities, the expected
/// height of the tree is proportional to the logarithm of the number of keys.
///
/// Every update returns a new set and leaves the original untouched. Versions share their node
/// pool until one of them is updated, at which point the updated version copies the pool.
///
/// # Examples
///
/// ```
/// use toolchest::treap::TreeSet;
///
/// let s = TreeSet::from_slice(&[5, 3, 8, 1, 4]);
/// let t = s.remove(&3);
///
/// assert_eq!(s.size(), 5);
/// assert_eq!(t.size(), 4);
/// assert_eq!(t.iter().collect::<Vec<&u32>>(), vec![&1, &4, &5, &8]);
///
/// assert_eq!(t.min(), Some(&1));
/// assert_eq!(t.ceil(&2), Some(&4));
/// ```
pub struct TreeSet<T> {
    tree: BinaryTree<SetEntry<T>>,
    size: usize,
}

impl<T: Ord> TreeSet<T> {
    /// Constructs a new, empty `TreeSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::TreeSet;
    ///
    /// let s: TreeSet<u32> = TreeSet::new();
    /// assert!(s.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Constructs a new, empty `TreeSet<T>` using a particular `Config`.
    pub fn with_config(config: &Config) -> Self {
        TreeSet {
            tree: BinaryTree::with_config(config),
            size: 0,
        }
    }

    pub(crate) fn from_tree(tree: BinaryTree<SetEntry<T>>, size: usize) -> Self {
        TreeSet { tree, size }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::TreeSet;
    ///
    /// let s = TreeSet::new().insert(1);
    /// assert_eq!(s.size(), 1);
    /// ```
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Checks if an element exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::TreeSet;
    ///
    /// let s = TreeSet::new().insert(1);
    /// assert!(!s.contains(&0));
    /// assert!(s.contains(&1));
    /// ```
    pub fn contains(&self, element: &T) -> bool {
        self.tree.contains(element)
    }

    /// Returns the minimum element of the set. Returns `None` if the set is empty.
    pub fn min(&self) -> Option<&T> {
        self.tree.min().map(|entry| &entry.0)
    }

    /// Returns the maximum element of the set. Returns `None` if the set is empty.
    pub fn max(&self) -> Option<&T> {
        self.tree.max().map(|entry| &entry.0)
    }

    /// Returns the least element greater than or equal to `element`.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::TreeSet;
    ///
    /// let s = TreeSet::new().insert(1);
    /// assert_eq!(s.ceil(&0), Some(&1));
    /// assert_eq!(s.ceil(&2), None);
    /// ```
    pub fn ceil(&self, element: &T) -> Option<&T> {
        self.tree.ceil(element).map(|entry| &entry.0)
    }

    /// Returns the greatest element less than or equal to `element`.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::TreeSet;
    ///
    /// let s = TreeSet::new().insert(1);
    /// assert_eq!(s.floor(&0), None);
    /// assert_eq!(s.floor(&2), Some(&1));
    /// ```
    pub fn floor(&self, element: &T) -> Option<&T> {
        self.tree.floor(element).map(|entry| &entry.0)
    }

    /// Returns an iterator over the set. The iterator will yield elements using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::TreeSet;
    ///
    /// let s = TreeSet::new().insert(3).insert(1);
    ///
    /// let mut iterator = s.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> SetIter<'_, T> {
        SetIter {
            iter: self.tree.iter(),
        }
    }

    /// Returns a mutable set holding the same elements. The two sets share their node pool until
    /// one of them is updated.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::TreeSet;
    ///
    /// let s = TreeSet::new().insert(1);
    /// let mut m = s.to_mutable();
    /// m.insert(2);
    ///
    /// assert_eq!(s.size(), 1);
    /// assert_eq!(m.size(), 2);
    /// ```
    pub fn to_mutable(&self) -> MutableTreeSet<T> {
        MutableTreeSet::from_tree(self.tree.clone(), self.size)
    }

    /// Returns `true` if both sets read from the same node pool.
    pub fn shares_structure_with(&self, other: &Self) -> bool {
        self.tree.shares_pool_with(&other.tree)
    }
}

impl<T: Ord + Clone> TreeSet<T> {
    /// Returns a builder that produces a `TreeSet<T>`.
    pub fn builder() -> SetBuilder<T> {
        SetBuilder::new()
    }

    /// Constructs a set holding the elements of a slice.
    pub fn from_slice(elements: &[T]) -> Self {
        elements.iter().cloned().collect()
    }

    /// Constructs a set holding `f(0)`, `f(1)`, ..., `f(count - 1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::TreeSet;
    ///
    /// let s = TreeSet::from_fn(4, |i| i * i);
    /// assert_eq!(s.iter().collect::<Vec<&usize>>(), vec![&0, &1, &4, &9]);
    /// ```
    pub fn from_fn<F>(count: usize, f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        (0..count).map(f).collect()
    }

    /// Returns a set that also contains `element`. If the element is already present, the
    /// returned set is equal to this one.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::TreeSet;
    ///
    /// let s = TreeSet::new().insert(1);
    /// let t = s.insert(2);
    /// assert!(!s.contains(&2));
    /// assert!(t.contains(&2));
    /// assert_eq!(t.insert(2).size(), 2);
    /// ```
    pub fn insert(&self, element: T) -> Self {
        let mut tree = self.tree.clone();
        let size = if tree.insert(SetEntry(element)) {
            self.size + 1
        } else {
            self.size
        };
        TreeSet { tree, size }
    }

    /// Returns a set without `element`. If the element is absent, the returned set is equal to
    /// this one.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::TreeSet;
    ///
    /// let s = TreeSet::new().insert(1);
    /// assert!(s.remove(&1).is_empty());
    /// assert_eq!(s.remove(&2).size(), 1);
    /// ```
    pub fn remove(&self, element: &T) -> Self {
        let mut tree = self.tree.clone();
        let size = match tree.remove(element) {
            Some(_) => self.size - 1,
            None => self.size,
        };
        TreeSet { tree, size }
    }

    /// Returns the union of two sets. The `+` operator is implemented to take the union of two
    /// sets.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::TreeSet;
    ///
    /// let n = TreeSet::from_slice(&[1, 2]);
    /// let m = TreeSet::from_slice(&[2, 3]);
    ///
    /// assert_eq!(n.union(&m).iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
    /// ```
    pub fn union(&self, other: &Self) -> Self {
        collection::union(self, other)
    }

    /// Returns the intersection of two sets. The `&` operator is implemented to take the
    /// intersection of two sets.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::TreeSet;
    ///
    /// let n = TreeSet::from_slice(&[1, 2]);
    /// let m = TreeSet::from_slice(&[2, 3]);
    ///
    /// assert_eq!(n.intersection(&m).iter().collect::<Vec<&u32>>(), vec![&2]);
    /// ```
    pub fn intersection(&self, other: &Self) -> Self {
        collection::intersection(self, other)
    }

    /// Returns the elements of this set that are not in `other`. The `-` operator is implemented
    /// to take the difference of two sets.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::TreeSet;
    ///
    /// let n = TreeSet::from_slice(&[1, 2]);
    /// let m = TreeSet::from_slice(&[2, 3]);
    ///
    /// assert_eq!(n.difference(&m).iter().collect::<Vec<&u32>>(), vec![&1]);
    /// ```
    pub fn difference(&self, other: &Self) -> Self {
        collection::difference(self, other)
    }
}

impl<T: Ord + fmt::Debug> TreeSet<T> {
    /// Writes the topology of the underlying treap in Graphviz `dot` format.
    pub fn write_dot<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        dot::write_dot(&self.tree, writer)
    }

    /// Writes the topology of the underlying treap in Graphviz `dot` format to a file.
    pub fn dump_dot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        dot::dump_dot(&self.tree, path)
    }
}

impl<T> Clone for TreeSet<T> {
    fn clone(&self) -> Self {
        TreeSet {
            tree: self.tree.clone(),
            size: self.size,
        }
    }
}

impl<T: Ord> Default for TreeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for TreeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> PartialEq for TreeSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<T: Ord> Eq for TreeSet<T> {}

impl<T: Ord + Clone> FromIterator<T> for TreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut builder = SetBuilder::new();
        for element in iter {
            builder.add_element(element);
        }
        builder.result()
    }
}

impl<T: Ord + Clone> Set<T> for TreeSet<T> {
    type Builder = SetBuilder<T>;

    fn builder() -> Self::Builder {
        SetBuilder::new()
    }

    fn contains(&self, element: &T) -> bool {
        self.tree.contains(element)
    }

    fn size(&self) -> usize {
        self.size
    }

    fn elements<'a>(&'a self) -> Box<dyn Iterator<Item = &'a T> + 'a>
    where
        T: 'a,
    {
        Box::new(self.iter())
    }
}

impl<T: Ord + Clone> IntoIterator for TreeSet<T> {
    type Item = T;
    type IntoIter = SetIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        SetIntoIter {
            iter: self.tree.into_iter(),
        }
    }
}

impl<'a, T: 'a + Ord> IntoIterator for &'a TreeSet<T> {
    type Item = &'a T;
    type IntoIter = SetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: Ord + Clone> Add for &'a TreeSet<T> {
    type Output = TreeSet<T>;

    fn add(self, other: &'a TreeSet<T>) -> TreeSet<T> {
        self.union(other)
    }
}

impl<'a, T: Ord + Clone> BitAnd for &'a TreeSet<T> {
    type Output = TreeSet<T>;

    fn bitand(self, other: &'a TreeSet<T>) -> TreeSet<T> {
        self.intersection(other)
    }
}

impl<'a, T: Ord + Clone> Sub for &'a TreeSet<T> {
    type Output = TreeSet<T>;

    fn sub(self, other: &'a TreeSet<T>) -> TreeSet<T> {
        self.difference(other)
    }
}

/// A one-shot builder for `TreeSet<T>` and `MutableTreeSet<T>`.
///
/// # Examples
///
/// ```
/// use toolchest::treap::SetBuilder;
///
/// let mut builder = SetBuilder::new();
/// assert!(builder.add_element(2));
/// assert!(builder.add_element(1));
/// assert!(!builder.add_element(2));
///
/// let s = builder.result();
/// assert_eq!(s.iter().collect::<Vec<&u32>>(), vec![&1, &2]);
/// ```
pub struct SetBuilder<T> {
    builder: TreeBuilder<SetEntry<T>>,
}

impl<T: Ord + Clone> SetBuilder<T> {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        SetBuilder {
            builder: TreeBuilder::with_config(config),
        }
    }

    /// Adds an element. Returns `false` if the element was already added.
    pub fn add_element(&mut self, element: T) -> bool {
        self.builder.add_element(SetEntry(element))
    }

    /// Returns the number of distinct elements added so far.
    pub fn len(&self) -> usize {
        self.builder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builder.is_empty()
    }

    /// Consumes the builder and returns a persistent set.
    pub fn result(self) -> TreeSet<T> {
        let (tree, size) = self.builder.finish();
        TreeSet::from_tree(tree, size)
    }

    /// Consumes the builder and returns a mutable set.
    pub fn result_mutable(self) -> MutableTreeSet<T> {
        let (tree, size) = self.builder.finish();
        MutableTreeSet::from_tree(tree, size)
    }
}

impl<T: Ord + Clone> Default for SetBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> Builder<T, TreeSet<T>> for SetBuilder<T> {
    fn add_element(&mut self, element: T) -> bool {
        self.builder.add_element(SetEntry(element))
    }

    fn result(self) -> TreeSet<T> {
        SetBuilder::result(self)
    }
}

impl<T: Ord + Clone> Builder<T, MutableTreeSet<T>> for SetBuilder<T> {
    fn add_element(&mut self, element: T) -> bool {
        self.builder.add_element(SetEntry(element))
    }

    fn result(self) -> MutableTreeSet<T> {
        self.result_mutable()
    }
}

/// An iterator for `TreeSet<T>` and `MutableTreeSet<T>`.
///
/// This iterator traverses the elements of a set in-order and yields immutable references.
pub struct SetIter<'a, T: 'a> {
    pub(crate) iter: Iter<'a, SetEntry<T>>,
}

impl<'a, T: 'a> SetIter<'a, T> {
    pub fn has_next(&self) -> bool {
        self.iter.has_next()
    }
}

impl<'a, T: 'a> Iterator for SetIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|entry| &entry.0)
    }
}

/// An owning iterator for `TreeSet<T>` and `MutableTreeSet<T>`.
///
/// This iterator traverses the elements of a set in-order and yields owned elements.
pub struct SetIntoIter<T> {
    pub(crate) iter: IntoIter<SetEntry<T>>,
}

impl<T: Clone> Iterator for SetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|entry| entry.0)
    }
}
