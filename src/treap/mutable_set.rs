use crate::collection::{self, Set};
use crate::config::Config;
use crate::error::Result;
use crate::treap::dot;
use crate::treap::entry::SetEntry;
use crate::treap::set::{SetBuilder, SetIntoIter, SetIter, TreeSet};
use crate::treap::tree::BinaryTree;
use std::fmt;
use std::io::{self, Write};
use std::iter::FromIterator;

/// An ordered set implemented by a treap that is updated in place.
///
/// `snapshot` returns a persistent `TreeSet<T>` in constant time. The snapshot and the mutable
/// set share their node pool until the next update of the mutable set, which copies the pool
/// first.
///
/// # Examples
///
/// ```
/// use toolchest::treap::MutableTreeSet;
///
/// let mut s = MutableTreeSet::new();
/// assert!(s.insert(0));
/// assert!(s.insert(3));
/// assert!(!s.insert(3));
///
/// assert_eq!(s.size(), 2);
/// assert_eq!(s.min(), Some(&0));
/// assert_eq!(s.ceil(&2), Some(&3));
///
/// assert_eq!(s.remove(&0), Some(0));
/// assert_eq!(s.remove(&1), None);
/// ```
pub struct MutableTreeSet<T> {
    tree: BinaryTree<SetEntry<T>>,
    size: usize,
}

impl<T: Ord> MutableTreeSet<T> {
    /// Constructs a new, empty `MutableTreeSet<T>`.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Constructs a new, empty `MutableTreeSet<T>` using a particular `Config`.
    pub fn with_config(config: &Config) -> Self {
        MutableTreeSet {
            tree: BinaryTree::with_config(config),
            size: 0,
        }
    }

    pub(crate) fn from_tree(tree: BinaryTree<SetEntry<T>>, size: usize) -> Self {
        MutableTreeSet { tree, size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn contains(&self, element: &T) -> bool {
        self.tree.contains(element)
    }

    pub fn min(&self) -> Option<&T> {
        self.tree.min().map(|entry| &entry.0)
    }

    pub fn max(&self) -> Option<&T> {
        self.tree.max().map(|entry| &entry.0)
    }

    pub fn ceil(&self, element: &T) -> Option<&T> {
        self.tree.ceil(element).map(|entry| &entry.0)
    }

    pub fn floor(&self, element: &T) -> Option<&T> {
        self.tree.floor(element).map(|entry| &entry.0)
    }

    /// Returns an iterator over the set. The iterator will yield elements using in-order
    /// traversal.
    pub fn iter(&self) -> SetIter<'_, T> {
        SetIter {
            iter: self.tree.iter(),
        }
    }

    /// Removes every element of the set.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.size = 0;
    }

    /// Returns a persistent copy of the set in constant time.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::MutableTreeSet;
    ///
    /// let mut s = MutableTreeSet::new();
    /// s.insert(1);
    /// let snapshot = s.snapshot();
    /// s.insert(2);
    ///
    /// assert_eq!(snapshot.iter().collect::<Vec<&u32>>(), vec![&1]);
    /// assert_eq!(s.iter().collect::<Vec<&u32>>(), vec![&1, &2]);
    /// ```
    pub fn snapshot(&self) -> TreeSet<T> {
        TreeSet::from_tree(self.tree.clone(), self.size)
    }
}

impl<T: Ord + Clone> MutableTreeSet<T> {
    /// Returns a builder that produces a `MutableTreeSet<T>` through `SetBuilder::result_mutable`.
    pub fn builder() -> SetBuilder<T> {
        SetBuilder::new()
    }

    /// Inserts an element. Returns `false` and leaves the set unchanged if the element already
    /// exists.
    pub fn insert(&mut self, element: T) -> bool {
        let added = self.tree.insert(SetEntry(element));
        if added {
            self.size += 1;
        }
        added
    }

    /// Removes an element, returning it if it was present.
    pub fn remove(&mut self, element: &T) -> Option<T> {
        let &mut MutableTreeSet {
            ref mut tree,
            ref mut size,
        } = self;
        tree.remove(element).map(|entry| {
            *size -= 1;
            entry.0
        })
    }

    pub fn union(&self, other: &Self) -> Self {
        collection::union(self, other)
    }

    pub fn intersection(&self, other: &Self) -> Self {
        collection::intersection(self, other)
    }

    pub fn difference(&self, other: &Self) -> Self {
        collection::difference(self, other)
    }
}

impl<T: Ord + fmt::Debug> MutableTreeSet<T> {
    /// Writes the topology of the underlying treap in Graphviz `dot` format.
    pub fn write_dot<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        dot::write_dot(&self.tree, writer)
    }

    /// Writes the topology of the underlying treap in Graphviz `dot` format to a file.
    pub fn dump_dot<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        dot::dump_dot(&self.tree, path)
    }
}

impl<T: Ord> Default for MutableTreeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for MutableTreeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> PartialEq for MutableTreeSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<T: Ord> Eq for MutableTreeSet<T> {}

impl<T: Ord + Clone> FromIterator<T> for MutableTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut builder = SetBuilder::new();
        for element in iter {
            builder.add_element(element);
        }
        builder.result_mutable()
    }
}

impl<T: Ord + Clone> Extend<T> for MutableTreeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<T: Ord + Clone> Set<T> for MutableTreeSet<T> {
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

impl<T: Ord + Clone> IntoIterator for MutableTreeSet<T> {
    type Item = T;
    type IntoIter = SetIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        SetIntoIter {
            iter: self.tree.into_iter(),
        }
    }
}

impl<'a, T: 'a + Ord> IntoIterator for &'a MutableTreeSet<T> {
    type Item = &'a T;
    type IntoIter = SetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::MutableTreeSet;

    #[test]
    fn test_insert() {
        let mut set = MutableTreeSet::new();
        assert!(set.insert(1));
        assert!(!set.insert(1));
        assert!(set.contains(&1));
        assert_eq!(set.size(), 1);
    }

    #[test]
    fn test_remove() {
        let mut set = MutableTreeSet::new();
        set.insert(1);
        assert_eq!(set.remove(&1), Some(1));
        assert_eq!(set.remove(&1), None);
        assert!(!set.contains(&1));
        assert!(set.is_empty());
    }

    #[test]
    fn test_min_max() {
        let mut set = MutableTreeSet::new();
        set.extend(vec![3, 1, 5]);
        assert_eq!(set.min(), Some(&1));
        assert_eq!(set.max(), Some(&5));
    }

    #[test]
    fn test_snapshot_isolated() {
        let mut set: MutableTreeSet<u32> = (0..10).collect();
        let snapshot = set.snapshot();
        set.remove(&0);
        set.insert(42);

        assert_eq!(snapshot.size(), 10);
        assert!(snapshot.contains(&0));
        assert!(!snapshot.contains(&42));
        assert_eq!(set.size(), 10);
        assert!(!set.contains(&0));
    }

    #[test]
    fn test_clear() {
        let mut set: MutableTreeSet<u32> = (0..10).collect();
        let snapshot = set.snapshot();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.iter().next(), None);
        assert_eq!(snapshot.size(), 10);
    }

    #[test]
    fn test_set_algebra() {
        let n: MutableTreeSet<u32> = vec![1, 3, 5, 7].into_iter().collect();
        let m: MutableTreeSet<u32> = vec![2, 3, 4, 5].into_iter().collect();

        assert_eq!(
            n.union(&m).into_iter().collect::<Vec<u32>>(),
            vec![1, 2, 3, 4, 5, 7],
        );
        assert_eq!(n.intersection(&m).into_iter().collect::<Vec<u32>>(), vec![3, 5]);
        assert_eq!(n.difference(&m).into_iter().collect::<Vec<u32>>(), vec![1, 7]);
    }

    #[test]
    fn test_iter() {
        let mut set = MutableTreeSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);
        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
    }
}
