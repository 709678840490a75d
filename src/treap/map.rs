use crate::collection::{Builder, Map};
use crate::config::Config;
use crate::error::Result;
use crate::treap::builder::TreeBuilder;
use crate::treap::dot;
use crate::treap::entry::MapEntry;
use crate::treap::iter::{IntoIter, Iter};
use crate::treap::mutable_map::MutableTreeMap;
use crate::treap::set::{SetBuilder, TreeSet};
use crate::treap::tree::BinaryTree;
use std::fmt;
use std::io::{self, Write};
use std::iter::FromIterator;
use std::path::Path;

/// A persistent ordered map implemented by a treap.
///
/// A treap is a tree that satisfies both the binary search tree property and a heap property. Each
/// node has a key, a value, and a priority. The key of any node is greater than all keys in its
/// left subtree and less than all keys occuring in its right subtree. The priority of a node is
/// greater than the priority of all nodes in its subtrees. By randomly generating priorities, the
/// expected height of the tree is proportional to the logarithm of the number of keys.
///
/// Every update returns a new map and leaves the original untouched.
///
/// # Examples
///
/// ```
/// use toolchest::treap::TreeMap;
///
/// let m = TreeMap::new().insert(0, 1).insert(3, 4);
///
/// assert_eq!(m.get(&0), Some(&1));
/// assert_eq!(m.get(&1), None);
/// assert_eq!(m.size(), 2);
///
/// assert_eq!(m.min(), Some(&0));
/// assert_eq!(m.ceil(&2), Some(&3));
///
/// let n = m.insert(0, 2).remove(&3);
/// assert_eq!(n.get(&0), Some(&2));
/// assert_eq!(m.get(&0), Some(&1));
/// ```
pub struct TreeMap<K, V> {
    tree: BinaryTree<MapEntry<K, V>>,
    size: usize,
}

impl<K: Ord, V> TreeMap<K, V> {
    /// Constructs a new, empty `TreeMap<K, V>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::TreeMap;
    ///
    /// let m: TreeMap<u32, u32> = TreeMap::new();
    /// assert!(m.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Constructs a new, empty `TreeMap<K, V>` using a particular `Config`.
    pub fn with_config(config: &Config) -> Self {
        TreeMap {
            tree: BinaryTree::with_config(config),
            size: 0,
        }
    }

    pub(crate) fn from_tree(tree: BinaryTree<MapEntry<K, V>>, size: usize) -> Self {
        TreeMap { tree, size }
    }

    /// Returns the number of key-value pairs in the map.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::TreeMap;
    ///
    /// let m = TreeMap::new().insert(1, 1);
    /// assert!(!m.contains_key(&0));
    /// assert!(m.contains_key(&1));
    /// ```
    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    /// Returns an immutable reference to the value associated with a particular key. Returns
    /// `None` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::TreeMap;
    ///
    /// let m = TreeMap::new().insert(1, 1);
    /// assert_eq!(m.get(&0), None);
    /// assert_eq!(m.get(&1), Some(&1));
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.get(key).map(|entry| &entry.value)
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    pub fn min(&self) -> Option<&K> {
        self.tree.min().map(|entry| &entry.key)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    pub fn max(&self) -> Option<&K> {
        self.tree.max().map(|entry| &entry.key)
    }

    /// Returns the least key greater than or equal to `key`.
    pub fn ceil(&self, key: &K) -> Option<&K> {
        self.tree.ceil(key).map(|entry| &entry.key)
    }

    /// Returns the greatest key less than or equal to `key`.
    pub fn floor(&self, key: &K) -> Option<&K> {
        self.tree.floor(key).map(|entry| &entry.key)
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::TreeMap;
    ///
    /// let m = TreeMap::new().insert(3, 3).insert(1, 1);
    ///
    /// let mut iterator = m.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&3, &3)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> MapIter<'_, K, V> {
        MapIter {
            iter: self.tree.iter(),
        }
    }

    /// Returns an iterator over the values of the map in key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            iter: self.tree.iter(),
        }
    }

    /// Returns a mutable map holding the same key-value pairs. The two maps share their node pool
    /// until one of them is updated.
    pub fn to_mutable(&self) -> MutableTreeMap<K, V> {
        MutableTreeMap::from_tree(self.tree.clone(), self.size)
    }

    /// Returns `true` if both maps read from the same node pool.
    pub fn shares_structure_with(&self, other: &Self) -> bool {
        self.tree.shares_pool_with(&other.tree)
    }
}

impl<K: Ord + Clone, V> TreeMap<K, V> {
    /// Returns the set of keys of the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::TreeMap;
    ///
    /// let m = TreeMap::new().insert(3, 'c').insert(1, 'a');
    /// assert_eq!(m.keys().iter().collect::<Vec<&u32>>(), vec![&1, &3]);
    /// ```
    pub fn keys(&self) -> TreeSet<K> {
        let mut builder = SetBuilder::new();
        for (key, _) in self.iter() {
            builder.add_element(key.clone());
        }
        builder.result()
    }
}

impl<K: Ord + Clone, V: Clone> TreeMap<K, V> {
    /// Returns a builder that produces a `TreeMap<K, V>`.
    pub fn builder() -> MapBuilder<K, V> {
        MapBuilder::new()
    }

    /// Constructs a map holding the pairs of a slice. Later pairs overwrite earlier pairs with
    /// the same key.
    pub fn from_slice(pairs: &[(K, V)]) -> Self {
        pairs.iter().cloned().collect()
    }

    /// Returns a map that associates `key` with `value`. If the key is already present, its value
    /// is replaced in the returned map.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::TreeMap;
    ///
    /// let m = TreeMap::new().insert(1, 1);
    /// let n = m.insert(1, 2);
    /// assert_eq!(m.get(&1), Some(&1));
    /// assert_eq!(n.get(&1), Some(&2));
    /// assert_eq!(n.size(), 1);
    /// ```
    pub fn insert(&self, key: K, value: V) -> Self {
        let mut tree = self.tree.clone();
        let size = match tree.replace(MapEntry { key, value }) {
            Some(_) => self.size,
            None => self.size + 1,
        };
        TreeMap { tree, size }
    }

    /// Returns a map without `key`. If the key is absent, the returned map is equal to this one.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::TreeMap;
    ///
    /// let m = TreeMap::new().insert(1, 1);
    /// assert!(m.remove(&1).is_empty());
    /// assert_eq!(m.remove(&2).size(), 1);
    /// ```
    pub fn remove(&self, key: &K) -> Self {
        let mut tree = self.tree.clone();
        let size = match tree.remove(key) {
            Some(_) => self.size - 1,
            None => self.size,
        };
        TreeMap { tree, size }
    }

    /// Returns a copy of the value associated with `key`, or `default` if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::TreeMap;
    ///
    /// let m = TreeMap::from_slice(&[(3, "c"), (1, "a"), (2, "b")]);
    /// assert_eq!(m.get_or_else(&2, "?"), "b");
    /// assert_eq!(m.get_or_else(&9, "?"), "?");
    /// ```
    pub fn get_or_else(&self, key: &K, default: V) -> V {
        Map::get_or_else(self, key, default)
    }
}

impl<K: Ord + fmt::Debug, V> TreeMap<K, V> {
    /// Writes the topology of the underlying treap in Graphviz `dot` format.
    pub fn write_dot<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        dot::write_dot(&self.tree, writer)
    }

    /// Writes the topology of the underlying treap in Graphviz `dot` format to a file.
    pub fn dump_dot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        dot::dump_dot(&self.tree, path)
    }
}

impl<K, V> Clone for TreeMap<K, V> {
    fn clone(&self) -> Self {
        TreeMap {
            tree: self.tree.clone(),
            size: self.size,
        }
    }
}

impl<K: Ord, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Debug for TreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V: PartialEq> PartialEq for TreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<K: Ord, V: Eq> Eq for TreeMap<K, V> {}

impl<K: Ord + Clone, V: Clone> FromIterator<(K, V)> for TreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut builder = MapBuilder::new();
        for (key, value) in iter {
            builder.add_element(key, value);
        }
        builder.result()
    }
}

impl<K: Ord + Clone, V: Clone> Map<K, V> for TreeMap<K, V> {
    type Builder = MapBuilder<K, V>;
    type KeySet = TreeSet<K>;

    fn builder() -> Self::Builder {
        MapBuilder::new()
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.tree.get(key).map(|entry| &entry.value)
    }

    fn size(&self) -> usize {
        self.size
    }

    fn keys(&self) -> Self::KeySet {
        TreeMap::keys(self)
    }
}

impl<K: Ord + Clone, V: Clone> IntoIterator for TreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = MapIntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        MapIntoIter {
            iter: self.tree.into_iter(),
        }
    }
}

impl<'a, K: 'a + Ord, V: 'a> IntoIterator for &'a TreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = MapIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A one-shot builder for `TreeMap<K, V>` and `MutableTreeMap<K, V>`. Adding a key twice keeps
/// the latest value.
///
/// # Examples
///
/// ```
/// use toolchest::treap::MapBuilder;
///
/// let mut builder = MapBuilder::new();
/// assert!(builder.add_element(1, 'a'));
/// assert!(!builder.add_element(1, 'b'));
///
/// let m = builder.result();
/// assert_eq!(m.get(&1), Some(&'b'));
/// assert_eq!(m.size(), 1);
/// ```
pub struct MapBuilder<K, V> {
    builder: TreeBuilder<MapEntry<K, V>>,
}

impl<K: Ord + Clone, V: Clone> MapBuilder<K, V> {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        MapBuilder {
            builder: TreeBuilder::with_config(config),
        }
    }

    /// Associates `key` with `value`, overwriting an earlier value. Returns `true` if the key is
    /// new.
    pub fn add_element(&mut self, key: K, value: V) -> bool {
        self.builder.replace_element(MapEntry { key, value })
    }

    /// Returns the number of distinct keys added so far.
    pub fn len(&self) -> usize {
        self.builder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builder.is_empty()
    }

    /// Consumes the builder and returns a persistent map.
    pub fn result(self) -> TreeMap<K, V> {
        let (tree, size) = self.builder.finish();
        TreeMap::from_tree(tree, size)
    }

    /// Consumes the builder and returns a mutable map.
    pub fn result_mutable(self) -> MutableTreeMap<K, V> {
        let (tree, size) = self.builder.finish();
        MutableTreeMap::from_tree(tree, size)
    }
}

impl<K: Ord + Clone, V: Clone> Default for MapBuilder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone, V: Clone> Builder<(K, V), TreeMap<K, V>> for MapBuilder<K, V> {
    fn add_element(&mut self, (key, value): (K, V)) -> bool {
        MapBuilder::add_element(self, key, value)
    }

    fn result(self) -> TreeMap<K, V> {
        MapBuilder::result(self)
    }
}

impl<K: Ord + Clone, V: Clone> Builder<(K, V), MutableTreeMap<K, V>> for MapBuilder<K, V> {
    fn add_element(&mut self, (key, value): (K, V)) -> bool {
        MapBuilder::add_element(self, key, value)
    }

    fn result(self) -> MutableTreeMap<K, V> {
        self.result_mutable()
    }
}

/// An iterator for `TreeMap<K, V>` and `MutableTreeMap<K, V>`.
///
/// This iterator traverses the elements of a map in-order and yields immutable references.
pub struct MapIter<'a, K: 'a, V: 'a> {
    pub(crate) iter: Iter<'a, MapEntry<K, V>>,
}

impl<'a, K: 'a, V: 'a> Iterator for MapIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|entry| (&entry.key, &entry.value))
    }
}

/// An iterator over the values of a `TreeMap<K, V>` or `MutableTreeMap<K, V>` in key order.
pub struct Values<'a, K: 'a, V: 'a> {
    pub(crate) iter: Iter<'a, MapEntry<K, V>>,
}

impl<'a, K: 'a, V: 'a> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|entry| &entry.value)
    }
}

/// An owning iterator for `TreeMap<K, V>` and `MutableTreeMap<K, V>`.
///
/// This iterator traverses the elements of a map in-order and yields owned key-value pairs.
pub struct MapIntoIter<K, V> {
    pub(crate) iter: IntoIter<MapEntry<K, V>>,
}

impl<K: Clone, V: Clone> Iterator for MapIntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter
            .next()
            .map(|MapEntry { key, value }| (key, value))
    }
}

#[cfg(test)]
mod tests {
    use super::TreeMap;
    use crate::collection::Map;

    #[test]
    fn test_size_empty() {
        let map: TreeMap<u32, u32> = TreeMap::new();
        assert_eq!(map.size(), 0);
        assert_eq!(map.min(), None);
        assert_eq!(map.max(), None);
    }

    #[test]
    fn test_insert() {
        let map = TreeMap::new().insert(1, 1);
        assert!(map.contains_key(&1));
        assert_eq!(map.get(&1), Some(&1));
    }

    #[test]
    fn test_insert_replace() {
        let map = TreeMap::new().insert(1, 1);
        let replaced = map.insert(1, 3);
        assert_eq!(replaced.get(&1), Some(&3));
        assert_eq!(replaced.size(), 1);
        assert_eq!(map.get(&1), Some(&1));
    }

    #[test]
    fn test_remove() {
        let map = TreeMap::new().insert(1, 1).insert(2, 2);
        let removed = map.remove(&1);
        assert!(!removed.contains_key(&1));
        assert_eq!(removed.size(), 1);
        assert!(map.contains_key(&1));

        let same = removed.remove(&1);
        assert!(same.shares_structure_with(&removed));
    }

    #[test]
    fn test_keys_and_get_or_else() {
        let map = TreeMap::from_slice(&[(3, "c"), (1, "a"), (2, "b")]);
        let keys = map.keys();
        assert_eq!(keys.iter().cloned().collect::<Vec<u32>>(), vec![1, 2, 3]);
        assert_eq!(keys.size(), 3);
        assert_eq!(map.get_or_else(&2, "?"), "b");
        assert_eq!(map.get_or_else(&9, "?"), "?");
        assert_eq!(Map::keys(&map), keys);
    }

    #[test]
    fn test_floor_ceil() {
        let map = TreeMap::from_slice(&[(1, 1), (3, 3), (5, 5)]);
        assert_eq!(map.floor(&0), None);
        assert_eq!(map.floor(&4), Some(&3));
        assert_eq!(map.ceil(&4), Some(&5));
        assert_eq!(map.ceil(&6), None);
    }

    #[test]
    fn test_iter_and_values() {
        let map = TreeMap::from_slice(&[(1, 2), (5, 6), (3, 4)]);
        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &2), (&3, &4), (&5, &6)],
        );
        assert_eq!(map.values().collect::<Vec<&u32>>(), vec![&2, &4, &6]);
    }

    #[test]
    fn test_into_iter() {
        let map = TreeMap::from_slice(&[(1, 2), (5, 6), (3, 4)]);
        assert_eq!(
            map.into_iter().collect::<Vec<(u32, u32)>>(),
            vec![(1, 2), (3, 4), (5, 6)],
        );
    }

    #[test]
    fn test_from_iter_keeps_last_value() {
        let map: TreeMap<u32, char> = vec![(1, 'a'), (1, 'b')].into_iter().collect();
        assert_eq!(map.size(), 1);
        assert_eq!(map.get(&1), Some(&'b'));
    }

    #[test]
    fn test_debug() {
        let map = TreeMap::from_slice(&[(2, 'b'), (1, 'a')]);
        assert_eq!(format!("{:?}", map), "{1: 'a', 2: 'b'}");
    }
}
