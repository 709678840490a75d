use crate::collection::Map;
use crate::config::Config;
use crate::error::Result;
use crate::treap::dot;
use crate::treap::entry::MapEntry;
use crate::treap::map::{MapBuilder, MapIntoIter, MapIter, TreeMap, Values};
use crate::treap::mutable_set::MutableTreeSet;
use crate::treap::set::SetBuilder;
use crate::treap::tree::BinaryTree;
use std::fmt;
use std::io::{self, Write};
use std::iter::FromIterator;
use std::mem;
use std::path::Path;

/// An ordered map implemented by a treap that is updated in place.
///
/// `snapshot` returns a persistent `TreeMap<K, V>` in constant time. The snapshot and the mutable
/// map share their node pool until the next update of the mutable map.
///
/// # Examples
///
/// ```
/// use toolchest::treap::MutableTreeMap;
///
/// let mut m = MutableTreeMap::new();
/// m.insert(0, 1);
/// m.insert(3, 4);
///
/// assert_eq!(m.get(&0), Some(&1));
/// assert_eq!(m.get(&1), None);
/// assert_eq!(m.size(), 2);
///
/// *m.get_mut(&0).unwrap() = 2;
/// assert_eq!(m.remove(&0), Some(2));
/// assert_eq!(m.remove(&1), None);
/// ```
pub struct MutableTreeMap<K, V> {
    tree: BinaryTree<MapEntry<K, V>>,
    size: usize,
}

impl<K: Ord, V> MutableTreeMap<K, V> {
    /// Constructs a new, empty `MutableTreeMap<K, V>`.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Constructs a new, empty `MutableTreeMap<K, V>` using a particular `Config`.
    pub fn with_config(config: &Config) -> Self {
        MutableTreeMap {
            tree: BinaryTree::with_config(config),
            size: 0,
        }
    }

    pub(crate) fn from_tree(tree: BinaryTree<MapEntry<K, V>>, size: usize) -> Self {
        MutableTreeMap { tree, size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.get(key).map(|entry| &entry.value)
    }

    pub fn min(&self) -> Option<&K> {
        self.tree.min().map(|entry| &entry.key)
    }

    pub fn max(&self) -> Option<&K> {
        self.tree.max().map(|entry| &entry.key)
    }

    pub fn ceil(&self, key: &K) -> Option<&K> {
        self.tree.ceil(key).map(|entry| &entry.key)
    }

    pub fn floor(&self, key: &K) -> Option<&K> {
        self.tree.floor(key).map(|entry| &entry.key)
    }

    pub fn iter(&self) -> MapIter<'_, K, V> {
        MapIter {
            iter: self.tree.iter(),
        }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            iter: self.tree.iter(),
        }
    }

    /// Removes every key-value pair of the map.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.size = 0;
    }

    /// Returns a persistent copy of the map in constant time.
    pub fn snapshot(&self) -> TreeMap<K, V> {
        TreeMap::from_tree(self.tree.clone(), self.size)
    }
}

impl<K: Ord + Clone, V> MutableTreeMap<K, V> {
    /// Returns the set of keys of the map.
    pub fn keys(&self) -> MutableTreeSet<K> {
        let mut builder = SetBuilder::new();
        for (key, _) in self.iter() {
            builder.add_element(key.clone());
        }
        builder.result_mutable()
    }
}

impl<K: Ord + Clone, V: Clone> MutableTreeMap<K, V> {
    /// Returns a builder that produces a `MutableTreeMap<K, V>` through
    /// `MapBuilder::result_mutable`.
    pub fn builder() -> MapBuilder<K, V> {
        MapBuilder::new()
    }

    /// Associates `key` with `value`. If the key already exists, the old value is replaced and
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::MutableTreeMap;
    ///
    /// let mut m = MutableTreeMap::new();
    /// assert_eq!(m.insert(1, 1), None);
    /// assert_eq!(m.insert(1, 2), Some(1));
    /// assert_eq!(m.get(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.tree.replace(MapEntry { key, value }) {
            Some(entry) => Some(entry.value),
            None => {
                self.size += 1;
                None
            },
        }
    }

    /// Removes a key, returning its value if the key was present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let &mut MutableTreeMap {
            ref mut tree,
            ref mut size,
        } = self;
        tree.remove(key).map(|entry| {
            *size -= 1;
            entry.value
        })
    }

    /// Returns a mutable reference to the value associated with a particular key.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::treap::MutableTreeMap;
    ///
    /// let mut m = MutableTreeMap::new();
    /// m.insert(1, 1);
    /// *m.get_mut(&1).unwrap() = 2;
    /// assert_eq!(m.get(&1), Some(&2));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.tree.get_mut(key).map(|entry| &mut entry.value)
    }

    /// Replaces the value associated with `key` by `f` applied to it, returning the old value.
    pub fn update<F>(&mut self, key: &K, f: F) -> Option<V>
    where
        F: FnOnce(&V) -> V,
    {
        self.get_mut(key).map(|value| {
            let new_value = f(value);
            mem::replace(value, new_value)
        })
    }

    pub fn get_or_else(&self, key: &K, default: V) -> V {
        Map::get_or_else(self, key, default)
    }
}

impl<K: Ord + fmt::Debug, V> MutableTreeMap<K, V> {
    /// Writes the topology of the underlying treap in Graphviz `dot` format.
    pub fn write_dot<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        dot::write_dot(&self.tree, writer)
    }

    /// Writes the topology of the underlying treap in Graphviz `dot` format to a file.
    pub fn dump_dot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        dot::dump_dot(&self.tree, path)
    }
}

impl<K: Ord, V> Default for MutableTreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Debug for MutableTreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V: PartialEq> PartialEq for MutableTreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<K: Ord, V: Eq> Eq for MutableTreeMap<K, V> {}

impl<K: Ord + Clone, V: Clone> FromIterator<(K, V)> for MutableTreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut builder = MapBuilder::new();
        for (key, value) in iter {
            builder.add_element(key, value);
        }
        builder.result_mutable()
    }
}

impl<K: Ord + Clone, V: Clone> Extend<(K, V)> for MutableTreeMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord + Clone, V: Clone> Map<K, V> for MutableTreeMap<K, V> {
    type Builder = MapBuilder<K, V>;
    type KeySet = MutableTreeSet<K>;

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
        MutableTreeMap::keys(self)
    }
}

impl<K: Ord + Clone, V: Clone> IntoIterator for MutableTreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = MapIntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        MapIntoIter {
            iter: self.tree.into_iter(),
        }
    }
}

impl<'a, K: 'a + Ord, V: 'a> IntoIterator for &'a MutableTreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = MapIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
