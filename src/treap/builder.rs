use crate::config::Config;
use crate::treap::entry::Entry;
use crate::treap::tree::BinaryTree;

/// Accumulates entries into a fresh tree while counting the distinct keys added.
///
/// `finish` consumes the builder, so a finished builder cannot be reused.
pub struct TreeBuilder<E> {
    tree: BinaryTree<E>,
    count: usize,
}

impl<E> TreeBuilder<E> {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        TreeBuilder {
            tree: BinaryTree::with_config(config),
            count: 0,
        }
    }

    /// Returns the number of distinct keys added so far.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the built tree together with its number of entries.
    pub fn finish(self) -> (BinaryTree<E>, usize) {
        (self.tree, self.count)
    }
}

impl<E: Entry + Clone> TreeBuilder<E> {
    /// Adds an entry unless its key is already present. Returns whether the entry was added.
    pub fn add_element(&mut self, entry: E) -> bool {
        let added = self.tree.insert(entry);
        if added {
            self.count += 1;
        }
        added
    }

    /// Adds an entry, overwriting the entry with the same key. Returns whether the key is new.
    pub fn replace_element(&mut self, entry: E) -> bool {
        let added = self.tree.replace(entry).is_none();
        if added {
            self.count += 1;
        }
        added
    }
}

impl<E> Default for TreeBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}
