//! Index-stable, growable storage for tree nodes.

use log::trace;
use std::cmp;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// Number of slots reserved the first time an empty pool grows.
pub const MIN_CAPACITY: usize = 16;

/// A contiguous pool of objects addressed by `usize` indices.
///
/// Slots are handed out in push order, so an index stays valid until the slot is popped. The
/// pool grows to `MIN_CAPACITY` slots on its first allocation and doubles its capacity whenever
/// it is full afterwards. Cloning a pool copies every live slot into a new pool of the same
/// capacity, keeping every index meaningful in the copy.
///
/// # Examples
///
/// ```
/// use toolchest::pool::NodePool;
///
/// let mut pool = NodePool::new();
///
/// let x = pool.push(1);
/// assert_eq!(pool[x], 1);
///
/// pool[x] += 1;
/// assert_eq!(pool[x], 2);
///
/// assert_eq!(pool.pop(), 2);
/// assert!(pool.is_empty());
/// ```
#[derive(Debug)]
pub struct NodePool<T> {
    slots: Vec<T>,
}

impl<T> NodePool<T> {
    /// Constructs a new, empty `NodePool<T>` without allocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::pool::NodePool;
    ///
    /// let pool: NodePool<u32> = NodePool::new();
    /// assert_eq!(pool.capacity(), 0);
    /// ```
    pub fn new() -> Self {
        NodePool { slots: Vec::new() }
    }

    /// Constructs a new, empty `NodePool<T>` with room for `capacity` objects.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::pool::NodePool;
    ///
    /// let pool: NodePool<u32> = NodePool::with_capacity(64);
    /// assert!(pool.capacity() >= 64);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        NodePool {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Moves `value` into a new slot and returns the slot's index.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::pool::NodePool;
    ///
    /// let mut pool = NodePool::new();
    /// assert_eq!(pool.push('a'), 0);
    /// assert_eq!(pool.push('b'), 1);
    /// ```
    pub fn push(&mut self, value: T) -> usize {
        let capacity = self.slots.capacity();
        if self.slots.len() == capacity {
            let additional = cmp::max(MIN_CAPACITY, capacity);
            trace!("growing node pool from {} to {} slots", capacity, capacity + additional);
            self.slots.reserve_exact(additional);
        }
        self.slots.push(value);
        self.slots.len() - 1
    }

    /// Removes the most recently pushed object and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the pool is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::pool::NodePool;
    ///
    /// let mut pool = NodePool::new();
    /// pool.push(1);
    /// pool.push(2);
    /// assert_eq!(pool.pop(), 2);
    /// assert_eq!(pool.len(), 1);
    /// ```
    pub fn pop(&mut self) -> T {
        match self.slots.pop() {
            Some(value) => value,
            None => panic!("Error: attempting to pop from an empty pool."),
        }
    }

    /// Exchanges the objects stored at two indices.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.slots.swap(i, j);
    }

    /// Returns an immutable reference to the object at `index`, or `None` if the index is out of
    /// bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolchest::pool::NodePool;
    ///
    /// let mut pool = NodePool::new();
    /// let x = pool.push(0);
    /// assert_eq!(pool.get(x), Some(&0));
    /// assert_eq!(pool.get(x + 1), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    /// Returns a mutable reference to the object at `index`, or `None` if the index is out of
    /// bounds.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the number of slots the pool can hold before it grows.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }
}

impl<T: Clone> Clone for NodePool<T> {
    fn clone(&self) -> Self {
        let mut slots = Vec::with_capacity(self.slots.capacity());
        slots.extend(self.slots.iter().cloned());
        NodePool { slots }
    }
}

impl<T> Default for NodePool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for NodePool<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).expect("Error: index out of bounds.")
    }
}

impl<T> IndexMut<usize> for NodePool<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index).expect("Error: index out of bounds.")
    }
}
