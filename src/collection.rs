//! Capabilities shared by the collections of the crate, and set algebra written against them.
//!
//! The set operations only rely on iteration, membership tests and a builder for the result, so
//! they work across any pair of `Set` implementations.

/// A one-shot accumulator producing a collection of type `C`.
pub trait Builder<T, C> {
    /// Adds an element, returning `true` if the collection being built grew.
    fn add_element(&mut self, element: T) -> bool;

    /// Consumes the builder and returns the built collection.
    fn result(self) -> C;
}

/// An ordered collection of unique elements.
pub trait Set<T>: Sized {
    type Builder: Builder<T, Self>;

    fn builder() -> Self::Builder;

    fn contains(&self, element: &T) -> bool;

    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns the elements of the set in order.
    fn elements<'a>(&'a self) -> Box<dyn Iterator<Item = &'a T> + 'a>
    where
        T: 'a;
}

/// An ordered association of unique keys to values.
pub trait Map<K, V>: Sized {
    type Builder: Builder<(K, V), Self>;
    type KeySet: Set<K>;

    fn builder() -> Self::Builder;

    fn get(&self, key: &K) -> Option<&V>;

    fn size(&self) -> usize;

    fn keys(&self) -> Self::KeySet;

    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns a copy of the value associated with `key`, or `default` if the key is absent.
    fn get_or_else(&self, key: &K, default: V) -> V
    where
        V: Clone,
    {
        match self.get(key) {
            Some(value) => value.clone(),
            None => default,
        }
    }
}

/// Returns the elements found in either set.
pub fn union<T, S, O>(left: &S, right: &O) -> S
where
    T: Clone,
    S: Set<T>,
    O: Set<T>,
{
    let mut builder = S::builder();
    for element in left.elements() {
        builder.add_element(element.clone());
    }
    for element in right.elements() {
        if !left.contains(element) {
            builder.add_element(element.clone());
        }
    }
    builder.result()
}

/// Returns the elements of `left` that are also found in `right`.
pub fn intersection<T, S, O>(left: &S, right: &O) -> S
where
    T: Clone,
    S: Set<T>,
    O: Set<T>,
{
    let mut builder = S::builder();
    for element in left.elements() {
        if right.contains(element) {
            builder.add_element(element.clone());
        }
    }
    builder.result()
}

/// Returns the elements of `left` that are not found in `right`.
pub fn difference<T, S, O>(left: &S, right: &O) -> S
where
    T: Clone,
    S: Set<T>,
    O: Set<T>,
{
    let mut builder = S::builder();
    for element in left.elements() {
        if !right.contains(element) {
            builder.add_element(element.clone());
        }
    }
    builder.result()
}

#[cfg(test)]
mod tests {
    use super::{difference, intersection, union, Map, Set};
    use crate::treap::{MutableTreeSet, TreeMap, TreeSet};

    #[test]
    fn test_mixed_operands() {
        let left: TreeSet<u32> = vec![1, 3, 5, 7].into_iter().collect();
        let right: MutableTreeSet<u32> = vec![2, 3, 4, 5].into_iter().collect();

        let all: TreeSet<u32> = union(&left, &right);
        let both: MutableTreeSet<u32> = intersection(&right, &left);
        let only_left: TreeSet<u32> = difference(&left, &right);

        assert_eq!(all.iter().cloned().collect::<Vec<u32>>(), vec![1, 2, 3, 4, 5, 7]);
        assert_eq!(Set::size(&all), 6);
        assert_eq!(both.iter().cloned().collect::<Vec<u32>>(), vec![3, 5]);
        assert_eq!(only_left.iter().cloned().collect::<Vec<u32>>(), vec![1, 7]);
    }

    #[test]
    fn test_empty_operands() {
        let empty: TreeSet<u32> = TreeSet::new();
        let full: TreeSet<u32> = vec![1, 2].into_iter().collect();

        assert_eq!(Set::size(&union(&empty, &full)), 2);
        assert!(Set::is_empty(&intersection(&full, &empty)));
        assert_eq!(Set::size(&difference(&full, &empty)), 2);
    }

    #[test]
    fn test_get_or_else() {
        let map: TreeMap<u32, &str> = vec![(3, "c"), (1, "a"), (2, "b")].into_iter().collect();
        assert_eq!(map.get_or_else(&2, "?"), "b");
        assert_eq!(map.get_or_else(&9, "?"), "?");
        assert!(Map::contains_key(&map, &1));
    }
}
