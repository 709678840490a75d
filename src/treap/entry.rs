/// A payload stored in a tree node, ordered by the key it exposes.
pub trait Entry {
    type Key: Ord;
    fn get_key(&self) -> &Self::Key;
}

/// The payload of a set: the element is its own key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SetEntry<T>(pub T);

impl<T: Ord> Entry for SetEntry<T> {
    type Key = T;
    fn get_key(&self) -> &Self::Key {
        &self.0
    }
}

/// The payload of a map. Only the key takes part in ordering.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MapEntry<T, U> {
    pub key: T,
    pub value: U,
}

impl<T: Ord, U> Entry for MapEntry<T, U> {
    type Key = T;
    fn get_key(&self) -> &Self::Key {
        &self.key
    }
}
