//! Probabilistic binary search tree where each node also maintains the heap invariant.
//!
//! Nodes live in an index-based pool rather than behind individual allocations. The persistent
//! collections share their pool on clone and copy it on the first write, while the mutable
//! collections update it in place.

mod builder;
mod dot;
mod entry;
mod iter;
mod map;
mod mutable_map;
mod mutable_set;
mod node;
mod serialize;
mod set;
mod tree;

pub use self::builder::TreeBuilder;
pub use self::dot::{dump_dot, write_dot};
pub use self::entry::{Entry, MapEntry, SetEntry};
pub use self::iter::{IntoIter, Iter};
pub use self::map::{MapBuilder, MapIntoIter, MapIter, TreeMap, Values};
pub use self::mutable_map::MutableTreeMap;
pub use self::mutable_set::MutableTreeSet;
pub use self::node::Node;
pub use self::set::{SetBuilder, SetIntoIter, SetIter, TreeSet};
pub use self::tree::{BinaryTree, Pool};
