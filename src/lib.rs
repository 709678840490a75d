//! Ordered sets and maps backed by a treap, in persistent and mutable flavours.
//!
//! # Examples
//!
//! ```
//! use toolchest::treap::TreeSet;
//!
//! let empty = TreeSet::new();
//! let one = empty.insert(1);
//! let two = one.insert(2);
//!
//! assert_eq!(empty.size(), 0);
//! assert_eq!(one.iter().collect::<Vec<&u32>>(), vec![&1]);
//! assert_eq!(two.iter().collect::<Vec<&u32>>(), vec![&1, &2]);
//! ```

pub mod collection;
mod config;
pub mod error;
pub mod persist;
pub mod pool;
pub mod treap;

pub use self::config::Config;
pub use self::error::{Error, Result};
