//! Construction parameters shared by every treap-backed collection.

use log::warn;
use rand::{SeedableRng, XorShiftRng};
use serde_derive::{Deserialize, Serialize};

/// Parameters used when constructing a tree.
///
/// `capacity` pre-sizes the node pool. `seed` fixes the priority generator so that tree shapes
/// are reproducible; when it is `None` the generator starts from `XorShiftRng::new_unseeded()`.
/// Tree shape only affects running time, never the contents of a collection.
///
/// # Examples
///
/// ```
/// use toolchest::Config;
/// use toolchest::treap::TreeSet;
///
/// let config = Config::new().capacity(128).seed([1, 2, 3, 4]);
/// let set = TreeSet::with_config(&config).insert(1);
/// assert!(set.contains(&1));
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Config {
    pub capacity: usize,
    pub seed: Option<[u32; 4]>,
}

impl Config {
    /// Constructs the default configuration: no pre-sized pool and an unseeded generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of nodes the pool is allocated with.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the seed of the priority generator.
    pub fn seed(mut self, seed: [u32; 4]) -> Self {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn rng(&self) -> XorShiftRng {
        match self.seed {
            Some([0, 0, 0, 0]) => {
                warn!("all-zero seed is not valid for xorshift; using the unseeded generator");
                XorShiftRng::new_unseeded()
            },
            Some(seed) => XorShiftRng::from_seed(seed),
            None => XorShiftRng::new_unseeded(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use rand::Rng;

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = Config::new().seed([7, 7, 7, 7]);
        let mut rng_1 = config.rng();
        let mut rng_2 = config.rng();
        assert_eq!(rng_1.next_u32(), rng_2.next_u32());
    }

    #[test]
    fn test_zero_seed_falls_back() {
        let mut zero = Config::new().seed([0, 0, 0, 0]).rng();
        let mut unseeded = Config::new().rng();
        assert_eq!(zero.next_u32(), unseeded.next_u32());
    }

    #[test]
    fn test_builder_setters() {
        let config = Config::new().capacity(32).seed([1, 2, 3, 4]);
        assert_eq!(config.capacity, 32);
        assert_eq!(config.seed, Some([1, 2, 3, 4]));
    }
}
