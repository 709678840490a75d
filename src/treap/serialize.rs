//! `serde` support for the treap collections.
//!
//! Sets are written as sequences and maps as maps, both in ascending key order. Deserialization
//! rebuilds the collection through its builder, so a duplicated element or key keeps a single
//! entry.

use crate::collection::{Builder, Map, Set};
use crate::treap::map::TreeMap;
use crate::treap::mutable_map::MutableTreeMap;
use crate::treap::mutable_set::MutableTreeSet;
use crate::treap::set::TreeSet;
use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;
use std::marker::PhantomData;

struct SetVisitor<S, T> {
    marker: PhantomData<(S, T)>,
}

impl<'de, S, T> Visitor<'de> for SetVisitor<S, T>
where
    S: Set<T>,
    T: Deserialize<'de>,
{
    type Value = S;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence of elements")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut builder = S::builder();
        while let Some(element) = seq.next_element()? {
            builder.add_element(element);
        }
        Ok(builder.result())
    }
}

struct MapVisitor<M, K, V> {
    marker: PhantomData<(M, K, V)>,
}

impl<'de, M, K, V> Visitor<'de> for MapVisitor<M, K, V>
where
    M: Map<K, V>,
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    type Value = M;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut builder = M::builder();
        while let Some(entry) = access.next_entry()? {
            builder.add_element(entry);
        }
        Ok(builder.result())
    }
}

macro_rules! impl_set_serde {
    ($set:ident) => {
        impl<T: Ord + Serialize> Serialize for $set<T> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut seq = serializer.serialize_seq(Some(self.size()))?;
                for element in self.iter() {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
        }

        impl<'de, T: Ord + Clone + Deserialize<'de>> Deserialize<'de> for $set<T> {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_seq(SetVisitor {
                    marker: PhantomData,
                })
            }
        }
    };
}

macro_rules! impl_map_serde {
    ($map:ident) => {
        impl<K: Ord + Serialize, V: Serialize> Serialize for $map<K, V> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.size()))?;
                for (key, value) in self.iter() {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }

        impl<'de, K, V> Deserialize<'de> for $map<K, V>
        where
            K: Ord + Clone + Deserialize<'de>,
            V: Clone + Deserialize<'de>,
        {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_map(MapVisitor {
                    marker: PhantomData,
                })
            }
        }
    };
}

impl_set_serde!(TreeSet);
impl_set_serde!(MutableTreeSet);
impl_map_serde!(TreeMap);
impl_map_serde!(MutableTreeMap);

#[cfg(test)]
mod tests {
    use crate::treap::{MutableTreeMap, MutableTreeSet, TreeMap, TreeSet};
    use serde_test::{assert_de_tokens, assert_tokens, Token};

    #[test]
    fn test_set_tokens() {
        let set = TreeSet::from_slice(&[3, 1, 2]);
        assert_tokens(
            &set,
            &[
                Token::Seq { len: Some(3) },
                Token::I32(1),
                Token::I32(2),
                Token::I32(3),
                Token::SeqEnd,
            ],
        );
    }

    #[test]
    fn test_empty_set_tokens() {
        let set: MutableTreeSet<i32> = MutableTreeSet::new();
        assert_tokens(&set, &[Token::Seq { len: Some(0) }, Token::SeqEnd]);
    }

    #[test]
    fn test_set_duplicates_collapse() {
        let set: TreeSet<i32> = vec![1, 2].into_iter().collect();
        assert_de_tokens(
            &set,
            &[
                Token::Seq { len: Some(3) },
                Token::I32(2),
                Token::I32(1),
                Token::I32(2),
                Token::SeqEnd,
            ],
        );
    }

    #[test]
    fn test_map_tokens() {
        let map = TreeMap::from_slice(&[(2, 'b'), (1, 'a')]);
        assert_tokens(
            &map,
            &[
                Token::Map { len: Some(2) },
                Token::I32(1),
                Token::Char('a'),
                Token::I32(2),
                Token::Char('b'),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_map_last_value_wins() {
        let mut map = MutableTreeMap::new();
        map.insert(1, 'c');
        assert_de_tokens(
            &map,
            &[
                Token::Map { len: Some(2) },
                Token::I32(1),
                Token::Char('a'),
                Token::I32(1),
                Token::Char('c'),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_bincode_round_trip() {
        let map: TreeMap<u32, String> = (0..100).map(|i| (i, i.to_string())).collect();
        let bytes = bincode::serialize(&map).unwrap();
        let decoded: TreeMap<u32, String> = bincode::deserialize(&bytes).unwrap();
        assert_eq!(decoded, map);
    }
}
