//! Reading and writing collections to disk with `bincode`.
//!
//! # Examples
//!
//! ```
//! use toolchest::persist;
//! use toolchest::treap::TreeSet;
//!
//! let path = std::env::temp_dir().join("toolchest_persist_doc.bin");
//! let set = TreeSet::from_slice(&[1, 2, 3]);
//! persist::write_to_path(&set, &path).unwrap();
//!
//! let loaded: TreeSet<u32> = persist::read_from_path(&path).unwrap();
//! assert_eq!(loaded, set);
//! # std::fs::remove_file(&path).unwrap();
//! ```

use crate::error::Result;
use bincode::{deserialize_from, serialize_into};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Serializes `value` into the file at `path`, replacing its contents.
pub fn write_to_path<T, P>(value: &T, path: P) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let mut writer = BufWriter::new(fs::File::create(path.as_ref())?);
    serialize_into(&mut writer, value)?;
    writer.flush()?;
    debug!("Persisted collection to {:?}.", path.as_ref());
    Ok(())
}

/// Deserializes a value from the file at `path`.
pub fn read_from_path<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let reader = BufReader::new(fs::File::open(path.as_ref())?);
    let value = deserialize_from(reader)?;
    debug!("Loaded collection from {:?}.", path.as_ref());
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{read_from_path, write_to_path};
    use crate::error::Error;
    use crate::treap::{MutableTreeMap, TreeSet};
    use std::env;
    use std::fs;

    #[test]
    fn test_round_trip() {
        let path = env::temp_dir().join("toolchest_persist_round_trip.bin");
        let mut map = MutableTreeMap::new();
        map.insert("a".to_string(), 1u64);
        map.insert("b".to_string(), 2u64);

        write_to_path(&map, &path).unwrap();
        let loaded: MutableTreeMap<String, u64> = read_from_path(&path).unwrap();
        assert_eq!(loaded, map);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let path = env::temp_dir().join("toolchest_persist_missing.bin");
        let _ = fs::remove_file(&path);
        match read_from_path::<TreeSet<u32>, _>(&path) {
            Err(Error::IOError(_)) => {},
            _ => panic!("Expected an IO error."),
        }
    }

    #[test]
    fn test_truncated_file() {
        let path = env::temp_dir().join("toolchest_persist_truncated.bin");
        fs::write(&path, [5u8, 0, 0]).unwrap();
        match read_from_path::<TreeSet<u32>, _>(&path) {
            Err(Error::SerdeError(_)) => {},
            _ => panic!("Expected a serialization error."),
        }
        fs::remove_file(&path).unwrap();
    }
}
