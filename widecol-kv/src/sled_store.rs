use std::fmt::{Debug, Formatter};
use std::path::Path;

use bytes::Bytes;
use widecol_error::{WidecolResult, widecol_err};

use crate::KvStore;

/// A [`KvStore`] backed by a sled database.
pub struct SledKvStore {
    db: ::sled::Db,
}

impl SledKvStore {
    /// Open a temporary database that is removed when the store is dropped.
    pub fn temporary() -> WidecolResult<Self> {
        let db = ::sled::Config::new()
            .temporary(true)
            .open()
            .map_err(|err| widecol_err!(StorageBackend: "failed to open temporary sled db: {err}"))?;
        log::debug!("Opened temporary sled store");
        Ok(Self { db })
    }

    /// Open (or create) a database at `path`.
    pub fn open(path: impl AsRef<Path>) -> WidecolResult<Self> {
        let path = path.as_ref();
        let db = ::sled::open(path).map_err(|err| {
            widecol_err!(StorageBackend: "failed to open sled db at {}: {err}", path.display())
        })?;
        log::debug!("Opened sled store at {}", path.display());
        Ok(Self { db })
    }

    /// The number of stored keys.
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    /// All keys in ascending byte order.
    pub fn keys(&self) -> WidecolResult<Vec<Bytes>> {
        self.db
            .iter()
            .keys()
            .map(|key| {
                key.map(|k| Bytes::copy_from_slice(&k))
                    .map_err(|err| widecol_err!(StorageBackend: "sled scan failed: {err}"))
            })
            .collect()
    }
}

impl Debug for SledKvStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SledKvStore")
            .field("len", &self.db.len())
            .finish()
    }
}

impl KvStore for SledKvStore {
    fn put(&self, key: &[u8], value: &[u8]) -> WidecolResult<()> {
        self.db
            .insert(key, value)
            .map_err(|err| widecol_err!(StorageBackend: "sled put failed: {err}"))?;
        Ok(())
    }

    fn get(&self, key: &[u8]) -> WidecolResult<Option<Bytes>> {
        self.db
            .get(key)
            .map(|value| value.map(|v| Bytes::copy_from_slice(&v)))
            .map_err(|err| widecol_err!(StorageBackend: "sled get failed: {err}"))
    }
}
