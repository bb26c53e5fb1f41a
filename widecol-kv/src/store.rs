use std::collections::BTreeMap;
use std::fmt::Debug;

use bytes::Bytes;
use parking_lot::RwLock;
use widecol_error::WidecolResult;

/// An ordered byte-keyed store that fallback fields write through.
///
/// Implementations own their synchronisation, so both operations take `&self`. Failures are
/// reported as storage backend errors and are never retried by the caller.
pub trait KvStore: Debug {
    /// Store `value` under `key`, replacing any previous value.
    fn put(&self, key: &[u8], value: &[u8]) -> WidecolResult<()>;

    /// Fetch the value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &[u8]) -> WidecolResult<Option<Bytes>>;
}

/// An in-memory ordered store.
///
/// Nothing is persisted; the contents live exactly as long as the store.
#[derive(Debug, Default)]
pub struct MemKvStore {
    entries: RwLock<BTreeMap<Bytes, Bytes>>,
}

impl MemKvStore {
    /// Create an empty store.
    pub fn new() -> Self {
        log::debug!("Created in-memory key-value store");
        Self::default()
    }

    /// The number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// All keys in ascending byte order.
    pub fn keys(&self) -> Vec<Bytes> {
        self.entries.read().keys().cloned().collect()
    }
}

impl KvStore for MemKvStore {
    fn put(&self, key: &[u8], value: &[u8]) -> WidecolResult<()> {
        self.entries
            .write()
            .insert(Bytes::copy_from_slice(key), Bytes::copy_from_slice(value));
        Ok(())
    }

    fn get(&self, key: &[u8]) -> WidecolResult<Option<Bytes>> {
        Ok(self.entries.read().get(key).cloned())
    }
}
