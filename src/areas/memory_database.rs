use crate::areas::database::{ObjectReader, ObjectStore};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::RwLock;

/// Object space held in memory, keyed by object id
///
/// Used for snapshots that are never persisted (e.g. diffing two plain
/// directories) and in tests.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    objects: RwLock<BTreeMap<ObjectId, Bytes>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.read().map(|objects| objects.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ObjectReader for MemoryDatabase {
    fn open(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let objects = self
            .objects
            .read()
            .map_err(|_| anyhow::anyhow!("Object map lock poisoned"))?;

        objects
            .get(object_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Object {} not found", object_id))
    }

    fn resolve_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        let objects = self
            .objects
            .read()
            .map_err(|_| anyhow::anyhow!("Object map lock poisoned"))?;

        // ids sort lexically, so every match sits in one contiguous run
        Ok(objects
            .range::<str, _>((Bound::Included(prefix.as_str()), Bound::Unbounded))
            .map(|(oid, _)| oid)
            .take_while(|oid| oid.as_ref().starts_with(&prefix))
            .cloned()
            .collect())
    }
}

impl ObjectStore for MemoryDatabase {
    fn store(&self, blob: &Blob) -> anyhow::Result<ObjectId> {
        let object_id = blob.object_id()?;
        let mut objects = self
            .objects
            .write()
            .map_err(|_| anyhow::anyhow!("Object map lock poisoned"))?;

        objects
            .entry(object_id.clone())
            .or_insert_with(|| blob.content().clone());

        Ok(object_id)
    }
}
