//! Git blob object
//!
//! Blobs store file content. They contain only the raw file data,
//! without any metadata like filename or permissions (those live in tree entries).
//!
//! ## Format
//!
//! On disk: `blob <size>\0<content>`
//! In memory: the raw content bytes

use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::{BufMut, Bytes, BytesMut};
use derive_new::new;

/// Git blob object representing file content
///
/// Each unique file content is stored as a blob, identified by its SHA-1 hash.
/// Content is kept as raw bytes: binary files are diffed too.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn into_content(self) -> Bytes {
        self.content
    }
}

impl From<&str> for Blob {
    fn from(content: &str) -> Self {
        Blob::new(Bytes::copy_from_slice(content.as_bytes()))
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let header = format!("{} {}\0", self.object_type().as_str(), self.content.len());

        let mut blob_bytes = BytesMut::with_capacity(header.len() + self.content.len());
        blob_bytes.put_slice(header.as_bytes());
        blob_bytes.put_slice(&self.content);

        Ok(blob_bytes.freeze())
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }
}
