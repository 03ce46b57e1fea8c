use crate::areas::database::{Database, ObjectStore};
use crate::areas::memory_database::MemoryDatabase;
use std::cell::{RefCell, RefMut};
use std::path::Path;
use std::sync::Arc;

/// An object space paired with the sink commands write to
///
/// Without an objects directory, blobs hashed from snapshots only live in
/// memory for the duration of the command.
pub struct Repository {
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Arc<dyn ObjectStore>,
}

impl Repository {
    pub fn new(objects: Option<&Path>, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let database: Arc<dyn ObjectStore> = match objects {
            Some(path) => {
                if !path.exists() {
                    std::fs::create_dir_all(path)?;
                }
                Arc::new(Database::new(path.canonicalize()?.into_boxed_path()))
            }
            None => Arc::new(MemoryDatabase::new()),
        };

        Ok(Repository {
            writer: RefCell::new(writer),
            database,
        })
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> Arc<dyn ObjectStore> {
        self.database.clone()
    }
}
