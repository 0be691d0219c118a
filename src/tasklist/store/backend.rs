use super::fs_backend::FsBackend;
use super::mem_backend::MemBackend;
use super::record::Snapshot;
use crate::error::Result;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (file vs memory),
/// while `EntityStore` handles the "what" (ordering, cascades, write serialization).
pub trait StorageBackend: Send + Sync {
    /// Load the full store contents. A store that was never written is empty.
    fn load(&self) -> Result<Snapshot>;

    /// Replace the full store contents.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save(&self, snapshot: &Snapshot) -> Result<()>;

    /// Human readable location, for logs and the CLI.
    fn location(&self) -> String;
}

/// Backend chosen at runtime from configuration.
pub enum Backend {
    File(FsBackend),
    Memory(MemBackend),
}

impl StorageBackend for Backend {
    fn load(&self) -> Result<Snapshot> {
        match self {
            Backend::File(b) => b.load(),
            Backend::Memory(b) => b.load(),
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        match self {
            Backend::File(b) => b.save(snapshot),
            Backend::Memory(b) => b.save(snapshot),
        }
    }

    fn location(&self) -> String {
        match self {
            Backend::File(b) => b.location(),
            Backend::Memory(b) => b.location(),
        }
    }
}

impl From<FsBackend> for Backend {
    fn from(backend: FsBackend) -> Self {
        Backend::File(backend)
    }
}

impl From<MemBackend> for Backend {
    fn from(backend: MemBackend) -> Self {
        Backend::Memory(backend)
    }
}
