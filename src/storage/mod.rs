//! Persistence seams: the directory store (`persons`, `search_logs`) and the
//! blob store holding uploaded photos.

pub mod blob;
pub mod directory;
pub mod memory;
pub mod postgres;

pub use blob::{BlobStore, FsBlobStore, MemoryBlobStore};
pub use directory::DirectoryStore;
pub use memory::{MemoryDirectoryStore, StoreOp};
pub use postgres::PostgresDirectoryStore;
