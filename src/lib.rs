pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::directory_service::DirectoryService;
pub use app::gateway::{HttpSearchGateway, ImageSearchGateway, SearchGateway};
pub use domain::{
    DirectoryError, ImageFile, NewPerson, PersonRecord, SearchLogEntry, SearchType,
};
pub use storage::{
    BlobStore, DirectoryStore, FsBlobStore, MemoryBlobStore, MemoryDirectoryStore,
    PostgresDirectoryStore,
};
