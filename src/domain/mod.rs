pub mod error;
pub mod filter;
pub mod model;

pub use error::{DirectoryError, Result};
pub use filter::{PersonFilter, SEARCHABLE_FIELDS};
pub use model::{
    ImageFile, NewPerson, NewSearchLog, PersonRecord, SearchLogEntry, SearchType,
    IMAGE_SEARCH_QUERY_MARKER,
};
