//! Journal entries: their document format and how they are stored.

pub mod document;
pub mod repository;

pub use document::EntryDocument;
pub use repository::{Entry, EntryRepository};
