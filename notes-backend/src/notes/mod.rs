//! Notes system — a single JSON document holding every note
//!
//! The store owns the document on disk and rewrites it atomically; the service
//! layer implements the CRUD operations the HTTP controllers expose.

pub mod errors;
pub mod file_ops;
pub mod service;
pub mod store;

pub use errors::NotesError;
pub use store::NoteStore;
