//! Library catalog application library
//!
//! Authors and books with field validation, a one-to-many relation resolved
//! by lookup, and an in-memory store.

pub mod catalog;
pub mod error;
pub mod library;
pub mod modules;
pub mod validation;

pub use catalog::{Catalog, ImportReport};
pub use error::{LibraryError, LibraryResult};
pub use library::Library;
pub use modules::authors::models::{Author, AuthorId, AuthorInput};
pub use modules::books::models::{Book, BookId, BookInput};
