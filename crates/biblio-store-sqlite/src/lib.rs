//! SQLite backend for the Biblioteca lending tracker.
//!
//! Wraps [`tokio_rusqlite`] so every storage call runs on the connection's
//! dedicated thread without blocking the async runtime. [`SqliteStore`] holds
//! the per-table primitives; [`SqliteRepository`] is the per-entity façade
//! implementing [`biblio_core::Repository`].

mod catalog;
mod repository;
mod schema;
mod store;
mod table;

pub mod error;

pub use catalog::BookCatalog;
pub use error::{Error, Result};
pub use repository::{
  AuthorRepository, BookRepository, LoanRepository, MemberRepository, SqliteRepository,
};
pub use store::SqliteStore;
pub use table::Table;

#[cfg(test)]
mod tests;
