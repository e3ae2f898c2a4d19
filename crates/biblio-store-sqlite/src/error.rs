//! Error type for `biblio-store-sqlite`.

use thiserror::Error;

/// A storage failure, returned unchanged through every repository call.
#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// No freed id is left and the highest book id is already `i64::MAX`.
  #[error("no book id left to assign")]
  BookIdsExhausted,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
