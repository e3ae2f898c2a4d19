//! [`BookCatalog`] — book registration with reuse of freed ids.
//!
//! The plain [`BookRepository`] always lets SQLite pick a fresh id. The
//! catalog instead registers each new book under the smallest id freed by an
//! earlier removal, falling back to `max(id) + 1`. Freed ids are kept in the
//! `libros_ids_liberados` table so the pool survives restarts.
//!
//! The steps of one catalog call (read pool, insert, write pool) are separate
//! statements, not one transaction.

use biblio_core::{Book, Entity, Repository, id_pool::IdReusePool};

use crate::{BookRepository, Error, Result, SqliteStore};

#[derive(Clone)]
pub struct BookCatalog {
  store: SqliteStore,
  books: BookRepository,
}

impl BookCatalog {
  pub fn new(store: SqliteStore) -> Self {
    let books = store.books();
    Self { store, books }
  }

  /// The persisted pool of freed ids.
  pub async fn pool(&self) -> Result<IdReusePool> {
    Ok(self.store.freed_book_ids().await?.into_iter().collect())
  }

  /// Register `book`, ignoring its id, and return it with the id it got.
  pub async fn register(&self, book: Book) -> Result<Book> {
    let mut pool = self.pool().await?;
    let in_use = self.books.get_all().await?.into_iter().map(|b| b.id);
    let id = pool.next_id(in_use).ok_or(Error::BookIdsExhausted)?;

    let book = book.with_id(id);
    self.books.insert(book.clone()).await?;
    self.store.replace_freed_book_ids(pool.iter().collect()).await?;

    tracing::debug!(id, "registered book");
    Ok(book)
  }

  /// Remove `book` and free its id.
  pub async fn remove(&self, book: &Book) -> Result<bool> { self.remove_by_id(book.id()).await }

  /// Remove the book with `id` and free the id. Returns `false`, freeing
  /// nothing, when no such book exists.
  pub async fn remove_by_id(&self, id: i64) -> Result<bool> {
    let removed = self.store.delete_by_id::<Book>(id).await? > 0;
    if removed {
      self.store.release_book_id(id).await?;
    }
    Ok(removed)
  }

  /// Remove every book and forget all freed ids, so numbering restarts at 1.
  pub async fn clear(&self) -> Result<()> {
    self.books.delete_all().await?;
    self.store.replace_freed_book_ids(Vec::new()).await
  }

  /// Freed ids in the order they will be reused.
  pub async fn freed_ids(&self) -> Result<Vec<i64>> { self.store.freed_book_ids().await }
}
