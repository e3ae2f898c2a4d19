//! [`SqliteRepository`] — the SQLite implementation of [`Repository`].

use std::marker::PhantomData;

use biblio_core::{Author, Book, Loan, Member, Repository};

use crate::{Error, Result, SqliteStore, table::Table};

pub type AuthorRepository = SqliteRepository<Author>;
pub type BookRepository = SqliteRepository<Book>;
pub type MemberRepository = SqliteRepository<Member>;
pub type LoanRepository = SqliteRepository<Loan>;

/// Per-entity façade over a shared [`SqliteStore`].
///
/// Holds nothing but the store handle: each call is a single delegated
/// primitive, run on the connection thread while the calling task waits.
pub struct SqliteRepository<T> {
  store:  SqliteStore,
  _table: PhantomData<fn() -> T>,
}

impl<T> Clone for SqliteRepository<T> {
  fn clone(&self) -> Self {
    Self {
      store:  self.store.clone(),
      _table: PhantomData,
    }
  }
}

impl<T: Table> SqliteRepository<T> {
  pub fn new(store: SqliteStore) -> Self {
    Self {
      store,
      _table: PhantomData,
    }
  }
}

// ─── Repository impl ─────────────────────────────────────────────────────────

impl<T: Table> Repository<T> for SqliteRepository<T> {
  type Error = Error;

  async fn insert(&self, entity: T) -> Result<i64> { self.store.insert(entity).await }

  async fn update(&self, entity: T) -> Result<()> {
    self.store.update(entity).await?;
    Ok(())
  }

  async fn delete(&self, entity: &T) -> Result<()> {
    self.store.delete_by_id::<T>(entity.id()).await?;
    Ok(())
  }

  async fn delete_by_id(&self, id: i64) -> Result<()> {
    self.store.delete_by_id::<T>(id).await?;
    Ok(())
  }

  async fn delete_all(&self) -> Result<()> {
    self.store.delete_all::<T>().await?;
    Ok(())
  }

  async fn get_all(&self) -> Result<Vec<T>> { self.store.get_all().await }
}
