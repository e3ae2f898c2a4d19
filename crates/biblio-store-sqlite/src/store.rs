//! [`SqliteStore`]: the storage layer of per-table CRUD primitives.

use std::path::Path;

use biblio_core::{Author, Book, Loan, Member};
use rusqlite::types::Value;

use crate::{
  Result,
  repository::SqliteRepository,
  schema::SCHEMA,
  table::{
    Table, delete_all_sql, delete_by_id_sql, insert_sql, select_all_sql, update_sql,
    upsert_sql,
  },
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Biblioteca store backed by a single SQLite file.
///
/// All statements run on the connection's own thread, one at a time, so each
/// primitive is atomic and calls are serialised in arrival order. Cloning is
/// cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::info!(path = %path.display(), "opened store");
    Ok(store)
  }

  /// Open a throwaway in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Repositories ──────────────────────────────────────────────────────────

  /// A repository façade over the table of `T`, sharing this connection.
  pub fn repository<T: Table>(&self) -> SqliteRepository<T> { SqliteRepository::new(self.clone()) }

  pub fn authors(&self) -> SqliteRepository<Author> { self.repository() }

  pub fn books(&self) -> SqliteRepository<Book> { self.repository() }

  pub fn members(&self) -> SqliteRepository<Member> { self.repository() }

  pub fn loans(&self) -> SqliteRepository<Loan> { self.repository() }

  // ── Primitives ────────────────────────────────────────────────────────────

  /// Insert `record` and return its id.
  ///
  /// The sentinel id lets SQLite assign the next one; it never reuses an id
  /// it handed out before. An explicit id replaces any row already holding
  /// it.
  pub async fn insert<T: Table>(&self, record: T) -> Result<i64> {
    let mut values = record.values();

    let id = if record.is_new() {
      let sql = insert_sql::<T>();
      self
        .conn
        .call(move |conn| {
          conn.execute(&sql, rusqlite::params_from_iter(values))?;
          Ok(conn.last_insert_rowid())
        })
        .await?
    } else {
      let id = record.id();
      values.insert(0, Value::Integer(id));
      let sql = upsert_sql::<T>();
      self
        .conn
        .call(move |conn| {
          conn.execute(&sql, rusqlite::params_from_iter(values))?;
          Ok(id)
        })
        .await?
    };

    tracing::debug!(table = T::TABLE, id, "inserted");
    Ok(id)
  }

  /// Overwrite the row with `record.id()`. Returns the number of rows
  /// changed, which is `0` when no such row exists; nothing is created then.
  pub async fn update<T: Table>(&self, record: T) -> Result<usize> {
    let id = record.id();
    let mut values = record.values();
    values.push(Value::Integer(id));
    let sql = update_sql::<T>();

    let changed = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql, rusqlite::params_from_iter(values))?))
      .await?;

    tracing::debug!(table = T::TABLE, id, changed, "updated");
    Ok(changed)
  }

  /// Delete the row with `id`; returns the number of rows removed.
  pub async fn delete_by_id<T: Table>(&self, id: i64) -> Result<usize> {
    let sql = delete_by_id_sql::<T>();

    let removed = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql, rusqlite::params![id])?))
      .await?;

    tracing::debug!(table = T::TABLE, id, removed, "deleted");
    Ok(removed)
  }

  /// Delete every row of `T`'s table.
  pub async fn delete_all<T: Table>(&self) -> Result<usize> {
    let sql = delete_all_sql::<T>();

    let removed = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql, [])?))
      .await?;

    tracing::debug!(table = T::TABLE, removed, "cleared");
    Ok(removed)
  }

  /// Every row of `T`'s table, ordered by id.
  pub async fn get_all<T: Table>(&self) -> Result<Vec<T>> {
    let sql = select_all_sql::<T>();

    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], |row| T::from_row(row))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    tracing::debug!(table = T::TABLE, count = rows.len(), "listed");
    Ok(rows)
  }

  // ── Freed book ids ────────────────────────────────────────────────────────

  pub(crate) async fn freed_book_ids(&self) -> Result<Vec<i64>> {
    let ids = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT libro_id FROM libros_ids_liberados ORDER BY libro_id")?;
        let ids = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<i64>>>()?;
        Ok(ids)
      })
      .await?;
    Ok(ids)
  }

  pub(crate) async fn release_book_id(&self, id: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO libros_ids_liberados (libro_id) VALUES (?1)",
          rusqlite::params![id],
        )?;
        Ok(())
      })
      .await?;
    tracing::debug!(id, "released book id");
    Ok(())
  }

  /// Replace the whole freed-id set in one transaction.
  pub(crate) async fn replace_freed_book_ids(&self, ids: Vec<i64>) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM libros_ids_liberados", [])?;
        {
          let mut stmt =
            tx.prepare("INSERT INTO libros_ids_liberados (libro_id) VALUES (?1)")?;
          for id in &ids {
            stmt.execute(rusqlite::params![id])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
