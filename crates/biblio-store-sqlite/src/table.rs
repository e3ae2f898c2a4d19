//! Mapping between domain entities and their SQLite tables.
//!
//! Each entity names its table, its id column and its data columns, and knows
//! how to flatten itself into column values and rebuild itself from a row.
//! Rows are always selected as `id, <columns...>` in declaration order.

use biblio_core::{Author, Book, Entity, Loan, Member};
use rusqlite::{Row, types::Value};

/// An entity with a dedicated table.
pub trait Table: Entity {
  const TABLE:     &'static str;
  const ID_COLUMN: &'static str;
  /// Data columns, excluding the id.
  const COLUMNS:   &'static [&'static str];

  /// Column values in [`COLUMNS`](Self::COLUMNS) order.
  fn values(&self) -> Vec<Value>;

  /// Rebuild from a row laid out as `id, <COLUMNS...>`.
  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

// ─── Entity tables ───────────────────────────────────────────────────────────

impl Table for Author {
  const TABLE:     &'static str = "autores";
  const ID_COLUMN: &'static str = "autor_id";
  const COLUMNS:   &'static [&'static str] = &["nombre", "apellido"];

  fn values(&self) -> Vec<Value> {
    vec![self.first_name.clone().into(), self.last_name.clone().into()]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      first_name: row.get(1)?,
      last_name:  row.get(2)?,
    })
  }
}

impl Table for Book {
  const TABLE:     &'static str = "libros";
  const ID_COLUMN: &'static str = "libro_id";
  const COLUMNS:   &'static [&'static str] = &["titulo", "genero", "autor_id"];

  fn values(&self) -> Vec<Value> {
    vec![
      self.title.clone().into(),
      self.genre.clone().into(),
      self.author_id.into(),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:        row.get(0)?,
      title:     row.get(1)?,
      genre:     row.get(2)?,
      author_id: row.get(3)?,
    })
  }
}

impl Table for Member {
  const TABLE:     &'static str = "miembros";
  const ID_COLUMN: &'static str = "miembro_id";
  const COLUMNS:   &'static [&'static str] = &["nombre", "apellido", "fecha_inscripcion"];

  fn values(&self) -> Vec<Value> {
    vec![
      self.first_name.clone().into(),
      self.last_name.clone().into(),
      self.enrollment_date.clone().into(),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      first_name:      row.get(1)?,
      last_name:       row.get(2)?,
      enrollment_date: row.get(3)?,
    })
  }
}

impl Table for Loan {
  const TABLE:     &'static str = "prestamos";
  const ID_COLUMN: &'static str = "prestamo_id";
  const COLUMNS:   &'static [&'static str] =
    &["libro_id", "miembro_id", "fechaPrestamo", "fechaDevolucion"];

  fn values(&self) -> Vec<Value> {
    vec![
      self.book_id.into(),
      self.member_id.into(),
      self.loan_date.clone().into(),
      self.return_date.clone().into(),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      book_id:     row.get(1)?,
      member_id:   row.get(2)?,
      loan_date:   row.get(3)?,
      return_date: row.get(4)?,
    })
  }
}

// ─── SQL builders ────────────────────────────────────────────────────────────

fn placeholders(from: usize, count: usize) -> String {
  (from..from + count)
    .map(|i| format!("?{i}"))
    .collect::<Vec<_>>()
    .join(", ")
}

/// Insert without an id; SQLite assigns the next one.
pub(crate) fn insert_sql<T: Table>() -> String {
  format!(
    "INSERT INTO {} ({}) VALUES ({})",
    T::TABLE,
    T::COLUMNS.join(", "),
    placeholders(1, T::COLUMNS.len()),
  )
}

/// Insert with an explicit id (`?1`), replacing any row that holds it.
pub(crate) fn upsert_sql<T: Table>() -> String {
  format!(
    "INSERT OR REPLACE INTO {} ({}, {}) VALUES ({})",
    T::TABLE,
    T::ID_COLUMN,
    T::COLUMNS.join(", "),
    placeholders(1, T::COLUMNS.len() + 1),
  )
}

/// Column values bind `?1..?n`; the id binds `?n+1`.
pub(crate) fn update_sql<T: Table>() -> String {
  let assignments = T::COLUMNS
    .iter()
    .enumerate()
    .map(|(i, column)| format!("{column} = ?{}", i + 1))
    .collect::<Vec<_>>()
    .join(", ");
  format!(
    "UPDATE {} SET {assignments} WHERE {} = ?{}",
    T::TABLE,
    T::ID_COLUMN,
    T::COLUMNS.len() + 1,
  )
}

pub(crate) fn delete_by_id_sql<T: Table>() -> String {
  format!("DELETE FROM {} WHERE {} = ?1", T::TABLE, T::ID_COLUMN)
}

pub(crate) fn delete_all_sql<T: Table>() -> String { format!("DELETE FROM {}", T::TABLE) }

pub(crate) fn select_all_sql<T: Table>() -> String {
  format!(
    "SELECT {}, {} FROM {} ORDER BY {}",
    T::ID_COLUMN,
    T::COLUMNS.join(", "),
    T::TABLE,
    T::ID_COLUMN,
  )
}
