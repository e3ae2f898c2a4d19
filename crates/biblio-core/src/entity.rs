//! The four persisted record types.
//!
//! Every entity carries an integer id. The value [`NEW_ID`] asks the store to
//! assign one on insert; any other value is persisted verbatim. Id fields that
//! point at other tables (`author_id`, `book_id`, `member_id`) are soft
//! references: nothing checks that the referenced row exists.

use serde::{Deserialize, Serialize};

use crate::{
  Result, ValidationError,
  date::{normalize_date, parse_date},
};

/// Sentinel id meaning "let the store assign one".
pub const NEW_ID: i64 = 0;

/// Behaviour shared by every record type.
pub trait Entity: Clone + Send + Sync + 'static {
  /// Human-readable name used in logs and messages.
  const KIND: &'static str;

  fn id(&self) -> i64;

  /// Return the same record carrying `id`.
  fn with_id(self, id: i64) -> Self;

  fn is_new(&self) -> bool { self.id() == NEW_ID }
}

pub(crate) fn require_positive(field: &'static str, value: i64) -> Result<i64> {
  if value > 0 {
    Ok(value)
  } else {
    Err(ValidationError::NonPositiveId { field, value })
  }
}

// ─── Author ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
  pub id:         i64,
  pub first_name: String,
  pub last_name:  String,
}

impl Author {
  pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
    Self {
      id:         NEW_ID,
      first_name: first_name.into(),
      last_name:  last_name.into(),
    }
  }
}

// ─── Book ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
  pub id:        i64,
  pub title:     String,
  pub genre:     String,
  /// Soft reference to [`Author::id`].
  pub author_id: i64,
}

impl Book {
  pub fn new(title: impl Into<String>, genre: impl Into<String>, author_id: i64) -> Self {
    Self {
      id: NEW_ID,
      title: title.into(),
      genre: genre.into(),
      author_id,
    }
  }
}

// ─── Member ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
  pub id:              i64,
  pub first_name:      String,
  pub last_name:       String,
  /// `YYYY-MM-DD`.
  pub enrollment_date: String,
}

impl Member {
  /// Build a new member, rejecting an unparseable enrollment date.
  pub fn new(
    first_name: impl Into<String>,
    last_name: impl Into<String>,
    enrollment_date: &str,
  ) -> Result<Self> {
    Ok(Self {
      id:              NEW_ID,
      first_name:      first_name.into(),
      last_name:       last_name.into(),
      enrollment_date: normalize_date("enrollment_date", enrollment_date)?,
    })
  }
}

// ─── Loan ────────────────────────────────────────────────────────────────────

/// A book lent to a member.
///
/// Overlapping loans of one book, a return date earlier than the loan date,
/// and references to books or members that do not exist are all accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
  pub id:          i64,
  /// Soft reference to [`Book::id`].
  pub book_id:     i64,
  /// Soft reference to [`Member::id`].
  pub member_id:   i64,
  /// `YYYY-MM-DD`.
  pub loan_date:   String,
  /// `YYYY-MM-DD`.
  pub return_date: String,
}

impl Loan {
  /// Build a loan, validating both ids and both dates.
  ///
  /// A loan that fails here never reaches the store.
  pub fn new(
    id: i64,
    book_id: i64,
    member_id: i64,
    loan_date: &str,
    return_date: &str,
  ) -> Result<Self> {
    Ok(Self {
      id,
      book_id: require_positive("book_id", book_id)?,
      member_id: require_positive("member_id", member_id)?,
      loan_date: normalize_date("loan_date", loan_date)?,
      return_date: normalize_date("return_date", return_date)?,
    })
  }

  /// `true` when both dates parse and the return date precedes the loan date.
  pub fn is_return_before_loan(&self) -> bool {
    match (
      parse_date("loan_date", &self.loan_date),
      parse_date("return_date", &self.return_date),
    ) {
      (Ok(lent), Ok(due)) => due < lent,
      _ => false,
    }
  }
}

// ─── Entity impls ────────────────────────────────────────────────────────────

macro_rules! impl_entity {
  ($ty:ty, $kind:literal) => {
    impl Entity for $ty {
      const KIND: &'static str = $kind;

      fn id(&self) -> i64 { self.id }

      fn with_id(self, id: i64) -> Self { Self { id, ..self } }
    }
  };
}

impl_entity!(Author, "author");
impl_entity!(Book, "book");
impl_entity!(Member, "member");
impl_entity!(Loan, "loan");
