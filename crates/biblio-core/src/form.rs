//! Raw user input and its validation into entities.
//!
//! A form holds every field as the text the user typed. `into_entity` checks
//! it the same way for registration (`id = NEW_ID`) and modification (the id
//! of the selected record), so invalid input never reaches a repository.

use serde::Deserialize;

use crate::{
  Author, Book, Loan, Member, Result, ValidationError,
  date::normalize_date,
  entity::require_positive,
};

/// Trimmed, non-blank text.
pub fn require_text(field: &'static str, value: &str) -> Result<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    Err(ValidationError::Blank { field })
  } else {
    Ok(trimmed.to_owned())
  }
}

/// A positive id typed as digits only.
pub fn parse_id(field: &'static str, value: &str) -> Result<i64> {
  let digits = value.trim();
  if digits.is_empty() {
    return Err(ValidationError::Blank { field });
  }
  let not_numeric = || ValidationError::NotNumeric {
    field,
    value: value.to_owned(),
  };
  if !digits.chars().all(|c| c.is_ascii_digit()) {
    return Err(not_numeric());
  }
  let id = digits.parse::<i64>().map_err(|_| not_numeric())?;
  require_positive(field, id)
}

// ─── Forms ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorForm {
  pub first_name: String,
  pub last_name:  String,
}

impl AuthorForm {
  pub fn into_entity(self, id: i64) -> Result<Author> {
    Ok(Author {
      id,
      first_name: require_text("first_name", &self.first_name)?,
      last_name: require_text("last_name", &self.last_name)?,
    })
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookForm {
  pub title:     String,
  pub genre:     String,
  pub author_id: String,
}

impl BookForm {
  pub fn into_entity(self, id: i64) -> Result<Book> {
    Ok(Book {
      id,
      title: require_text("title", &self.title)?,
      genre: require_text("genre", &self.genre)?,
      author_id: parse_id("author_id", &self.author_id)?,
    })
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberForm {
  pub first_name:      String,
  pub last_name:       String,
  pub enrollment_date: String,
}

impl MemberForm {
  pub fn into_entity(self, id: i64) -> Result<Member> {
    Ok(Member {
      id,
      first_name: require_text("first_name", &self.first_name)?,
      last_name: require_text("last_name", &self.last_name)?,
      enrollment_date: normalize_date("enrollment_date", &self.enrollment_date)?,
    })
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoanForm {
  pub book_id:     String,
  pub member_id:   String,
  pub loan_date:   String,
  pub return_date: String,
}

impl LoanForm {
  pub fn into_entity(self, id: i64) -> Result<Loan> {
    Loan::new(
      id,
      parse_id("book_id", &self.book_id)?,
      parse_id("member_id", &self.member_id)?,
      &self.loan_date,
      &self.return_date,
    )
  }
}
