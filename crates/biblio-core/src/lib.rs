//! Core types for the Biblioteca lending tracker.
//!
//! Entities, input validation, date handling and the book id-reuse policy live
//! here, together with the [`Repository`](repository::Repository) trait that
//! storage backends implement. This crate has no database dependency.

pub mod date;
pub mod entity;
pub mod error;
pub mod form;
pub mod id_pool;
pub mod repository;

pub use entity::{Author, Book, Entity, Loan, Member, NEW_ID};
pub use error::{Result, ValidationError};
pub use repository::Repository;
