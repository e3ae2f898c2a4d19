//! The `Repository` trait: one uniform CRUD façade per entity type.
//!
//! Storage backends (e.g. `biblio-store-sqlite`) implement it once per entity.
//! The presentation layer depends on this abstraction, not on any backend.

use std::future::Future;

use crate::Entity;

/// Uniform CRUD operations over one table of `E`.
///
/// Every operation performs exactly one storage call off the caller's task and
/// resolves when it completes. Implementations do no validation, caching or
/// retry; backend errors are returned unchanged.
///
/// All methods return `Send` futures so repositories can be used from
/// multi-threaded async runtimes.
pub trait Repository<E: Entity>: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist `entity` and return its id.
  ///
  /// With [`NEW_ID`](crate::NEW_ID) the store assigns a fresh id. Any other id
  /// is written as given, replacing an existing row with that id.
  fn insert(&self, entity: E) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Overwrite the row with `entity.id()`. A missing id is a no-op.
  fn update(&self, entity: E) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Remove the row with `entity.id()`, if any.
  fn delete<'a>(
    &'a self,
    entity: &'a E,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove the row with `id`, if any.
  fn delete_by_id(&self, id: i64) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Remove every row of this entity's table, leaving other tables intact.
  fn delete_all(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Every row, in a stable order.
  fn get_all(&self) -> impl Future<Output = Result<Vec<E>, Self::Error>> + Send + '_;
}
