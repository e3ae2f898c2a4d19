//! Integration tests for `SqliteStore` and its repositories against an
//! in-memory database.

use biblio_core::{
  Author, Book, Entity, Loan, Member, NEW_ID, Repository, ValidationError,
  form::LoanForm,
};

use crate::{BookCatalog, Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn member(first: &str) -> Member {
  Member::new(first, "Rivas", "2024-03-01").expect("valid member")
}

fn loan(book_id: i64, member_id: i64) -> Loan {
  Loan::new(NEW_ID, book_id, member_id, "2024-04-01", "2024-04-15").expect("valid loan")
}

// ─── Round trip ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_then_get_all_round_trips_every_entity() {
  let s = store().await;

  let author = Author::new("Isabel", "Allende");
  let id = s.authors().insert(author.clone()).await.unwrap();
  assert_eq!(s.authors().get_all().await.unwrap(), vec![author.with_id(id)]);

  let book = Book::new("La casa de los espíritus", "Novela", id);
  let id = s.books().insert(book.clone()).await.unwrap();
  assert_eq!(s.books().get_all().await.unwrap(), vec![book.with_id(id)]);

  let m = member("Tomás");
  let id = s.members().insert(m.clone()).await.unwrap();
  assert_eq!(s.members().get_all().await.unwrap(), vec![m.with_id(id)]);

  let l = loan(1, 1);
  let id = s.loans().insert(l.clone()).await.unwrap();
  assert_eq!(s.loans().get_all().await.unwrap(), vec![l.with_id(id)]);
}

#[tokio::test]
async fn get_all_is_ordered_by_id() {
  let s = store().await;
  let authors = s.authors();

  authors.insert(Author::new("C", "C").with_id(30)).await.unwrap();
  authors.insert(Author::new("A", "A").with_id(10)).await.unwrap();
  authors.insert(Author::new("B", "B").with_id(20)).await.unwrap();

  let ids: Vec<_> = authors.get_all().await.unwrap().iter().map(|a| a.id).collect();
  assert_eq!(ids, vec![10, 20, 30]);
}

// ─── Sentinel ids and upsert ─────────────────────────────────────────────────

#[tokio::test]
async fn sentinel_inserts_get_distinct_ids() {
  let s = store().await;
  let members = s.members();

  let first = members.insert(member("Ana")).await.unwrap();
  let second = members.insert(member("Ana")).await.unwrap();
  assert_ne!(first, second);
  assert!(first > 0 && second > 0);
  assert_eq!(members.get_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn explicit_id_is_persisted_verbatim() {
  let s = store().await;
  let id = s
    .books()
    .insert(Book::new("Pedro Páramo", "Novela", 3).with_id(42))
    .await
    .unwrap();
  assert_eq!(id, 42);
  assert_eq!(s.books().get_all().await.unwrap()[0].id, 42);
}

#[tokio::test]
async fn explicit_id_insert_overwrites_existing_row() {
  let s = store().await;
  let books = s.books();

  books.insert(Book::new("Borrador", "Ensayo", 1).with_id(7)).await.unwrap();
  books.insert(Book::new("Final", "Novela", 2).with_id(7)).await.unwrap();

  let all = books.get_all().await.unwrap();
  assert_eq!(all, vec![Book::new("Final", "Novela", 2).with_id(7)]);
}

#[tokio::test]
async fn sentinel_ids_are_never_reused_after_delete() {
  let s = store().await;
  let authors = s.authors();

  let first = authors.insert(Author::new("Juan", "Rulfo")).await.unwrap();
  authors.delete_by_id(first).await.unwrap();
  let second = authors.insert(Author::new("Juan", "Rulfo")).await.unwrap();
  assert!(second > first);
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_overwrites_fields() {
  let s = store().await;
  let authors = s.authors();
  let id = authors.insert(Author::new("Pablo", "Neruda")).await.unwrap();

  let renamed = Author {
    id,
    first_name: "Ricardo".into(),
    last_name:  "Reyes".into(),
  };
  authors.update(renamed.clone()).await.unwrap();
  assert_eq!(authors.get_all().await.unwrap(), vec![renamed]);
}

#[tokio::test]
async fn update_twice_is_same_as_once() {
  let s = store().await;
  let loans = s.loans();
  let id = loans.insert(loan(1, 1)).await.unwrap();

  let changed = Loan::new(id, 2, 3, "2024-05-01", "2024-05-20").unwrap();
  loans.update(changed.clone()).await.unwrap();
  let once = loans.get_all().await.unwrap();
  loans.update(changed.clone()).await.unwrap();
  let twice = loans.get_all().await.unwrap();

  assert_eq!(once, twice);
  assert_eq!(twice, vec![changed]);
}

#[tokio::test]
async fn update_of_missing_id_is_a_noop() {
  let s = store().await;
  let members = s.members();
  members.insert(member("Eva")).await.unwrap();

  members.update(member("Nadie").with_id(999)).await.unwrap();

  let all = members.get_all().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].first_name, "Eva");
  assert_eq!(s.update(member("Nadie").with_id(999)).await.unwrap(), 0);
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_only_that_record() {
  let s = store().await;
  let books = s.books();
  let keep = books.insert(Book::new("Uno", "Novela", 1)).await.unwrap();
  let gone = books.insert(Book::new("Dos", "Novela", 1)).await.unwrap();

  let target = books
    .get_all()
    .await
    .unwrap()
    .into_iter()
    .find(|b| b.id == gone)
    .unwrap();
  books.delete(&target).await.unwrap();

  let ids: Vec<_> = books.get_all().await.unwrap().iter().map(|b| b.id).collect();
  assert_eq!(ids, vec![keep]);
}

#[tokio::test]
async fn delete_by_id_is_final_and_tolerates_missing_ids() {
  let s = store().await;
  let loans = s.loans();
  let id = loans.insert(loan(4, 5)).await.unwrap();

  loans.delete_by_id(id).await.unwrap();
  assert!(loans.get_all().await.unwrap().iter().all(|l| l.id != id));

  loans.delete_by_id(id).await.unwrap();
  loans.delete_by_id(12345).await.unwrap();
  assert!(loans.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_all_clears_only_its_own_table() {
  let s = store().await;
  s.authors().insert(Author::new("Rosario", "Castellanos")).await.unwrap();
  s.books().insert(Book::new("Balún Canán", "Novela", 1)).await.unwrap();
  s.members().insert(member("Iris")).await.unwrap();
  s.loans().insert(loan(1, 1)).await.unwrap();

  s.books().delete_all().await.unwrap();
  assert!(s.books().get_all().await.unwrap().is_empty());
  assert_eq!(s.authors().get_all().await.unwrap().len(), 1);
  assert_eq!(s.members().get_all().await.unwrap().len(), 1);
  assert_eq!(s.loans().get_all().await.unwrap().len(), 1);

  s.authors().delete_all().await.unwrap();
  s.members().delete_all().await.unwrap();
  s.loans().delete_all().await.unwrap();
  assert!(s.authors().get_all().await.unwrap().is_empty());
  assert!(s.members().get_all().await.unwrap().is_empty());
  assert!(s.loans().get_all().await.unwrap().is_empty());
}

// ─── Storage errors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn opening_a_directory_fails_with_database_error() {
  let dir = tempfile::tempdir().unwrap();
  let result = SqliteStore::open(dir.path()).await;
  assert!(matches!(result, Err(Error::Database(_))));
}

// ─── Soft references and validation ──────────────────────────────────────────

#[tokio::test]
async fn dangling_references_are_stored_and_read_back() {
  let s = store().await;

  s.books().insert(Book::new("Huérfano", "Misterio", 9999)).await.unwrap();
  s.loans().insert(loan(777, 888)).await.unwrap();

  let books = s.books().get_all().await.unwrap();
  assert_eq!(books.len(), 1);
  assert_eq!(books[0].author_id, 9999);
  let loans = s.loans().get_all().await.unwrap();
  assert_eq!((loans[0].book_id, loans[0].member_id), (777, 888));
}

#[tokio::test]
async fn invalid_loan_date_never_reaches_the_store() {
  let s = store().await;
  let loans = s.loans();

  let form = LoanForm {
    book_id:     "1".into(),
    member_id:   "1".into(),
    loan_date:   "2024-13-40".into(),
    return_date: "2024-12-01".into(),
  };
  let outcome = match form.into_entity(NEW_ID) {
    Ok(l) => Ok(loans.insert(l).await.unwrap()),
    Err(e) => Err(e),
  };

  assert!(matches!(outcome, Err(ValidationError::InvalidDate { field: "loan_date", .. })));
  assert!(loans.get_all().await.unwrap().is_empty());
}

// ─── Concurrency ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn concurrent_inserts_into_different_tables_both_persist() {
  let s = store().await;
  let authors = s.authors();
  let members = s.members();

  let (author_id, member_id) = tokio::join!(
    authors.insert(Author::new("Alfonsina", "Storni")),
    members.insert(member("Olga")),
  );
  let (author_id, member_id) = (author_id.unwrap(), member_id.unwrap());

  assert_eq!(authors.get_all().await.unwrap()[0].id, author_id);
  assert_eq!(members.get_all().await.unwrap()[0].id, member_id);
}

#[tokio::test]
async fn repositories_work_across_spawned_tasks() {
  let s = store().await;

  let handles: Vec<_> = (0..8)
    .map(|i| {
      let books = s.books();
      tokio::spawn(async move { books.insert(Book::new(format!("Tomo {i}"), "Serie", 1)).await })
    })
    .collect();
  for handle in handles {
    handle.await.unwrap().unwrap();
  }

  let mut ids: Vec<_> = s.books().get_all().await.unwrap().iter().map(|b| b.id).collect();
  ids.dedup();
  assert_eq!(ids.len(), 8);
}

// ─── Book catalog (id reuse) ─────────────────────────────────────────────────

#[tokio::test]
async fn catalog_numbers_books_from_one() {
  let s = store().await;
  let catalog = BookCatalog::new(s.clone());

  let a = catalog.register(Book::new("A", "X", 1)).await.unwrap();
  let b = catalog.register(Book::new("B", "X", 1)).await.unwrap();
  assert_eq!((a.id, b.id), (1, 2));
}

#[tokio::test]
async fn catalog_reuses_smallest_freed_id() {
  let s = store().await;
  let catalog = BookCatalog::new(s.clone());
  for title in ["A", "B", "C", "D"] {
    catalog.register(Book::new(title, "X", 1)).await.unwrap();
  }

  assert!(catalog.remove_by_id(3).await.unwrap());
  assert!(catalog.remove_by_id(2).await.unwrap());
  assert_eq!(catalog.freed_ids().await.unwrap(), vec![2, 3]);

  let next = catalog.register(Book::new("E", "X", 1)).await.unwrap();
  assert_eq!(next.id, 2);
  let next = catalog.register(Book::new("F", "X", 1)).await.unwrap();
  assert_eq!(next.id, 3);
  let next = catalog.register(Book::new("G", "X", 1)).await.unwrap();
  assert_eq!(next.id, 5);
  assert!(catalog.freed_ids().await.unwrap().is_empty());
}

#[tokio::test]
async fn catalog_does_not_free_missing_ids() {
  let s = store().await;
  let catalog = BookCatalog::new(s.clone());
  catalog.register(Book::new("A", "X", 1)).await.unwrap();

  assert!(!catalog.remove_by_id(50).await.unwrap());
  assert!(catalog.freed_ids().await.unwrap().is_empty());
  assert_eq!(catalog.register(Book::new("B", "X", 1)).await.unwrap().id, 2);
}

#[tokio::test]
async fn catalog_skips_freed_id_taken_by_explicit_insert() {
  let s = store().await;
  let catalog = BookCatalog::new(s.clone());
  let a = catalog.register(Book::new("A", "X", 1)).await.unwrap();
  catalog.register(Book::new("B", "X", 1)).await.unwrap();
  catalog.remove(&a).await.unwrap();

  s.books().insert(Book::new("Manual", "X", 1).with_id(1)).await.unwrap();

  assert_eq!(catalog.register(Book::new("C", "X", 1)).await.unwrap().id, 3);
}

#[tokio::test]
async fn plain_repository_ignores_the_freed_pool() {
  let s = store().await;
  let catalog = BookCatalog::new(s.clone());
  catalog.register(Book::new("A", "X", 1)).await.unwrap();
  catalog.register(Book::new("B", "X", 1)).await.unwrap();
  catalog.remove_by_id(1).await.unwrap();

  let id = s.books().insert(Book::new("Sentinel", "X", 1)).await.unwrap();
  assert_eq!(id, 3);
  assert_eq!(catalog.freed_ids().await.unwrap(), vec![1]);
}

#[tokio::test]
async fn catalog_reports_exhausted_ids_instead_of_wrapping() {
  let s = store().await;
  let catalog = BookCatalog::new(s.clone());
  s.books()
    .insert(Book::new("Último", "X", 1).with_id(i64::MAX))
    .await
    .unwrap();

  let err = catalog.register(Book::new("Sobrante", "X", 1)).await.unwrap_err();
  assert!(matches!(err, Error::BookIdsExhausted));

  let ids: Vec<_> = s.books().get_all().await.unwrap().iter().map(|b| b.id).collect();
  assert_eq!(ids, vec![i64::MAX]);
}

#[tokio::test]
async fn catalog_reuses_freed_id_even_at_the_top_of_the_range() {
  let s = store().await;
  let catalog = BookCatalog::new(s.clone());
  let first = catalog.register(Book::new("A", "X", 1)).await.unwrap();
  s.books()
    .insert(Book::new("Último", "X", 1).with_id(i64::MAX))
    .await
    .unwrap();
  catalog.remove(&first).await.unwrap();

  assert_eq!(catalog.register(Book::new("B", "X", 1)).await.unwrap().id, first.id);
}

#[tokio::test]
async fn catalog_clear_restarts_numbering() {
  let s = store().await;
  let catalog = BookCatalog::new(s.clone());
  catalog.register(Book::new("A", "X", 1)).await.unwrap();
  catalog.register(Book::new("B", "X", 1)).await.unwrap();
  catalog.remove_by_id(2).await.unwrap();

  catalog.clear().await.unwrap();
  assert!(s.books().get_all().await.unwrap().is_empty());
  assert!(catalog.freed_ids().await.unwrap().is_empty());
  assert_eq!(catalog.register(Book::new("C", "X", 1)).await.unwrap().id, 1);
}

#[tokio::test]
async fn freed_ids_survive_reopening_the_file() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("biblioteca.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    let catalog = BookCatalog::new(s);
    catalog.register(Book::new("A", "X", 1)).await.unwrap();
    catalog.register(Book::new("B", "X", 1)).await.unwrap();
    catalog.remove_by_id(1).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  let catalog = BookCatalog::new(s.clone());
  assert_eq!(catalog.freed_ids().await.unwrap(), vec![1]);
  assert_eq!(catalog.register(Book::new("C", "X", 1)).await.unwrap().id, 1);
  assert_eq!(s.books().get_all().await.unwrap().len(), 2);
}
