//! Command-line surface: one subcommand per entity, mirroring the register /
//! list / modify / delete actions of each screen, plus `clear`.

use anyhow::{Context, Result, bail};
use biblio_core::{
  Author, Book, Entity, Loan, Member, NEW_ID, Repository,
  form::{AuthorForm, BookForm, LoanForm, MemberForm, parse_id},
};
use biblio_store_sqlite::{BookCatalog, SqliteStore};
use clap::{Args, Subcommand};
use serde::Serialize;

// ─── Arguments ────────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Manage authors.
  #[command(subcommand)]
  Author(AuthorCommand),
  /// Manage books; new books reuse ids freed by removed ones.
  #[command(subcommand)]
  Book(BookCommand),
  /// Manage members.
  #[command(subcommand)]
  Member(MemberCommand),
  /// Manage loans.
  #[command(subcommand)]
  Loan(LoanCommand),
}

#[derive(Args, Debug)]
pub struct ListArgs {
  /// Print records as JSON.
  #[arg(long)]
  json: bool,
}

/// Identifies an existing record. Kept as text so bad input is reported as a
/// validation error rather than a usage error.
#[derive(Args, Debug)]
pub struct IdArg {
  #[arg(long)]
  id: String,
}

#[derive(Args, Debug)]
pub struct AuthorFields {
  #[arg(long)]
  first_name: String,
  #[arg(long)]
  last_name:  String,
}

#[derive(Args, Debug)]
pub struct BookFields {
  #[arg(long)]
  title:     String,
  #[arg(long)]
  genre:     String,
  #[arg(long)]
  author_id: String,
}

#[derive(Args, Debug)]
pub struct MemberFields {
  #[arg(long)]
  first_name:      String,
  #[arg(long)]
  last_name:       String,
  /// Enrollment date, `YYYY-MM-DD`.
  #[arg(long)]
  enrollment_date: String,
}

#[derive(Args, Debug)]
pub struct LoanFields {
  #[arg(long)]
  book_id:     String,
  #[arg(long)]
  member_id:   String,
  /// Loan date, `YYYY-MM-DD`.
  #[arg(long)]
  loan_date:   String,
  /// Return date, `YYYY-MM-DD`.
  #[arg(long)]
  return_date: String,
}

#[derive(Subcommand, Debug)]
pub enum AuthorCommand {
  Add(AuthorFields),
  List(ListArgs),
  Update {
    #[command(flatten)]
    target: IdArg,
    #[command(flatten)]
    fields: AuthorFields,
  },
  Delete(IdArg),
  /// Delete every author.
  Clear,
}

#[derive(Subcommand, Debug)]
pub enum BookCommand {
  Add(BookFields),
  List(ListArgs),
  Update {
    #[command(flatten)]
    target: IdArg,
    #[command(flatten)]
    fields: BookFields,
  },
  Delete(IdArg),
  /// Delete every book and forget freed ids.
  Clear,
}

#[derive(Subcommand, Debug)]
pub enum MemberCommand {
  Add(MemberFields),
  List(ListArgs),
  Update {
    #[command(flatten)]
    target: IdArg,
    #[command(flatten)]
    fields: MemberFields,
  },
  Delete(IdArg),
  /// Delete every member.
  Clear,
}

#[derive(Subcommand, Debug)]
pub enum LoanCommand {
  Add(LoanFields),
  List(ListArgs),
  Update {
    #[command(flatten)]
    target: IdArg,
    #[command(flatten)]
    fields: LoanFields,
  },
  Delete(IdArg),
  /// Delete every loan.
  Clear,
}

// ─── Forms ────────────────────────────────────────────────────────────────────

impl From<AuthorFields> for AuthorForm {
  fn from(f: AuthorFields) -> Self {
    Self {
      first_name: f.first_name,
      last_name:  f.last_name,
    }
  }
}

impl From<BookFields> for BookForm {
  fn from(f: BookFields) -> Self {
    Self {
      title:     f.title,
      genre:     f.genre,
      author_id: f.author_id,
    }
  }
}

impl From<MemberFields> for MemberForm {
  fn from(f: MemberFields) -> Self {
    Self {
      first_name:      f.first_name,
      last_name:       f.last_name,
      enrollment_date: f.enrollment_date,
    }
  }
}

impl From<LoanFields> for LoanForm {
  fn from(f: LoanFields) -> Self {
    Self {
      book_id:     f.book_id,
      member_id:   f.member_id,
      loan_date:   f.loan_date,
      return_date: f.return_date,
    }
  }
}

// ─── Display ──────────────────────────────────────────────────────────────────

/// One-line rendering of a record for `list`.
trait Describe {
  fn describe(&self) -> String;
}

impl Describe for Author {
  fn describe(&self) -> String { format!("{:>4}  {} {}", self.id, self.first_name, self.last_name) }
}

impl Describe for Book {
  fn describe(&self) -> String {
    format!(
      "{:>4}  {} ({}), author #{}",
      self.id, self.title, self.genre, self.author_id
    )
  }
}

impl Describe for Member {
  fn describe(&self) -> String {
    format!(
      "{:>4}  {} {}, enrolled {}",
      self.id, self.first_name, self.last_name, self.enrollment_date
    )
  }
}

impl Describe for Loan {
  fn describe(&self) -> String {
    format!(
      "{:>4}  book #{} to member #{}, {} until {}",
      self.id, self.book_id, self.member_id, self.loan_date, self.return_date
    )
  }
}

// ─── Dispatch ─────────────────────────────────────────────────────────────────

pub async fn run(command: Command, store: &SqliteStore) -> Result<()> {
  match command {
    Command::Author(cmd) => author(cmd, store).await,
    Command::Book(cmd) => book(cmd, store).await,
    Command::Member(cmd) => member(cmd, store).await,
    Command::Loan(cmd) => loan(cmd, store).await,
  }
}

async fn author(cmd: AuthorCommand, store: &SqliteStore) -> Result<()> {
  let repo = store.authors();
  match cmd {
    AuthorCommand::Add(fields) => {
      let id = repo.insert(AuthorForm::from(fields).into_entity(NEW_ID)?).await?;
      println!("Author registered with id {id}");
    }
    AuthorCommand::List(args) => list::<Author, _>(&repo, args).await?,
    AuthorCommand::Update { target, fields } => {
      let existing = find::<Author, _>(&repo, &target).await?;
      repo.update(AuthorForm::from(fields).into_entity(existing.id)?).await?;
      println!("Author {} updated", existing.id);
    }
    AuthorCommand::Delete(target) => remove::<Author, _>(&repo, &target).await?,
    AuthorCommand::Clear => clear::<Author, _>(&repo).await?,
  }
  Ok(())
}

async fn book(cmd: BookCommand, store: &SqliteStore) -> Result<()> {
  let repo = store.books();
  let catalog = BookCatalog::new(store.clone());
  match cmd {
    BookCommand::Add(fields) => {
      let book = catalog.register(BookForm::from(fields).into_entity(NEW_ID)?).await?;
      println!("Book registered with id {}", book.id);
    }
    BookCommand::List(args) => list::<Book, _>(&repo, args).await?,
    BookCommand::Update { target, fields } => {
      let existing = find::<Book, _>(&repo, &target).await?;
      repo.update(BookForm::from(fields).into_entity(existing.id)?).await?;
      println!("Book {} updated", existing.id);
    }
    BookCommand::Delete(target) => {
      let existing = find::<Book, _>(&repo, &target).await?;
      catalog.remove(&existing).await?;
      println!("Book {} deleted; its id will be reused", existing.id);
    }
    BookCommand::Clear => {
      catalog.clear().await?;
      println!("All books deleted");
    }
  }
  Ok(())
}

async fn member(cmd: MemberCommand, store: &SqliteStore) -> Result<()> {
  let repo = store.members();
  match cmd {
    MemberCommand::Add(fields) => {
      let id = repo.insert(MemberForm::from(fields).into_entity(NEW_ID)?).await?;
      println!("Member registered with id {id}");
    }
    MemberCommand::List(args) => list::<Member, _>(&repo, args).await?,
    MemberCommand::Update { target, fields } => {
      let existing = find::<Member, _>(&repo, &target).await?;
      repo.update(MemberForm::from(fields).into_entity(existing.id)?).await?;
      println!("Member {} updated", existing.id);
    }
    MemberCommand::Delete(target) => remove::<Member, _>(&repo, &target).await?,
    MemberCommand::Clear => clear::<Member, _>(&repo).await?,
  }
  Ok(())
}

async fn loan(cmd: LoanCommand, store: &SqliteStore) -> Result<()> {
  let repo = store.loans();
  match cmd {
    LoanCommand::Add(fields) => {
      let loan = LoanForm::from(fields).into_entity(NEW_ID)?;
      warn_if_inverted(&loan);
      let id = repo.insert(loan).await?;
      println!("Loan registered with id {id}");
    }
    LoanCommand::List(args) => list::<Loan, _>(&repo, args).await?,
    LoanCommand::Update { target, fields } => {
      let existing = find::<Loan, _>(&repo, &target).await?;
      let loan = LoanForm::from(fields).into_entity(existing.id)?;
      warn_if_inverted(&loan);
      repo.update(loan).await?;
      println!("Loan {} updated", existing.id);
    }
    LoanCommand::Delete(target) => remove::<Loan, _>(&repo, &target).await?,
    LoanCommand::Clear => clear::<Loan, _>(&repo).await?,
  }
  Ok(())
}

// ─── Shared actions ───────────────────────────────────────────────────────────

fn warn_if_inverted(loan: &Loan) {
  if loan.is_return_before_loan() {
    tracing::warn!(
      loan_date = %loan.loan_date,
      return_date = %loan.return_date,
      "return date is earlier than loan date"
    );
  }
}

async fn list<E, R>(repo: &R, args: ListArgs) -> Result<()>
where
  E: Entity + Describe + Serialize,
  R: Repository<E>,
{
  let records = repo
    .get_all()
    .await
    .with_context(|| format!("listing {}s", E::KIND))?;

  if args.json {
    println!("{}", serde_json::to_string_pretty(&records)?);
  } else if records.is_empty() {
    println!("No {}s", E::KIND);
  } else {
    for record in &records {
      println!("{}", record.describe());
    }
  }
  Ok(())
}

/// Look up the record named by `target`, failing if it does not exist.
async fn find<E, R>(repo: &R, target: &IdArg) -> Result<E>
where
  E: Entity,
  R: Repository<E>,
{
  let id = parse_id("id", &target.id)?;
  let records = repo
    .get_all()
    .await
    .with_context(|| format!("looking up {} {id}", E::KIND))?;
  match records.into_iter().find(|r| r.id() == id) {
    Some(record) => Ok(record),
    None => bail!("no {} with id {id}", E::KIND),
  }
}

async fn remove<E, R>(repo: &R, target: &IdArg) -> Result<()>
where
  E: Entity,
  R: Repository<E>,
{
  let existing = find(repo, target).await?;
  repo.delete(&existing).await?;
  println!("Deleted {} {}", E::KIND, existing.id());
  Ok(())
}

async fn clear<E, R>(repo: &R) -> Result<()>
where
  E: Entity,
  R: Repository<E>,
{
  repo.delete_all().await?;
  println!("All {}s deleted", E::KIND);
  Ok(())
}
