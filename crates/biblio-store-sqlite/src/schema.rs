//! SQL schema for the Biblioteca SQLite store.
//!
//! Executed once at connection startup. Table and column names are kept
//! stable for compatibility with existing database files; `user_version`
//! records the layout, though no migrations exist yet.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Reference columns carry no `FOREIGN KEY` clause: dangling ids are allowed.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS autores (
    autor_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre    TEXT NOT NULL,
    apellido  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS libros (
    libro_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    titulo    TEXT NOT NULL,
    genero    TEXT NOT NULL,
    autor_id  INTEGER NOT NULL      -- soft reference to autores
);

CREATE TABLE IF NOT EXISTS miembros (
    miembro_id         INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre             TEXT NOT NULL,
    apellido           TEXT NOT NULL,
    fecha_inscripcion  TEXT NOT NULL  -- YYYY-MM-DD
);

CREATE TABLE IF NOT EXISTS prestamos (
    prestamo_id      INTEGER PRIMARY KEY AUTOINCREMENT,
    libro_id         INTEGER NOT NULL,  -- soft reference to libros
    miembro_id       INTEGER NOT NULL,  -- soft reference to miembros
    fechaPrestamo    TEXT NOT NULL,     -- YYYY-MM-DD
    fechaDevolucion  TEXT NOT NULL      -- YYYY-MM-DD
);

-- Book ids freed by removals, handed out again by BookCatalog.
CREATE TABLE IF NOT EXISTS libros_ids_liberados (
    libro_id  INTEGER PRIMARY KEY
);

PRAGMA user_version = 1;
";
