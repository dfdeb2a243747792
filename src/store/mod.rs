//! Acceso a las tablas relacionales (`Courses` y `program_*`).
//!
//! `Store` puede ser SQLite (local, tests) o Postgres (base alojada). Para
//! Postgres guardamos sólo la URL y cada operación abre su conexión en un
//! hilo dedicado, para no arrancar un runtime dentro del de actix.

mod postgres_backend;
mod schema;
mod sqlite_backend;

use log::info;
use rusqlite::Connection;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::config::DbTarget;
use crate::error::Result;
use crate::models::{Course, ProgramStructure};
use crate::structure::{ProgramBundle, ProgramRows};

pub enum Store {
    Sqlite(Connection),
    /// Contiene la URL completa (postgres://...)
    Postgres(String),
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Store::Sqlite(_) => write!(f, "Store::Sqlite(..)"),
            Store::Postgres(_) => write!(f, "Store::Postgres(..)"),
        }
    }
}

impl Store {
    /// Abre el destino configurado. Para SQLite crea el directorio padre si
    /// hace falta.
    pub fn open(target: &DbTarget) -> Result<Store> {
        match target {
            DbTarget::Sqlite(path) => {
                if let Some(dir) = path.parent() {
                    if !dir.as_os_str().is_empty() && !dir.exists() {
                        fs::create_dir_all(dir)?;
                    }
                }
                Store::open_sqlite(path)
            }
            DbTarget::Postgres(url) => Ok(Store::Postgres(url.clone())),
        }
    }

    pub fn open_sqlite<P: AsRef<Path>>(path: P) -> Result<Store> {
        Ok(Store::Sqlite(Connection::open(path)?))
    }

    pub fn in_memory() -> Result<Store> {
        Ok(Store::Sqlite(Connection::open_in_memory()?))
    }

    /// Crea las tablas si no existen.
    pub fn init_schema(&self) -> Result<()> {
        match self {
            Store::Sqlite(conn) => {
                conn.execute_batch(schema::SQLITE_SCHEMA)?;
                Ok(())
            }
            Store::Postgres(url) => postgres_backend::run(url, |client| client.batch_execute(schema::POSTGRES_SCHEMA)),
        }
    }

    /// Reemplaza todas las filas de un programa (borra hijos, upsert de la
    /// estructura, inserta hijos) en una sola transacción. Idempotente.
    pub fn seed_program(&mut self, rows: &ProgramRows) -> Result<()> {
        match self {
            Store::Sqlite(conn) => sqlite_backend::seed_program(conn, rows)?,
            Store::Postgres(url) => postgres_backend::seed_program(url, rows)?,
        }
        info!(
            "seeded program '{}' ({} courses, {} components)",
            rows.structure.program_id,
            rows.courses.len(),
            rows.components.len()
        );
        Ok(())
    }

    pub fn load_program(&self, program_id: &str) -> Result<Option<ProgramBundle>> {
        let rows = match self {
            Store::Sqlite(conn) => sqlite_backend::load_program_rows(conn, program_id)?,
            Store::Postgres(url) => postgres_backend::load_program_rows(url, program_id)?,
        };
        Ok(rows.map(ProgramRows::into_bundle))
    }

    pub fn list_programs(&self) -> Result<Vec<ProgramStructure>> {
        match self {
            Store::Sqlite(conn) => sqlite_backend::list_programs(conn),
            Store::Postgres(url) => postgres_backend::list_programs(url),
        }
    }

    pub fn list_courses(&self) -> Result<Vec<Course>> {
        match self {
            Store::Sqlite(conn) => sqlite_backend::list_courses(conn),
            Store::Postgres(url) => postgres_backend::list_courses(url),
        }
    }

    /// Carga cursos en el directorio (sólo para instalaciones locales; el
    /// catálogo real lo mantiene otro proceso).
    pub fn upsert_courses(&mut self, courses: &[Course]) -> Result<usize> {
        match self {
            Store::Sqlite(conn) => sqlite_backend::upsert_courses(conn, courses),
            Store::Postgres(url) => postgres_backend::upsert_courses(url, courses),
        }
    }
}
