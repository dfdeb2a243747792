use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_DB_PATH: &str = "data/studyplan.db";

/// Dónde viven las tablas relacionales.
#[derive(Debug, Clone, PartialEq)]
pub enum DbTarget {
    /// Archivo sqlite local (o `:memory:`)
    Sqlite(PathBuf),
    /// URL completa (postgres://...)
    Postgres(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db: DbTarget,
    pub bind: String,
    /// Archivo JSON con los programas; `None` usa los datos embebidos
    pub programs_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db: DbTarget::Sqlite(PathBuf::from(DEFAULT_DB_PATH)),
            bind: DEFAULT_BIND.to_string(),
            programs_file: None,
        }
    }
}

// load .env if present
fn load_dotenv() {
    let _ = dotenv::dotenv();
}

impl Config {
    /// Lee la configuración del entorno (y de `.env`). Honra
    /// STUDYPLAN_DB_URL / STUDYPLAN_DB_PATH / STUDYPLAN_BIND / STUDYPLAN_PROGRAMS_FILE.
    pub fn from_env() -> Result<Config> {
        load_dotenv();
        let mut cfg = Config::default();

        if let Ok(url) = env::var("STUDYPLAN_DB_URL") {
            cfg.db = parse_db_url(&url)?;
        } else if let Ok(p) = env::var("STUDYPLAN_DB_PATH") {
            cfg.db = DbTarget::Sqlite(PathBuf::from(p));
        }
        if let Ok(bind) = env::var("STUDYPLAN_BIND") {
            if !bind.trim().is_empty() {
                cfg.bind = bind;
            }
        }
        if let Ok(p) = env::var("STUDYPLAN_PROGRAMS_FILE") {
            if !p.trim().is_empty() {
                cfg.programs_file = Some(PathBuf::from(p));
            }
        }
        Ok(cfg)
    }
}

/// Acepta sqlite://, file:// y postgres:// (o postgresql://).
pub fn parse_db_url(url: &str) -> Result<DbTarget> {
    if let Some(path) = url.strip_prefix("sqlite://") {
        Ok(DbTarget::Sqlite(PathBuf::from(path)))
    } else if let Some(path) = url.strip_prefix("file://") {
        Ok(DbTarget::Sqlite(PathBuf::from(path)))
    } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        Ok(DbTarget::Postgres(url.to_string()))
    } else {
        Err(Error::Config(format!("STUDYPLAN_DB_URL uses unsupported scheme: {}", url)))
    }
}
