// Biblioteca raíz del crate `studyplan`.
// Modelo de estructura de programas, enlace de cursos del plan con el
// directorio, sumas de créditos y filtros; más la base, la siembra y la API.
pub mod aggregate;
pub mod api;
pub mod chart;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod linker;
pub mod models;
pub mod seed;
pub mod server;
pub mod store;
pub mod structure;
pub mod views;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;

pub use error::{Error, Result};
