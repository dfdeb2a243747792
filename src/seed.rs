//! Siembra administrativa de las tablas `program_*` desde el catálogo
//! canónico. Se ejecuta a mano (`studyplan seed`), nunca desde el servidor.

use log::{info, warn};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::store::Store;
use crate::structure::ProgramCatalog;

#[derive(Debug, Clone, Copy, Default)]
pub struct SeedOptions {
    /// Siembra aunque la validación falle (sólo registra los problemas)
    pub allow_inconsistent: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeedReport {
    pub programs: Vec<String>,
    pub specializations: usize,
    pub components: usize,
    pub courses: usize,
    pub minors: usize,
}

impl SeedReport {
    pub fn resumen(&self) -> String {
        format!(
            "SEED: {} programas | {} especializaciones | {} componentes | {} cursos | {} menores",
            self.programs.len(),
            self.specializations,
            self.components,
            self.courses,
            self.minors
        )
    }
}

/// Valida todo el catálogo y después siembra programa por programa. Si algún
/// programa es inconsistente no se escribe nada (salvo `allow_inconsistent`).
pub fn seed_catalog(store: &mut Store, catalog: &ProgramCatalog, options: SeedOptions) -> Result<SeedReport> {
    let errors = catalog.validate_all();
    if let Some(first) = errors.first() {
        if options.allow_inconsistent {
            for e in &errors {
                warn!("seeding anyway: {}", e);
            }
        } else {
            return Err(Error::Validation(first.clone()));
        }
    }

    store.init_schema()?;
    let mut report = SeedReport::default();
    for bundle in catalog.iter() {
        let rows = bundle.to_rows();
        store.seed_program(&rows)?;
        report.programs.push(bundle.id().to_string());
        report.specializations += rows.specializations.len();
        report.components += rows.components.len();
        report.courses += rows.courses.len();
        report.minors += rows.minors.len();
    }
    info!("{}", report.resumen());
    Ok(report)
}
