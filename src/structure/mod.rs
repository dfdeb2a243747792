//! Modelo de estructura de programas.
//!
//! La definición canónica de cada programa vive en un único JSON
//! (`data/programs.json`, embebido en el binario). Las filas de las tablas
//! `program_*` se generan desde aquí (`rows`), nunca a mano, y las vistas
//! leen sólo de la base.

pub mod rows;
pub mod validate;

pub use rows::{ComponentRow, CourseRow, MinorRow, ProgramRows, SpecializationRow};
pub use validate::validate_bundle;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{Result, ValidationError};
use crate::models::{CourseCategory, CreditComponent, CurriculumCourseEntry, Minor, ProgramStructure, Specialization};

const BUILTIN_PROGRAMS: &str = include_str!("../../data/programs.json");

/// Línea del plan dentro de una categoría (la categoría la da la lista).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseLine {
    pub name: String,
    pub credits: f64,
    #[serde(default)]
    pub specializations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategorizedCourses {
    #[serde(default)]
    pub core: Vec<CourseLine>,
    #[serde(default)]
    pub transversal: Vec<CourseLine>,
    #[serde(default)]
    pub optional: Vec<CourseLine>,
    #[serde(default)]
    pub innovation: Vec<CourseLine>,
}

impl CategorizedCourses {
    pub fn list(&self, category: CourseCategory) -> &[CourseLine] {
        match category {
            CourseCategory::Core => &self.core,
            CourseCategory::Transversal => &self.transversal,
            CourseCategory::Optional => &self.optional,
            CourseCategory::Innovation => &self.innovation,
        }
    }

    pub fn list_mut(&mut self, category: CourseCategory) -> &mut Vec<CourseLine> {
        match category {
            CourseCategory::Core => &mut self.core,
            CourseCategory::Transversal => &mut self.transversal,
            CourseCategory::Optional => &mut self.optional,
            CourseCategory::Innovation => &mut self.innovation,
        }
    }
}

/// Registro completo de un programa: estructura, componentes de créditos,
/// especializaciones, cursos por categoría y menores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramBundle {
    pub structure: ProgramStructure,
    #[serde(default)]
    pub components: Vec<CreditComponent>,
    #[serde(default)]
    pub specializations: Vec<Specialization>,
    #[serde(default)]
    pub courses: CategorizedCourses,
    #[serde(default)]
    pub minors: Vec<Minor>,
}

impl ProgramBundle {
    pub fn id(&self) -> &str {
        &self.structure.program_id
    }

    /// Plan completo en orden core, transversal, optional, innovation.
    pub fn curriculum(&self) -> Vec<CurriculumCourseEntry> {
        CourseCategory::ALL
            .iter()
            .flat_map(|cat| {
                self.courses.list(*cat).iter().map(move |line| CurriculumCourseEntry {
                    name: line.name.clone(),
                    credits: line.credits,
                    category: *cat,
                    specializations: line.specializations.clone(),
                })
            })
            .collect()
    }

    /// Componentes ordenados por `sort_order`
    pub fn sorted_components(&self) -> Vec<CreditComponent> {
        let mut out = self.components.clone();
        out.sort_by_key(|c| c.sort_order);
        out
    }

    pub fn to_rows(&self) -> ProgramRows {
        ProgramRows::from_bundle(self)
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        validate_bundle(self)
    }
}

/// Catálogo de programas indexado por slug.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgramCatalog {
    programs: BTreeMap<String, ProgramBundle>,
}

impl ProgramCatalog {
    /// Programas embebidos en el binario.
    pub fn builtin() -> Result<ProgramCatalog> {
        ProgramCatalog::from_json(BUILTIN_PROGRAMS)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ProgramCatalog> {
        let text = fs::read_to_string(path)?;
        ProgramCatalog::from_json(&text)
    }

    pub fn from_json(json: &str) -> Result<ProgramCatalog> {
        let raw: BTreeMap<String, ProgramBundle> = serde_json::from_str(json)?;
        let mut catalog = ProgramCatalog::default();
        for (id, bundle) in raw {
            catalog.insert(&id, bundle);
        }
        Ok(catalog)
    }

    /// Inserta (o reemplaza) un programa. La clave manda sobre `program_id`.
    /// Los componentes sin posición (`sort_order == 0`) van después de la
    /// mayor posición explícita, en el orden del JSON.
    pub fn insert(&mut self, id: &str, mut bundle: ProgramBundle) {
        bundle.structure.program_id = id.to_string();
        let mut next = bundle.components.iter().map(|c| c.sort_order).max().unwrap_or(0).max(0);
        for comp in bundle.components.iter_mut().filter(|c| c.sort_order == 0) {
            next += 1;
            comp.sort_order = next;
        }
        self.programs.insert(id.to_string(), bundle);
    }

    pub fn get(&self, id: &str) -> Option<&ProgramBundle> {
        self.programs.get(id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.programs.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProgramBundle> {
        self.programs.values()
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Valida todos los programas y devuelve los errores encontrados.
    pub fn validate_all(&self) -> Vec<ValidationError> {
        self.iter().filter_map(|b| b.validate().err()).collect()
    }
}
