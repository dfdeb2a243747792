//! Composición de lo que muestra cada vista de programa.
//!
//! Primero se carga la estructura; si el programa no está sembrado se
//! devuelve el aviso y no se hace ninguna otra consulta.

use log::debug;
use serde::Serialize;

use crate::aggregate::{credits_by_category, credits_for_specializations, CategoryBreakdown, CreditSummary};
use crate::error::Result;
use crate::filter::{apply_filters, FilterState};
use crate::linker::{link_curriculum, suggest_courses, LinkedEntry, MatchStrategy, Suggestion};
use crate::models::{Course, CreditComponent, Level, Minor, ProgramStructure, Specialization};
use crate::store::Store;
use crate::structure::ProgramBundle;

pub const STRUCTURE_UNAVAILABLE: &str = "Master structure not available for this program yet.";

/// Origen de datos de las vistas. `Store` es la implementación real; los
/// tests usan dobles en memoria.
pub trait CatalogSource {
    fn program(&self, program_id: &str) -> Result<Option<ProgramBundle>>;
    fn courses(&self) -> Result<Vec<Course>>;
}

impl CatalogSource for Store {
    fn program(&self, program_id: &str) -> Result<Option<ProgramBundle>> {
        self.load_program(program_id)
    }

    fn courses(&self) -> Result<Vec<Course>> {
        self.list_courses()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum View<T> {
    Ready(T),
    Unavailable { available: bool, message: String },
}

impl<T> View<T> {
    pub fn unavailable() -> Self {
        View::Unavailable { available: false, message: STRUCTURE_UNAVAILABLE.to_string() }
    }

    pub fn ready(self) -> Option<T> {
        match self {
            View::Ready(t) => Some(t),
            View::Unavailable { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureView {
    pub available: bool,
    pub structure: ProgramStructure,
    pub components: Vec<CreditComponent>,
    pub specializations: Vec<Specialization>,
    pub minors: Vec<Minor>,
    pub credits: CreditSummary,
}

pub fn structure_view<S: CatalogSource + ?Sized>(source: &S, program_id: &str) -> Result<View<StructureView>> {
    let Some(bundle) = source.program(program_id)? else {
        return Ok(View::unavailable());
    };
    let components = bundle.sorted_components();
    let credits = CreditSummary::build(
        bundle.structure.total_credits,
        &components,
        &bundle.curriculum(),
        &bundle.specializations,
    );
    Ok(View::Ready(StructureView {
        available: true,
        structure: bundle.structure,
        components,
        specializations: bundle.specializations,
        minors: bundle.minors,
        credits,
    }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoursesView {
    pub available: bool,
    pub program_id: String,
    pub filter: FilterState,
    /// Todas las entradas del plan, antes de filtrar
    pub total_entries: usize,
    pub entries: Vec<LinkedEntry>,
    pub breakdown: CategoryBreakdown,
    /// ECTS de las entradas visibles que tienen la especialización activa
    pub specialization_ects: f64,
    pub linked: usize,
}

/// Plan del programa enlazado al directorio y filtrado.
pub fn courses_view<S: CatalogSource + ?Sized>(
    source: &S,
    program_id: &str,
    filter: &FilterState,
    strategy: MatchStrategy,
) -> Result<View<CoursesView>> {
    let Some(bundle) = source.program(program_id)? else {
        return Ok(View::unavailable());
    };
    let directory = source.courses()?;
    let program_level = match bundle.structure.level {
        Level::Unspecified => None,
        level => Some(level),
    };
    let mut linked = link_curriculum(&bundle.curriculum(), &directory, strategy);
    for e in &mut linked {
        e.program_level = program_level;
    }
    let total_entries = linked.len();

    let visible: Vec<LinkedEntry> = apply_filters(&linked, filter).into_iter().cloned().collect();
    let breakdown = credits_by_category(visible.iter().map(|e| &e.entry));
    let active: Vec<String> = filter.specialization.iter().cloned().collect();
    let specialization_ects = credits_for_specializations(visible.iter().map(|e| &e.entry), &active);
    let linked_count = visible.iter().filter(|e| e.link.is_some()).count();
    debug!(
        "program '{}': {} of {} entries visible, {} linked",
        program_id,
        visible.len(),
        total_entries,
        linked_count
    );

    Ok(View::Ready(CoursesView {
        available: true,
        program_id: program_id.to_string(),
        filter: filter.clone(),
        total_entries,
        entries: visible,
        breakdown,
        specialization_ects,
        linked: linked_count,
    }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnresolvedEntry {
    pub name: String,
    pub suggestions: Vec<Suggestion>,
}

/// Entradas sin enlace con sus candidatos más parecidos.
pub fn unresolved_view<S: CatalogSource + ?Sized>(
    source: &S,
    program_id: &str,
    strategy: MatchStrategy,
    limit: usize,
) -> Result<View<Vec<UnresolvedEntry>>> {
    let Some(bundle) = source.program(program_id)? else {
        return Ok(View::unavailable());
    };
    let directory = source.courses()?;
    let out = link_curriculum(&bundle.curriculum(), &directory, strategy)
        .into_iter()
        .filter(|e| e.link.is_none())
        .map(|e| UnresolvedEntry {
            suggestions: suggest_courses(&e.entry.name, &directory, limit),
            name: e.entry.name,
        })
        .collect();
    Ok(View::Ready(out))
}
