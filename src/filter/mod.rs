//! Filtros de búsqueda sobre listas de cursos ya cargadas en memoria.
//!
//! El estado son campos independientes (texto, nivel, tipo, especialización);
//! cualquier combinación es válida y cada filtro sólo puede reducir el
//! resultado.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::linker::LinkedEntry;
use crate::models::{Course, CourseCategory, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LevelFilter {
    #[default]
    All,
    Bachelor,
    Master,
}

impl LevelFilter {
    fn accepts(&self, level: Option<Level>) -> bool {
        match self {
            LevelFilter::All => true,
            LevelFilter::Bachelor => level == Some(Level::Bachelor),
            LevelFilter::Master => level == Some(Level::Master),
        }
    }
}

impl FromStr for LevelFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(LevelFilter::All),
            "bachelor" => Ok(LevelFilter::Bachelor),
            "master" => Ok(LevelFilter::Master),
            other => Err(format!("unknown level '{}'", other)),
        }
    }
}

/// Obligatorio = core, optativo = optional. Transversal e innovación sólo
/// aparecen con `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TypeFilter {
    #[default]
    All,
    Mandatory,
    Optional,
}

impl TypeFilter {
    fn accepts(&self, category: Option<CourseCategory>) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Mandatory => category == Some(CourseCategory::Core),
            TypeFilter::Optional => category == Some(CourseCategory::Optional),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(TypeFilter::All),
            "mandatory" | "core" => Ok(TypeFilter::Mandatory),
            "optional" => Ok(TypeFilter::Optional),
            other => Err(format!("unknown course type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub search: String,
    pub level: LevelFilter,
    pub kind: TypeFilter,
    pub specialization: Option<String>,
}

impl FilterState {
    /// Click sobre un badge: activa `code`, o limpia el filtro si ya estaba
    /// activo. Sólo una especialización a la vez.
    pub fn toggle_specialization(&mut self, code: &str) {
        let already = self
            .specialization
            .as_deref()
            .is_some_and(|active| active.eq_ignore_ascii_case(code));
        self.specialization = if already { None } else { Some(code.to_string()) };
    }

    /// Construye el estado desde parámetros de query
    /// (`search`, `level`, `type`, `specialization`).
    pub fn from_query(q: &HashMap<String, String>) -> Result<FilterState, String> {
        let get = |k: &str| q.get(k).map(|s| s.as_str()).unwrap_or("");
        let specialization = get("specialization").trim();
        Ok(FilterState {
            search: get("search").to_string(),
            level: get("level").parse()?,
            kind: get("type").parse()?,
            specialization: if specialization.is_empty() { None } else { Some(specialization.to_string()) },
        })
    }

    pub fn matches<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        self.matches_search(item)
            && self.level.accepts(item.level())
            && self.kind.accepts(item.category())
            && self.matches_specialization(item)
    }

    fn matches_search<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let mut fields = vec![item.name().to_lowercase()];
        if let Some(code) = item.code() {
            fields.push(code.to_lowercase());
        }
        if let Some(prof) = item.professor() {
            fields.push(prof.to_lowercase());
        }
        fields.iter().any(|f| f.contains(&needle))
    }

    fn matches_specialization<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        match &self.specialization {
            None => true,
            Some(code) => item.specialization_codes().iter().any(|c| c.eq_ignore_ascii_case(code)),
        }
    }
}

/// Lo que un registro expone para poder filtrarlo.
pub trait Filterable {
    fn name(&self) -> &str;
    fn code(&self) -> Option<&str>;
    fn professor(&self) -> Option<&str>;
    /// `None` cuando no se conoce el nivel
    fn level(&self) -> Option<Level>;
    fn category(&self) -> Option<CourseCategory>;
    fn specialization_codes(&self) -> &[String];
}

impl Filterable for Course {
    fn name(&self) -> &str {
        &self.name_course
    }
    fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
    fn professor(&self) -> Option<&str> {
        self.professor.as_deref()
    }
    fn level(&self) -> Option<Level> {
        match self.level {
            Level::Unspecified => None,
            l => Some(l),
        }
    }
    fn category(&self) -> Option<CourseCategory> {
        None
    }
    fn specialization_codes(&self) -> &[String] {
        &[]
    }
}

/// Para entradas del plan, código, profesor y nivel salen del curso enlazado.
/// Sin enlace, el nivel es el del programa (si se conoce).
impl Filterable for LinkedEntry {
    fn name(&self) -> &str {
        &self.entry.name
    }
    fn code(&self) -> Option<&str> {
        self.course.as_ref().and_then(|c| c.code.as_deref())
    }
    fn professor(&self) -> Option<&str> {
        self.course.as_ref().and_then(|c| c.professor.as_deref())
    }
    fn level(&self) -> Option<Level> {
        self.course.as_ref().and_then(|c| c.level()).or(self.program_level)
    }
    fn category(&self) -> Option<CourseCategory> {
        Some(self.entry.category)
    }
    fn specialization_codes(&self) -> &[String] {
        &self.entry.specializations
    }
}

/// Devuelve los elementos que pasan todos los filtros, en el orden original.
pub fn apply_filters<'a, T: Filterable>(items: &'a [T], state: &FilterState) -> Vec<&'a T> {
    items.iter().filter(|i| state.matches(*i)).collect()
}
