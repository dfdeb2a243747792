use serde::{Deserialize, Serialize};

use super::{CourseLine, ProgramBundle};
use crate::models::{CourseCategory, CreditComponent, Minor, ProgramStructure, Specialization};

/// Fila de `program_specializations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecializationRow {
    pub program_id: String,
    pub code: String,
    pub name: String,
    pub color: String,
    pub sort_order: i32,
}

/// Fila de `program_credit_components`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRow {
    pub program_id: String,
    pub name: String,
    pub credits: f64,
    pub color: String,
    pub sort_order: i32,
}

/// Fila de `program_courses`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRow {
    pub program_id: String,
    pub name: String,
    pub credits: f64,
    pub category: CourseCategory,
    pub specializations: Vec<String>,
    pub sort_order: i32,
}

impl CourseRow {
    /// Los códigos se guardan como texto separado por comas.
    pub fn specializations_text(&self) -> String {
        self.specializations.join(",")
    }

    pub fn parse_specializations(text: &str) -> Vec<String> {
        text.split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect()
    }
}

/// Fila de `program_minors`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinorRow {
    pub program_id: String,
    pub name: String,
    pub credits: f64,
    pub description: Option<String>,
    pub sort_order: i32,
}

/// Todas las filas de un programa, listas para insertar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramRows {
    pub structure: ProgramStructure,
    pub specializations: Vec<SpecializationRow>,
    pub components: Vec<ComponentRow>,
    pub courses: Vec<CourseRow>,
    pub minors: Vec<MinorRow>,
}

impl ProgramRows {
    pub fn from_bundle(bundle: &ProgramBundle) -> ProgramRows {
        let pid = bundle.id().to_string();

        let specializations = bundle
            .specializations
            .iter()
            .enumerate()
            .map(|(i, s)| SpecializationRow {
                program_id: pid.clone(),
                code: s.code.clone(),
                name: s.name.clone(),
                color: s.color.clone(),
                sort_order: i as i32 + 1,
            })
            .collect();

        let components = bundle
            .sorted_components()
            .into_iter()
            .map(|c| ComponentRow {
                program_id: pid.clone(),
                name: c.name,
                credits: c.credits,
                color: c.color,
                sort_order: c.sort_order,
            })
            .collect();

        // sort_order corre a lo largo de todas las categorías
        let mut courses = Vec::new();
        for cat in CourseCategory::ALL {
            for line in bundle.courses.list(cat) {
                courses.push(CourseRow {
                    program_id: pid.clone(),
                    name: line.name.clone(),
                    credits: line.credits,
                    category: cat,
                    specializations: line.specializations.clone(),
                    sort_order: courses.len() as i32 + 1,
                });
            }
        }

        let minors = bundle
            .minors
            .iter()
            .enumerate()
            .map(|(i, m)| MinorRow {
                program_id: pid.clone(),
                name: m.name.clone(),
                credits: m.credits,
                description: m.description.clone(),
                sort_order: i as i32 + 1,
            })
            .collect();

        ProgramRows { structure: bundle.structure.clone(), specializations, components, courses, minors }
    }

    pub fn row_count(&self) -> usize {
        1 + self.specializations.len() + self.components.len() + self.courses.len() + self.minors.len()
    }

    /// Reconstruye el programa a partir de las filas leídas de la base.
    pub fn into_bundle(mut self) -> ProgramBundle {
        self.specializations.sort_by_key(|s| s.sort_order);
        self.components.sort_by_key(|c| c.sort_order);
        self.courses.sort_by_key(|c| c.sort_order);
        self.minors.sort_by_key(|m| m.sort_order);

        let mut bundle = ProgramBundle {
            structure: self.structure,
            components: self
                .components
                .into_iter()
                .map(|c| CreditComponent { name: c.name, credits: c.credits, color: c.color, sort_order: c.sort_order })
                .collect(),
            specializations: self
                .specializations
                .into_iter()
                .map(|s| Specialization { code: s.code, name: s.name, color: s.color })
                .collect(),
            courses: Default::default(),
            minors: self
                .minors
                .into_iter()
                .map(|m| Minor { name: m.name, credits: m.credits, description: m.description })
                .collect(),
        };
        for row in self.courses {
            bundle.courses.list_mut(row.category).push(CourseLine {
                name: row.name,
                credits: row.credits,
                specializations: row.specializations,
            });
        }
        bundle
    }
}
