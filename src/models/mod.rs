// Estructuras de datos principales

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Nivel de estudios de un curso o programa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Level {
    Bachelor,
    Master,
    #[default]
    Unspecified,
}

impl From<Option<String>> for Level {
    fn from(s: Option<String>) -> Self {
        Level::from_db(s.as_deref())
    }
}

impl From<Level> for Option<String> {
    fn from(l: Level) -> Self {
        match l {
            Level::Unspecified => None,
            other => Some(other.as_str().to_string()),
        }
    }
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Bachelor => "Bachelor",
            Level::Master => "Master",
            Level::Unspecified => "",
        }
    }

    /// Interpreta el texto guardado en la base; cualquier valor desconocido
    /// queda como `Unspecified`.
    pub fn from_db(s: Option<&str>) -> Level {
        match s.map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "bachelor" || v == "ba" => Level::Bachelor,
            Some(v) if v == "master" || v == "ma" => Level::Master,
            _ => Level::Unspecified,
        }
    }
}

/// Curso del directorio (tabla `Courses`). Sólo lectura para este sistema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id_course: String,
    pub name_course: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub credits: f64,
    #[serde(default)]
    pub level: Level,
    #[serde(default)]
    pub language: Option<String>,
    /// Lista libre de profesores separada por `;` o `,`
    #[serde(default)]
    pub professor: Option<String>,
    /// Tags separados por comas
    #[serde(default)]
    pub topics: Option<String>,
}

impl Course {
    pub fn new(id: &str, name: &str) -> Self {
        Course {
            id_course: id.to_string(),
            name_course: name.to_string(),
            code: None,
            credits: 0.0,
            level: Level::Unspecified,
            language: None,
            professor: None,
            topics: None,
        }
    }

    pub fn professors(&self) -> Vec<String> {
        split_list(self.professor.as_deref(), &[';', ','])
    }

    pub fn topics(&self) -> Vec<String> {
        split_list(self.topics.as_deref(), &[','])
    }

    pub fn as_ref_row(&self) -> CourseRef {
        CourseRef {
            id_course: self.id_course.clone(),
            name_course: self.name_course.clone(),
            code: self.code.clone(),
        }
    }
}

fn split_list(raw: Option<&str>, seps: &[char]) -> Vec<String> {
    raw.map(|s| {
        s.split(|c| seps.contains(&c))
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(|p| p.to_string())
            .collect()
    })
    .unwrap_or_default()
}

/// Proyección mínima `{id_course, name_course, code}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRef {
    pub id_course: String,
    pub name_course: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// Fila `program_structures`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramStructure {
    /// Se completa con la clave del programa al cargar el catálogo
    #[serde(default)]
    pub program_id: String,
    pub name: String,
    #[serde(default)]
    pub level: Level,
    pub total_credits: i32,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub internship: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditComponent {
    pub name: String,
    pub credits: f64,
    pub color: String,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialization {
    pub code: String,
    pub name: String,
    pub color: String,
}

/// Categoría declarada en el documento oficial del programa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseCategory {
    Core,
    Transversal,
    Optional,
    Innovation,
}

impl CourseCategory {
    pub const ALL: [CourseCategory; 4] = [
        CourseCategory::Core,
        CourseCategory::Transversal,
        CourseCategory::Optional,
        CourseCategory::Innovation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CourseCategory::Core => "core",
            CourseCategory::Transversal => "transversal",
            CourseCategory::Optional => "optional",
            CourseCategory::Innovation => "innovation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CourseCategory::Core => "Core courses",
            CourseCategory::Transversal => "Transversal courses",
            CourseCategory::Optional => "Optional courses",
            CourseCategory::Innovation => "Innovation courses",
        }
    }

    /// Color usado en el gráfico por categorías
    pub fn color(&self) -> &'static str {
        match self {
            CourseCategory::Core => "#3b82f6",
            CourseCategory::Transversal => "#f59e0b",
            CourseCategory::Optional => "#10b981",
            CourseCategory::Innovation => "#8b5cf6",
        }
    }
}

impl fmt::Display for CourseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "core" => Ok(CourseCategory::Core),
            "transversal" => Ok(CourseCategory::Transversal),
            "optional" => Ok(CourseCategory::Optional),
            "innovation" => Ok(CourseCategory::Innovation),
            other => Err(format!("unknown course category '{}'", other)),
        }
    }
}

/// Curso tal como aparece en el plan de estudios oficial. El nombre no tiene
/// por qué coincidir con el del directorio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurriculumCourseEntry {
    pub name: String,
    pub credits: f64,
    pub category: CourseCategory,
    #[serde(default)]
    pub specializations: Vec<String>,
}

impl CurriculumCourseEntry {
    pub fn new(name: &str, credits: f64, category: CourseCategory, specializations: &[&str]) -> Self {
        CurriculumCourseEntry {
            name: name.to_string(),
            credits,
            category,
            specializations: specializations.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn has_any_specialization(&self, codes: &[String]) -> bool {
        self.specializations
            .iter()
            .any(|c| codes.iter().any(|a| a.eq_ignore_ascii_case(c)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Minor {
    pub name: String,
    pub credits: f64,
    #[serde(default)]
    pub description: Option<String>,
}
