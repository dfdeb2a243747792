//! Enlace entre los nombres del plan de estudios y el directorio de cursos.
//!
//! Los nombres que aparecen en los documentos oficiales (a veces en francés,
//! con puntuación distinta) no coinciden siempre con `name_course`. El
//! emparejamiento se hace por niveles, y el primer nivel que encuentra algo
//! gana; dentro de un nivel gana la primera entrada del directorio:
//!
//! 1. exacto (sin mayúsculas ni espacios de borde)
//! 2. uno contiene al otro
//! 3. solapamiento de palabras largas (sólo con `MatchStrategy::Full`)
//!
//! Un `None` no es un error: el curso se muestra sin enlace.

mod suggest;

pub use suggest::{suggest_courses, Suggestion};

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::{Course, CourseRef, CurriculumCourseEntry, Level};

/// Palabras con más caracteres que esto cuentan para el solapamiento
const MIN_TOKEN_CHARS: usize = 3;
/// Máximo de palabras compartidas que se exigen
const MAX_REQUIRED_TOKENS: usize = 3;

/// Nivel con el que se encontró el enlace. El orden es de menor a mayor
/// confianza.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchConfidence {
    Token,
    Substring,
    Exact,
}

impl MatchConfidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchConfidence::Token => "token",
            MatchConfidence::Substring => "substring",
            MatchConfidence::Exact => "exact",
        }
    }
}

impl fmt::Display for MatchConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchConfidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "token" => Ok(MatchConfidence::Token),
            "substring" => Ok(MatchConfidence::Substring),
            "exact" => Ok(MatchConfidence::Exact),
            other => Err(format!("unknown match confidence '{}'", other)),
        }
    }
}

/// Qué niveles se aplican. La vista simple de cursos sólo usa exacto y
/// subcadena; las demás usan los tres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    #[default]
    Full,
    SubstringOnly,
}

impl FromStr for MatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "full" => Ok(MatchStrategy::Full),
            "substring" | "substring_only" => Ok(MatchStrategy::SubstringOnly),
            other => Err(format!("unknown match strategy '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseLink {
    pub id: String,
    pub confidence: MatchConfidence,
}

impl CourseLink {
    pub fn is_confident(&self, min: MatchConfidence) -> bool {
        self.confidence >= min
    }
}

/// Cualquier cosa con id y nombre sirve como directorio.
pub trait DirectoryEntry {
    fn entry_id(&self) -> &str;
    fn entry_name(&self) -> &str;
}

impl DirectoryEntry for Course {
    fn entry_id(&self) -> &str {
        &self.id_course
    }
    fn entry_name(&self) -> &str {
        &self.name_course
    }
}

impl DirectoryEntry for CourseRef {
    fn entry_id(&self) -> &str {
        &self.id_course
    }
    fn entry_name(&self) -> &str {
        &self.name_course
    }
}

/// Minúsculas y sin espacios en los bordes.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn long_tokens(normalized: &str) -> Vec<&str> {
    normalized
        .split_whitespace()
        .filter(|t| t.chars().count() > MIN_TOKEN_CHARS)
        .collect()
}

/// Cuántas palabras largas de `wanted` aparecen dentro de alguna palabra
/// larga de `candidate`.
fn shared_tokens(wanted: &[&str], candidate: &[&str]) -> usize {
    wanted
        .iter()
        .filter(|w| candidate.iter().any(|c| c.contains(**w)))
        .count()
}

/// Busca el curso del directorio que corresponde a `name`.
pub fn link_course<D: DirectoryEntry>(
    name: &str,
    directory: &[D],
    strategy: MatchStrategy,
) -> Option<CourseLink> {
    let wanted = normalize(name);
    if wanted.is_empty() {
        return None;
    }

    let names: Vec<(&D, String)> = directory
        .iter()
        .map(|d| (d, normalize(d.entry_name())))
        .filter(|(_, n)| !n.is_empty())
        .collect();

    let found = |d: &D, confidence: MatchConfidence| CourseLink { id: d.entry_id().to_string(), confidence };

    if let Some((d, _)) = names.iter().find(|(_, n)| *n == wanted) {
        return Some(found(*d, MatchConfidence::Exact));
    }

    if let Some((d, _)) = names
        .iter()
        .find(|(_, n)| n.contains(wanted.as_str()) || wanted.contains(n.as_str()))
    {
        return Some(found(*d, MatchConfidence::Substring));
    }

    if strategy == MatchStrategy::SubstringOnly {
        return None;
    }

    let tokens = long_tokens(&wanted);
    if tokens.is_empty() {
        return None;
    }
    let required = tokens.len().min(MAX_REQUIRED_TOKENS);
    let hit = names
        .iter()
        .find(|(_, n)| shared_tokens(&tokens, &long_tokens(n)) >= required);
    match hit {
        Some((d, _)) => Some(found(*d, MatchConfidence::Token)),
        None => {
            debug!("no directory match for curriculum course '{}'", name);
            None
        }
    }
}

/// Igual que `link_course`, pero descarta enlaces por debajo de `min`.
pub fn link_course_min<D: DirectoryEntry>(
    name: &str,
    directory: &[D],
    strategy: MatchStrategy,
    min: MatchConfidence,
) -> Option<CourseLink> {
    link_course(name, directory, strategy).filter(|l| l.is_confident(min))
}

/// Entrada del plan ya resuelta contra el directorio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkedEntry {
    #[serde(flatten)]
    pub entry: CurriculumCourseEntry,
    pub link: Option<CourseLink>,
    pub course: Option<Course>,
    /// Nivel del programa dueño del plan; se usa para filtrar por nivel
    /// cuando la entrada no tiene curso enlazado.
    #[serde(skip)]
    pub program_level: Option<Level>,
}

pub fn link_curriculum(
    entries: &[CurriculumCourseEntry],
    directory: &[Course],
    strategy: MatchStrategy,
) -> Vec<LinkedEntry> {
    entries
        .iter()
        .map(|entry| {
            let link = link_course(&entry.name, directory, strategy);
            let course = link
                .as_ref()
                .and_then(|l| directory.iter().find(|c| c.id_course == l.id))
                .cloned();
            LinkedEntry { entry: entry.clone(), link, course, program_level: None }
        })
        .collect()
}
