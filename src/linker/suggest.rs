use serde::Serialize;
use strsim::jaro_winkler;

use super::{normalize, DirectoryEntry};

/// Por debajo de esto la sugerencia es ruido
const MIN_SIMILARITY: f64 = 0.75;

/// Candidato cercano para un nombre que no se pudo enlazar. Sólo sirve para
/// los reportes del operador; nunca se usa para crear enlaces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub id: String,
    pub name: String,
    pub similarity: f64,
}

/// Devuelve hasta `limit` cursos del directorio ordenados por similitud
/// Jaro-Winkler (desc). Empates se resuelven por orden del directorio.
pub fn suggest_courses<D: DirectoryEntry>(name: &str, directory: &[D], limit: usize) -> Vec<Suggestion> {
    let wanted = normalize(name);
    if wanted.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(usize, Suggestion)> = directory
        .iter()
        .enumerate()
        .filter_map(|(idx, d)| {
            let similarity = jaro_winkler(&wanted, &normalize(d.entry_name()));
            if similarity >= MIN_SIMILARITY {
                Some((
                    idx,
                    Suggestion { id: d.entry_id().to_string(), name: d.entry_name().to_string(), similarity },
                ))
            } else {
                None
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.1.similarity
            .partial_cmp(&a.1.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    scored.into_iter().take(limit).map(|(_, s)| s).collect()
}
