use std::collections::HashSet;

use log::warn;

use super::ProgramBundle;
use crate::error::{ValidationError, ValidationIssue};

/// Tolerancia para comparar sumas de créditos
const CREDIT_EPSILON: f64 = 1e-6;

fn is_valid_code(code: &str) -> bool {
    let n = code.chars().count();
    (1..=3).contains(&n) && code.chars().all(|c| c.is_ascii_alphabetic())
}

/// Revisa que los datos estáticos de un programa sean coherentes:
/// - la suma de componentes es igual a `total_credits`
/// - los códigos de especialización son 1-3 letras y no se repiten
/// - todo código usado por un curso está declarado
/// - no hay créditos negativos
pub fn validate_bundle(bundle: &ProgramBundle) -> Result<(), ValidationError> {
    let mut issues = Vec::new();

    let components_total: f64 = bundle.components.iter().map(|c| c.credits).sum();
    if (components_total - f64::from(bundle.structure.total_credits)).abs() > CREDIT_EPSILON {
        issues.push(ValidationIssue::CreditsMismatch {
            components_total,
            total_credits: bundle.structure.total_credits,
        });
    }
    for c in &bundle.components {
        if c.credits <= 0.0 {
            issues.push(ValidationIssue::NonPositiveComponent { component: c.name.clone(), credits: c.credits });
        }
    }

    let mut declared: HashSet<String> = HashSet::new();
    for s in &bundle.specializations {
        if !is_valid_code(&s.code) {
            issues.push(ValidationIssue::MalformedSpecializationCode { code: s.code.clone() });
        }
        if !declared.insert(s.code.to_uppercase()) {
            issues.push(ValidationIssue::DuplicateSpecialization { code: s.code.clone() });
        }
    }

    for entry in bundle.curriculum() {
        if entry.credits < 0.0 {
            issues.push(ValidationIssue::NegativeCredits { item: entry.name.clone(), credits: entry.credits });
        }
        for code in &entry.specializations {
            if !declared.contains(&code.to_uppercase()) {
                issues.push(ValidationIssue::UndeclaredSpecialization {
                    course: entry.name.clone(),
                    code: code.clone(),
                });
            }
        }
    }

    for m in &bundle.minors {
        if m.credits < 0.0 {
            issues.push(ValidationIssue::NegativeCredits { item: m.name.clone(), credits: m.credits });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        let err = ValidationError { program_id: bundle.id().to_string(), issues };
        warn!("{}", err);
        Err(err)
    }
}
