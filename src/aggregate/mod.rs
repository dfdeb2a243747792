//! Sumas de créditos (ECTS) que alimentan el gráfico de torta y los badges.
//!
//! Las sumas son sumas simples de f64; el redondeo queda para la capa de
//! presentación.

use serde::Serialize;

use crate::models::{CourseCategory, CreditComponent, CurriculumCourseEntry, Specialization};

pub fn total_credits(components: &[CreditComponent]) -> f64 {
    components.iter().map(|c| c.credits).sum()
}

pub fn sum_entries<'a, I>(entries: I) -> f64
where
    I: IntoIterator<Item = &'a CurriculumCourseEntry>,
{
    entries.into_iter().map(|e| e.credits).sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CategoryTotals {
    pub count: usize,
    pub ects: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CategoryBreakdown {
    pub core: CategoryTotals,
    pub transversal: CategoryTotals,
    pub optional: CategoryTotals,
    pub innovation: CategoryTotals,
    pub total: CategoryTotals,
}

impl CategoryBreakdown {
    pub fn get(&self, category: CourseCategory) -> CategoryTotals {
        match category {
            CourseCategory::Core => self.core,
            CourseCategory::Transversal => self.transversal,
            CourseCategory::Optional => self.optional,
            CourseCategory::Innovation => self.innovation,
        }
    }

    fn get_mut(&mut self, category: CourseCategory) -> &mut CategoryTotals {
        match category {
            CourseCategory::Core => &mut self.core,
            CourseCategory::Transversal => &mut self.transversal,
            CourseCategory::Optional => &mut self.optional,
            CourseCategory::Innovation => &mut self.innovation,
        }
    }
}

pub fn credits_by_category<'a, I>(entries: I) -> CategoryBreakdown
where
    I: IntoIterator<Item = &'a CurriculumCourseEntry>,
{
    let mut out = CategoryBreakdown::default();
    for e in entries {
        let bucket = out.get_mut(e.category);
        bucket.count += 1;
        bucket.ects += e.credits;
        out.total.count += 1;
        out.total.ects += e.credits;
    }
    out
}

/// Suma sólo las entradas cuyos códigos intersectan `active`. Sin filtro
/// activo suma todo.
pub fn credits_for_specializations<'a, I>(entries: I, active: &[String]) -> f64
where
    I: IntoIterator<Item = &'a CurriculumCourseEntry>,
{
    entries
        .into_iter()
        .filter(|e| active.is_empty() || e.has_any_specialization(active))
        .map(|e| e.credits)
        .sum()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecializationCredits {
    pub code: String,
    pub name: String,
    pub color: String,
    pub count: usize,
    pub ects: f64,
}

/// Créditos por especialización declarada. Un curso con varios códigos
/// cuenta en cada uno.
pub fn credits_by_specialization(
    entries: &[CurriculumCourseEntry],
    specializations: &[Specialization],
) -> Vec<SpecializationCredits> {
    specializations
        .iter()
        .map(|s| {
            let code = vec![s.code.clone()];
            let tagged: Vec<&CurriculumCourseEntry> =
                entries.iter().filter(|e| e.has_any_specialization(&code)).collect();
            SpecializationCredits {
                code: s.code.clone(),
                name: s.name.clone(),
                color: s.color.clone(),
                count: tagged.len(),
                ects: sum_entries(tagged),
            }
        })
        .collect()
}

/// Porción del gráfico de torta
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: String,
}

pub fn component_slices(components: &[CreditComponent]) -> Vec<PieSlice> {
    let mut sorted: Vec<&CreditComponent> = components.iter().collect();
    sorted.sort_by_key(|c| c.sort_order);
    sorted
        .into_iter()
        .filter(|c| c.credits > 0.0)
        .map(|c| PieSlice { label: c.name.clone(), value: c.credits, color: c.color.clone() })
        .collect()
}

pub fn category_slices(breakdown: &CategoryBreakdown) -> Vec<PieSlice> {
    CourseCategory::ALL
        .iter()
        .map(|cat| (cat, breakdown.get(*cat)))
        .filter(|(_, t)| t.ects > 0.0)
        .map(|(cat, t)| PieSlice { label: cat.label().to_string(), value: t.ects, color: cat.color().to_string() })
        .collect()
}

/// Resumen de créditos para una vista de programa.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditSummary {
    pub total_credits: i32,
    pub components_total: f64,
    /// `components_total == total_credits`
    pub consistent: bool,
    pub curriculum: CategoryBreakdown,
    pub specializations: Vec<SpecializationCredits>,
    pub slices: Vec<PieSlice>,
}

impl CreditSummary {
    pub fn build(
        total_target: i32,
        components: &[CreditComponent],
        entries: &[CurriculumCourseEntry],
        specializations: &[Specialization],
    ) -> CreditSummary {
        let components_total = total_credits(components);
        CreditSummary {
            total_credits: total_target,
            components_total,
            consistent: (components_total - f64::from(total_target)).abs() < 1e-6,
            curriculum: credits_by_category(entries),
            specializations: credits_by_specialization(entries, specializations),
            slices: component_slices(components),
        }
    }
}
