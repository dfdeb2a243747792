use studyplan::aggregate::{
    category_slices, component_slices, credits_by_category, credits_by_specialization, credits_for_specializations,
    sum_entries, total_credits, CreditSummary,
};
use studyplan::models::{CourseCategory, CreditComponent, CurriculumCourseEntry, Specialization};

fn component(name: &str, credits: f64, sort_order: i32) -> CreditComponent {
    CreditComponent { name: name.to_string(), credits, color: "#000000".to_string(), sort_order }
}

fn sample_entries() -> Vec<CurriculumCourseEntry> {
    vec![
        CurriculumCourseEntry::new("Advanced algorithms", 7.0, CourseCategory::Core, &["A"]),
        CurriculumCourseEntry::new("Deep learning", 4.0, CourseCategory::Optional, &["D", "A"]),
        CurriculumCourseEntry::new("Ethics", 3.0, CourseCategory::Transversal, &[]),
        CurriculumCourseEntry::new("Startup lab", 6.0, CourseCategory::Innovation, &[]),
        CurriculumCourseEntry::new("Computer security", 6.0, CourseCategory::Optional, &["S"]),
    ]
}

#[test]
fn test_total_credits_suma_componentes() {
    let comps: Vec<CreditComponent> = [30.0, 24.0, 44.0, 4.0, 4.0, 6.0]
        .iter()
        .enumerate()
        .map(|(i, c)| component(&format!("c{}", i), *c, i as i32 + 1))
        .collect();
    assert_eq!(total_credits(&comps), 112.0);
    assert_eq!(total_credits(&[]), 0.0);
}

#[test]
fn test_creditos_por_categoria() {
    let entries = sample_entries();
    let b = credits_by_category(&entries);
    assert_eq!(b.core.count, 1);
    assert_eq!(b.core.ects, 7.0);
    assert_eq!(b.optional.count, 2);
    assert_eq!(b.optional.ects, 10.0);
    assert_eq!(b.get(CourseCategory::Transversal).ects, 3.0);
    assert_eq!(b.innovation.ects, 6.0);
    assert_eq!(b.total.count, 5);
    assert_eq!(b.total.ects, sum_entries(&entries));
}

#[test]
fn test_creditos_por_especializacion_activa() {
    let entries = sample_entries();
    assert_eq!(credits_for_specializations(&entries, &[]), 26.0);
    assert_eq!(credits_for_specializations(&entries, &["A".to_string()]), 11.0);
    // sin distinguir mayúsculas
    assert_eq!(credits_for_specializations(&entries, &["s".to_string()]), 6.0);
    assert_eq!(credits_for_specializations(&entries, &["A".to_string(), "S".to_string()]), 17.0);
    assert_eq!(credits_for_specializations(&entries, &["V".to_string()]), 0.0);
}

#[test]
fn test_curso_con_varios_codigos_cuenta_en_cada_uno() {
    let specs = vec![
        Specialization { code: "A".into(), name: "Algorithms".into(), color: "#ef4444".into() },
        Specialization { code: "D".into(), name: "Data".into(), color: "#22c55e".into() },
        Specialization { code: "V".into(), name: "Vision".into(), color: "#64748b".into() },
    ];
    let out = credits_by_specialization(&sample_entries(), &specs);
    assert_eq!(out.len(), 3);
    assert_eq!((out[0].code.as_str(), out[0].count, out[0].ects), ("A", 2, 11.0));
    assert_eq!((out[1].code.as_str(), out[1].count, out[1].ects), ("D", 1, 4.0));
    assert_eq!((out[2].count, out[2].ects), (0, 0.0));
}

#[test]
fn test_porciones_ordenadas_y_sin_ceros() {
    let comps = vec![component("Thesis", 30.0, 3), component("Core", 30.0, 1), component("Empty", 0.0, 2)];
    let slices = component_slices(&comps);
    let labels: Vec<&str> = slices.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Core", "Thesis"]);

    let by_cat = category_slices(&credits_by_category(&sample_entries()));
    assert_eq!(by_cat.len(), 4);
    assert_eq!(by_cat[0].label, "Core courses");
    assert_eq!(by_cat[0].color, CourseCategory::Core.color());
}

#[test]
fn test_resumen_consistencia() {
    let comps = vec![component("Core", 90.0, 1), component("Thesis", 30.0, 2)];
    let ok = CreditSummary::build(120, &comps, &sample_entries(), &[]);
    assert!(ok.consistent);
    assert_eq!(ok.components_total, 120.0);
    assert_eq!(ok.slices.len(), 2);

    let bad = CreditSummary::build(112, &comps, &[], &[]);
    assert!(!bad.consistent);
    assert_eq!(bad.curriculum.total.count, 0);
}
