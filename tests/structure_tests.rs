use studyplan::error::ValidationIssue;
use studyplan::models::{CourseCategory, Level};
use studyplan::structure::{CourseRow, ProgramCatalog, ProgramRows};

const SMALL_PROGRAM: &str = r##"{
  "robotics": {
    "structure": { "name": "Master in Robotics", "level": "Master", "total_credits": 120 },
    "components": [
      { "name": "Core", "credits": 60, "color": "#3b82f6" },
      { "name": "Thesis", "credits": 30, "color": "#8b5cf6" }
    ],
    "specializations": [
      { "code": "R", "name": "Robots", "color": "#ef4444" },
      { "code": "r", "name": "Robots again", "color": "#ef4444" },
      { "code": "TOOLONG", "name": "Bad code", "color": "#000000" }
    ],
    "courses": {
      "core": [ { "name": "Legged robots", "credits": 5, "specializations": ["R", "X"] } ],
      "optional": [ { "name": "Broken", "credits": -2 } ]
    }
  }
}"##;

#[test]
fn test_catalogo_embebido_valido() {
    let catalog = ProgramCatalog::builtin().expect("Debe parsear los programas embebidos");
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.ids(), vec!["communication-systems-bachelor", "computer-science", "data-science"]);
    assert!(catalog.validate_all().is_empty(), "Debe ser consistente: {:?}", catalog.validate_all());

    let cs = catalog.get("computer-science").expect("Debe existir computer-science");
    assert_eq!(cs.id(), "computer-science");
    assert_eq!(cs.structure.level, Level::Master);
    assert_eq!(cs.structure.total_credits, 120);
    let orders: Vec<i32> = cs.components.iter().map(|c| c.sort_order).collect();
    assert_eq!(orders, vec![1, 2, 3, 4, 5]);

    let bachelor = catalog.get("communication-systems-bachelor").unwrap();
    assert_eq!(bachelor.structure.level, Level::Bachelor);
    assert_eq!(bachelor.structure.total_credits, 180);
}

#[test]
fn test_curriculum_en_orden_de_categorias() {
    let catalog = ProgramCatalog::builtin().unwrap();
    let cs = catalog.get("computer-science").unwrap();
    let entries = cs.curriculum();
    let total_lines: usize = CourseCategory::ALL.iter().map(|c| cs.courses.list(*c).len()).sum();
    assert_eq!(entries.len(), total_lines);
    let cats: Vec<CourseCategory> = entries.iter().map(|e| e.category).collect();
    let mut sorted = cats.clone();
    sorted.sort();
    assert_eq!(cats, sorted);
    assert!(entries.iter().any(|e| e.name == "Introduction to quantum computation"));
}

#[test]
fn test_validacion_reporta_todos_los_problemas() {
    let catalog = ProgramCatalog::from_json(SMALL_PROGRAM).expect("Debe parsear el JSON");
    let errors = catalog.validate_all();
    assert_eq!(errors.len(), 1);
    let err = &errors[0];
    assert_eq!(err.program_id, "robotics");

    let issues = &err.issues;
    assert!(issues.contains(&ValidationIssue::CreditsMismatch { components_total: 90.0, total_credits: 120 }));
    assert!(issues.contains(&ValidationIssue::DuplicateSpecialization { code: "r".into() }));
    assert!(issues.contains(&ValidationIssue::MalformedSpecializationCode { code: "TOOLONG".into() }));
    assert!(issues.contains(&ValidationIssue::UndeclaredSpecialization {
        course: "Legged robots".into(),
        code: "X".into()
    }));
    assert!(issues.contains(&ValidationIssue::NegativeCredits { item: "Broken".into(), credits: -2.0 }));

    let msg = err.to_string();
    assert!(msg.contains("robotics"));
    assert!(msg.contains("sum to 90"));
}

#[test]
fn test_componente_no_positivo() {
    let json = r##"{ "p": {
        "structure": { "name": "P", "total_credits": 10 },
        "components": [ { "name": "A", "credits": 10, "color": "#111111" }, { "name": "Z", "credits": 0, "color": "#111111" } ]
    } }"##;
    let catalog = ProgramCatalog::from_json(json).unwrap();
    let errors = catalog.validate_all();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].issues[0], ValidationIssue::NonPositiveComponent { .. }));
    assert_eq!(catalog.get("p").unwrap().structure.level, Level::Unspecified);
}

#[test]
fn test_filas_y_vuelta() {
    let catalog = ProgramCatalog::builtin().unwrap();
    for bundle in catalog.iter() {
        let rows = bundle.to_rows();
        assert!(rows.courses.iter().all(|r| r.program_id == bundle.id()));
        let orders: Vec<i32> = rows.courses.iter().map(|r| r.sort_order).collect();
        assert_eq!(orders, (1..=rows.courses.len() as i32).collect::<Vec<_>>());
        assert_eq!(
            rows.row_count(),
            1 + bundle.specializations.len() + bundle.components.len() + bundle.curriculum().len() + bundle.minors.len()
        );
        assert_eq!(&rows.into_bundle(), bundle);
    }
}

#[test]
fn test_into_bundle_reordena() {
    let catalog = ProgramCatalog::builtin().unwrap();
    let bundle = catalog.get("data-science").unwrap();
    let mut rows: ProgramRows = bundle.to_rows();
    rows.courses.reverse();
    rows.components.reverse();
    assert_eq!(&rows.into_bundle(), bundle);
}

#[test]
fn test_codigos_de_especializacion_como_texto() {
    let catalog = ProgramCatalog::builtin().unwrap();
    let rows = catalog.get("computer-science").unwrap().to_rows();
    let dl = rows.courses.iter().find(|r| r.name == "Deep learning").unwrap();
    assert_eq!(dl.specializations_text(), "D,V");
    assert_eq!(CourseRow::parse_specializations(" D, ,V "), vec!["D", "V"]);
}

#[test]
fn test_posiciones_implicitas_van_despues_de_las_explicitas() {
    let json = r##"{ "p": {
        "structure": { "name": "P", "total_credits": 30 },
        "components": [
            { "name": "A", "credits": 10, "color": "#111111", "sort_order": 2 },
            { "name": "B", "credits": 10, "color": "#111111" },
            { "name": "C", "credits": 5, "color": "#111111", "sort_order": 1 },
            { "name": "D", "credits": 5, "color": "#111111" }
        ]
    } }"##;
    let catalog = ProgramCatalog::from_json(json).expect("Debe parsear el JSON");
    let bundle = catalog.get("p").unwrap();
    let orders: Vec<(&str, i32)> = bundle.components.iter().map(|c| (c.name.as_str(), c.sort_order)).collect();
    assert_eq!(orders, vec![("A", 2), ("B", 3), ("C", 1), ("D", 4)]);

    let names: Vec<String> = bundle.sorted_components().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["C", "A", "B", "D"]);
}
