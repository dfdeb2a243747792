use studyplan::linker::{link_course, MatchStrategy};
use studyplan::models::{Course, CourseRef, Level};

#[test]
fn test_profesores_separadores_mixtos() {
    let mut c = Course::new("CS-433", "Machine learning");
    c.professor = Some("Jaggi Martin, Flammarion Nicolas; ; Macris Nicolas ,".into());
    assert_eq!(c.professors(), vec!["Jaggi Martin", "Flammarion Nicolas", "Macris Nicolas"]);

    c.professor = Some("   ".into());
    assert!(c.professors().is_empty());
    c.professor = None;
    assert!(c.professors().is_empty());
}

#[test]
fn test_topics_solo_coma() {
    let mut c = Course::new("CS-450", "Advanced algorithms");
    c.topics = Some(" algorithms,graphs; approximation ,, ".into());
    // el punto y coma no separa topics
    assert_eq!(c.topics(), vec!["algorithms", "graphs; approximation"]);
    c.topics = None;
    assert!(c.topics().is_empty());
}

#[test]
fn test_proyeccion_minima() {
    let mut c = Course::new("EE-559", "Deep Learning");
    c.code = Some("EE-559".into());
    c.level = Level::Master;
    c.professor = Some("Fleuret François".into());

    let r = c.as_ref_row();
    assert_eq!(
        r,
        CourseRef { id_course: "EE-559".into(), name_course: "Deep Learning".into(), code: Some("EE-559".into()) }
    );

    let directory: Vec<CourseRef> = [c].iter().map(Course::as_ref_row).collect();
    let link = link_course("deep learning", &directory, MatchStrategy::Full).expect("Debe enlazar sobre la proyección");
    assert_eq!(link.id, "EE-559");
}

#[test]
fn test_nivel_desde_texto() {
    assert_eq!(Level::from_db(Some(" MA ")), Level::Master);
    assert_eq!(Level::from_db(Some("bachelor")), Level::Bachelor);
    assert_eq!(Level::from_db(Some("phd")), Level::Unspecified);
    assert_eq!(Level::from_db(None), Level::Unspecified);

    let c: Course = serde_json::from_str(r#"{"id_course": "x", "name_course": "X", "level": null}"#).unwrap();
    assert_eq!(c.level, Level::Unspecified);
    assert_eq!(c.credits, 0.0);
}
