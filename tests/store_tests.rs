use studyplan::models::{Course, Level};
use studyplan::seed::{seed_catalog, SeedOptions};
use studyplan::store::Store;
use studyplan::structure::ProgramCatalog;
use studyplan::Error;

const DIRECTORY: &str = include_str!("../data/courses.json");

const INCONSISTENT: &str = r##"{
  "broken": {
    "structure": { "name": "Broken program", "level": "Master", "total_credits": 120 },
    "components": [ { "name": "Core", "credits": 112, "color": "#3b82f6" } ]
  }
}"##;

fn count(store: &Store, table: &str) -> i64 {
    match store {
        Store::Sqlite(conn) => conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
            .expect("Debe contar filas"),
        Store::Postgres(_) => panic!("tests sólo con sqlite"),
    }
}

fn seeded_store() -> Store {
    let mut store = Store::in_memory().expect("Debe abrir sqlite en memoria");
    let catalog = ProgramCatalog::builtin().unwrap();
    seed_catalog(&mut store, &catalog, SeedOptions::default()).expect("Debe sembrar");
    store
}

#[test]
fn test_sembrar_y_leer_igual_al_catalogo() {
    let store = seeded_store();
    let catalog = ProgramCatalog::builtin().unwrap();
    for bundle in catalog.iter() {
        let loaded = store
            .load_program(bundle.id())
            .expect("Debe leer")
            .expect("Debe existir el programa sembrado");
        assert_eq!(&loaded, bundle);
    }
    let ids: Vec<String> = store.list_programs().unwrap().into_iter().map(|p| p.program_id).collect();
    assert_eq!(ids, catalog.ids());
}

#[test]
fn test_programa_desconocido() {
    let store = seeded_store();
    assert!(store.load_program("architecture").unwrap().is_none());
}

#[test]
fn test_sembrar_dos_veces_es_idempotente() {
    let mut store = seeded_store();
    let tables = [
        "program_structures",
        "program_specializations",
        "program_credit_components",
        "program_courses",
        "program_minors",
    ];
    let before: Vec<i64> = tables.iter().map(|t| count(&store, t)).collect();

    let catalog = ProgramCatalog::builtin().unwrap();
    let report = seed_catalog(&mut store, &catalog, SeedOptions::default()).unwrap();
    let after: Vec<i64> = tables.iter().map(|t| count(&store, t)).collect();
    assert_eq!(before, after);
    assert_eq!(report.programs.len(), 3);
    assert_eq!(report.courses as i64, after[3]);
    assert!(report.resumen().starts_with("SEED: 3 programas"));
}

#[test]
fn test_catalogo_inconsistente_no_escribe() {
    let mut store = Store::in_memory().unwrap();
    store.init_schema().unwrap();
    let catalog = ProgramCatalog::from_json(INCONSISTENT).unwrap();

    let err = seed_catalog(&mut store, &catalog, SeedOptions::default()).expect_err("Debe fallar la validación");
    match err {
        Error::Validation(v) => assert_eq!(v.program_id, "broken"),
        other => panic!("error inesperado: {}", other),
    }
    assert_eq!(count(&store, "program_structures"), 0);

    let report = seed_catalog(&mut store, &catalog, SeedOptions { allow_inconsistent: true })
        .expect("Debe sembrar igual con allow_inconsistent");
    assert_eq!(report.programs, vec!["broken".to_string()]);
    let loaded = store.load_program("broken").unwrap().unwrap();
    assert_eq!(loaded.components[0].credits, 112.0);
}

#[test]
fn test_directorio_de_cursos() {
    let mut store = Store::in_memory().unwrap();
    store.init_schema().unwrap();
    assert!(store.list_courses().unwrap().is_empty());

    let courses: Vec<Course> = serde_json::from_str(DIRECTORY).expect("Debe parsear courses.json");
    let n = store.upsert_courses(&courses).unwrap();
    assert_eq!(n, courses.len());

    let listed = store.list_courses().unwrap();
    assert_eq!(listed.len(), courses.len());
    let dl = listed.iter().find(|c| c.id_course == "EE-559").expect("Debe existir EE-559");
    assert_eq!(dl.name_course, "Deep Learning");
    assert_eq!(dl.level, Level::Master);

    // upsert reemplaza
    let mut renamed = dl.clone();
    renamed.name_course = "Deep learning (EE-559)".into();
    store.upsert_courses(&[renamed]).unwrap();
    let listed = store.list_courses().unwrap();
    assert_eq!(listed.len(), courses.len());
    assert!(listed.iter().any(|c| c.name_course == "Deep learning (EE-559)"));
}

#[test]
fn test_abrir_archivo_crea_directorio() {
    let dir = std::env::temp_dir().join(format!("studyplan-store-{}", std::process::id()));
    let path = dir.join("nested").join("plan.db");
    let target = studyplan::config::DbTarget::Sqlite(path.clone());
    {
        let store = Store::open(&target).expect("Debe crear el directorio y abrir");
        store.init_schema().unwrap();
        store.init_schema().expect("Debe tolerar el esquema ya creado");
    }
    assert!(path.exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_postgres_inalcanzable_devuelve_error_de_postgres() {
    // puerto 1: conexión rechazada de inmediato
    let target = studyplan::config::DbTarget::Postgres("postgres://studyplan:x@127.0.0.1:1/studyplan".into());
    let store = Store::open(&target).expect("Debe aceptar la URL sin conectar");
    match store.list_courses() {
        Err(Error::Postgres(_)) => {}
        Err(other) => panic!("Debe mapear a Error::Postgres, no {}", other),
        Ok(_) => panic!("Debe fallar sin servidor"),
    }
    assert!(matches!(store.load_program("computer-science"), Err(Error::Postgres(_))));
}
