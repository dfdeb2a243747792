use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};
use std::path::PathBuf;

use studyplan::api::{configure, AppState};
use studyplan::config::DbTarget;
use studyplan::models::Course;
use studyplan::seed::{seed_catalog, SeedOptions};
use studyplan::store::Store;
use studyplan::structure::ProgramCatalog;
use studyplan::views::STRUCTURE_UNAVAILABLE;

/// Base sqlite temporaria sembrada con los programas y el directorio de
/// ejemplo. Cada test usa su propio archivo.
fn seeded_db(tag: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("studyplan-api-{}-{}.db", std::process::id(), tag));
    let _ = std::fs::remove_file(&path);
    let mut store = Store::open_sqlite(&path).expect("Debe abrir la base temporal");
    let catalog = ProgramCatalog::builtin().unwrap();
    seed_catalog(&mut store, &catalog, SeedOptions::default()).expect("Debe sembrar");
    let courses: Vec<Course> = serde_json::from_str(include_str!("../data/courses.json")).unwrap();
    store.upsert_courses(&courses).unwrap();
    path
}

macro_rules! app {
    ($path:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState { db: DbTarget::Sqlite($path.clone()) }))
                .configure(configure),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health() {
    let path = seeded_db("health");
    let app = app!(path);
    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert!(resp.status().is_success());
    let _ = std::fs::remove_file(&path);
}

#[actix_web::test]
async fn test_listar_programas_y_cursos() {
    let path = seeded_db("list");
    let app = app!(path);

    let body: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/programs").to_request()).await;
    assert_eq!(body["programs"].as_array().map(|a| a.len()), Some(3));

    let req = test::TestRequest::get().uri("/courses?search=guerraoui&level=master").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 2);

    let req = test::TestRequest::get().uri("/courses?level=phd").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let _ = std::fs::remove_file(&path);
}

#[actix_web::test]
async fn test_programa_no_disponible() {
    let path = seeded_db("missing");
    let app = app!(path);

    let req = test::TestRequest::get().uri("/programs/architecture/courses").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["available"], false);
    assert_eq!(body["message"], STRUCTURE_UNAVAILABLE);

    let req = test::TestRequest::get().uri("/programs/architecture/chart.svg").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/programs/architecture/courses.csv").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    let _ = std::fs::remove_file(&path);
}

#[actix_web::test]
async fn test_estructura_y_cursos_de_programa() {
    let path = seeded_db("program");
    let app = app!(path);

    let req = test::TestRequest::get().uri("/programs/computer-science").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["available"], true);
    assert_eq!(body["structure"]["total_credits"], 120);
    assert_eq!(body["credits"]["consistent"], true);

    let req = test::TestRequest::get()
        .uri("/programs/computer-science/courses?type=optional&specialization=D")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let entries = body["entries"].as_array().expect("Debe traer entradas");
    assert!(!entries.is_empty());
    assert!(entries.iter().all(|e| e["category"] == "optional"));
    let dl = entries.iter().find(|e| e["name"] == "Deep learning").expect("Debe incluir Deep learning");
    assert_eq!(dl["link"]["id"], "EE-559");
    assert_eq!(dl["link"]["confidence"], "exact");

    let req = test::TestRequest::get().uri("/programs/computer-science/courses?strategy=fuzzy").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    let _ = std::fs::remove_file(&path);
}

#[actix_web::test]
async fn test_grafico_y_csv() {
    let path = seeded_db("chart");
    let app = app!(path);

    let req = test::TestRequest::get().uri("/programs/data-science/chart.svg?by=categories").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("<svg"));

    let req = test::TestRequest::get().uri("/programs/data-science/chart.svg?by=week").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/programs/computer-science/courses.csv").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let text = String::from_utf8_lossy(&body);
    assert!(text.starts_with("\"name\",\"category\""));
    assert!(text.contains("\"Deep learning\""));
    let _ = std::fs::remove_file(&path);
}

#[actix_web::test]
async fn test_no_resueltos_y_link() {
    let path = seeded_db("link");
    let app = app!(path);

    let req = test::TestRequest::get().uri("/programs/computer-science/unresolved?limit=2").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let list = body.as_array().expect("Debe ser una lista");
    assert!(list.iter().any(|u| u["name"] == "Introduction to quantum computation"));

    let req = test::TestRequest::post().uri("/link").set_json(json!({"name": "deep learning"})).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["link"]["id"], "EE-559");

    let req = test::TestRequest::post()
        .uri("/link")
        .set_json(json!({"name": "Introduction to quantum computation", "strategy": "substring_only"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["link"].is_null());
    let _ = std::fs::remove_file(&path);
}
