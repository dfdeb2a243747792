//! Handlers HTTP (sólo lectura, salvo `/link` que no escribe nada).

use actix_web::{web, HttpResponse, Responder};
use log::error;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;

use crate::aggregate::{category_slices, component_slices, credits_by_category};
use crate::chart::{render_pie_svg, ChartOptions};
use crate::config::DbTarget;
use crate::error::Error;
use crate::export::curriculum_to_csv;
use crate::filter::{apply_filters, FilterState, LevelFilter};
use crate::linker::{link_course, link_course_min, MatchConfidence, MatchStrategy};
use crate::models::{Course, CourseRef};
use crate::store::Store;
use crate::views::{courses_view, structure_view, unresolved_view, View};

/// Estado compartido: sólo el destino de la base, cada request abre su
/// propia conexión.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: DbTarget,
}

type Query = web::Query<HashMap<String, String>>;

fn bad_request(msg: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({"error": msg.into()}))
}

fn internal_error(e: Error) -> HttpResponse {
    error!("request failed: {}", e);
    HttpResponse::InternalServerError().json(json!({"error": e.to_string()}))
}

/// Corre `op` con un `Store` abierto fuera del hilo del runtime.
async fn with_store<T, F>(state: &AppState, op: F) -> Result<T, HttpResponse>
where
    T: Send + 'static,
    F: FnOnce(&Store) -> crate::error::Result<T> + Send + 'static,
{
    let target = state.db.clone();
    let res = web::block(move || {
        let store = Store::open(&target)?;
        op(&store)
    })
    .await;
    match res {
        Ok(Ok(v)) => Ok(v),
        Ok(Err(e)) => Err(internal_error(e)),
        Err(e) => Err(internal_error(Error::Thread(e.to_string()))),
    }
}

fn strategy_from(q: &HashMap<String, String>) -> Result<MatchStrategy, HttpResponse> {
    q.get("strategy").map(|s| s.as_str()).unwrap_or("").parse().map_err(bad_request)
}

/// GET /health
pub async fn health_handler() -> impl Responder {
    HttpResponse::Ok().json(json!({"status": "ok"}))
}

/// GET /courses?search=&level=
pub async fn courses_handler(state: web::Data<AppState>, query: Query) -> HttpResponse {
    let q = query.into_inner();
    let level: LevelFilter = match q.get("level").map(|s| s.as_str()).unwrap_or("").parse() {
        Ok(l) => l,
        Err(e) => return bad_request(e),
    };
    let filter = FilterState {
        search: q.get("search").cloned().unwrap_or_default(),
        level,
        ..FilterState::default()
    };
    match with_store(&state, |store| store.list_courses()).await {
        Ok(courses) => {
            let visible: Vec<_> = apply_filters(&courses, &filter);
            HttpResponse::Ok().json(json!({"count": visible.len(), "courses": visible}))
        }
        Err(resp) => resp,
    }
}

/// GET /programs
pub async fn programs_handler(state: web::Data<AppState>) -> HttpResponse {
    match with_store(&state, |store| store.list_programs()).await {
        Ok(programs) => HttpResponse::Ok().json(json!({"programs": programs})),
        Err(resp) => resp,
    }
}

/// GET /programs/{id}
pub async fn program_handler(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let program_id = path.into_inner();
    match with_store(&state, move |store| structure_view(store, &program_id)).await {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(resp) => resp,
    }
}

/// GET /programs/{id}/courses?search=&level=&type=&specialization=&strategy=
pub async fn program_courses_handler(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: Query,
) -> HttpResponse {
    let program_id = path.into_inner();
    let q = query.into_inner();
    let filter = match FilterState::from_query(&q) {
        Ok(f) => f,
        Err(e) => return bad_request(e),
    };
    let strategy = match strategy_from(&q) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match with_store(&state, move |store| courses_view(store, &program_id, &filter, strategy)).await {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(resp) => resp,
    }
}

/// GET /programs/{id}/chart.svg?by=components|categories
pub async fn chart_handler(state: web::Data<AppState>, path: web::Path<String>, query: Query) -> HttpResponse {
    let program_id = path.into_inner();
    let by_categories = match query.get("by").map(|s| s.as_str()).unwrap_or("components") {
        "components" | "" => false,
        "categories" => true,
        other => return bad_request(format!("unknown chart grouping '{}'", other)),
    };
    let pid = program_id.clone();
    let bundle = match with_store(&state, move |store| store.load_program(&pid)).await {
        Ok(Some(b)) => b,
        Ok(None) => return HttpResponse::NotFound().json(View::<()>::unavailable()),
        Err(resp) => return resp,
    };

    let slices = if by_categories {
        category_slices(&credits_by_category(&bundle.curriculum()))
    } else {
        component_slices(&bundle.components)
    };
    let options = ChartOptions { title: bundle.structure.name.clone(), ..ChartOptions::default() };
    match render_pie_svg(&slices, &options) {
        Ok(svg) => HttpResponse::Ok().content_type("image/svg+xml").body(svg),
        Err(e) => internal_error(e),
    }
}

/// GET /programs/{id}/courses.csv (acepta los mismos filtros que /courses)
pub async fn csv_handler(state: web::Data<AppState>, path: web::Path<String>, query: Query) -> HttpResponse {
    let program_id = path.into_inner();
    let q = query.into_inner();
    let filter = match FilterState::from_query(&q) {
        Ok(f) => f,
        Err(e) => return bad_request(e),
    };
    let strategy = match strategy_from(&q) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let pid = program_id.clone();
    match with_store(&state, move |store| courses_view(store, &pid, &filter, strategy)).await {
        Ok(View::Ready(view)) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(("Content-Disposition", format!("attachment; filename=\"{}-courses.csv\"", program_id)))
            .body(curriculum_to_csv(&view.entries)),
        Ok(unavailable) => HttpResponse::NotFound().json(unavailable),
        Err(resp) => resp,
    }
}

/// GET /programs/{id}/unresolved?limit=3
pub async fn unresolved_handler(state: web::Data<AppState>, path: web::Path<String>, query: Query) -> HttpResponse {
    let program_id = path.into_inner();
    let limit = match query.get("limit").map(|s| s.parse::<usize>()) {
        None => 3,
        Some(Ok(n)) => n,
        Some(Err(_)) => return bad_request("limit must be a non-negative integer"),
    };
    let strategy = match strategy_from(&query) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match with_store(&state, move |store| unresolved_view(store, &program_id, strategy, limit)).await {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(resp) => resp,
    }
}

#[derive(Debug, Deserialize)]
pub struct LinkRequest {
    pub name: String,
    #[serde(default)]
    pub strategy: MatchStrategy,
    #[serde(default)]
    pub min_confidence: Option<MatchConfidence>,
}

/// POST /link {"name": "...", "strategy": "full", "min_confidence": "substring"}
pub async fn link_handler(state: web::Data<AppState>, body: web::Json<LinkRequest>) -> HttpResponse {
    let req = body.into_inner();
    let directory: Vec<CourseRef> = match with_store(&state, |store| store.list_courses()).await {
        Ok(courses) => courses.iter().map(Course::as_ref_row).collect(),
        Err(resp) => return resp,
    };
    let link = match req.min_confidence {
        Some(min) => link_course_min(&req.name, &directory, req.strategy, min),
        None => link_course(&req.name, &directory, req.strategy),
    };
    HttpResponse::Ok().json(json!({"name": req.name, "link": link}))
}

/// GET /help
pub async fn help_handler() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "endpoints": [
            "GET /health",
            "GET /courses?search=&level=",
            "GET /programs",
            "GET /programs/{id}",
            "GET /programs/{id}/courses?search=&level=&type=&specialization=&strategy=",
            "GET /programs/{id}/chart.svg?by=components|categories",
            "GET /programs/{id}/courses.csv",
            "GET /programs/{id}/unresolved?limit=",
            "POST /link",
            "GET /help"
        ]
    }))
}

/// Registra todas las rutas (lo usa el servidor y los tests).
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_handler))
        .route("/courses", web::get().to(courses_handler))
        .route("/programs", web::get().to(programs_handler))
        .route("/programs/{id}", web::get().to(program_handler))
        .route("/programs/{id}/courses", web::get().to(program_courses_handler))
        .route("/programs/{id}/chart.svg", web::get().to(chart_handler))
        .route("/programs/{id}/courses.csv", web::get().to(csv_handler))
        .route("/programs/{id}/unresolved", web::get().to(unresolved_handler))
        .route("/link", web::post().to(link_handler))
        .route("/help", web::get().to(help_handler));
}
