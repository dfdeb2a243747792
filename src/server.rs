use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use log::info;

use crate::api::{configure, AppState};
use crate::config::Config;
use crate::store::Store;

/// Levanta el servidor HTTP con la configuración dada. Crea las tablas si no
/// existen para que una base vacía responda "no disponible" en vez de error.
pub async fn run_server(config: Config) -> std::io::Result<()> {
    let store = Store::open(&config.db).map_err(|e| std::io::Error::other(e.to_string()))?;
    store.init_schema().map_err(|e| std::io::Error::other(e.to_string()))?;
    drop(store);

    let state = web::Data::new(AppState { db: config.db.clone() });
    info!("listening on http://{}", config.bind);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(config.bind.as_str())?
    .run()
    .await
}
