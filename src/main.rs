use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use std::io;

use token_optimizer::config::Config;
use token_optimizer::routes::{self, AppState};

// ---------- Server bootstrap ----------
#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();

    let _sentry = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let state = AppState::load(&config).map_err(|e| {
        log::error!("Failed to load hero data: {}", e);
        io::Error::new(io::ErrorKind::InvalidData, e)
    })?;
    let state = web::Data::new(state);

    let port = config.port;
    let json_limit = config.json_limit;

    log::info!("Starting server on http://127.0.0.1:{} (solver: {})", port, config.solver);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(sentry_actix::Sentry::new())
            .app_data(state.clone())
            .app_data(routes::json_config(json_limit))
            .configure(routes::configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
