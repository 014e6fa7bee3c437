use crate::config::AppConfig;
use crate::db::connection::init_db;
use crate::router::route;
use crate::state::AppState;
use astra::Server;

mod auth;
mod config;
mod db;
mod domain;
mod errors;
mod handlers;
mod mailer;
mod media;
mod responses;
mod router;
mod search;
mod state;
mod templates;


fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    let addr = config.bind_addr;
    let workers = config.max_workers;
    let state = AppState::from_config(config);

    if let Err(e) = init_db(&state.db) {
        log::error!("database initialization failed: {e}");
        std::process::exit(1);
    }

    log::info!("listening on http://{addr} with {workers} workers");

    let server = Server::bind(&addr).max_workers(workers);
    let result = server.serve(move |req, _info| route(req, &state));

    match result {
        Ok(()) => log::info!("server shut down cleanly"),
        Err(e) => {
            log::error!("server ended with error: {e}");
            std::process::exit(1);
        }
    }
}
