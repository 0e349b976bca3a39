mod api;
mod blockchain;
mod config;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;

use api::AppState;
use blockchain::Blockchain;
use config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let cfg = Config::from_env();
    info!(
        "⛓️ Starting ledger API at http://{}:{} (difficulty={}, max_iterations={:?})",
        cfg.host, cfg.port, cfg.difficulty, cfg.max_iterations
    );

    let state = web::Data::new(AppState::new(Blockchain::new(cfg.proof_of_work())));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((cfg.host.as_str(), cfg.port))?
    .run()
    .await
}
