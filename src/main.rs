use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::{info, warn};

use rust_ledger::api::{self, AppState};
use rust_ledger::config::NodeConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = NodeConfig::from_env();
    let (host, port) = (config.host.clone(), config.port);

    println!("⛓️ Starting ledger node at http://{host}:{port}");

    let state = web::Data::new(AppState::new(&config));

    for peer in &config.peers {
        if let Err(e) = state.node.register_peer(peer) {
            warn!("ignoring bootstrap peer: {e}");
        }
    }

    if let Some(every) = config.resolve_interval {
        info!("CONSENSUS - resolving every {}s", every.as_secs());
        api::spawn_periodic_resolve(state.clone(), every);
    }

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
