use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{info, warn};

use community_board::AppState;
use community_board::config::{AppConfig, StorageBackend};
use community_board::database::{self, Repositories};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let repositories = match config.database.storage {
        StorageBackend::Mongo => {
            let client = database::connect_to_mongo(&config.database)
                .await
                .map_err(std::io::Error::other)?;
            Repositories::mongo(&client, &config.database.name).await
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data is lost on shutdown");
            Repositories::memory()
        }
    };

    let state = AppState::new(repositories, config.auth.clone());

    info!(
        "Starting server on http://{}:{}",
        config.server.host, config.server.port
    );

    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(Logger::default())
            .configure(|cfg| state.configure(cfg))
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await?;

    info!("Server has stopped");

    Ok(())
}
