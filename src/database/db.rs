use log::{error, info};
use mongodb::bson::doc;
use mongodb::{Client, options::ClientOptions};

use crate::config::DatabaseConfig;

pub struct Database {
    pub client: Client,
}

impl Database {
    pub async fn init(config: &DatabaseConfig) -> Result<Self, mongodb::error::Error> {
        let mut client_options = ClientOptions::parse(&config.uri).await?;
        client_options.app_name = Some("community-board".to_string());

        let client = Client::with_options(client_options)?;

        // Fail startup here rather than on the first request
        client
            .database("admin")
            .run_command(doc! {"ping": 1})
            .await?;

        info!("Connected successfully to MongoDB");

        Ok(Self { client })
    }
}

/// Connect and ping, logging the failure before handing it back to `main`
pub async fn connect_to_mongo(config: &DatabaseConfig) -> Result<Client, mongodb::error::Error> {
    let database = Database::init(config).await.map_err(|e| {
        error!("Failed to connect to MongoDB: {}", e);
        e
    })?;
    Ok(database.client)
}
