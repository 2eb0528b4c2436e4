use std::env;

/// Where documents are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Mongo,
    Memory,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub name: String,
    pub storage: StorageBackend,
}

/// Token signing settings shared by login and the authentication gate.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_seconds: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "customized-secret-key".to_string(),
            token_ttl_seconds: 60 * 60,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to local defaults
    pub fn from_env() -> Result<Self, String> {
        let storage = match env::var("BOARD_STORAGE").as_deref() {
            Ok("memory") => StorageBackend::Memory,
            Ok("mongo") | Err(_) => StorageBackend::Mongo,
            Ok(other) => return Err(format!("BOARD_STORAGE must be mongo or memory, got {other}")),
        };

        let defaults = AuthConfig::default();

        Ok(Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .map_err(|_| "PORT must be a valid number")?,
            },
            database: DatabaseConfig {
                uri: env::var("MONGODB_URI")
                    .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
                name: env::var("MONGODB_DATABASE").unwrap_or_else(|_| "hw_lv2".to_string()),
                storage,
            },
            auth: AuthConfig {
                jwt_secret: env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
                token_ttl_seconds: match env::var("JWT_EXPIRY_SECONDS") {
                    Ok(v) => v
                        .parse()
                        .map_err(|_| "JWT_EXPIRY_SECONDS must be a valid number")?,
                    Err(_) => defaults.token_ttl_seconds,
                },
            },
        })
    }
}
