use anyhow::{Context, Result};
use std::env;

use crate::game::DrawPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub database: Option<DatabaseConfig>,
    pub server: ServerConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Letter table to use instead of the bundled one
    pub letters_path: Option<String>,
    pub draw_policy: DrawPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        // Without a database URL games are kept in memory
        let database = match env::var("DATABASE_URL") {
            Ok(url) => Some(DatabaseConfig {
                url,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .context("DATABASE_MAX_CONNECTIONS must be a number")?,
            }),
            Err(_) => None,
        };

        let server = ServerConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a number")?,
        };

        let game = GameConfig {
            letters_path: env::var("LETTERS_PATH").ok(),
            draw_policy: env::var("DRAW_POLICY")
                .unwrap_or_else(|_| "uniform".to_string())
                .parse::<DrawPolicy>()
                .map_err(|e| anyhow::anyhow!("DRAW_POLICY must be 'uniform' or 'weighted': {}", e))?,
        };

        Ok(Config {
            database,
            server,
            game,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
