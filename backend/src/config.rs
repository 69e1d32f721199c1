use anyhow::{Context, Result};
use rand::{rngs::StdRng, SeedableRng};
use std::env;

use crate::game::{
    grid::{DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_WALL_PROBABILITY},
    MazeSettings,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub jwt_secret: String,
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub settings: MazeSettings,
    /// Fixed seed for every session's maze generator. Unset means OS entropy.
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Random source for a new maze session
    pub fn session_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server = ServerConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a number")?,
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "./frontend".to_string()),
        };

        let security = SecurityConfig {
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
        };

        let rows = env::var("MAZE_ROWS")
            .unwrap_or_else(|_| DEFAULT_ROWS.to_string())
            .parse()
            .context("MAZE_ROWS must be a number")?;
        let cols = env::var("MAZE_COLS")
            .unwrap_or_else(|_| DEFAULT_COLS.to_string())
            .parse()
            .context("MAZE_COLS must be a number")?;
        let wall_probability = env::var("MAZE_WALL_PROBABILITY")
            .unwrap_or_else(|_| DEFAULT_WALL_PROBABILITY.to_string())
            .parse()
            .context("MAZE_WALL_PROBABILITY must be a number")?;
        let seed = env::var("MAZE_SEED")
            .ok()
            .map(|s| s.parse().context("MAZE_SEED must be an unsigned integer"))
            .transpose()?;

        let game = GameConfig {
            settings: MazeSettings::new(rows, cols, wall_probability)
                .context("Invalid maze settings")?,
            seed,
        };

        Ok(Config {
            server,
            security,
            game,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
