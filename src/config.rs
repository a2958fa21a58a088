// src/config.rs

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection string. `None` keeps every store in memory.
    pub database_url: Option<String>,
    pub questions_path: PathBuf,
    pub jwt_secret: String,
    /// Login token lifetime in seconds.
    pub jwt_expiration: u64,
    pub port: u16,
    pub log_dir: String,
    /// Upper bound on the number of events returned by `GET /logs`.
    pub max_log_entries: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());

        let questions_path = env::var("QUESTIONS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("questions.json"));

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        Self {
            database_url,
            questions_path,
            jwt_secret,
            jwt_expiration: parse_or("JWT_EXPIRATION", 3600),
            port: parse_or("PORT", 3000),
            log_dir,
            max_log_entries: parse_or("MAX_LOG_ENTRIES", 100),
            rust_log,
        }
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a valid unsigned integer")),
        Err(_) => default,
    }
}
