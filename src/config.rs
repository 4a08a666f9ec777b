// src/config.rs
use log::warn;
use std::env;
use std::str::FromStr;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:9090";
const DEFAULT_DATABASE_PATH: &str = "./storage/retro.db";
const DEFAULT_JWT_SECRET: &str = "retro_super_secret_key";
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24 * 7;
const DEFAULT_EVENT_BUFFER: usize = 256;

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub database_path: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub event_buffer: usize,
    pub allowed_origin: Option<String>,
}

impl AppConfig {
    // Build config from environment variables (call dotenv first)
    pub fn from_env() -> Self {
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("⚠️ JWT_SECRET not set, falling back to the development secret");
            DEFAULT_JWT_SECRET.to_string()
        });

        Self {
            bind_address: env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string()),
            jwt_secret,
            token_ttl_hours: parse_or("TOKEN_TTL_HOURS", DEFAULT_TOKEN_TTL_HOURS),
            bcrypt_cost: parse_or("BCRYPT_COST", bcrypt::DEFAULT_COST),
            event_buffer: parse_or("EVENT_BUFFER", DEFAULT_EVENT_BUFFER),
            allowed_origin: env::var("ALLOWED_ORIGIN").ok().filter(|v| !v.trim().is_empty()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            event_buffer: DEFAULT_EVENT_BUFFER,
            allowed_origin: None,
        }
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("⚠️ Invalid value `{}` for {}, using {}", raw, key, default);
            default
        }),
        Err(_) => default,
    }
}
