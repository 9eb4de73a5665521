use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub https: bool,
    pub tls_cert_path: String,
    pub tls_key_path: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub access_token_expire_minutes: i64,
    pub session_cookie_max_age: i64,
    pub allowed_origins: Vec<String>,
    pub openai_model: String,
    pub source_text_max_chars: usize,
    pub source_sample_attempts: u32,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            host: get_env_or("HOST", "127.0.0.1"),
            port: get_env_parse_or("PORT", 8000)?,
            https: get_env_or("HTTPS", "false") == "true",
            tls_cert_path: get_env_or("TLS_CERT_PATH", "./certificates/localhost.crt"),
            tls_key_path: get_env_or("TLS_KEY_PATH", "./certificates/localhost.key"),
            database_url: get_env("DATABASE_URL")?,
            jwt_secret: get_env_or(
                "JWT_SECRET",
                "09d25e094faa6ca2556c818166b7a9563b93f7099f6f0f4caa6cf63b88e8d3e7",
            ),
            access_token_expire_minutes: get_env_parse_or("ACCESS_TOKEN_EXPIRE_MINUTES", 30)?,
            session_cookie_max_age: get_env_parse_or("SESSION_COOKIE_MAX_AGE", 3600)?,
            allowed_origins: get_env_or("ALLOWED_ORIGINS", "http://localhost:3000")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            openai_model: get_env_or("OPENAI_MODEL", "gpt-4"),
            source_text_max_chars: get_env_parse_or("SOURCE_TEXT_MAX_CHARS", 2000)?,
            source_sample_attempts: get_env_parse_or("SOURCE_SAMPLE_ATTEMPTS", 5)?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
