use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Absent means users are kept in process memory
    pub database: Option<DatabaseConfig>,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// PEM encoded RSA private key used to sign tokens
    pub private_key_path: String,
    /// PEM encoded RSA public key used to verify tokens
    pub public_key_path: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
}

/// scrypt cost; every stored hash must have been made with the same values
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub log_n: u8,
    pub r: u32,
    pub p: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        let cost = auth::ScryptCost::default();
        Self {
            log_n: cost.log_n,
            r: cost.r,
            p: cost.p,
        }
    }
}

impl PasswordConfig {
    pub fn cost(&self) -> auth::ScryptCost {
        auth::ScryptCost::new(self.log_n, self.r, self.p)
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_expiration_hours() -> i64 {
    auth::jwt::handler::DEFAULT_EXPIRATION_HOURS
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__PRIVATE_KEY_PATH=/keys/private.pem overrides jwt.private_key_path
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}
