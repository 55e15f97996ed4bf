use crate::telegram::client::DEFAULT_API_BASE;
use std::env;
use std::net::SocketAddr;

#[derive(Clone)]
pub struct Config {
    // Telegram bot
    pub bot_token: String,
    pub bot_username: String,
    pub telegram_api_base: String,

    // Public origin, used for the widget auth URL and announcement links
    pub base_url: String,

    // Redis
    pub redis_url: String,

    // Server
    pub bind_addr: SocketAddr,

    // Telegram user IDs allowed to announce presentations
    pub admin_ids: Vec<i64>,

    // Seed demo presentations at startup
    pub auto_seed: bool,

    // Upper bound on a single getChatMember round trip
    pub membership_timeout_secs: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"[REDACTED]")
            .field("bot_username", &self.bot_username)
            .field("telegram_api_base", &self.telegram_api_base)
            .field("base_url", &self.base_url)
            .field("redis_url", &"[REDACTED]")
            .field("bind_addr", &self.bind_addr)
            .field("admin_ids", &self.admin_ids)
            .field("auto_seed", &self.auto_seed)
            .field("membership_timeout_secs", &self.membership_timeout_secs)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("Failed to parse {0}: {1}")]
    ParseError(String, String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Attempt to load .env file, but don't fail if it doesn't exist
        let _ = dotenvy::dotenv();

        let (bot_token, telegram_api_base) = bot_credentials_from_env()?;
        let bot_username = required_var("BOT_USERNAME")?;

        let base_url = env::var("BASE_URL")
            .unwrap_or_default()
            .trim_end_matches('/')
            .to_string();

        let redis_url = required_var("REDIS_URL")?;

        // PORT (set by most PaaS hosts) wins over BIND_ADDR
        let bind_addr_str = match env::var("PORT") {
            Ok(port) if !port.is_empty() => format!("0.0.0.0:{}", port),
            _ => env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        };
        let bind_addr = bind_addr_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::ParseError("BIND_ADDR".to_string(), e.to_string()))?;

        let admin_ids = parse_id_list("ADMIN_IDS", &env::var("ADMIN_IDS").unwrap_or_default())?;

        let auto_seed = parse_env_or_default("AUTO_SEED", false)?;

        let membership_timeout_secs = parse_env_or_default("MEMBERSHIP_TIMEOUT_SECS", 10)?;
        if membership_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "MEMBERSHIP_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Config {
            bot_token,
            bot_username,
            telegram_api_base,
            base_url,
            redis_url,
            bind_addr,
            admin_ids,
            auto_seed,
            membership_timeout_secs,
        })
    }

    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }
}

/// Bot token and API base only, for tools that never serve HTTP.
pub fn bot_credentials_from_env() -> Result<(String, String), ConfigError> {
    let _ = dotenvy::dotenv();

    let bot_token = required_var("BOT_TOKEN")?;
    let telegram_api_base = env::var("TELEGRAM_API_BASE")
        .unwrap_or_else(|_| DEFAULT_API_BASE.to_string())
        .trim_end_matches('/')
        .to_string();

    Ok((bot_token, telegram_api_base))
}

fn required_var(key: &str) -> Result<String, ConfigError> {
    let value = env::var(key).map_err(|_| ConfigError::MissingVar(key.to_string()))?;
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidValue(
            key.to_string(),
            "cannot be empty".to_string(),
        ));
    }
    Ok(value)
}

/// Parse a comma-separated list of Telegram IDs, ignoring blank entries.
fn parse_id_list(key: &str, raw: &str) -> Result<Vec<i64>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|e| ConfigError::ParseError(key.to_string(), format!("{}: {}", e, s)))
        })
        .collect()
}

/// Helper function to parse environment variable with a default value
fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| ConfigError::ParseError(key.to_string(), format!("{}: {}", e, val))),
        Err(_) => Ok(default),
    }
}
