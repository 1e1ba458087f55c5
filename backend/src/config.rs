use std::{env, fmt, str::FromStr, time::Duration};

use crate::auth::{DEFAULT_TOKEN_TTL, MAX_TOKEN_TTL};

const DEFAULT_PORT: u16 = 8085;
const DEFAULT_SQLITE_PATH: &str = "./dev.sqlite3";
const DEFAULT_MYSQL_PORT: u16 = 3306;
const DEFAULT_POOL_SIZE: u32 = 8;
const DEV_JWT_SECRET: &str = "sensor-hub-development-secret";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown APP_ENV `{0}` (expected development, test, staging or production)")]
    UnknownEnvironment(String),
    #[error("{name} is not a valid number: `{value}`")]
    InvalidNumber { name: &'static str, value: String },
    #[error("{name} must be between 1 and {max}: `{value}`")]
    OutOfRange {
        name: &'static str,
        value: String,
        max: u64,
    },
    #[error("{0} must be set outside development")]
    Missing(&'static str),
}

/// Deployment environment, selects the storage dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// Development keeps everything in a local SQLite file.
    pub fn is_development(self) -> bool {
        self == Self::Development
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigError::UnknownEnvironment(s.to_owned())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Staging => "staging",
            Self::Production => "production",
        })
    }
}

#[derive(Clone)]
pub struct Config {
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub pool_size: u32,
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

// secrets stay out of logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("environment", &self.environment)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("pool_size", &self.pool_size)
            .field("token_ttl", &self.token_ttl)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Reads `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| get(name).filter(|v| !v.trim().is_empty());

        let environment = match get("APP_ENV") {
            Some(v) => v.parse()?,
            None => Environment::Development,
        };

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None if environment.is_development() => {
                get("SQLITE_PATH").unwrap_or_else(|| DEFAULT_SQLITE_PATH.to_owned())
            }
            None => mysql_url(&get)?,
        };

        let jwt_secret = match get("JWT_SECRET") {
            Some(secret) => secret,
            None if environment.is_development() => {
                log::warn!("JWT_SECRET not set, using the development secret");
                DEV_JWT_SECRET.to_owned()
            }
            None => return Err(ConfigError::Missing("JWT_SECRET")),
        };

        let token_ttl = match get("TOKEN_TTL_SECS") {
            Some(v) => match number("TOKEN_TTL_SECS", &v)? {
                secs @ 1.. if secs <= MAX_TOKEN_TTL.as_secs() => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::OutOfRange {
                        name: "TOKEN_TTL_SECS",
                        value: v,
                        max: MAX_TOKEN_TTL.as_secs(),
                    })
                }
            },
            None => DEFAULT_TOKEN_TTL,
        };

        Ok(Self {
            environment,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port: optional_number(&get, "PORT")?.unwrap_or(DEFAULT_PORT),
            database_url,
            pool_size: optional_number(&get, "DB_POOL_SIZE")?.unwrap_or(DEFAULT_POOL_SIZE),
            jwt_secret,
            token_ttl,
        })
    }
}

fn mysql_url(get: &impl Fn(&str) -> Option<String>) -> Result<String, ConfigError> {
    let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

    let username = required("DB_USERNAME")?;
    let password = get("DB_PASSWORD").unwrap_or_default();
    let host = required("DB_HOST")?;
    let port = optional_number(get, "DB_PORT")?.unwrap_or(DEFAULT_MYSQL_PORT);
    let database = required("DB_DATABASE")?;

    let username = urlencoding::encode(&username);
    let password = urlencoding::encode(&password);

    Ok(if password.is_empty() {
        format!("mysql://{username}@{host}:{port}/{database}")
    } else {
        format!("mysql://{username}:{password}@{host}:{port}/{database}")
    })
}

fn optional_number<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    get(name).map(|v| number(name, &v)).transpose()
}

fn number<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            name,
            value: value.to_owned(),
        })
}
