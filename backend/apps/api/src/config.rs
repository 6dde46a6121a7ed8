//! Server Configuration
//!
//! Read from the environment after `.env` is loaded.

use std::env;
use std::net::SocketAddr;

pub const BIND_ADDR_ENV: &str = "API_BIND_ADDR";
pub const FRONTEND_ORIGINS_ENV: &str = "FRONTEND_ORIGINS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";
const DEFAULT_LOG_FILTER: &str = "api=info,datecheck=info,kernel=info,tower_http=info";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Origins allowed by CORS
    pub frontend_origins: Vec<String>,
    /// Used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 31113)),
            frontend_origins: split_origins(DEFAULT_FRONTEND_ORIGINS),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let raw_addr = env::var(BIND_ADDR_ENV).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} `{}` is not a socket address: {}", BIND_ADDR_ENV, raw_addr, e))?;

        let frontend_origins = env::var(FRONTEND_ORIGINS_ENV)
            .map(|raw| split_origins(&raw))
            .unwrap_or_else(|_| split_origins(DEFAULT_FRONTEND_ORIGINS));

        Ok(Self {
            bind_addr,
            frontend_origins,
            ..Self::default()
        })
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
