use crate::config::{optional_var, parse_var};
use crate::core::Result;

/// HTTP listener settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl ServerConfig {
    /// One worker per core unless `SERVER_WORKERS` says otherwise
    pub fn new(host: String, port: u16) -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        Self {
            host,
            port,
            workers,
        }
    }

    pub fn from_env() -> Result<Self> {
        let host = optional_var("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_var("SERVER_PORT", 8080)?;

        let mut config = Self::new(host, port);
        config.workers = parse_var("SERVER_WORKERS", config.workers)?.max(1);
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
