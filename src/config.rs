//! Server configuration from environment variables.

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address, `HOST` (default `0.0.0.0`).
    pub host: String,
    /// Bind port, `PORT` (default `8080`).
    pub port: u16,
}

impl Config {
    /// Build a configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match std::env::var("PORT") {
            Ok(raw) => match raw.parse() {
                Ok(port) => port,
                Err(_) => {
                    tracing::warn!("Invalid PORT value {:?}, using default 8080", raw);
                    8080
                }
            },
            Err(_) => 8080,
        };

        Self { host, port }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}
