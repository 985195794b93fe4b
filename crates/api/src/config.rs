//! Server configuration.

/// Explicit server configuration, passed into [`crate::server::Server::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface/host the listener binds to.
    pub host: String,
    /// Port the listener binds to.
    pub port: u16,
    /// Whether the `/api/docs` routes are mounted.
    pub docs_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            docs_enabled: true,
        }
    }
}

impl ServerConfig {
    /// Read the configuration from environment variables.
    ///
    /// Missing or malformed values fall back to defaults; malformed values
    /// additionally log a warning.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: parse_port(std::env::var("SERVER_PORT").ok()).unwrap_or(defaults.port),
            docs_enabled: parse_flag("SERVER_DOCS", std::env::var("SERVER_DOCS").ok())
                .unwrap_or(defaults.docs_enabled),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_port(raw: Option<String>) -> Option<u16> {
    let raw = raw?;
    match raw.parse() {
        Ok(port) => Some(port),
        Err(_) => {
            tracing::warn!("SERVER_PORT {raw:?} is not a valid port; using default");
            None
        }
    }
}

fn parse_flag(name: &str, raw: Option<String>) -> Option<bool> {
    let raw = raw?;
    match raw.parse() {
        Ok(flag) => Some(flag),
        Err(_) => {
            tracing::warn!("{name} {raw:?} is not true/false; using default");
            None
        }
    }
}
