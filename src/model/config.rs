use std::time::Duration;

use crate::launcher::ServerCommand;

pub const DEFAULT_SERVER_CLASS: &str = "Server";
pub const DEFAULT_SERVER_PORT: u16 = 8888;
pub const DEFAULT_LAUNCHER: &str = "java";
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_READY_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Class name or binary handed to the launcher.
    pub server_class: String,
    pub server_port: u16,
    /// Program that runs `server_class`. `None` runs `server_class` directly.
    pub launcher: Option<String>,
    pub host: String,
    /// Upper bound on waiting for the server to accept connections.
    pub ready_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            server_class: DEFAULT_SERVER_CLASS.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            launcher: Some(DEFAULT_LAUNCHER.to_string()),
            host: DEFAULT_HOST.to_string(),
            ready_timeout: Duration::from_millis(DEFAULT_READY_TIMEOUT_MS),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }
}

impl HarnessConfig {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.server_port)
    }

    pub fn server_command(&self) -> ServerCommand {
        ServerCommand::new(self.launcher.clone(), self.server_class.clone())
    }
}

#[cfg(test)]
#[path = "../tests/model/config_tests.rs"]
mod tests;
