use super::RequestsLoggingLevel;
use std::time::Duration;

#[derive(Clone)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    pub frontend_dir_path: Option<String>,
    /// If true, the registration endpoint is disabled and only existing
    /// users can log in.
    pub disable_registration: bool,
    /// Minimum spacing between permitted generations per user.
    pub generation_min_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: 3000,
            frontend_dir_path: None,
            disable_registration: false,
            generation_min_interval: crate::generation::DEFAULT_MIN_INTERVAL,
        }
    }
}
