use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;

/// Origins allowed to call the API from a browser when none are configured.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "https://bernalo-lab.github.io",
    "http://localhost:5500",
    "http://127.0.0.1:5500",
];

/// Request body cap (1 MiB).
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("allowed origin is not a valid header value: {0}")]
    InvalidOrigin(String),
    #[error("allowed origin must be scheme://host[:port] without a path: {0}")]
    MalformedOrigin(String),
    #[error("body limit must be greater than zero")]
    ZeroBodyLimit,
}

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub listen: SocketAddr,
    pub allowed_origins: Vec<String>,
    pub body_limit_bytes: usize,
}

impl DaemonConfig {
    pub fn new(listen: SocketAddr) -> Self {
        Self {
            listen,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.body_limit_bytes == 0 {
            return Err(ConfigError::ZeroBodyLimit);
        }
        self.origin_header_values().map(|_| ())
    }

    /// Allowed origins as header values for the CORS layer.
    pub fn origin_header_values(&self) -> Result<Vec<HeaderValue>, ConfigError> {
        self.allowed_origins
            .iter()
            .map(|o| parse_origin(o))
            .collect()
    }
}

fn parse_origin(origin: &str) -> Result<HeaderValue, ConfigError> {
    let rest = origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"))
        .ok_or_else(|| ConfigError::MalformedOrigin(origin.to_string()))?;
    if rest.is_empty() || rest.contains('/') {
        return Err(ConfigError::MalformedOrigin(origin.to_string()));
    }
    HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> DaemonConfig {
        DaemonConfig::new("127.0.0.1:3000".parse().unwrap())
    }

    #[test]
    fn test_defaults_are_valid() {
        let c = cfg();
        assert_eq!(c.body_limit_bytes, 1_048_576);
        assert_eq!(c.allowed_origins.len(), 3);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_zero_body_limit_rejected() {
        let mut c = cfg();
        c.body_limit_bytes = 0;
        assert_eq!(c.validate(), Err(ConfigError::ZeroBodyLimit));
    }

    #[test]
    fn test_origin_with_path_rejected() {
        let mut c = cfg();
        c.allowed_origins = vec!["https://example.com/app".into()];
        assert_eq!(
            c.validate(),
            Err(ConfigError::MalformedOrigin("https://example.com/app".into()))
        );
    }

    #[test]
    fn test_origin_without_scheme_rejected() {
        let mut c = cfg();
        c.allowed_origins = vec!["example.com".into()];
        assert!(matches!(c.validate(), Err(ConfigError::MalformedOrigin(_))));
    }

    #[test]
    fn test_origin_with_control_char_rejected() {
        let mut c = cfg();
        c.allowed_origins = vec!["http://bad\nhost".into()];
        assert_eq!(
            c.validate(),
            Err(ConfigError::InvalidOrigin("http://bad\nhost".into()))
        );
    }

    #[test]
    fn test_origin_header_values() {
        let values = cfg().origin_header_values().unwrap();
        assert_eq!(values[0], "https://bernalo-lab.github.io");
    }
}
