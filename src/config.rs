use std::env;
use std::time::Duration;

use anyhow::Context;
use reqwest::Url;

pub const DEFAULT_BASE_URL: &str = "http://192.168.1.201:8080";
pub const DEFAULT_UPLOAD_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub upload_timeout: Duration,

    /// Shell command that writes a JPEG to stdout. Unset means the camera
    /// is unavailable and permission requests are denied.
    pub camera_command: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = env::var("MACROTRACK_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        let upload_timeout_ms = match env::var("MACROTRACK_UPLOAD_TIMEOUT_MS") {
            Ok(raw) => raw.parse::<u64>().unwrap_or_else(|e| {
                tracing::warn!(value = %raw, error = %e, "Invalid upload timeout, using default");
                DEFAULT_UPLOAD_TIMEOUT_MS
            }),
            Err(_) => DEFAULT_UPLOAD_TIMEOUT_MS,
        };

        Self::new(
            &base_url,
            upload_timeout_ms,
            env::var("MACROTRACK_CAMERA_COMMAND")
                .ok()
                .filter(|s| !s.trim().is_empty()),
        )
    }

    pub fn new(
        base_url: &str,
        upload_timeout_ms: u64,
        camera_command: Option<String>,
    ) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("MACROTRACK_BASE_URL is not a valid URL: {base_url}"))?;

        Ok(Self {
            base_url,
            upload_timeout: Duration::from_millis(upload_timeout_ms),
            camera_command,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_default_address() {
        let config = Config::new(DEFAULT_BASE_URL, DEFAULT_UPLOAD_TIMEOUT_MS, None).unwrap();
        assert_eq!(config.base_url.host_str(), Some("192.168.1.201"));
        assert_eq!(config.base_url.port(), Some(8080));
        assert_eq!(config.upload_timeout, Duration::from_secs(30));
        assert!(config.camera_command.is_none());
    }

    #[test]
    fn test_large_upload_timeout_is_kept_whole() {
        let config = Config::new(DEFAULT_BASE_URL, u64::MAX, None).unwrap();
        assert_eq!(config.upload_timeout, Duration::from_millis(u64::MAX));
    }

    #[test]
    fn test_new_rejects_garbage_url() {
        assert!(Config::new("not a url", 1000, None).is_err());
    }
}
