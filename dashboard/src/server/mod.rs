//! Server configuration loaded via OrthoConfig.
//!
//! Every setting can come from CLI flags, environment variables with the
//! `DASHBOARD_` prefix, or a configuration file; precedence is handled by
//! `ortho_config`.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api/v1";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Configuration values controlling the gateway process.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DASHBOARD")]
pub struct ServerSettings {
    /// Base URL of the REST backend the gateway proxies.
    pub api_base_url: Option<String>,
    /// Address and port the HTTP server listens on.
    pub bind_address: Option<String>,
    /// Timeout applied to every backend request, in seconds.
    pub request_timeout_secs: Option<u64>,
    /// File holding the session cookie signing key material.
    pub session_key_file: Option<PathBuf>,
    /// Allow an ephemeral session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark the session cookie `Secure`. Disable only for local HTTP.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
}

impl ServerSettings {
    /// Return the backend base URL, falling back to the local default.
    pub fn api_base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL))
    }

    /// Return the bind address, falling back to the default.
    pub fn bind_address(&self) -> &str {
        self.bind_address.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS)
    }

    /// Return the backend request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Return the session key file path, falling back to the default.
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn bare_settings() -> ServerSettings {
        ServerSettings {
            api_base_url: None,
            bind_address: None,
            request_timeout_secs: None,
            session_key_file: None,
            session_allow_ephemeral: false,
            cookie_secure: true,
        }
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let settings = bare_settings();
        assert_eq!(
            settings.api_base_url().expect("default URL parses").as_str(),
            "http://localhost:3000/api/v1"
        );
        assert_eq!(settings.bind_address(), "0.0.0.0:8080");
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert_eq!(
            settings.session_key_file(),
            PathBuf::from("/var/run/secrets/session_key")
        );
    }

    #[rstest]
    fn explicit_values_override_defaults() {
        let settings = ServerSettings {
            api_base_url: Some("https://api.example.com/v1".into()),
            bind_address: Some("127.0.0.1:9090".into()),
            request_timeout_secs: Some(5),
            session_key_file: Some(PathBuf::from("/tmp/key")),
            session_allow_ephemeral: true,
            cookie_secure: false,
        };
        assert_eq!(
            settings.api_base_url().expect("URL parses").as_str(),
            "https://api.example.com/v1"
        );
        assert_eq!(settings.bind_address(), "127.0.0.1:9090");
        assert_eq!(settings.request_timeout(), Duration::from_secs(5));
        assert_eq!(settings.session_key_file(), PathBuf::from("/tmp/key"));
    }

    #[rstest]
    fn malformed_base_url_is_rejected() {
        let mut settings = bare_settings();
        settings.api_base_url = Some("not a url".into());
        assert!(settings.api_base_url().is_err());
    }
}
