//! Connection configuration for the Tomago service.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::domain::ConfigError;

/// Route tag used when none is configured.
pub const DEFAULT_ROUTE_TAG: &str = "tomago";

pub const ENV_ADDRESS: &str = "TOMAGO_ADDRESS";
pub const ENV_API_KEY: &str = "TOMAGO_API_KEY";
pub const ENV_CALLBACK_URL: &str = "TOMAGO_CALLBACK_URL";
pub const ENV_ROUTE_TAG: &str = "TOMAGO_ROUTE_TAG";
pub const ENV_CA_FILE: &str = "TOMAGO_CA_FILE";
pub const ENV_CERT_FILE: &str = "TOMAGO_CERT_FILE";
pub const ENV_KEY_FILE: &str = "TOMAGO_KEY_FILE";
pub const ENV_TIMEOUT_SECS: &str = "TOMAGO_TIMEOUT_SECS";

/// PEM files for mutual TLS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    /// CA bundle trusted in addition to the system roots.
    pub ca_file: PathBuf,
    /// Client certificate presented to the server.
    pub cert_file: PathBuf,
    /// Private key matching `cert_file`.
    pub key_file: PathBuf,
}

impl TlsConfig {
    pub fn new(
        ca_file: impl Into<PathBuf>,
        cert_file: impl Into<PathBuf>,
        key_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            ca_file: ca_file.into(),
            cert_file: cert_file.into(),
            key_file: key_file.into(),
        }
    }
}

/// Configuration for [`crate::app::TomagoClient`].
///
/// An empty `route_tag` is replaced with [`DEFAULT_ROUTE_TAG`] when the
/// client is built. `timeout` of `None` keeps the transport default.
#[derive(Debug)]
pub struct Config {
    pub address: String,
    pub api_key: SecretString,
    pub callback_url: Option<String>,
    pub route_tag: String,
    pub tls: Option<TlsConfig>,
    pub timeout: Option<Duration>,
    /// Prebuilt HTTP client, used as-is instead of building one from `tls`
    /// and `timeout`.
    pub http_client: Option<reqwest::Client>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: String::new(),
            api_key: SecretString::from(String::new()),
            callback_url: None,
            route_tag: String::new(),
            tls: None,
            timeout: None,
            http_client: None,
        }
    }
}

impl Config {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = SecretString::from(api_key.into());
        self
    }

    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    pub fn with_route_tag(mut self, tag: impl Into<String>) -> Self {
        self.route_tag = tag.into();
        self
    }

    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls = Some(tls);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Loads configuration from the process environment, reading `.env`
    /// first when present.
    ///
    /// # Errors
    /// Returns a `ConfigError` if `TOMAGO_ADDRESS` is missing, TLS paths are
    /// only partially set, or the timeout is not a whole number of seconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// # Errors
    /// See [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let address =
            get(ENV_ADDRESS).ok_or_else(|| ConfigError::MissingEnvVar(ENV_ADDRESS.to_string()))?;
        let mut config = Config::new(address);

        if let Some(api_key) = get(ENV_API_KEY) {
            config = config.with_api_key(api_key);
        }
        config.callback_url = get(ENV_CALLBACK_URL);
        config.route_tag = get(ENV_ROUTE_TAG).unwrap_or_default();

        config.tls = match (get(ENV_CA_FILE), get(ENV_CERT_FILE), get(ENV_KEY_FILE)) {
            (Some(ca), Some(cert), Some(key)) => Some(TlsConfig::new(ca, cert, key)),
            (None, None, None) => None,
            _ => {
                return Err(ConfigError::invalid(
                    "TLS",
                    format!("{ENV_CA_FILE}, {ENV_CERT_FILE} and {ENV_KEY_FILE} must be set together"),
                ));
            }
        };

        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid(ENV_TIMEOUT_SECS, format!("{e}")))?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}
