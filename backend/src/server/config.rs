//! Application settings and the server configuration built from them.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use actix_web::cookie::Key;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

use backend::outbound::geocoding::GoogleGeocoder;
use backend::outbound::persistence::DbPool;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_GEOCODER_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DB_POOL_SIZE: u32 = 10;
const MIN_SESSION_KEY_BYTES: usize = 32;

/// Settings loaded from defaults, `YELPCAMP_*` environment variables and
/// command-line flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "YELPCAMP")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; without one the server keeps data in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_pool_size: Option<u32>,
    /// Google Geocoding API key; without one a fixture geocoder is used.
    pub geocoder_api_key: Option<String>,
    /// Override for the geocoding endpoint.
    pub geocoder_endpoint: Option<String>,
    /// Geocoding request timeout in seconds.
    pub geocoder_timeout_secs: Option<u64>,
    /// File holding the session signing key material.
    pub session_key_file: Option<PathBuf>,
    /// Fall back to a random session key when the key file is unreadable.
    /// Environment only, like `session_cookie_secure`.
    #[ortho_config(default = false, skip_cli)]
    pub session_allow_ephemeral: bool,
    /// Mark the session cookie `Secure`.
    #[ortho_config(default = true, skip_cli)]
    pub session_cookie_secure: bool,
}

/// Errors raised while turning settings into a server configuration.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {message}")]
    BindAddr { value: String, message: String },
    #[error("failed to read session key at {path}: {message}")]
    SessionKey { path: String, message: String },
    #[error("invalid geocoder endpoint '{value}': {message}")]
    GeocoderEndpoint { value: String, message: String },
    #[error("failed to build geocoder client: {message}")]
    GeocoderClient { message: String },
}

impl AppSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    pub fn db_pool_size(&self) -> u32 {
        self.db_pool_size.unwrap_or(DEFAULT_DB_POOL_SIZE)
    }

    pub fn geocoder_timeout(&self) -> Duration {
        Duration::from_secs(
            self.geocoder_timeout_secs
                .unwrap_or(DEFAULT_GEOCODER_TIMEOUT_SECS),
        )
    }

    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    pub fn cookie_secure(&self) -> bool {
        self.session_cookie_secure
    }

    /// Read the session key, or generate one when allowed.
    ///
    /// Debug builds always allow an ephemeral key.
    pub fn session_key(&self) -> Result<Key, SettingsError> {
        let path = self.session_key_file();
        match std::fs::read(&path) {
            // `Key::derive_from` panics below this length.
            Ok(bytes) if bytes.len() < MIN_SESSION_KEY_BYTES => Err(SettingsError::SessionKey {
                path: path.display().to_string(),
                message: format!("key material must be at least {MIN_SESSION_KEY_BYTES} bytes"),
            }),
            Ok(bytes) => Ok(Key::derive_from(&bytes)),
            Err(err) if cfg!(debug_assertions) || self.session_allow_ephemeral => {
                warn!(path = %path.display(), error = %err, "using temporary session key (dev only)");
                Ok(Key::generate())
            }
            Err(err) => Err(SettingsError::SessionKey {
                path: path.display().to_string(),
                message: err.to_string(),
            }),
        }
    }

    /// Google geocoder when an API key is configured.
    pub fn geocoder(&self) -> Result<Option<GoogleGeocoder>, SettingsError> {
        let Some(api_key) = self.geocoder_api_key.as_deref() else {
            return Ok(None);
        };
        let raw = self
            .geocoder_endpoint
            .as_deref()
            .unwrap_or(backend::outbound::geocoding::DEFAULT_GOOGLE_GEOCODE_ENDPOINT);
        let endpoint = url::Url::parse(raw).map_err(|err| SettingsError::GeocoderEndpoint {
            value: raw.to_owned(),
            message: err.to_string(),
        })?;
        GoogleGeocoder::new(endpoint, api_key, self.geocoder_timeout())
            .map(Some)
            .map_err(|err| SettingsError::GeocoderClient {
                message: err.to_string(),
            })
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) geocoder: Option<Arc<GoogleGeocoder>>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            bind_addr,
            db_pool: None,
            geocoder: None,
        }
    }

    /// Attach a database connection pool; without one data lives in memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Geocode through Google instead of the fixture geocoder.
    #[must_use]
    pub fn with_geocoder(mut self, geocoder: GoogleGeocoder) -> Self {
        self.geocoder = Some(Arc::new(geocoder));
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
