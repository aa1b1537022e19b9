use config::Config;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_TIDBYT_API_URL: &str = "https://api.tidbyt.com";

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    tronbyt: Option<Tronbyt>,
    addon: Option<Addon>,
    #[serde(default)]
    tidbyt: Vec<TidbytDevice>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config: AppConfig = Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::with_prefix("TRONBYT_BRIDGE").separator("__"))
            .build()?
            .try_deserialize()?;

        config.validated()
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        if self.tronbyt.is_none() && self.tidbyt.is_empty() {
            return Err(ConfigError::NoBackend);
        }

        if let Some(tronbyt) = self.tronbyt.as_mut() {
            tronbyt.url = normalize_base_url(&tronbyt.url)?;
        }

        for device in self.tidbyt.iter_mut() {
            device.api_url = normalize_base_url(&device.api_url)?;
        }

        Ok(self)
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn tronbyt(&self) -> Option<&Tronbyt> {
        self.tronbyt.as_ref()
    }

    pub fn addon(&self) -> Option<&Addon> {
        self.addon.as_ref()
    }

    pub fn tidbyt_devices(&self) -> &[TidbytDevice] {
        &self.tidbyt
    }
}

#[derive(Debug, Deserialize)]
pub struct Core {
    store_buffer_size: usize,
    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    poll_interval: Duration,
}

impl Core {
    pub fn store_buffer_size(&self) -> usize {
        self.store_buffer_size
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

#[derive(Debug, Deserialize)]
pub struct Tronbyt {
    url: String,
    token: String,
    #[serde(default = "default_true")]
    verify_ssl: bool,
}

impl Tronbyt {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }
}

#[derive(Debug, Deserialize)]
pub struct Addon {
    #[serde(default = "default_addon_host")]
    host: String,
    #[serde(default = "default_addon_port")]
    port: u16,
    #[serde(default = "default_ready_timeout", with = "humantime_serde")]
    ready_timeout: Duration,
    #[serde(default = "default_retry_interval", with = "humantime_serde")]
    retry_interval: Duration,
}

impl Addon {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn ready_timeout(&self) -> Duration {
        self.ready_timeout
    }

    pub fn retry_interval(&self) -> Duration {
        self.retry_interval
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TidbytDevice {
    name: Option<String>,
    id: String,
    token: String,
    #[serde(default = "default_tidbyt_api_url")]
    api_url: String,
    // Served by a Tronbyt server: pushes skip the add-on and installations can be updated
    #[serde(default)]
    tronbyt: bool,
}

impl TidbytDevice {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn is_tronbyt(&self) -> bool {
        self.tronbyt
    }
}

/// Reduces a base URL to `scheme://host[:port][/path]` without a trailing slash.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidBaseUrl(raw.to_string());
    if raw.is_empty() {
        return Err(invalid());
    }

    let parsed = Url::parse(raw).map_err(|_| invalid())?;
    let Some(host) = parsed.host_str() else {
        return Err(invalid());
    };

    let mut normalized = format!("{}://{}", parsed.scheme(), host);
    if let Some(port) = parsed.port() {
        normalized.push_str(&format!(":{}", port));
    }

    let path = parsed.path().trim_end_matches('/');
    normalized.push_str(path);

    Ok(normalized)
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(30)
}

fn default_true() -> bool {
    true
}

fn default_addon_host() -> String {
    "localhost".to_string()
}

fn default_addon_port() -> u16 {
    9000
}

fn default_ready_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_retry_interval() -> Duration {
    Duration::from_secs(5)
}

fn default_tidbyt_api_url() -> String {
    DEFAULT_TIDBYT_API_URL.to_string()
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Tronbyt base URL must include the protocol (e.g. https://host), got '{0}'")]
    InvalidBaseUrl(String),
    #[error("configure a [tronbyt] server or at least one [[tidbyt]] device")]
    NoBackend,
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                core: Core {
                    store_buffer_size: 8,
                    poll_interval: Duration::from_millis(50),
                },
                tronbyt: Some(Tronbyt {
                    url: "https://tronbyt.url".to_string(),
                    token: "token".to_string(),
                    verify_ssl: true,
                }),
                addon: None,
                tidbyt: Vec::new(),
            },
        }
    }

    pub fn tronbyt_url(mut self, url: String) -> Self {
        if let Some(tronbyt) = self.config.tronbyt.as_mut() {
            tronbyt.url = url;
        }
        self
    }

    pub fn tronbyt_token(mut self, token: &str) -> Self {
        if let Some(tronbyt) = self.config.tronbyt.as_mut() {
            tronbyt.token = token.to_string();
        }
        self
    }

    pub fn addon(mut self, url: &str) -> Self {
        let parsed = Url::parse(url).expect("valid add-on url");
        self.config.addon = Some(Addon {
            host: parsed.host_str().unwrap_or("localhost").to_string(),
            port: parsed.port().unwrap_or(80),
            ready_timeout: Duration::from_millis(300),
            retry_interval: Duration::from_millis(10),
        });
        self
    }

    pub fn tidbyt_device(mut self, name: Option<&str>, id: &str, api_url: String) -> Self {
        self.config.tidbyt.push(TidbytDevice {
            name: name.map(str::to_string),
            id: id.to_string(),
            token: "tidbyt-token".to_string(),
            api_url,
            tronbyt: false,
        });
        self
    }

    pub fn tronbyt_hosted_device(mut self, id: &str, api_url: String) -> Self {
        self.config.tidbyt.push(TidbytDevice {
            name: None,
            id: id.to_string(),
            token: "tidbyt-token".to_string(),
            api_url,
            tronbyt: true,
        });
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn from_toml(toml: &str) -> Result<AppConfig, ConfigError> {
        let config: AppConfig = Config::builder()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validated()
    }

    #[rstest]
    #[case("https://tronbyt.local", "https://tronbyt.local")]
    #[case("https://tronbyt.local/", "https://tronbyt.local")]
    #[case("http://192.168.1.10:8000/api/", "http://192.168.1.10:8000/api")]
    #[case("https://tronbyt.local/base//", "https://tronbyt.local/base")]
    fn normalizes_a_base_url(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_base_url(raw).unwrap(), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::missing_protocol("tronbyt.local")]
    #[case::missing_host("file:///tmp/tronbyt")]
    fn rejects_an_invalid_base_url(#[case] raw: &str) {
        assert!(matches!(normalize_base_url(raw), Err(ConfigError::InvalidBaseUrl(_))));
    }

    #[test]
    fn loads_a_full_configuration() {
        let config = from_toml(
            r#"
            [core]
            store_buffer_size = 16
            poll_interval = "45s"

            [tronbyt]
            url = "https://tronbyt.local/"
            token = "secret"
            verify_ssl = false

            [addon]
            port = 9001

            [[tidbyt]]
            id = "kitchen-device"
            token = "tidbyt-secret"

            [[tidbyt]]
            id = "hallway-device"
            token = "hallway-secret"
            api_url = "https://tronbyt.local"
            tronbyt = true
            "#,
        )
        .unwrap();

        assert_eq!(config.core().poll_interval(), Duration::from_secs(45));
        let tronbyt = config.tronbyt().unwrap();
        assert_eq!(tronbyt.url(), "https://tronbyt.local");
        assert!(!tronbyt.verify_ssl());
        assert_eq!(config.addon().unwrap().url(), "http://localhost:9001");
        assert_eq!(config.tidbyt_devices()[0].api_url(), DEFAULT_TIDBYT_API_URL);
        assert_eq!(config.tidbyt_devices()[0].name(), None);
        assert!(!config.tidbyt_devices()[0].is_tronbyt());
        assert!(config.tidbyt_devices()[1].is_tronbyt());
    }

    #[test]
    fn defaults_the_poll_interval_and_ssl_verification() {
        let config = from_toml(
            r#"
            [core]
            store_buffer_size = 16

            [tronbyt]
            url = "https://tronbyt.local"
            token = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.core().poll_interval(), Duration::from_secs(30));
        assert!(config.tronbyt().unwrap().verify_ssl());
    }

    #[test]
    fn requires_a_backend() {
        let result = from_toml(
            r#"
            [core]
            store_buffer_size = 16
            "#,
        );

        assert!(matches!(result, Err(ConfigError::NoBackend)));
    }

    #[test]
    fn rejects_a_tronbyt_url_without_protocol() {
        let result = from_toml(
            r#"
            [core]
            store_buffer_size = 16

            [tronbyt]
            url = "tronbyt.local"
            token = "secret"
            "#,
        );

        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl(url)) if url == "tronbyt.local"));
    }
}
