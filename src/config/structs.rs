use serde::{Deserialize, Serialize};

use crate::utils::MAX_CODE_LENGTH;

/// Default configuration file, looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Longest accepted session lifetime: one year
pub const MAX_SESSION_MINUTES: u64 = 366 * 24 * 60;

/// Static configuration, loaded once at startup.
///
/// Sections:
/// - server: bind address and worker count
/// - database: connection and retry settings
/// - links: short code generation
/// - title: page title fetching
/// - auth: session and login settings
/// - logging: log level, format and output
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub title: TitleConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// Load configuration from a TOML file and environment variables.
    ///
    /// Priority: ENV > TOML file > defaults.
    /// ENV prefix `SHORTLY`, separator `__`, e.g. `SHORTLY__SERVER__PORT=9999`.
    pub fn load(path: Option<&str>) -> Self {
        use config::{Config, Environment, File};

        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("SHORTLY")
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config.clamp_limits()
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// Pull out-of-range values back into what the rest of the service accepts.
    ///
    /// Codes longer than `MAX_CODE_LENGTH` could be stored but never resolved.
    pub fn clamp_limits(mut self) -> Self {
        let code_length = self.links.code_length.clamp(1, MAX_CODE_LENGTH);
        if code_length != self.links.code_length {
            eprintln!(
                "[WARN] links.code_length {} out of range, using {}",
                self.links.code_length, code_length
            );
            self.links.code_length = code_length;
        }

        let session_minutes = self.auth.session_minutes.clamp(1, MAX_SESSION_MINUTES);
        if session_minutes != self.auth.session_minutes {
            eprintln!(
                "[WARN] auth.session_minutes {} out of range, using {}",
                self.auth.session_minutes, session_minutes
            );
            self.auth.session_minutes = session_minutes;
        }

        self.links.max_code_attempts = self.links.max_code_attempts.max(1);
        self
    }

    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

/// Short code generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    #[serde(default = "default_code_length")]
    pub code_length: usize,
    /// Attempts with a fresh code before giving up on a create
    #[serde(default = "default_max_code_attempts")]
    pub max_code_attempts: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleConfig {
    #[serde(default = "default_title_enabled")]
    pub enabled: bool,
    #[serde(default = "default_title_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_title_max_body_bytes")]
    pub max_body_bytes: u64,
    #[serde(default = "default_title_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Redirect anonymous requests on protected routes to /login
    #[serde(default = "default_require_login")]
    pub require_login: bool,
    /// HS256 secret for session tokens; empty means random per process
    #[serde(default)]
    pub session_secret: String,
    #[serde(default = "default_session_minutes")]
    pub session_minutes: u64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default)]
    pub cookie_secure: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    4568
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_url() -> String {
    "shortly.db".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    100
}

fn default_retry_max_delay_ms() -> u64 {
    2000
}

fn default_code_length() -> usize {
    6
}

fn default_max_code_attempts() -> u32 {
    5
}

fn default_title_enabled() -> bool {
    true
}

fn default_title_timeout_secs() -> u64 {
    5
}

fn default_title_max_body_bytes() -> u64 {
    512 * 1024
}

fn default_title_user_agent() -> String {
    format!("shortly/{}", env!("CARGO_PKG_VERSION"))
}

fn default_require_login() -> bool {
    true
}

fn default_session_minutes() -> u64 {
    24 * 60
}

fn default_cookie_name() -> String {
    "shortly_session".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            retry_count: default_retry_count(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
            max_code_attempts: default_max_code_attempts(),
        }
    }
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            enabled: default_title_enabled(),
            timeout_secs: default_title_timeout_secs(),
            max_body_bytes: default_title_max_body_bytes(),
            user_agent: default_title_user_agent(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            require_login: default_require_login(),
            session_secret: String::new(),
            session_minutes: default_session_minutes(),
            cookie_name: default_cookie_name(),
            cookie_secure: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
