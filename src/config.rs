use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub inference: InferenceConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Chat-completion provider settings (OpenAI-compatible API)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Base URL up to and including the version segment, e.g. https://openrouter.ai/api/v1
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Request timeout in seconds (accepts "30s", "2m")
    #[serde(deserialize_with = "deserialize_duration_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Supabase,
    Sqlite,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "supabase" => Ok(Self::Supabase),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(format!("unknown storage backend: {}", other)),
        }
    }
}

/// Where classification records are persisted
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub table: String,
    pub sqlite_url: String,
    #[serde(deserialize_with = "deserialize_duration_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

/// Command line arguments for configuration overrides
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "tsa-checker")]
#[command(version, about = "TSA Item Checker - carry-on and checked bag classification API")]
pub struct CommandLineArgs {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Server host (overrides config file)
    #[arg(long, value_name = "HOST")]
    pub server_host: Option<String>,

    /// Server port (overrides config file)
    #[arg(long, value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Chat-completion model identifier (overrides config file)
    #[arg(long, value_name = "MODEL")]
    pub inference_model: Option<String>,

    /// Storage backend: supabase or sqlite (overrides config file)
    #[arg(long, value_name = "BACKEND")]
    pub storage_backend: Option<StorageBackend>,

    /// Logging level (overrides config file, e.g., "info,tsa_checker=debug")
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration with command line, environment variable, and file support
    ///
    /// Loading order (priority from highest to lowest):
    /// 1. Command line arguments
    /// 2. Environment variables (a `.env` file is read into the environment first)
    /// 3. Configuration file (config.toml)
    /// 4. Default values
    pub fn load() -> Result<Self, anyhow::Error> {
        let cli_args = CommandLineArgs::parse();

        // A missing .env is normal in containers
        let _ = dotenvy::dotenv();

        let config_path = cli_args.config.clone().or_else(Self::find_config_file);
        let mut config = if let Some(config_path) = config_path {
            Self::from_toml(&config_path)?
        } else {
            tracing::warn!("Configuration file not found, using defaults");
            Config::default()
        };

        config.apply_env_overrides();
        config.apply_cli_overrides(&cli_args);
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - APP_SERVER_PORT: Server port (default: 8000)
    /// - OPENROUTER_API_KEY: Inference provider API key (required)
    /// - APP_INFERENCE_API_BASE: Inference provider base URL
    /// - APP_INFERENCE_MODEL: Chat-completion model identifier
    /// - SUPABASE_URL: Supabase project URL
    /// - SUPABASE_ANON_KEY: Supabase public (anon) key
    /// - APP_STORAGE_BACKEND: supabase or sqlite
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,tsa_checker=debug")
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        if let Ok(port) = std::env::var("APP_SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
            tracing::info!("Override server.port from env: {}", self.server.port);
        }

        if let Ok(key) = std::env::var("OPENROUTER_API_KEY") {
            self.inference.api_key = key;
            tracing::info!("Override inference.api_key from env");
        }

        if let Ok(base) = std::env::var("APP_INFERENCE_API_BASE") {
            self.inference.api_base = base;
            tracing::info!("Override inference.api_base from env: {}", self.inference.api_base);
        }

        if let Ok(model) = std::env::var("APP_INFERENCE_MODEL") {
            self.inference.model = model;
            tracing::info!("Override inference.model from env: {}", self.inference.model);
        }

        if let Ok(url) = std::env::var("SUPABASE_URL") {
            self.storage.supabase_url = url;
            tracing::info!("Override storage.supabase_url from env");
        }

        if let Ok(key) = std::env::var("SUPABASE_ANON_KEY") {
            self.storage.supabase_anon_key = key;
            tracing::info!("Override storage.supabase_anon_key from env");
        }

        if let Ok(backend) = std::env::var("APP_STORAGE_BACKEND") {
            match backend.parse() {
                Ok(val) => {
                    self.storage.backend = val;
                    tracing::info!(
                        "Override storage.backend from env: {:?}",
                        self.storage.backend
                    );
                },
                Err(e) => tracing::warn!(
                    "Invalid APP_STORAGE_BACKEND '{}': {} (keep {:?})",
                    backend,
                    e,
                    self.storage.backend
                ),
            }
        }

        if let Ok(level) = std::env::var("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }
    }

    /// Apply command line argument overrides (highest priority)
    fn apply_cli_overrides(&mut self, args: &CommandLineArgs) {
        if let Some(host) = &args.server_host {
            self.server.host = host.clone();
            tracing::info!("Override server.host from CLI: {}", self.server.host);
        }

        if let Some(port) = args.server_port {
            self.server.port = port;
            tracing::info!("Override server.port from CLI: {}", self.server.port);
        }

        if let Some(model) = &args.inference_model {
            self.inference.model = model.clone();
            tracing::info!("Override inference.model from CLI: {}", self.inference.model);
        }

        if let Some(backend) = args.storage_backend {
            self.storage.backend = backend;
            tracing::info!("Override storage.backend from CLI: {:?}", self.storage.backend);
        }

        if let Some(level) = &args.log_level {
            self.logging.level = level.clone();
            tracing::info!("Override logging.level from CLI: {}", self.logging.level);
        }
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.inference.api_key.trim().is_empty() {
            anyhow::bail!("Inference API key is missing, set OPENROUTER_API_KEY");
        }
        if !(0.0..=2.0).contains(&self.inference.temperature) {
            anyhow::bail!("inference.temperature must be within 0.0..=2.0");
        }
        if self.inference.max_tokens == 0 {
            anyhow::bail!("inference.max_tokens must be > 0");
        }

        match self.storage.backend {
            StorageBackend::Supabase => {
                if self.storage.supabase_url.trim().is_empty() {
                    anyhow::bail!("Supabase backend selected but SUPABASE_URL is not set");
                }
                if self.storage.supabase_anon_key.trim().is_empty() {
                    anyhow::bail!("Supabase backend selected but SUPABASE_ANON_KEY is not set");
                }
            },
            StorageBackend::Sqlite => {
                if self.storage.sqlite_url.is_empty() {
                    anyhow::bail!("SQLite backend selected but storage.sqlite_url is empty");
                }
            },
        }

        if self.storage.table.trim().is_empty() {
            anyhow::bail!("storage.table cannot be empty");
        }

        Ok(())
    }

    fn find_config_file() -> Option<String> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    fn from_toml(path: &str) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8000 }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_base: "https://openrouter.ai/api/v1".to_string(),
            api_key: String::new(),
            model: "mistralai/mistral-7b-instruct".to_string(),
            temperature: 0.1,
            max_tokens: 150,
            timeout_secs: 120,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Supabase,
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            table: "tsa_checks".to_string(),
            sqlite_url: "sqlite://data/tsa_checks.db".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,tsa_checker=debug".to_string(),
            file: Some("logs/tsa_checker.log".to_string()),
        }
    }
}

// =========================
// Helpers for parsing values
// =========================

fn parse_duration_to_secs(input: &str) -> Result<u64, String> {
    // Accept plain numbers (treated as seconds)
    if let Ok(val) = input.parse::<u64>() {
        return Ok(val);
    }

    let s = input.trim().to_lowercase();
    let (num_str, unit) = s.split_at(s.chars().take_while(|c| c.is_ascii_digit()).count());
    if num_str.is_empty() || unit.is_empty() {
        return Err("missing number or unit".into());
    }
    let n: u64 = num_str.parse().map_err(|_| "invalid number".to_string())?;
    match unit {
        "s" | "sec" | "secs" | "second" | "seconds" => Ok(n),
        "m" | "min" | "mins" | "minute" | "minutes" => Ok(n * 60),
        "h" | "hr" | "hour" | "hours" => Ok(n * 60 * 60),
        _ => Err(format!("unsupported unit: {}", unit)),
    }
}

// Custom serde deserializer to support numeric or human-friendly string values
fn deserialize_duration_secs<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct Visitor;
    impl<'de> serde::de::Visitor<'de> for Visitor {
        type Value = u64;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number of seconds or a string like '30s', '5m', '1h'")
        }
        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v)
        }
        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if v >= 0 { Ok(v as u64) } else { Err(E::custom("negative not allowed")) }
        }
        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            parse_duration_to_secs(v).map_err(E::custom)
        }
    }
    deserializer.deserialize_any(Visitor)
}
