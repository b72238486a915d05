use serde::Deserialize;

pub const ENV_PREFIX: &str = "USERPOSTS";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub graphql: GraphqlConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GraphqlConfig {
    #[serde(default = "default_graphiql")]
    pub graphiql: bool,
    #[serde(default)]
    pub depth_limit: Option<usize>,
    #[serde(default)]
    pub complexity_limit: Option<usize>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StoreConfig {
    /// JSON file holding `{ "users": [...], "posts": [...] }` loaded at start-up.
    #[serde(default)]
    pub seed_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl Default for GraphqlConfig {
    fn default() -> Self {
        Self {
            graphiql: default_graphiql(),
            depth_limit: None,
            complexity_limit: None,
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            format: LogFormat::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));
        let cfg = builder.build()?;
        let config: Config = cfg.try_deserialize()?;

        if config.app.host.trim().is_empty() {
            return Err(config::ConfigError::Message(format!(
                "Missing bind host. Set {ENV_PREFIX}__APP__HOST or remove the empty override."
            )));
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_graphiql() -> bool {
    true
}

fn default_log_filter() -> String {
    "info".to_string()
}
