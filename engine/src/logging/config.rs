use std::collections::HashMap;
use tracing::Level;

/// Per-scope log levels, e.g. `"warn,input=debug,motion=trace"`
#[derive(Debug, Clone)]
pub struct LogConfig {
    global_level: Level,
    scope_levels: HashMap<String, Level>,
}

impl LogConfig {
    pub fn new() -> Self {
        Self {
            global_level: Level::WARN,
            scope_levels: HashMap::new(),
        }
    }

    pub fn from_env(env_var_name: &str) -> Self {
        match std::env::var(env_var_name) {
            Ok(spec) => Self::parse(&spec),
            Err(_) => Self::new(),
        }
    }

    /// Build a config from a comma-separated list of `level` and `scope=level` entries.
    /// Unknown levels are skipped; the last global entry wins.
    pub fn parse(spec: &str) -> Self {
        let mut config = Self::new();

        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match entry.split_once('=') {
                Some((scope, level)) => {
                    if let Some(level) = parse_level(level.trim()) {
                        config.set_scope_level(scope.trim().to_string(), level);
                    }
                }
                None => {
                    if let Some(level) = parse_level(entry) {
                        config.global_level = level;
                    }
                }
            }
        }

        config
    }

    pub fn level_for(&self, scope: &str) -> Level {
        self.scope_levels
            .get(scope)
            .copied()
            .unwrap_or(self.global_level)
    }

    pub fn should_log(&self, scope: &str, level: Level) -> bool {
        level <= self.level_for(scope)
    }

    pub fn set_scope_level(&mut self, scope: String, level: Level) {
        self.scope_levels.insert(scope, level);
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_level(level_str: &str) -> Option<Level> {
    match level_str.to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

/// Install the fmt subscriber (filtered by `RUST_LOG`, writing to stderr) and the
/// scope levels read from `env_var_name`, e.g. `init_logging("HYDRA_LOG")`.
/// Safe to call more than once; later calls keep the first configuration.
pub fn init_logging(env_var_name: &str) -> LogConfig {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let config = LogConfig::from_env(env_var_name);
    super::set_log_config(config.clone());
    config
}
