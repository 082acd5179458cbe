use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub episodes_per_batch: u64,
    pub learning_rate: f64,
    pub epsilon: f64,
    pub seed: Option<u64>,
    pub alternate_first_actor: bool,
    pub agent_a: String,
    pub agent_b: String,
    pub model_dir: PathBuf,
    pub stop_file: PathBuf,
    pub compress: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Cli,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub episodes_per_batch: ValueSource,
    pub learning_rate: ValueSource,
    pub epsilon: ValueSource,
    pub seed: ValueSource,
    pub alternate_first_actor: ValueSource,
    pub agent_a: ValueSource,
    pub agent_b: ValueSource,
    pub model_dir: ValueSource,
    pub stop_file: ValueSource,
    pub compress: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            episodes_per_batch: ValueSource::Default,
            learning_rate: ValueSource::Default,
            epsilon: ValueSource::Default,
            seed: ValueSource::Default,
            alternate_first_actor: ValueSource::Default,
            agent_a: ValueSource::Default,
            agent_b: ValueSource::Default,
            model_dir: ValueSource::Default,
            stop_file: ValueSource::Default,
            compress: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            episodes_per_batch: 100_000,
            learning_rate: 0.05,
            epsilon: 0.20,
            seed: None,
            alternate_first_actor: true,
            agent_a: "bot_1".into(),
            agent_b: "bot_2".into(),
            model_dir: PathBuf::from("obj"),
            stop_file: PathBuf::from("quit"),
            compress: false,
        }
    }
}

/// Values given on the command line. `None` leaves the resolved value alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub episodes_per_batch: Option<u64>,
    pub learning_rate: Option<f64>,
    pub epsilon: Option<f64>,
    pub seed: Option<u64>,
    pub fixed_first_actor: bool,
    pub agent_a: Option<String>,
    pub agent_b: Option<String>,
    pub model_dir: Option<PathBuf>,
    pub stop_file: Option<PathBuf>,
    pub compress: bool,
}

impl ConfigResolved {
    /// Applies command-line values on top of file and environment settings
    /// and re-validates the result.
    pub fn apply(mut self, o: Overrides) -> Result<Self, ConfigError> {
        let cfg = &mut self.config;
        let src = &mut self.sources;
        if let Some(v) = o.episodes_per_batch {
            cfg.episodes_per_batch = v;
            src.episodes_per_batch = ValueSource::Cli;
        }
        if let Some(v) = o.learning_rate {
            cfg.learning_rate = v;
            src.learning_rate = ValueSource::Cli;
        }
        if let Some(v) = o.epsilon {
            cfg.epsilon = v;
            src.epsilon = ValueSource::Cli;
        }
        if let Some(v) = o.seed {
            cfg.seed = Some(v);
            src.seed = ValueSource::Cli;
        }
        if o.fixed_first_actor {
            cfg.alternate_first_actor = false;
            src.alternate_first_actor = ValueSource::Cli;
        }
        if let Some(v) = o.agent_a {
            cfg.agent_a = v;
            src.agent_a = ValueSource::Cli;
        }
        if let Some(v) = o.agent_b {
            cfg.agent_b = v;
            src.agent_b = ValueSource::Cli;
        }
        if let Some(v) = o.model_dir {
            cfg.model_dir = v;
            src.model_dir = ValueSource::Cli;
        }
        if let Some(v) = o.stop_file {
            cfg.stop_file = v;
            src.stop_file = ValueSource::Cli;
        }
        if o.compress {
            cfg.compress = true;
            src.compress = ValueSource::Cli;
        }
        validate(&self.config)?;
        Ok(self)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("FLOPBOT_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.episodes_per_batch {
            cfg.episodes_per_batch = v;
            sources.episodes_per_batch = ValueSource::File;
        }
        if let Some(v) = f.learning_rate {
            cfg.learning_rate = v;
            sources.learning_rate = ValueSource::File;
        }
        if let Some(v) = f.epsilon {
            cfg.epsilon = v;
            sources.epsilon = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.alternate_first_actor {
            cfg.alternate_first_actor = v;
            sources.alternate_first_actor = ValueSource::File;
        }
        if let Some(v) = f.agent_a {
            cfg.agent_a = v;
            sources.agent_a = ValueSource::File;
        }
        if let Some(v) = f.agent_b {
            cfg.agent_b = v;
            sources.agent_b = ValueSource::File;
        }
        if let Some(v) = f.model_dir {
            cfg.model_dir = v;
            sources.model_dir = ValueSource::File;
        }
        if let Some(v) = f.stop_file {
            cfg.stop_file = v;
            sources.stop_file = ValueSource::File;
        }
        if let Some(v) = f.compress {
            cfg.compress = v;
            sources.compress = ValueSource::File;
        }
    }

    if let Some(seed) = env_value("FLOPBOT_SEED") {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(eps) = env_value("FLOPBOT_EPSILON") {
        cfg.epsilon = eps
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid epsilon".into()))?;
        sources.epsilon = ValueSource::Env;
    }
    if let Some(lr) = env_value("FLOPBOT_LEARNING_RATE") {
        cfg.learning_rate = lr
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid learning rate".into()))?;
        sources.learning_rate = ValueSource::Env;
    }
    if let Some(n) = env_value("FLOPBOT_EPISODES_PER_BATCH") {
        cfg.episodes_per_batch = n
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid episodes per batch".into()))?;
        sources.episodes_per_batch = ValueSource::Env;
    }
    if let Some(dir) = env_value("FLOPBOT_MODEL_DIR") {
        cfg.model_dir = PathBuf::from(dir);
        sources.model_dir = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    episodes_per_batch: Option<u64>,
    #[serde(default)]
    learning_rate: Option<f64>,
    #[serde(default)]
    epsilon: Option<f64>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    alternate_first_actor: Option<bool>,
    #[serde(default)]
    agent_a: Option<String>,
    #[serde(default)]
    agent_b: Option<String>,
    #[serde(default)]
    model_dir: Option<PathBuf>,
    #[serde(default)]
    stop_file: Option<PathBuf>,
    #[serde(default)]
    compress: Option<bool>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&cfg.epsilon) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: epsilon must be within [0, 1]".into(),
        ));
    }
    if !(cfg.learning_rate > 0.0 && cfg.learning_rate <= 1.0) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: learning_rate must be within (0, 1]".into(),
        ));
    }
    if cfg.episodes_per_batch == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: episodes_per_batch must be >=1".into(),
        ));
    }
    if cfg.agent_a.trim().is_empty() || cfg.agent_b.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: agent names must not be empty".into(),
        ));
    }
    if cfg.agent_a == cfg.agent_b {
        return Err(ConfigError::Invalid(
            "Invalid configuration: agent_a and agent_b must differ".into(),
        ));
    }
    Ok(())
}
