use holdem_ai::Style;
use holdem_engine::rules::RaiseSize;
use holdem_engine::table::TableConfig;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub players: usize,
    pub starting_stack: u32,
    pub big_blind: u32,
    pub seed: Option<u64>,
    /// One style, or a comma-separated list cycled over the computer seats
    pub ai: String,
    pub hands_per_level: u32,
    /// Big blinds added by each bet or raise
    pub raise_big_blinds: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Flag,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub players: ValueSource,
    pub starting_stack: ValueSource,
    pub big_blind: ValueSource,
    pub seed: ValueSource,
    pub ai: ValueSource,
    pub hands_per_level: ValueSource,
    pub raise_big_blinds: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            players: ValueSource::Default,
            starting_stack: ValueSource::Default,
            big_blind: ValueSource::Default,
            seed: ValueSource::Default,
            ai: ValueSource::Default,
            hands_per_level: ValueSource::Default,
            raise_big_blinds: ValueSource::Default,
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
            players: 4,
            starting_stack: 1000,
            big_blind: 10,
            seed: None,
            ai: "safe".into(),
            hands_per_level: 0,
            raise_big_blinds: 1,
        }
    }
}

impl Config {
    /// Table rules for a session: small blind is half the big blind and a
    /// raise adds `raise_big_blinds` big blinds.
    pub fn table_config(&self) -> TableConfig {
        TableConfig {
            starting_stack: self.starting_stack,
            small_blind: (self.big_blind / 2).max(1),
            big_blind: self.big_blind,
            raise_size: RaiseSize::BigBlinds(self.raise_big_blinds),
            hands_per_level: self.hands_per_level,
            ..TableConfig::default()
        }
    }

    /// Styles named by `ai`, in seat order.
    pub fn styles(&self) -> Result<Vec<Style>, ConfigError> {
        self.ai
            .split(',')
            .map(|s| {
                s.parse::<Style>()
                    .map_err(|e| ConfigError::Invalid(e.to_string()))
            })
            .collect()
    }
}

/// Values given on the command line; `None` leaves the resolved value alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub players: Option<usize>,
    pub starting_stack: Option<u32>,
    pub big_blind: Option<u32>,
    pub seed: Option<u64>,
    pub ai: Option<String>,
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
            ConfigError::Parse(e) => write!(f, "bad config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

/// Defaults, then the `HOLDEM_CONFIG` file, then `HOLDEM_*` variables.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let resolved = read_layers()?;
    validate(&resolved.config)?;
    Ok(resolved)
}

/// [`load_with_sources`] with command-line flags applied on top.
pub fn resolve(flags: &Overrides) -> Result<ConfigResolved, ConfigError> {
    let ConfigResolved {
        mut config,
        mut sources,
    } = read_layers()?;

    if let Some(v) = flags.players {
        config.players = v;
        sources.players = ValueSource::Flag;
    }
    if let Some(v) = flags.starting_stack {
        config.starting_stack = v;
        sources.starting_stack = ValueSource::Flag;
    }
    if let Some(v) = flags.big_blind {
        config.big_blind = v;
        sources.big_blind = ValueSource::Flag;
    }
    if let Some(v) = flags.seed {
        config.seed = Some(v);
        sources.seed = ValueSource::Flag;
    }
    if let Some(v) = &flags.ai {
        config.ai = v.clone();
        sources.ai = ValueSource::Flag;
    }

    validate(&config)?;
    Ok(ConfigResolved { config, sources })
}

fn read_layers() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("HOLDEM_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.players {
            cfg.players = v;
            sources.players = ValueSource::File;
        }
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.ai {
            cfg.ai = v;
            sources.ai = ValueSource::File;
        }
        if let Some(v) = f.hands_per_level {
            cfg.hands_per_level = v;
            sources.hands_per_level = ValueSource::File;
        }
        if let Some(v) = f.raise_big_blinds {
            cfg.raise_big_blinds = v;
            sources.raise_big_blinds = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("HOLDEM_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid HOLDEM_SEED: {}", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(stack) = std::env::var("HOLDEM_STACK")
        && !stack.is_empty()
    {
        cfg.starting_stack = stack
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid HOLDEM_STACK: {}", stack)))?;
        sources.starting_stack = ValueSource::Env;
    }
    if let Ok(bb) = std::env::var("HOLDEM_BIG_BLIND")
        && !bb.is_empty()
    {
        cfg.big_blind = bb
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid HOLDEM_BIG_BLIND: {}", bb)))?;
        sources.big_blind = ValueSource::Env;
    }
    if let Ok(n) = std::env::var("HOLDEM_PLAYERS")
        && !n.is_empty()
    {
        cfg.players = n
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid HOLDEM_PLAYERS: {}", n)))?;
        sources.players = ValueSource::Env;
    }
    if let Ok(n) = std::env::var("HOLDEM_RAISE_BB")
        && !n.is_empty()
    {
        cfg.raise_big_blinds = n
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid HOLDEM_RAISE_BB: {}", n)))?;
        sources.raise_big_blinds = ValueSource::Env;
    }
    if let Ok(ai) = std::env::var("HOLDEM_AI")
        && !ai.is_empty()
    {
        cfg.ai = ai;
        sources.ai = ValueSource::Env;
    }

    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    players: Option<usize>,
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    ai: Option<String>,
    #[serde(default)]
    hands_per_level: Option<u32>,
    #[serde(default)]
    raise_big_blinds: Option<u32>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(2..=10).contains(&cfg.players) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: players must be 2-10, got {}",
            cfg.players
        )));
    }
    if cfg.starting_stack == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_stack must be >0".into(),
        ));
    }
    if cfg.big_blind == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: big_blind must be >0".into(),
        ));
    }
    if cfg.big_blind > cfg.starting_stack {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: big_blind {} exceeds starting_stack {}",
            cfg.big_blind, cfg.starting_stack
        )));
    }
    if cfg.players as u64 * u64::from(cfg.starting_stack) > u64::from(u32::MAX) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: {} players with {} chips each exceed {} chips in play",
            cfg.players,
            cfg.starting_stack,
            u32::MAX
        )));
    }
    if cfg.raise_big_blinds == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: raise_big_blinds must be >0".into(),
        ));
    }
    cfg.styles()?;
    Ok(())
}
