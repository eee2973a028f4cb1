use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod loader;
pub mod types;

pub use loader::{CONFIG_FILE, ConfigSource, LoadedConfig, load_from_dir, load_from_path};
pub use types::{
    AnalysisConfig, Config, DEFAULT_MAX_CHAIN_HOPS, RawConfig, RuleLevel, RuleOverrides,
};

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    InvalidHopLimit {
        value: usize,
    },
    UnknownRule {
        rule_id: String,
    },
    ConflictingRuleLevel {
        rule_id: String,
        existing: RuleLevel,
        requested: RuleLevel,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(
                    f,
                    "failed to read config file '{}': {source}",
                    path.display()
                )
            }
            Self::Parse { path, source } => {
                write!(
                    f,
                    "failed to parse config file '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidHopLimit { value } => {
                write!(f, "max_chain_hops must be at least 1 (got {value})")
            }
            Self::UnknownRule { rule_id } => write!(f, "unknown rule '{rule_id}'"),
            Self::ConflictingRuleLevel {
                rule_id,
                existing,
                requested,
            } => write!(
                f,
                "conflicting levels for rule '{rule_id}': {existing} vs {requested}"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::InvalidHopLimit { .. }
            | Self::UnknownRule { .. }
            | Self::ConflictingRuleLevel { .. } => None,
        }
    }
}
