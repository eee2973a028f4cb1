use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::diagnostics::Severity;
use crate::lints::{all_lints, find_lint};

pub const DEFAULT_MAX_CHAIN_HOPS: usize = 64;

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub rules: RuleOverrides,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub rules: RuleOverrides,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Upper bound on additive definitions folded per index chain.
    #[serde(default = "default_max_chain_hops")]
    pub max_chain_hops: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_chain_hops: default_max_chain_hops(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    Allow,
    Warn,
    Deny,
}

impl RuleLevel {
    /// Severity of diagnostics emitted at this level; `None` disables the rule.
    pub const fn severity(self) -> Option<Severity> {
        match self {
            Self::Allow => None,
            Self::Warn => Some(Severity::Warning),
            Self::Deny => Some(Severity::Error),
        }
    }
}

impl Display for RuleLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::Warn => write!(f, "warn"),
            Self::Deny => write!(f, "deny"),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RuleOverrides {
    #[serde(default)]
    pub deny: Vec<String>,
    #[serde(default)]
    pub warn: Vec<String>,
    #[serde(default)]
    pub allow: Vec<String>,
}

impl RuleOverrides {
    /// Canonical rule id to level, rejecting unknown ids and ids listed
    /// under two different levels.
    fn resolve(&self) -> Result<BTreeMap<String, RuleLevel>, ConfigError> {
        let mut levels = BTreeMap::<String, RuleLevel>::new();
        let requested = [
            (RuleLevel::Deny, &self.deny),
            (RuleLevel::Warn, &self.warn),
            (RuleLevel::Allow, &self.allow),
        ];
        for (level, rule_ids) in requested {
            for rule_id in rule_ids {
                let Some(lint) = find_lint(rule_id) else {
                    return Err(ConfigError::UnknownRule {
                        rule_id: rule_id.clone(),
                    });
                };
                if let Some(existing) = levels.insert(lint.id.to_string(), level)
                    && existing != level
                {
                    return Err(ConfigError::ConflictingRuleLevel {
                        rule_id: lint.id.to_string(),
                        existing,
                        requested: level,
                    });
                }
            }
        }
        Ok(levels)
    }
}

impl Config {
    pub fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let config = Self {
            analysis: raw.analysis,
            rules: raw.rules,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_hop_limit(self.analysis.max_chain_hops)?;
        self.rules.resolve()?;
        Ok(())
    }

    pub fn with_max_chain_hops(mut self, max_chain_hops: usize) -> Result<Self, ConfigError> {
        validate_hop_limit(max_chain_hops)?;
        self.analysis.max_chain_hops = max_chain_hops;
        Ok(self)
    }

    /// Level of every catalog rule: catalog default, then this config's
    /// `[rules]` table, then `overrides` (typically from the command line).
    pub fn effective_rule_levels(
        &self,
        overrides: &RuleOverrides,
    ) -> Result<BTreeMap<String, RuleLevel>, ConfigError> {
        let mut levels = all_lints()
            .iter()
            .map(|lint| (lint.id.to_string(), lint.default_level))
            .collect::<BTreeMap<_, _>>();
        levels.extend(self.rules.resolve()?);
        levels.extend(overrides.resolve()?);
        Ok(levels)
    }
}

fn validate_hop_limit(max_chain_hops: usize) -> Result<(), ConfigError> {
    if max_chain_hops == 0 {
        return Err(ConfigError::InvalidHopLimit {
            value: max_chain_hops,
        });
    }
    Ok(())
}

fn default_max_chain_hops() -> usize {
    DEFAULT_MAX_CHAIN_HOPS
}
