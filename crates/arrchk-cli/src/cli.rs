use std::error::Error;
use std::fmt::{Display, Formatter};
use std::process::ExitCode;

use arrchk_core::config::{ConfigError, RuleOverrides};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::commands::{check, explain, rules};
use crate::exit_codes;

#[derive(Debug)]
pub enum CliError {
    Config(ConfigError),
    UnknownRule { rule_id: String },
    Runtime(String),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::UnknownRule { rule_id } => {
                write!(f, "unknown rule id '{rule_id}' (run `arrchk rules`)")
            }
            Self::Runtime(message) => write!(f, "{message}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::UnknownRule { .. } | Self::Runtime(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Debug, Args)]
pub struct RuleLevelFlags {
    #[arg(long = "deny", value_name = "RULE_ID", action = ArgAction::Append)]
    pub deny: Vec<String>,
    #[arg(long = "warn", value_name = "RULE_ID", action = ArgAction::Append)]
    pub warn: Vec<String>,
    #[arg(long = "allow", value_name = "RULE_ID", action = ArgAction::Append)]
    pub allow: Vec<String>,
}

impl RuleLevelFlags {
    pub fn rule_overrides(&self) -> RuleOverrides {
        RuleOverrides {
            deny: self.deny.clone(),
            warn: self.warn.clone(),
            allow: self.allow.clone(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "arrchk",
    version,
    about = "Out-of-bounds array index checker for SSA IR dumps"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze a module IR dump.
    Check(check::CheckArgs),
    /// List every rule.
    Rules(rules::RulesArgs),
    /// Show the documentation of one rule.
    Explain(explain::ExplainArgs),
}

pub fn run() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(value) => value,
        Err(err) => {
            let code = exit_codes::clap_exit(err.exit_code());
            let _ = err.print();
            return code;
        }
    };

    match dispatch(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            exit_codes::internal_error()
        }
    }
}

fn dispatch(cli: Cli) -> Result<ExitCode, CliError> {
    match cli.command {
        Command::Check(args) => check::run(args),
        Command::Rules(args) => rules::run(args),
        Command::Explain(args) => explain::run(args),
    }
}
