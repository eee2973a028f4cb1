use std::process::ExitCode;

use arrchk_core::lints::{find_lint, normalize_lint_id};
use clap::Args;

use crate::cli::CliError;
use crate::exit_codes;

#[derive(Debug, Args)]
pub struct ExplainArgs {
    pub rule_id: String,
}

pub fn run(args: ExplainArgs) -> Result<ExitCode, CliError> {
    let lint = find_lint(&args.rule_id).ok_or_else(|| CliError::UnknownRule {
        rule_id: normalize_lint_id(&args.rule_id),
    })?;
    println!("Rule: {}", lint.id);
    println!("Kind: {}", lint.kind.as_str());
    println!("Default level: {}", lint.default_level);
    println!("Summary: {}", lint.docs.summary);
    println!();
    println!("What it does: {}", lint.docs.what_it_does);
    println!("Known limitations: {}", lint.docs.known_limitations);
    println!("How to fix: {}", lint.docs.how_to_fix);
    Ok(exit_codes::success())
}
