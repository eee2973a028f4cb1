use std::process::ExitCode;

use arrchk_core::lints::all_lints;
use clap::Args;

use crate::cli::CliError;
use crate::exit_codes;

#[derive(Debug, Args)]
pub struct RulesArgs {}

pub fn run(_args: RulesArgs) -> Result<ExitCode, CliError> {
    println!("RULE_ID\tKIND\tDEFAULT\tSUMMARY");
    for lint in all_lints() {
        println!(
            "{}\t{}\t{}\t{}",
            lint.id,
            lint.kind.as_str(),
            lint.default_level,
            lint.docs.summary
        );
    }
    Ok(exit_codes::success())
}
