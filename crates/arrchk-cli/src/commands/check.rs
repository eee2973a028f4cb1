use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use arrchk_core::config::{Config, ConfigSource, load_from_dir, load_from_path};
use arrchk_core::diagnostics::{Diagnostic, sort_diagnostics};
use arrchk_core::model::{FunctionBody, ModuleIr};
use arrchk_rules::{AccessStats, RuleRunSettings, analyze_functions};
use clap::Args;
use tracing::debug;

use crate::cli::{CliError, OutputFormat, RuleLevelFlags};
use crate::exit_codes;
use crate::output::{json as json_output, text as text_output};

#[derive(Clone, Debug, Args)]
pub struct CheckArgs {
    /// Module IR dump in JSON form.
    pub ir: PathBuf,
    /// Configuration file; defaults to `arrchk.toml` next to the IR dump.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long, default_value = "text", value_enum)]
    pub format: OutputFormat,
    #[arg(long, value_name = "N")]
    pub max_chain_hops: Option<usize>,
    /// Print per-access verdict counts to stderr.
    #[arg(long)]
    pub stats: bool,
    #[command(flatten)]
    pub levels: RuleLevelFlags,
}

pub fn run(args: CheckArgs) -> Result<ExitCode, CliError> {
    let config = load_config(&args)?;
    let config = match args.max_chain_hops {
        Some(max_chain_hops) => config.with_max_chain_hops(max_chain_hops)?,
        None => config,
    };
    let settings = RuleRunSettings::from_config(&config, &args.levels.rule_overrides())?;

    let module = load_module(&args.ir)?;
    debug!(
        functions = module.functions.len(),
        accesses = module
            .functions
            .iter()
            .map(FunctionBody::array_access_count)
            .sum::<usize>(),
        max_chain_hops = settings.max_chain_hops,
        "analyzing module"
    );

    let reports = analyze_functions(&module.functions, &settings);
    let mut stats = AccessStats::default();
    let mut diagnostics = Vec::<Diagnostic>::new();
    for report in reports {
        stats.merge(&report.stats);
        diagnostics.extend(report.diagnostics);
    }
    sort_diagnostics(&mut diagnostics);

    render_result(args.format, &diagnostics)?;
    if args.stats {
        eprintln!("{}", text_output::render_stats(&stats));
    }

    Ok(exit_codes::diagnostics_found(!diagnostics.is_empty()))
}

fn load_config(args: &CheckArgs) -> Result<Config, CliError> {
    if let Some(path) = &args.config {
        return Ok(load_from_path(path)?);
    }
    let loaded = load_from_dir(config_root_for_target(&args.ir))?;
    if let ConfigSource::File(path) = &loaded.source {
        debug!(path = %path.display(), "loaded configuration");
    }
    Ok(loaded.config)
}

fn load_module(path: &Path) -> Result<ModuleIr, CliError> {
    let source = fs::read_to_string(path).map_err(|source| {
        CliError::Runtime(format!(
            "failed to read IR file '{}': {source}",
            path.display()
        ))
    })?;
    ModuleIr::from_json_str(&source).map_err(|source| {
        CliError::Runtime(format!(
            "failed to parse IR file '{}': {source}",
            path.display()
        ))
    })
}

fn config_root_for_target(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn render_result(format: OutputFormat, diagnostics: &[Diagnostic]) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => {
            print!("{}", text_output::render_diagnostics(diagnostics));
            Ok(())
        }
        OutputFormat::Json => {
            let rendered = json_output::render_diagnostics(diagnostics).map_err(|source| {
                CliError::Runtime(format!("failed to serialize diagnostics as JSON: {source}"))
            })?;
            println!("{rendered}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::config_root_for_target;

    #[test]
    fn config_root_is_the_ir_directory() {
        assert_eq!(
            config_root_for_target(Path::new("build/ir/module.json")),
            Path::new("build/ir")
        );
        assert_eq!(config_root_for_target(Path::new("module.json")), Path::new("."));
    }
}
