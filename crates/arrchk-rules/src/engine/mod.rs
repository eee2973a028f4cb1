pub mod emit;
pub mod walker;

use std::collections::BTreeMap;

use arrchk_core::config::{
    Config, ConfigError, DEFAULT_MAX_CHAIN_HOPS, RuleLevel, RuleOverrides,
};
use arrchk_core::diagnostics::{Diagnostic, OobKind};
use arrchk_core::lints::{all_lints, lint_for_kind};
use arrchk_core::model::FunctionBody;
use arrchk_core::oracle::{DiagnosticSink, FunctionIr};
use rayon::prelude::*;
use tracing::debug;

use crate::bounds::{BoundsEvaluator, SkipReason, Verdict};

use self::walker::walk_array_accesses;

/// Per-run analysis settings, passed by reference down to every check.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RuleRunSettings {
    pub max_chain_hops: usize,
    pub effective_levels: BTreeMap<String, RuleLevel>,
}

impl Default for RuleRunSettings {
    fn default() -> Self {
        Self {
            max_chain_hops: DEFAULT_MAX_CHAIN_HOPS,
            effective_levels: all_lints()
                .iter()
                .map(|lint| (lint.id.to_string(), lint.default_level))
                .collect(),
        }
    }
}

impl RuleRunSettings {
    pub fn from_config(config: &Config, overrides: &RuleOverrides) -> Result<Self, ConfigError> {
        Ok(Self {
            max_chain_hops: config.analysis.max_chain_hops,
            effective_levels: config.effective_rule_levels(overrides)?,
        })
    }

    /// Configured level of the rule reporting `kind`, falling back to the
    /// catalog default.
    pub fn level_for(&self, kind: OobKind) -> RuleLevel {
        let lint = lint_for_kind(kind);
        self.effective_levels
            .get(lint.id)
            .copied()
            .unwrap_or(lint.default_level)
    }
}

/// Verdict counts for one or more analyzed functions.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AccessStats {
    pub accesses: usize,
    pub flagged: usize,
    pub in_bounds: usize,
    pub domain_unknown: usize,
    pub index_unresolved: usize,
    pub range_unknown: usize,
    pub unsupported_index: usize,
}

impl AccessStats {
    fn record(&mut self, verdicts: &[Verdict]) {
        self.accesses += 1;
        for verdict in verdicts {
            match verdict {
                Verdict::Flagged(_) => self.flagged += 1,
                Verdict::InBounds(_) => self.in_bounds += 1,
                Verdict::Skipped(SkipReason::DomainUnknown) => self.domain_unknown += 1,
                Verdict::Skipped(SkipReason::IndexUnresolved(_)) => self.index_unresolved += 1,
                Verdict::Skipped(SkipReason::RangeUnknown) => self.range_unknown += 1,
                Verdict::Skipped(SkipReason::UnsupportedIndex) => self.unsupported_index += 1,
            }
        }
    }

    pub fn skipped(&self) -> usize {
        self.domain_unknown + self.index_unresolved + self.range_unknown + self.unsupported_index
    }

    pub fn merge(&mut self, other: &Self) {
        self.accesses += other.accesses;
        self.flagged += other.flagged;
        self.in_bounds += other.in_bounds;
        self.domain_unknown += other.domain_unknown;
        self.index_unresolved += other.index_unresolved;
        self.range_unknown += other.range_unknown;
        self.unsupported_index += other.unsupported_index;
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FunctionReport {
    pub function: String,
    /// In traversal order.
    pub diagnostics: Vec<Diagnostic>,
    pub stats: AccessStats,
    pub sink_failures: usize,
}

pub fn analyze_function(ir: &dyn FunctionIr, settings: &RuleRunSettings) -> Vec<Diagnostic> {
    analyze_function_report(ir, settings).diagnostics
}

pub fn analyze_function_report(ir: &dyn FunctionIr, settings: &RuleRunSettings) -> FunctionReport {
    let evaluator = BoundsEvaluator::new(ir, settings);
    let mut report = FunctionReport {
        function: ir.function_name().to_string(),
        ..FunctionReport::default()
    };

    walk_array_accesses(ir.basic_blocks(), |access| {
        let verdicts = evaluator.classify(access);
        report.stats.record(&verdicts);
        report
            .diagnostics
            .extend(evaluator.diagnostics_for(&verdicts));
    });

    debug!(
        function = %report.function,
        accesses = report.stats.accesses,
        diagnostics = report.diagnostics.len(),
        skipped = report.stats.skipped(),
        "function analyzed"
    );
    report
}

/// Analyzes `ir` and forwards its diagnostics to `sink`. Sink failures are
/// logged and counted, never returned as errors.
pub fn analyze_into_sink(
    ir: &dyn FunctionIr,
    settings: &RuleRunSettings,
    sink: &mut dyn DiagnosticSink,
) -> FunctionReport {
    let mut report = analyze_function_report(ir, settings);
    report.sink_failures = emit::forward(&report.diagnostics, sink);
    report
}

/// Analyzes independent function bodies in parallel; reports keep input order.
pub fn analyze_functions(
    functions: &[FunctionBody],
    settings: &RuleRunSettings,
) -> Vec<FunctionReport> {
    functions
        .par_iter()
        .map(|function| analyze_function_report(function, settings))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use arrchk_core::config::{Config, ConfigError, RuleLevel, RuleOverrides};
    use arrchk_core::diagnostics::{Diagnostic, OobKind};
    use arrchk_core::model::{
        ArrayAccess, ArrayDomain, Expr, FunctionBody, Span, Statement, TypeId,
    };
    use arrchk_core::oracle::{CollectingSink, DiagnosticSink, SinkError};

    use super::{
        AccessStats, RuleRunSettings, analyze_function, analyze_function_report,
        analyze_functions, analyze_into_sink,
    };

    fn indexed(name: &str, indices: &[i64]) -> FunctionBody {
        let mut body = FunctionBody::new(name);
        body.with_array_type(TypeId(0), ArrayDomain::new(0, 9));
        let operands = indices
            .iter()
            .zip(1u32..)
            .map(|(index, col)| {
                Expr::ArrayAccess(ArrayAccess::new(
                    Expr::variable("a"),
                    TypeId(0),
                    Expr::constant(*index),
                    Span::new("a.c", 1, col),
                ))
            })
            .collect();
        body.push_block(vec![Statement::new(Span::new("a.c", 1, 1), operands)]);
        body
    }

    #[test]
    fn default_settings_use_catalog_levels() {
        let settings = RuleRunSettings::default();
        assert_eq!(settings.level_for(OobKind::ConstantIndexOob), RuleLevel::Deny);
        assert_eq!(settings.level_for(OobKind::RangeBasedOob), RuleLevel::Warn);

        let sparse = RuleRunSettings {
            effective_levels: BTreeMap::new(),
            ..RuleRunSettings::default()
        };
        assert_eq!(sparse.level_for(OobKind::RangeBasedOob), RuleLevel::Warn);
    }

    #[test]
    fn settings_follow_config_and_overrides() {
        let config = Config::default()
            .with_max_chain_hops(5)
            .expect("hop limit is valid");
        let overrides = RuleOverrides {
            allow: vec!["arr001".to_string()],
            ..RuleOverrides::default()
        };
        let settings =
            RuleRunSettings::from_config(&config, &overrides).expect("settings should build");
        assert_eq!(settings.max_chain_hops, 5);
        assert_eq!(settings.level_for(OobKind::ConstantIndexOob), RuleLevel::Allow);

        let bad = RuleOverrides {
            deny: vec!["ARR777".to_string()],
            ..RuleOverrides::default()
        };
        assert!(matches!(
            RuleRunSettings::from_config(&config, &bad),
            Err(ConfigError::UnknownRule { .. })
        ));
    }

    #[test]
    fn diagnostics_keep_traversal_order() {
        let body = indexed("f", &[12, 3, -4, 10]);
        let cols = analyze_function(&body, &RuleRunSettings::default())
            .iter()
            .map(|diagnostic| diagnostic.location.col)
            .collect::<Vec<_>>();
        assert_eq!(cols, vec![1, 3, 4]);
    }

    #[test]
    fn report_counts_every_access() {
        let body = indexed("f", &[12, 3, -4]);
        let report = analyze_function_report(&body, &RuleRunSettings::default());
        assert_eq!(
            report.stats,
            AccessStats {
                accesses: 3,
                flagged: 2,
                in_bounds: 1,
                ..AccessStats::default()
            }
        );
        assert_eq!(report.function, "f");
    }

    #[test]
    fn repeated_runs_are_identical() {
        let body = indexed("f", &[12, 3, -4]);
        let settings = RuleRunSettings::default();
        assert_eq!(
            analyze_function(&body, &settings),
            analyze_function(&body, &settings)
        );
    }

    struct FailingSink;

    impl DiagnosticSink for FailingSink {
        fn accept(&mut self, _diagnostic: Diagnostic) -> Result<(), SinkError> {
            Err(SinkError::new("unavailable"))
        }
    }

    #[test]
    fn sink_failures_do_not_lose_diagnostics() {
        let body = indexed("f", &[12, -4]);
        let settings = RuleRunSettings::default();

        let report = analyze_into_sink(&body, &settings, &mut FailingSink);
        assert_eq!(report.sink_failures, 2);
        assert_eq!(report.diagnostics.len(), 2);

        let mut sink = CollectingSink::default();
        let report = analyze_into_sink(&body, &settings, &mut sink);
        assert_eq!(report.sink_failures, 0);
        assert_eq!(sink.diagnostics, report.diagnostics);
    }

    #[test]
    fn parallel_reports_keep_input_order() {
        let functions = (0..32)
            .map(|n| indexed(&format!("f{n}"), &[10 + n, 0]))
            .collect::<Vec<_>>();
        let reports = analyze_functions(&functions, &RuleRunSettings::default());

        assert_eq!(reports.len(), functions.len());
        for (report, function) in reports.iter().zip(&functions) {
            assert_eq!(report.function, function.name);
            assert_eq!(report.diagnostics.len(), 1);
        }
    }
}
