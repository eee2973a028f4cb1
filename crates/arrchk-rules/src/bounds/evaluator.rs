use arrchk_core::config::RuleLevel;
use arrchk_core::diagnostics::Diagnostic;
use arrchk_core::model::ArrayAccess;
use arrchk_core::oracle::FunctionIr;
use tracing::debug;

use crate::bounds::{CheckContext, SkipReason, Verdict, registered_checks};
use crate::engine::RuleRunSettings;
use crate::engine::emit::DiagnosticEmitter;

/// Decides whether single array accesses are out of bounds.
pub struct BoundsEvaluator<'a> {
    ctx: CheckContext<'a>,
    settings: &'a RuleRunSettings,
}

impl<'a> BoundsEvaluator<'a> {
    pub fn new(ir: &'a dyn FunctionIr, settings: &'a RuleRunSettings) -> Self {
        Self {
            ctx: CheckContext::new(ir, settings.max_chain_hops),
            settings,
        }
    }

    /// One verdict per enabled check that applies to the index form, or a
    /// single skip when no check can run. Empty when every applicable check
    /// is set to `allow`.
    pub fn classify(&self, access: &ArrayAccess) -> Vec<Verdict> {
        let Some(domain) = self.ctx.ir.array_domain(access.array_type).interval() else {
            return vec![self.skip(access, SkipReason::DomainUnknown)];
        };

        let applicable = registered_checks()
            .into_iter()
            .filter(|check| check.applies_to(&access.index))
            .collect::<Vec<_>>();
        if applicable.is_empty() {
            return vec![self.skip(access, SkipReason::UnsupportedIndex)];
        }

        applicable
            .into_iter()
            .filter(|check| self.settings.level_for(check.kind()) != RuleLevel::Allow)
            .map(|check| {
                let verdict = check.check(&self.ctx, access, domain);
                self.trace_verdict(access, &verdict);
                verdict
            })
            .collect()
    }

    pub fn evaluate(&self, access: &ArrayAccess) -> Vec<Diagnostic> {
        self.diagnostics_for(&self.classify(access))
    }

    pub(crate) fn diagnostics_for(&self, verdicts: &[Verdict]) -> Vec<Diagnostic> {
        let emitter = DiagnosticEmitter::new(self.ctx.ir.function_name());
        verdicts
            .iter()
            .filter_map(|verdict| match verdict {
                Verdict::Flagged(finding) => {
                    let severity = self.settings.level_for(finding.kind).severity()?;
                    Some(emitter.emit(finding, severity))
                }
                Verdict::InBounds(_) | Verdict::Skipped(_) => None,
            })
            .collect()
    }

    fn skip(&self, access: &ArrayAccess, reason: SkipReason) -> Verdict {
        let verdict = Verdict::Skipped(reason);
        self.trace_verdict(access, &verdict);
        verdict
    }

    fn trace_verdict(&self, access: &ArrayAccess, verdict: &Verdict) {
        let function = self.ctx.ir.function_name();
        match verdict {
            Verdict::Flagged(finding) => debug!(
                function,
                location = %access.location,
                rule_id = finding.kind.rule_id(),
                "array access out of bounds"
            ),
            Verdict::Skipped(reason) => debug!(
                function,
                location = %access.location,
                reason = reason.as_str(),
                "array access skipped"
            ),
            Verdict::InBounds(_) => {}
        }
    }
}
