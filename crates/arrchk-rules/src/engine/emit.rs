use arrchk_core::diagnostics::{Diagnostic, Severity};
use arrchk_core::oracle::DiagnosticSink;
use tracing::warn;

use crate::bounds::{Evidence, Finding};

/// Turns findings into located diagnostics for one function.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticEmitter<'a> {
    function: &'a str,
}

impl<'a> DiagnosticEmitter<'a> {
    pub fn new(function: &'a str) -> Self {
        Self { function }
    }

    pub fn emit(&self, finding: &Finding, severity: Severity) -> Diagnostic {
        match &finding.evidence {
            Evidence::Constant { index } => Diagnostic::new(
                finding.kind,
                severity,
                self.function,
                finding.location.clone(),
                format!(
                    "out-of-bounds array access (index {index}, valid range {})",
                    finding.domain
                ),
            ),
            Evidence::Range {
                index_name,
                root_name,
                root_range,
                offset,
                hops,
                shifted,
                ..
            } => {
                let mut diagnostic = Diagnostic::new(
                    finding.kind,
                    severity,
                    self.function,
                    finding.location.clone(),
                    format!(
                        "out-of-bounds array access (index `{index_name}` in {shifted}, valid range {})",
                        finding.domain
                    ),
                );
                if *hops > 0 {
                    diagnostic = diagnostic.note(format!(
                        "`{index_name}` is `{root_name}` {} across {hops} additive definition{}",
                        signed_offset(*offset),
                        if *hops == 1 { "" } else { "s" }
                    ));
                }
                diagnostic.note(format!("`{root_name}` has range {root_range}"))
            }
        }
    }
}

/// Hands every diagnostic to `sink` and returns how many it rejected.
pub fn forward<'d>(
    diagnostics: impl IntoIterator<Item = &'d Diagnostic>,
    sink: &mut dyn DiagnosticSink,
) -> usize {
    let mut failures = 0usize;
    for diagnostic in diagnostics {
        if let Err(err) = sink.accept(diagnostic.clone()) {
            failures += 1;
            warn!(
                rule_id = %diagnostic.rule_id,
                function = %diagnostic.function,
                location = %diagnostic.location,
                error = %err,
                "diagnostic sink failed"
            );
        }
    }
    failures
}

fn signed_offset(offset: i128) -> String {
    if offset < 0 {
        format!("- {}", offset.unsigned_abs())
    } else {
        format!("+ {offset}")
    }
}

#[cfg(test)]
mod tests {
    use arrchk_core::diagnostics::{Diagnostic, OobKind, Severity};
    use arrchk_core::model::{Interval, Span, SsaId};
    use arrchk_core::oracle::{CollectingSink, DiagnosticSink, SinkError};

    use super::{DiagnosticEmitter, forward};
    use crate::bounds::{Evidence, Finding};

    fn interval(min: i128, max: i128) -> Interval {
        Interval::new(min, max).expect("ordered")
    }

    #[test]
    fn constant_findings_name_the_index_and_range() {
        let finding = Finding {
            kind: OobKind::ConstantIndexOob,
            location: Span::new("src/a.c", 4, 9),
            domain: interval(0, 9),
            evidence: Evidence::Constant { index: 10 },
        };
        let diagnostic = DiagnosticEmitter::new("main").emit(&finding, Severity::Error);

        assert_eq!(diagnostic.rule_id, "ARR001");
        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(diagnostic.function, "main");
        assert_eq!(diagnostic.location, Span::new("src/a.c", 4, 9));
        assert_eq!(
            diagnostic.message,
            "out-of-bounds array access (index 10, valid range [0, 9])"
        );
        assert!(diagnostic.notes.is_empty());
    }

    #[test]
    fn range_findings_explain_the_chain() {
        let finding = Finding {
            kind: OobKind::RangeBasedOob,
            location: Span::new("src/a.c", 7, 2),
            domain: interval(0, 9),
            evidence: Evidence::Range {
                index: SsaId(4),
                index_name: "k".to_string(),
                root: SsaId(1),
                root_name: "i".to_string(),
                root_range: interval(20, 30),
                offset: -6,
                hops: 2,
                shifted: interval(14, 24),
            },
        };
        let diagnostic = DiagnosticEmitter::new("copy").emit(&finding, Severity::Warning);

        assert_eq!(diagnostic.rule_id, "ARR002");
        assert_eq!(
            diagnostic.message,
            "out-of-bounds array access (index `k` in [14, 24], valid range [0, 9])"
        );
        assert_eq!(
            diagnostic.notes,
            vec![
                "`k` is `i` - 6 across 2 additive definitions".to_string(),
                "`i` has range [20, 30]".to_string(),
            ]
        );
    }

    struct RejectingSink {
        accepted: usize,
    }

    impl DiagnosticSink for RejectingSink {
        fn accept(&mut self, diagnostic: Diagnostic) -> Result<(), SinkError> {
            if diagnostic.rule_id == "ARR002" {
                return Err(SinkError::new("sink closed"));
            }
            self.accepted += 1;
            Ok(())
        }
    }

    fn sample(kind: OobKind) -> Diagnostic {
        Diagnostic::new(kind, Severity::Warning, "f", Span::new("a.c", 1, 1), "m")
    }

    #[test]
    fn forward_counts_failures_and_keeps_going() {
        let diagnostics = vec![
            sample(OobKind::RangeBasedOob),
            sample(OobKind::ConstantIndexOob),
            sample(OobKind::RangeBasedOob),
            sample(OobKind::ConstantIndexOob),
        ];
        let mut sink = RejectingSink { accepted: 0 };

        assert_eq!(forward(&diagnostics, &mut sink), 2);
        assert_eq!(sink.accepted, 2);
    }

    #[test]
    fn forward_preserves_order() {
        let diagnostics = vec![
            sample(OobKind::RangeBasedOob),
            sample(OobKind::ConstantIndexOob),
        ];
        let mut sink = CollectingSink::default();
        assert_eq!(forward(&diagnostics, &mut sink), 0);
        assert_eq!(sink.diagnostics, diagnostics);
    }
}
