use std::fmt::Write;

use arrchk_core::diagnostics::{Diagnostic, Severity};
use arrchk_rules::AccessStats;

/// Renders diagnostics in the order given, followed by a summary line.
pub fn render_diagnostics(diagnostics: &[Diagnostic]) -> String {
    let mut output = String::new();
    if diagnostics.is_empty() {
        let _ = writeln!(output, "No diagnostics.");
        return output;
    }

    for diagnostic in diagnostics {
        let _ = writeln!(
            output,
            "{}[{}]: {}",
            diagnostic.severity, diagnostic.rule_id, diagnostic.message
        );
        let _ = writeln!(output, "  --> {}", diagnostic.location);
        let _ = writeln!(output, "   = in function `{}`", diagnostic.function);
        for note in &diagnostic.notes {
            let _ = writeln!(output, "   = note: {note}");
        }
        let _ = writeln!(output);
    }

    let errors = diagnostics
        .iter()
        .filter(|diagnostic| diagnostic.severity == Severity::Error)
        .count();
    let warnings = diagnostics.len().saturating_sub(errors);
    let _ = writeln!(
        output,
        "diagnostics={} errors={errors} warnings={warnings}",
        diagnostics.len()
    );
    output
}

pub fn render_stats(stats: &AccessStats) -> String {
    format!(
        "accesses={} flagged={} in_bounds={} domain_unknown={} index_unresolved={} range_unknown={} unsupported_index={}",
        stats.accesses,
        stats.flagged,
        stats.in_bounds,
        stats.domain_unknown,
        stats.index_unresolved,
        stats.range_unknown,
        stats.unsupported_index
    )
}
