use arrchk_core::diagnostics::{Diagnostic, diagnostic_fingerprint, diagnostic_sort_key};
use serde::Serialize;

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    #[serde(flatten)]
    diagnostic: &'a Diagnostic,
    fingerprint: String,
}

pub fn render_diagnostics(diagnostics: &[Diagnostic]) -> Result<String, serde_json::Error> {
    let mut sorted = diagnostics.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|diagnostic| diagnostic_sort_key(diagnostic));
    let entries = sorted
        .into_iter()
        .map(|diagnostic| JsonDiagnostic {
            diagnostic,
            fingerprint: diagnostic_fingerprint(diagnostic),
        })
        .collect::<Vec<_>>();
    serde_json::to_string_pretty(&entries)
}
