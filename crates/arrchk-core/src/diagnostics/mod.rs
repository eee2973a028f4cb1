pub mod fingerprint;
pub mod types;

pub use fingerprint::{
    diagnostic_fingerprint, location_fingerprint, message_hash, normalize_file_path,
};
pub use types::{Diagnostic, OobKind, Severity};

pub fn diagnostic_sort_key(diagnostic: &Diagnostic) -> (String, u32, u32, String, String) {
    (
        normalize_file_path(&diagnostic.location.file),
        diagnostic.location.line,
        diagnostic.location.col,
        diagnostic.rule_id.clone(),
        message_hash(&diagnostic.message),
    )
}

pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by_key(diagnostic_sort_key);
}
