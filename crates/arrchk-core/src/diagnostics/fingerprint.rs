use crate::diagnostics::types::Diagnostic;
use crate::model::Span;

const FINGERPRINT_VERSION: &str = "v1";

pub fn normalize_file_path(file: &str) -> String {
    file.replace('\\', "/").trim_start_matches("./").to_string()
}

pub fn message_hash(message: &str) -> String {
    blake3::hash(message.as_bytes()).to_hex().to_string()
}

pub fn location_fingerprint(function: &str, location: &Span, rule_id: &str) -> String {
    let normalized = normalize_file_path(&location.file);
    let payload = format!(
        "{FINGERPRINT_VERSION}|{normalized}|{}|{}|{function}|{rule_id}",
        location.line, location.col
    );
    blake3::hash(payload.as_bytes()).to_hex().to_string()
}

pub fn diagnostic_fingerprint(diagnostic: &Diagnostic) -> String {
    location_fingerprint(
        &diagnostic.function,
        &diagnostic.location,
        &diagnostic.rule_id,
    )
}
