#![allow(dead_code)]

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use arrchk_core::diagnostics::{Diagnostic, diagnostic_fingerprint};
use arrchk_core::model::{
    ArrayAccess, ArrayDomain, DefinitionKind, Expr, FunctionBody, ModuleIr, Span, SsaDefinition,
    SsaId, Statement, TypeId, ValueRange,
};

pub const ARRAY: TypeId = TypeId(0);

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures/ir")
        .join(name)
}

pub fn load_fixture(name: &str) -> ModuleIr {
    let source = fs::read_to_string(fixture_path(name)).expect("fixture must load");
    ModuleIr::from_json_str(&source).expect("fixture must deserialize")
}

pub fn access(array_type: TypeId, index: Expr, line: u32) -> Expr {
    Expr::ArrayAccess(ArrayAccess::new(
        Expr::variable("a"),
        array_type,
        index,
        Span::new("src/main.c", line, 1),
    ))
}

/// `base + delta`, folding further through `base`.
pub fn additive(base: u32, delta: i64) -> DefinitionKind {
    DefinitionKind::AdditiveCombination {
        base: SsaId(base),
        delta,
        base_unresolved_further: false,
    }
}

/// `base + delta` with `base` as the chain root.
pub fn rooted(base: u32, delta: i64) -> DefinitionKind {
    DefinitionKind::AdditiveCombination {
        base: SsaId(base),
        delta,
        base_unresolved_further: true,
    }
}

/// One function, one block, one statement per operand, domain `domain`
/// registered under [`ARRAY`].
pub fn function(domain: ArrayDomain, operands: Vec<Expr>) -> FunctionBody {
    let mut body = FunctionBody::new("main");
    body.with_array_type(ARRAY, domain);
    let statements = operands
        .into_iter()
        .map(|operand| Statement::new(Span::new("src/main.c", 1, 1), vec![operand]))
        .collect();
    body.push_block(statements);
    body
}

pub fn name(body: &mut FunctionBody, value: u32, name: &str, kind: DefinitionKind) {
    body.definitions
        .insert(SsaId(value), SsaDefinition::named(name, kind));
}

pub fn range(body: &mut FunctionBody, value: u32, lower: i64, upper: i64) {
    body.with_range(SsaId(value), ValueRange::new(lower, upper));
}

pub fn fingerprints(diagnostics: &[Diagnostic]) -> BTreeSet<String> {
    diagnostics.iter().map(diagnostic_fingerprint).collect()
}

pub fn rule_ids(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics
        .iter()
        .map(|diagnostic| diagnostic.rule_id.as_str())
        .collect()
}
