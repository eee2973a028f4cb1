use crate::config::RuleLevel;
use crate::diagnostics::OobKind;

pub mod types;

pub use types::{LintDocs, LintSpec};

const ALL_LINT_SPECS: &[LintSpec] = &[
    LintSpec {
        id: "ARR001",
        kind: OobKind::ConstantIndexOob,
        default_level: RuleLevel::Deny,
        docs: LintDocs {
            summary: "Literal array index outside the declared bounds.",
            what_it_does: "Compares every integer-literal index against the domain of the indexed array type.",
            known_limitations: "Arrays whose size is not known statically are never checked.",
            how_to_fix: "Use an index inside the declared range or enlarge the array.",
        },
    },
    LintSpec {
        id: "ARR002",
        kind: OobKind::RangeBasedOob,
        default_level: RuleLevel::Warn,
        docs: LintDocs {
            summary: "Index value range provably outside the declared bounds.",
            what_it_does: "Folds `index = base +/- constant` definitions back to a chain root, shifts the root's value range by the folded offset and reports accesses whose whole range misses the array domain.",
            known_limitations: "Only reports when every possible index value is out of bounds; partially overlapping ranges, phi merges and non-additive arithmetic are not reported.",
            how_to_fix: "Check the offset arithmetic feeding the index and the loop bounds that define the root value.",
        },
    },
];

pub fn all_lints() -> &'static [LintSpec] {
    ALL_LINT_SPECS
}

pub fn find_lint(rule_id: &str) -> Option<&'static LintSpec> {
    let canonical = normalize_lint_id(rule_id);
    ALL_LINT_SPECS.iter().find(|lint| lint.id == canonical)
}

pub fn lint_for_kind(kind: OobKind) -> &'static LintSpec {
    match kind {
        OobKind::ConstantIndexOob => &ALL_LINT_SPECS[0],
        OobKind::RangeBasedOob => &ALL_LINT_SPECS[1],
    }
}

pub fn normalize_lint_id(rule_id: &str) -> String {
    rule_id.trim().to_ascii_uppercase()
}
