use crate::config::RuleLevel;
use crate::diagnostics::OobKind;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LintDocs {
    pub summary: &'static str,
    pub what_it_does: &'static str,
    pub known_limitations: &'static str,
    pub how_to_fix: &'static str,
}

impl LintDocs {
    pub const fn has_required_fields(self) -> bool {
        !self.summary.is_empty()
            && !self.what_it_does.is_empty()
            && !self.known_limitations.is_empty()
            && !self.how_to_fix.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LintSpec {
    pub id: &'static str,
    pub kind: OobKind,
    pub default_level: RuleLevel,
    pub docs: LintDocs,
}
