use arrchk_core::diagnostics::OobKind;
use arrchk_core::model::{ArrayAccess, Expr, Interval};

use crate::bounds::{CheckContext, Evidence, Finding, IndexCheck, SkipReason, Verdict};

/// Exact check for integer-literal indices.
pub struct ConstantIndexCheck;

impl IndexCheck for ConstantIndexCheck {
    fn kind(&self) -> OobKind {
        OobKind::ConstantIndexOob
    }

    fn applies_to(&self, index: &Expr) -> bool {
        matches!(index, Expr::Constant { .. })
    }

    fn check(&self, _ctx: &CheckContext<'_>, access: &ArrayAccess, domain: Interval) -> Verdict {
        let Expr::Constant { value } = access.index.as_ref() else {
            return Verdict::Skipped(SkipReason::UnsupportedIndex);
        };
        if domain.contains(i128::from(*value)) {
            return Verdict::InBounds(self.kind());
        }
        Verdict::Flagged(Finding {
            kind: self.kind(),
            location: access.location.clone(),
            domain,
            evidence: Evidence::Constant { index: *value },
        })
    }
}
