use arrchk_core::diagnostics::OobKind;
use arrchk_core::model::{ArrayAccess, DefinitionKind, Expr, Interval, SsaId};

use crate::bounds::combiner::{disjoint, shift};
use crate::bounds::resolver::{ChainResolution, OffsetChainResolver, UnresolvedReason};
use crate::bounds::{CheckContext, Evidence, Finding, IndexCheck, SkipReason, Verdict};

/// Conservative check for SSA indices: folds the index back to a chain
/// root and reports only when the whole shifted root range misses the
/// domain.
pub struct RangeIndexCheck;

impl IndexCheck for RangeIndexCheck {
    fn kind(&self) -> OobKind {
        OobKind::RangeBasedOob
    }

    fn applies_to(&self, index: &Expr) -> bool {
        matches!(index, Expr::SsaRef { .. })
    }

    fn check(&self, ctx: &CheckContext<'_>, access: &ArrayAccess, domain: Interval) -> Verdict {
        let Expr::SsaRef { value: index } = access.index.as_ref() else {
            return Verdict::Skipped(SkipReason::UnsupportedIndex);
        };

        let resolver = OffsetChainResolver::with_max_hops(ctx.ir, ctx.max_chain_hops);
        let chain = match resolver.resolve(*index) {
            ChainResolution::Resolved(chain) => chain,
            ChainResolution::Unresolved(reason) => {
                return Verdict::Skipped(SkipReason::IndexUnresolved(reason));
            }
        };

        let Some(root_range) = root_range(ctx, chain.root) else {
            return Verdict::Skipped(SkipReason::RangeUnknown);
        };
        let Some(shifted) = shift(root_range, chain.offset) else {
            return Verdict::Skipped(SkipReason::IndexUnresolved(UnresolvedReason::Overflow));
        };
        if !disjoint(shifted, domain) {
            return Verdict::InBounds(self.kind());
        }

        Verdict::Flagged(Finding {
            kind: self.kind(),
            location: access.location.clone(),
            domain,
            evidence: Evidence::Range {
                index: *index,
                index_name: ctx.describe_value(*index),
                root: chain.root,
                root_name: ctx.describe_value(chain.root),
                root_range,
                offset: chain.offset,
                hops: chain.hops,
                shifted,
            },
        })
    }
}

/// Literal roots are their own singleton range; anything else asks the
/// range oracle.
fn root_range(ctx: &CheckContext<'_>, root: SsaId) -> Option<Interval> {
    match ctx.ir.definition(root) {
        DefinitionKind::Literal { value } => Some(Interval::singleton(i128::from(value))),
        DefinitionKind::AdditiveCombination { .. } | DefinitionKind::Opaque => {
            ctx.ir.value_range(root).interval()
        }
    }
}
