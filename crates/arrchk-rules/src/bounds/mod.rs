//! Index bounds checks.
//!
//! Each [`IndexCheck`] decides one [`OobKind`] for a single access. The
//! [`BoundsEvaluator`] runs every enabled check that applies to the index
//! form and unions their verdicts; checks never see each other's results.

pub mod combiner;
pub mod constant_index;
pub mod evaluator;
pub mod range_index;
pub mod resolver;

use arrchk_core::diagnostics::OobKind;
use arrchk_core::model::{ArrayAccess, Expr, Interval, Span, SsaId};
use arrchk_core::oracle::FunctionIr;

pub use constant_index::ConstantIndexCheck;
pub use evaluator::BoundsEvaluator;
pub use range_index::RangeIndexCheck;
pub use resolver::{ChainResolution, ChainRoot, OffsetChainResolver, UnresolvedReason};

/// Read-only inputs shared by every check for one function.
#[derive(Clone, Copy)]
pub struct CheckContext<'a> {
    pub ir: &'a dyn FunctionIr,
    pub max_chain_hops: usize,
}

impl<'a> CheckContext<'a> {
    pub fn new(ir: &'a dyn FunctionIr, max_chain_hops: usize) -> Self {
        Self { ir, max_chain_hops }
    }

    /// Source-level name of `value` when the host knows one.
    pub fn describe_value(&self, value: SsaId) -> String {
        self.ir
            .value_name(value)
            .map_or_else(|| value.to_string(), str::to_string)
    }
}

pub trait IndexCheck: Sync {
    fn kind(&self) -> OobKind;
    fn applies_to(&self, index: &Expr) -> bool;
    fn check(&self, ctx: &CheckContext<'_>, access: &ArrayAccess, domain: Interval) -> Verdict;
}

pub fn registered_checks() -> [&'static dyn IndexCheck; 2] {
    [&ConstantIndexCheck, &RangeIndexCheck]
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SkipReason {
    DomainUnknown,
    IndexUnresolved(UnresolvedReason),
    RangeUnknown,
    UnsupportedIndex,
}

impl SkipReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DomainUnknown => "domain_unknown",
            Self::IndexUnresolved(_) => "index_unresolved",
            Self::RangeUnknown => "range_unknown",
            Self::UnsupportedIndex => "unsupported_index",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Evidence {
    Constant {
        index: i64,
    },
    Range {
        index: SsaId,
        index_name: String,
        root: SsaId,
        root_name: String,
        root_range: Interval,
        offset: i128,
        hops: usize,
        shifted: Interval,
    },
}

/// An access proven out of bounds, before it is turned into a diagnostic.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Finding {
    pub kind: OobKind,
    pub location: Span,
    pub domain: Interval,
    pub evidence: Evidence,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Verdict {
    Flagged(Finding),
    InBounds(OobKind),
    Skipped(SkipReason),
}
