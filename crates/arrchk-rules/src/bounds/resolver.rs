use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use arrchk_core::config::DEFAULT_MAX_CHAIN_HOPS;
use arrchk_core::model::{DefinitionKind, SsaId};
use arrchk_core::oracle::DefinitionOracle;
use tracing::trace;

/// Why an index chain could not be folded to a root.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum UnresolvedReason {
    /// A definition that is not `Literal` or `AdditiveCombination`.
    Opaque,
    /// The chain reached a value it had already folded.
    Cycle,
    HopLimit,
    /// The accumulated offset left the `i128` range.
    Overflow,
}

impl UnresolvedReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Opaque => "opaque",
            Self::Cycle => "cycle",
            Self::HopLimit => "hop_limit",
            Self::Overflow => "overflow",
        }
    }
}

impl Display for UnresolvedReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChainRoot {
    pub root: SsaId,
    /// Sum of every folded `delta`; `index = root + offset`.
    pub offset: i128,
    pub hops: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChainResolution {
    Resolved(ChainRoot),
    Unresolved(UnresolvedReason),
}

/// Folds `value = base + delta` definitions backward from an index value.
pub struct OffsetChainResolver<'a, D: DefinitionOracle + ?Sized> {
    definitions: &'a D,
    max_hops: usize,
}

impl<'a, D: DefinitionOracle + ?Sized> OffsetChainResolver<'a, D> {
    pub fn new(definitions: &'a D) -> Self {
        Self::with_max_hops(definitions, DEFAULT_MAX_CHAIN_HOPS)
    }

    pub fn with_max_hops(definitions: &'a D, max_hops: usize) -> Self {
        Self {
            definitions,
            max_hops,
        }
    }

    pub fn resolve(&self, start: SsaId) -> ChainResolution {
        let mut visited = BTreeSet::<SsaId>::new();
        let mut current = start;
        let mut offset = 0i128;
        let mut hops = 0usize;

        loop {
            match self.definitions.definition(current) {
                DefinitionKind::Literal { .. } => {
                    return ChainResolution::Resolved(ChainRoot {
                        root: current,
                        offset,
                        hops,
                    });
                }
                DefinitionKind::Opaque => {
                    return self.stop(start, current, UnresolvedReason::Opaque);
                }
                DefinitionKind::AdditiveCombination {
                    base,
                    delta,
                    base_unresolved_further,
                } => {
                    visited.insert(current);
                    if visited.contains(&base) {
                        return self.stop(start, current, UnresolvedReason::Cycle);
                    }
                    if hops >= self.max_hops {
                        return self.stop(start, current, UnresolvedReason::HopLimit);
                    }
                    let Some(next_offset) = offset.checked_add(i128::from(delta)) else {
                        return self.stop(start, current, UnresolvedReason::Overflow);
                    };
                    offset = next_offset;
                    hops += 1;

                    if base_unresolved_further {
                        return ChainResolution::Resolved(ChainRoot {
                            root: base,
                            offset,
                            hops,
                        });
                    }
                    current = base;
                }
            }
        }
    }

    fn stop(&self, start: SsaId, at: SsaId, reason: UnresolvedReason) -> ChainResolution {
        trace!(
            start = %start,
            at = %at,
            reason = reason.as_str(),
            max_hops = self.max_hops,
            "index chain left unresolved"
        );
        ChainResolution::Unresolved(reason)
    }
}
