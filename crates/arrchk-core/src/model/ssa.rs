use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Identifier of one versioned SSA value.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SsaId(pub u32);

impl Display for SsaId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// Identifier of a type in the function's type table.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(pub u32);

impl Display for TypeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "type#{}", self.0)
    }
}

/// How an SSA value is defined, as far as offset folding is concerned.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DefinitionKind {
    Literal {
        value: i64,
    },
    /// `value = base + delta`; subtraction is a negative `delta`.
    ///
    /// `base_unresolved_further` marks `base` as a chain root: its range is
    /// authoritative and its own definition is not folded.
    AdditiveCombination {
        base: SsaId,
        delta: i64,
        #[serde(default)]
        base_unresolved_further: bool,
    },
    /// Phi merges, parameters, loads, non-additive arithmetic.
    Opaque,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SsaDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub kind: DefinitionKind,
}

impl SsaDefinition {
    pub fn new(kind: DefinitionKind) -> Self {
        Self { name: None, kind }
    }

    pub fn named(name: impl Into<String>, kind: DefinitionKind) -> Self {
        Self {
            name: Some(name.into()),
            kind,
        }
    }
}
