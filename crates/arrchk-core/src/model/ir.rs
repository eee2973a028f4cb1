use std::collections::BTreeMap;
use std::slice;

use serde::{Deserialize, Serialize};

use crate::model::{ArrayDomain, DefinitionKind, Span, SsaDefinition, SsaId, TypeId, ValueRange};

/// Expression node of a lowered statement.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    ArrayAccess(ArrayAccess),
    Constant {
        value: i64,
    },
    SsaRef {
        value: SsaId,
    },
    /// Named storage that is not in SSA form (globals, address-taken locals).
    Variable {
        name: String,
    },
    Other {
        #[serde(default)]
        operands: Vec<Expr>,
    },
}

impl Expr {
    pub fn constant(value: i64) -> Self {
        Self::Constant { value }
    }

    pub fn ssa(value: SsaId) -> Self {
        Self::SsaRef { value }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable { name: name.into() }
    }

    pub fn other(operands: Vec<Expr>) -> Self {
        Self::Other { operands }
    }

    /// Direct sub-expressions in operand order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = &Expr> {
        let (head, tail): (&[Expr], &[Expr]) = match self {
            Self::ArrayAccess(access) => (
                slice::from_ref(access.array.as_ref()),
                slice::from_ref(access.index.as_ref()),
            ),
            Self::Other { operands } => (operands.as_slice(), &[]),
            Self::Constant { .. } | Self::SsaRef { .. } | Self::Variable { .. } => (&[], &[]),
        };
        head.iter().chain(tail)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ArrayAccess {
    pub array: Box<Expr>,
    /// Type of the array operand; the domain oracle is keyed by it.
    pub array_type: TypeId,
    pub index: Box<Expr>,
    pub location: Span,
}

impl ArrayAccess {
    pub fn new(array: Expr, array_type: TypeId, index: Expr, location: Span) -> Self {
        Self {
            array: Box::new(array),
            array_type,
            index: Box::new(index),
            location,
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    #[serde(default)]
    pub location: Span,
    #[serde(default)]
    pub operands: Vec<Expr>,
}

impl Statement {
    pub fn new(location: Span, operands: Vec<Expr>) -> Self {
        Self { location, operands }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BasicBlock {
    pub id: u32,
    #[serde(default)]
    pub statements: Vec<Statement>,
}

/// One function lowered to CFG + SSA form, together with the upstream
/// tables the analysis queries: SSA definitions, value ranges and array
/// domains.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionBody {
    pub name: String,
    pub blocks: Vec<BasicBlock>,
    pub definitions: BTreeMap<SsaId, SsaDefinition>,
    pub ranges: BTreeMap<SsaId, ValueRange>,
    pub array_types: BTreeMap<TypeId, ArrayDomain>,
}

impl FunctionBody {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn define(&mut self, value: SsaId, kind: DefinitionKind) -> &mut Self {
        self.definitions.insert(value, SsaDefinition::new(kind));
        self
    }

    pub fn with_range(&mut self, value: SsaId, range: ValueRange) -> &mut Self {
        self.ranges.insert(value, range);
        self
    }

    pub fn with_array_type(&mut self, ty: TypeId, domain: ArrayDomain) -> &mut Self {
        self.array_types.insert(ty, domain);
        self
    }

    pub fn push_block(&mut self, statements: Vec<Statement>) -> &mut Self {
        let id = u32::try_from(self.blocks.len()).unwrap_or(u32::MAX);
        self.blocks.push(BasicBlock { id, statements });
        self
    }

    /// Number of array-access nodes, nested ones included.
    pub fn array_access_count(&self) -> usize {
        let mut stack = self
            .blocks
            .iter()
            .flat_map(|block| &block.statements)
            .flat_map(|statement| &statement.operands)
            .collect::<Vec<_>>();
        let mut count = 0usize;
        while let Some(expr) = stack.pop() {
            if matches!(expr, Expr::ArrayAccess(_)) {
                count += 1;
            }
            stack.extend(expr.children());
        }
        count
    }
}

/// A translation unit worth of function bodies.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleIr {
    pub functions: Vec<FunctionBody>,
}

impl ModuleIr {
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}
