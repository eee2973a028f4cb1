//! Interfaces to the collaborators the analysis consumes.
//!
//! The analysis only reads through these traits. `FunctionBody` implements
//! all of them from its own tables and serves as the reference host
//! representation; compiler integrations implement them over their own IR.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::diagnostics::Diagnostic;
use crate::model::{
    ArrayDomain, BasicBlock, DefinitionKind, FunctionBody, SsaId, TypeId, ValueRange,
};

pub trait CfgSource {
    fn function_name(&self) -> &str;
    fn basic_blocks(&self) -> &[BasicBlock];
}

pub trait DomainOracle {
    /// Domain of the array type `ty`; unknown for non-array or unsized types.
    fn array_domain(&self, ty: TypeId) -> ArrayDomain;
}

pub trait DefinitionOracle {
    /// Definition of `value`; values without a record are opaque.
    fn definition(&self, value: SsaId) -> DefinitionKind;

    fn value_name(&self, _value: SsaId) -> Option<&str> {
        None
    }
}

pub trait RangeOracle {
    fn value_range(&self, value: SsaId) -> ValueRange;
}

/// Everything the analysis needs to know about one function.
pub trait FunctionIr: CfgSource + DomainOracle + DefinitionOracle + RangeOracle {}

impl<T> FunctionIr for T where T: CfgSource + DomainOracle + DefinitionOracle + RangeOracle + ?Sized {}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SinkError {
    pub message: String,
}

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for SinkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "diagnostic sink rejected diagnostic: {}", self.message)
    }
}

impl Error for SinkError {}

/// Receiver of finished diagnostics (reporting, IDE bridge, test collector).
pub trait DiagnosticSink {
    fn accept(&mut self, diagnostic: Diagnostic) -> Result<(), SinkError>;
}

/// Sink that keeps every diagnostic in arrival order.
#[derive(Clone, Debug, Default)]
pub struct CollectingSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink for CollectingSink {
    fn accept(&mut self, diagnostic: Diagnostic) -> Result<(), SinkError> {
        self.diagnostics.push(diagnostic);
        Ok(())
    }
}

impl CfgSource for FunctionBody {
    fn function_name(&self) -> &str {
        &self.name
    }

    fn basic_blocks(&self) -> &[BasicBlock] {
        &self.blocks
    }
}

impl DomainOracle for FunctionBody {
    fn array_domain(&self, ty: TypeId) -> ArrayDomain {
        self.array_types
            .get(&ty)
            .copied()
            .unwrap_or_else(ArrayDomain::unknown)
    }
}

impl DefinitionOracle for FunctionBody {
    fn definition(&self, value: SsaId) -> DefinitionKind {
        self.definitions
            .get(&value)
            .map_or(DefinitionKind::Opaque, |definition| definition.kind)
    }

    fn value_name(&self, value: SsaId) -> Option<&str> {
        self.definitions
            .get(&value)
            .and_then(|definition| definition.name.as_deref())
    }
}

impl RangeOracle for FunctionBody {
    fn value_range(&self, value: SsaId) -> ValueRange {
        self.ranges
            .get(&value)
            .copied()
            .unwrap_or_else(ValueRange::unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::{DefinitionOracle, DomainOracle, RangeOracle};
    use crate::model::{
        ArrayDomain, DefinitionKind, FunctionBody, SsaDefinition, SsaId, TypeId, ValueRange,
    };

    #[test]
    fn missing_records_degrade_to_unknown() {
        let body = FunctionBody::new("f");
        assert_eq!(body.array_domain(TypeId(3)), ArrayDomain::unknown());
        assert_eq!(body.definition(SsaId(1)), DefinitionKind::Opaque);
        assert_eq!(body.value_range(SsaId(1)), ValueRange::unknown());
        assert_eq!(body.value_name(SsaId(1)), None);
    }

    #[test]
    fn recorded_tables_are_served() {
        let mut body = FunctionBody::new("f");
        body.with_array_type(TypeId(0), ArrayDomain::new(0, 9))
            .with_range(SsaId(1), ValueRange::new(2, 4));
        body.definitions.insert(
            SsaId(1),
            SsaDefinition::named("i", DefinitionKind::Literal { value: 3 }),
        );

        assert_eq!(body.array_domain(TypeId(0)), ArrayDomain::new(0, 9));
        assert_eq!(body.value_range(SsaId(1)), ValueRange::new(2, 4));
        assert_eq!(
            body.definition(SsaId(1)),
            DefinitionKind::Literal { value: 3 }
        );
        assert_eq!(body.value_name(SsaId(1)), Some("i"));
    }
}
