use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::model::Span;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which check produced a diagnostic.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OobKind {
    /// Literal index outside the domain; exact.
    ConstantIndexOob,
    /// Shifted value range disjoint from the domain; conservative.
    RangeBasedOob,
}

impl OobKind {
    pub const fn rule_id(self) -> &'static str {
        match self {
            Self::ConstantIndexOob => "ARR001",
            Self::RangeBasedOob => "ARR002",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConstantIndexOob => "constant_index_oob",
            Self::RangeBasedOob => "range_based_oob",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub rule_id: String,
    pub kind: OobKind,
    pub severity: Severity,
    pub function: String,
    pub message: String,
    pub location: Span,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(
        kind: OobKind,
        severity: Severity,
        function: impl Into<String>,
        location: Span,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: kind.rule_id().to_string(),
            kind,
            severity,
            function: function.into(),
            message: message.into(),
            location,
            notes: Vec::new(),
        }
    }

    pub fn note(mut self, message: impl Into<String>) -> Self {
        self.notes.push(message.into());
        self
    }
}
