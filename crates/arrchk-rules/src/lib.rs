#![forbid(unsafe_code)]

pub mod bounds;
pub mod engine;

pub use engine::{
    AccessStats, FunctionReport, RuleRunSettings, analyze_function, analyze_function_report,
    analyze_functions, analyze_into_sink,
};
