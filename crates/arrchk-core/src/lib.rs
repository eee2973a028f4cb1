#![forbid(unsafe_code)]

pub mod config;
pub mod diagnostics;
pub mod lints;
pub mod model;
pub mod oracle;
