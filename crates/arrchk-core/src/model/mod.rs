pub mod domain;
pub mod ir;
pub mod span;
pub mod ssa;

pub use domain::*;
pub use ir::*;
pub use span::*;
pub use ssa::*;
