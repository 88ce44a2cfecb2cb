//! The IR Emitter: builds the switch-based program for a decision tree
//! (`ir`), renders it textually for debugging (`text`), and lowers it into
//! callable closures (`compile`). `generator` selects which subtree depth and
//! SIMD backend a given compiled module uses.
pub mod compile;
pub mod error;
pub mod generator;
pub mod ir;
pub mod text;

pub use compile::{compile_program, CompiledEvaluator};
pub use error::{Error, Result};
pub use generator::Generator;
pub use ir::{build_program, verify_switch, Switch};
