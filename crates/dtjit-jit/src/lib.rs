//! Object cache and JIT wrapper: submits emitted programs to a disk cache
//! keyed by tree/generator configuration, and lowers them into callable
//! evaluators.
pub mod cache;
pub mod error;
pub mod jit;

pub use cache::{CacheKey, FileObjectCache};
pub use error::{Error, Result};
pub use jit::Jit;
