//! The JIT: submits an emitted program to the object cache and lowers it to
//! callable evaluators. Module submission is guarded by a `Mutex` field
//! rather than process-wide static state, so that multiple `Jit`s in one
//! process each serialize only their own compilations.
use std::collections::HashMap;
use std::sync::Mutex;

use dtjit_codegen::{CompiledEvaluator, Generator};
use dtjit_simd::Backend;
use dtjit_tree::DecisionTree;

use crate::cache::{CacheKey, FileObjectCache};
use crate::error::{Error, Result};

pub struct Jit {
    cache: FileObjectCache,
    submission_lock: Mutex<()>,
}

impl Jit {
    pub fn new(cache_dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            cache: FileObjectCache::new(cache_dir),
            submission_lock: Mutex::new(()),
        }
    }

    /// Loads the evaluator map for `(tree, generator, function_depth)` from
    /// the object cache, compiling and populating the cache on a miss. A
    /// cache hit skips straight to lowering the cached IR to closures
    /// without re-running the IR emitter.
    pub fn load_or_compile(
        &self,
        tree: &DecisionTree,
        generator: &dyn Generator,
        function_depth: u8,
        feature_count: u32,
    ) -> Result<HashMap<u64, CompiledEvaluator>> {
        let key = CacheKey {
            tree_depth: tree.depth(),
            feature_count,
            function_depth,
            subtree_levels: generator.subtree_levels(),
        };

        if let Some(bytes) = self.cache.get(key) {
            match bincode::deserialize::<Vec<dtjit_codegen::Switch>>(&bytes) {
                Ok(program) => {
                    tracing::debug!(?key, "object cache hit");
                    return Ok(self.compile(&program, generator.backend()));
                }
                Err(err) => {
                    tracing::debug!(?key, %err, "cached object failed to decode, recompiling");
                }
            }
        } else {
            tracing::debug!(?key, "object cache miss");
        }

        // Submission (emission + verification + cache write) is serialized;
        // lookups against an already-populated cache above need no lock.
        let _guard = self.submission_lock.lock().unwrap();

        tracing::debug!(?key, "composing");
        let program = generator.emit_program(tree, function_depth);
        for switch in &program {
            dtjit_codegen::verify_switch(switch).map_err(Error::from)?;
        }

        let bytes = bincode::serialize(&program).map_err(Error::CacheCodec)?;
        self.cache.put(key, &bytes).map_err(Error::from)?;
        tracing::debug!(?key, evaluators = program.len(), "compiled and cached");

        Ok(self.compile(&program, generator.backend()))
    }

    fn compile(
        &self,
        program: &[dtjit_codegen::Switch],
        backend: Backend,
    ) -> HashMap<u64, CompiledEvaluator> {
        dtjit_codegen::compile_program(program, backend)
    }
}

impl std::fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "D{}_F{}_FD{}_L{}",
            self.tree_depth, self.feature_count, self.function_depth, self.subtree_levels
        )
    }
}
