//! The object cache: keyed by `(tree_depth, feature_count, function_depth,
//! subtree_levels)`, stores opaque per-module blobs. This is a minimal, real
//! implementation rather than a stub: one file per key plus a sibling "tree"
//! marker file, so a hit requires both to be present.
use std::path::{Path, PathBuf};

/// Identifies one compiled module: the tree shape and the code generator
/// configuration used to compile it. Distinct configurations never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub tree_depth: u8,
    pub feature_count: u32,
    pub function_depth: u8,
    pub subtree_levels: u8,
}

impl CacheKey {
    fn tree_file_name(&self) -> String {
        format!("tree_D{}_F{}.tree", self.tree_depth, self.feature_count)
    }

    fn obj_file_name(&self) -> String {
        format!(
            "tree_D{}_F{}_FD{}_L{}.obj",
            self.tree_depth, self.feature_count, self.function_depth, self.subtree_levels
        )
    }
}

/// A directory-backed object cache.
pub struct FileObjectCache {
    dir: PathBuf,
}

impl FileObjectCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the cached object bytes for `key`, or `None` on any kind of
    /// miss (files absent, or the tree marker without its object). Never
    /// returns an I/O error: a cache that can't be read is just a miss.
    pub fn get(&self, key: CacheKey) -> Option<Vec<u8>> {
        let tree_file = self.dir.join(key.tree_file_name());
        let obj_file = self.dir.join(key.obj_file_name());
        if !tree_file.is_file() || !obj_file.is_file() {
            return None;
        }
        std::fs::read(obj_file).ok()
    }

    /// Stores `bytes` under `key`, creating the cache directory and the tree
    /// marker file if needed. Called once, after compilation.
    pub fn put(&self, key: CacheKey, bytes: &[u8]) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let tree_file = self.dir.join(key.tree_file_name());
        if !tree_file.is_file() {
            std::fs::write(tree_file, [key.tree_depth])?;
        }
        std::fs::write(self.dir.join(key.obj_file_name()), bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_until_both_files_present() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileObjectCache::new(dir.path());
        let key = CacheKey { tree_depth: 6, feature_count: 3, function_depth: 3, subtree_levels: 3 };

        assert!(cache.get(key).is_none());
        cache.put(key, b"payload").unwrap();
        assert_eq!(cache.get(key).unwrap(), b"payload");
    }

    #[test]
    fn distinct_configurations_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileObjectCache::new(dir.path());
        let a = CacheKey { tree_depth: 6, feature_count: 3, function_depth: 3, subtree_levels: 3 };
        let b = CacheKey { tree_depth: 6, feature_count: 3, function_depth: 3, subtree_levels: 1 };

        cache.put(a, b"a").unwrap();
        cache.put(b, b"b").unwrap();
        assert_eq!(cache.get(a).unwrap(), b"a");
        assert_eq!(cache.get(b).unwrap(), b"b");
    }
}
