//! Namespace View
//!
//! Semantic layer over one path trie that understands "file" vs "directory"
//! and "freshly created" vs "overwritten". Each mutating call maps onto trie
//! operations and raises a domain conflict when the trie reports an
//! unexpected pre-existing state. Views never know about strict/lenient
//! mode; they always raise and leave policy to the reconciler.

use crate::error::ConflictError;
use crate::trie::{PathTrie, TrieCollections};

/// One accumulated side of the reconciler state
///
/// The positive view records net creations, writes, and directory creations;
/// the negative view records net deletions (a marked file node there means
/// "this file is deleted"). Both are instances of this type.
#[derive(Debug, Default)]
pub struct NamespaceView {
    trie: PathTrie,
}

impl NamespaceView {
    pub fn new() -> Self {
        Self {
            trie: PathTrie::new(),
        }
    }

    /// Record a freshly created file at `path`
    ///
    /// A marked file already at the path is a `FileExists` conflict; any
    /// other pre-existing node is an `EntryExists` conflict.
    pub fn create_file(&mut self, path: &str) -> Result<(), ConflictError> {
        if self.trie.contains(path, true, None) {
            return Err(ConflictError::FileExists(path.to_string()));
        }
        if self.trie.add(path, true, true)? {
            return Err(ConflictError::EntryExists(path.to_string()));
        }
        Ok(())
    }

    /// Record an overwritten file at `path`
    ///
    /// Succeeds whether or not the file was already recorded and always
    /// leaves the node marked with `is_new = false`. A pre-existing non-file
    /// node is an `EntryExists` conflict.
    pub fn write_file(&mut self, path: &str) -> Result<(), ConflictError> {
        if self.trie.contains(path, true, None) {
            // re-inserted below with is_new = false
            self.trie.remove(path, true);
        }
        if self.trie.add(path, true, false)? {
            return Err(ConflictError::EntryExists(path.to_string()));
        }
        Ok(())
    }

    /// Drop the file node at `path`, pruning scaffolding above it
    pub fn delete_file(&mut self, path: &str) -> Result<(), ConflictError> {
        if !self.trie.remove(path, true) {
            return Err(ConflictError::NoSuchFile(path.to_string()));
        }
        Ok(())
    }

    /// Record a created directory at `path`
    ///
    /// Any node already at the path, marked or scaffolding, is an
    /// `EntryExists` conflict.
    pub fn create_directory(&mut self, path: &str) -> Result<(), ConflictError> {
        if self.trie.contains_node(path) {
            return Err(ConflictError::EntryExists(path.to_string()));
        }
        self.trie.add(path, false, true)?;
        Ok(())
    }

    /// Drop the directory node at `path` together with everything beneath it
    ///
    /// The trie does not consult markers on removal, so this also clears
    /// unmarked scaffolding.
    pub fn delete_directory(&mut self, path: &str) -> Result<(), ConflictError> {
        if !self.trie.remove(path, false) {
            return Err(ConflictError::NoSuchDirectory(path.to_string()));
        }
        Ok(())
    }

    pub fn contains_file(&self, path: &str) -> bool {
        self.trie.contains(path, true, None)
    }

    pub fn contains_new_file(&self, path: &str) -> bool {
        self.trie.contains(path, true, Some(true))
    }

    pub fn contains_modified_file(&self, path: &str) -> bool {
        self.trie.contains(path, true, Some(false))
    }

    pub fn contains_directory(&self, path: &str) -> bool {
        self.trie.contains(path, false, None)
    }

    pub fn contains_node(&self, path: &str) -> bool {
        self.trie.contains_node(path)
    }

    pub fn contains_ancestor(&self, path: &str) -> bool {
        self.trie.contains_ancestor(path)
    }

    /// Collect all marked paths in deterministic traversal order
    pub fn collect(&self) -> TrieCollections {
        self.trie.collect()
    }
}
