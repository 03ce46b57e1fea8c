use crate::artifacts::diff::diff_entry::{DEV_NULL, DiffEntry};
use std::collections::HashMap;
use std::hash::Hash;
use std::path::{Component, PathBuf};

/// Restricts a diff to the files at or below a set of roots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFilter {
    path_trie: Trie<String>,
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::empty()
    }
}

impl PathFilter {
    /// A filter that lets every path through
    pub fn empty() -> Self {
        Self {
            path_trie: Trie::with_matching(true),
        }
    }

    pub fn new(paths: Vec<PathBuf>) -> Self {
        let mut trie = Trie::new();
        for path in paths {
            let components: Vec<String> = path
                .components()
                .filter(|comp| matches!(comp, Component::Normal(_)))
                .map(|comp| comp.as_os_str().to_string_lossy().to_string())
                .collect();
            trie.insert(&components);
        }

        Self { path_trie: trie }
    }

    /// Whether `path` is one of the roots or lies below one
    pub fn includes(&self, path: &str) -> bool {
        let components: Vec<String> = path.split('/').map(str::to_string).collect();
        self.path_trie.contains_prefix_of(&components)
    }

    /// Whether either side of a change falls under the filter
    pub fn matches_entry(&self, entry: &DiffEntry) -> bool {
        [entry.old_path(), entry.new_path()]
            .into_iter()
            .filter(|path| *path != DEV_NULL)
            .any(|path| self.includes(path))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trie<T: Hash + Eq + Clone> {
    is_matching: bool,
    children: HashMap<T, Trie<T>>,
}

impl<T: Hash + Eq + Clone> Default for Trie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq + Clone> Trie<T> {
    pub fn new() -> Self {
        Trie {
            is_matching: false,
            children: HashMap::new(),
        }
    }

    pub fn with_matching(is_matching: bool) -> Self {
        Trie {
            is_matching,
            children: HashMap::new(),
        }
    }

    pub fn insert(&mut self, path: &[T]) {
        let mut node = self;
        for part in path {
            node = node.children.entry(part.clone()).or_insert_with(Trie::new);
        }
        node.is_matching = true;
    }

    pub fn contains(&self, path: &[T]) -> bool {
        let mut node = self;
        for part in path {
            match node.children.get(part) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.is_matching
    }

    /// Whether some inserted path is a prefix of (or equal to) `path`
    pub fn contains_prefix_of(&self, path: &[T]) -> bool {
        let mut node = self;
        for part in path {
            if node.is_matching {
                return true;
            }
            match node.children.get(part) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.is_matching
    }
}
