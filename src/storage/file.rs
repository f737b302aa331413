//! Directory-backed graph store
//!
//! Every `*.json`, `*.yaml` or `*.yml` file in the root directory is one graph
//! document; the file stem is the graph name.

use super::traits::{DocumentFormat, GraphDocument, GraphStore, OpenStore, StorageError, StorageResult};
use crate::graph::Graph;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read-only store over a directory of graph documents
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, name: &str) -> Option<PathBuf> {
        DocumentFormat::EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{name}.{ext}")))
            .find(|path| path.is_file())
    }
}

impl OpenStore for FileStore {
    fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let root = path.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("graph directory not found: {}", root.display()),
            )));
        }
        Ok(Self { root })
    }
}

impl GraphStore for FileStore {
    fn load_graph(&self, name: &str) -> StorageResult<Graph> {
        let path = self
            .document_path(name)
            .ok_or_else(|| StorageError::GraphNotFound(name.to_string()))?;
        debug!(path = %path.display(), "reading graph document");
        GraphDocument::read(&path)?.into_graph(name)
    }

    fn list_graphs(&self) -> StorageResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() || DocumentFormat::from_path(&path).is_err() {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        names.dedup();
        Ok(names)
    }
}

/// Load a single graph document, named after its file stem
pub fn load_graph_file(path: impl AsRef<Path>) -> StorageResult<Graph> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("graph")
        .to_string();
    GraphDocument::read(path)?.into_graph(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Node, Relationship};

    fn write_sample(dir: &Path, file: &str) {
        let doc = GraphDocument {
            nodes: vec![Node::with_id("a"), Node::with_id("b")],
            relationships: vec![Relationship::new("a".into(), "b".into(), "R1")],
        };
        doc.write(dir.join(file)).unwrap();
    }

    #[test]
    fn test_open_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileStore::open(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }

    #[test]
    fn test_list_and_load() {
        let dir = tempfile::tempdir().unwrap();
        write_sample(dir.path(), "social.json");
        write_sample(dir.path(), "roads.yaml");
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.list_graphs().unwrap(), vec!["roads", "social"]);

        let graph = store.load_graph("roads").unwrap();
        assert_eq!(graph.name, "roads");
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.relationship_count(), 1);
    }

    #[test]
    fn test_load_unknown_graph() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        let err = store.load_graph("missing").unwrap_err();
        assert!(matches!(err, StorageError::GraphNotFound(name) if name == "missing"));
    }

    #[test]
    fn test_load_graph_file_uses_stem() {
        let dir = tempfile::tempdir().unwrap();
        write_sample(dir.path(), "paths.yml");
        let graph = load_graph_file(dir.path().join("paths.yml")).unwrap();
        assert_eq!(graph.name, "paths");
    }
}
