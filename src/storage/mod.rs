//! Graph sources for costpath
//!
//! The path engine only reads graphs. `GraphStore` is the seam to wherever
//! they live; `FileStore` reads JSON/YAML graph documents from a directory.

mod file;
mod traits;

pub use file::{load_graph_file, FileStore};
pub use traits::{DocumentFormat, GraphDocument, GraphStore, OpenStore, StorageError, StorageResult};
