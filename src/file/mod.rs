//! File I/O operations for YAML documents.
//!
//! This module loads YAML from disk or stdin (plain or gzip-compressed) and
//! saves trees back with atomic writes and optional backups.

pub mod loader;
pub mod saver;

pub use loader::{
    load_yaml_file, load_yaml_from_stdin, load_yaml_source, load_yaml_stream_file, load_yaml_stream_source,
};
pub use saver::{save_yaml_documents, save_yaml_file};
