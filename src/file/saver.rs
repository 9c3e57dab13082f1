//! YAML file saving functionality.
//!
//! Trees are rendered with the configured indentation, checked by parsing the
//! output again, and written atomically (sibling temp file, then rename).
//! Targets ending in `.gz` are gzip-compressed.

use crate::config::Config;
use crate::document::emitter::to_yaml_stream_string;
use crate::document::node::YamlNode;
use crate::document::parser::parse_yaml_documents;
use anyhow::{bail, Context, Result};
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Saves a YAML tree to a file with optional backup creation.
///
/// # Examples
///
/// ```no_run
/// use yptr::config::Config;
/// use yptr::document::parser::parse_yaml;
/// use yptr::file::saver::save_yaml_file;
///
/// let doc = parse_yaml("a: 1\n").unwrap();
/// save_yaml_file("output.yaml", &doc, &Config::default()).unwrap();
/// ```
///
/// # Errors
///
/// Returns an error if the backup cannot be created, the rendered text does
/// not parse, or writing and renaming the temp file fails.
pub fn save_yaml_file<P: AsRef<Path>>(path: P, node: &YamlNode, config: &Config) -> Result<()> {
    save_yaml_documents(path, std::slice::from_ref(node), config)
}

/// Saves a multi-document stream, documents separated by `---` lines.
pub fn save_yaml_documents<P: AsRef<Path>>(path: P, documents: &[YamlNode], config: &Config) -> Result<()> {
    let path = path.as_ref();
    let compress = path.extension().is_some_and(|ext| ext == "gz");

    if config.create_backup && path.exists() {
        create_backup(path)?;
    }

    let yaml_str = to_yaml_stream_string(documents, config.indent_size);

    // Catch emitter bugs before they reach the user's file.
    let reparsed = parse_yaml_documents(&yaml_str)
        .context("Generated invalid YAML - this is a bug in yptr's emitter")?;
    if reparsed.len() != documents.len() {
        bail!(
            "Generated YAML holds {} documents instead of {} - this is a bug in yptr's emitter",
            reparsed.len(),
            documents.len()
        );
    }

    write_file_atomic(path, yaml_str.as_bytes(), compress)?;
    log::info!("saved {} ({} documents, {} bytes)", path.display(), documents.len(), yaml_str.len());
    Ok(())
}

/// `name` -> `name.bak`, in the same directory.
fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".bak");
    path.with_file_name(name)
}

/// `name` -> `.name.tmp`, in the same directory so the rename stays on one
/// filesystem.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}

fn create_backup(path: &Path) -> Result<PathBuf> {
    let backup = backup_path(path);
    fs::copy(path, &backup)
        .with_context(|| format!("Failed to create backup {}", backup.display()))?;
    log::info!("backup written to {}", backup.display());
    Ok(backup)
}

/// Writes `data` next to `path`, flushes it to disk and renames it over
/// `path`. The temp file is removed if any step fails.
fn write_file_atomic(path: &Path, data: &[u8], compress: bool) -> Result<()> {
    let temp = temp_path(path);
    let written = write_temp(&temp, data, compress)
        .and_then(|()| fs::rename(&temp, path).context("Failed to rename temp file"));
    if written.is_err() {
        let _ = fs::remove_file(&temp);
    }
    written
}

fn write_temp(temp: &Path, data: &[u8], compress: bool) -> Result<()> {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let file = fs::File::create(temp)
        .with_context(|| format!("Failed to create temp file {}", temp.display()))?;
    let file = if compress {
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(data).context("Failed to write compressed data")?;
        encoder.finish().context("Failed to finish compression")?
    } else {
        let mut file = file;
        file.write_all(data).context("Failed to write temp file")?;
        file
    };
    file.sync_all().context("Failed to flush temp file")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_yaml;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn test_sibling_paths() {
        let path = Path::new("/data/deploy.yaml.gz");
        assert_eq!(backup_path(path), PathBuf::from("/data/deploy.yaml.gz.bak"));
        assert_eq!(temp_path(path), PathBuf::from("/data/.deploy.yaml.gz.tmp"));
    }

    #[test]
    fn test_write_file_atomic_uncompressed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.yaml");
        write_file_atomic(&path, b"a: 1\n", false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a: 1\n");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_write_file_atomic_does_not_touch_same_stem_files() {
        let dir = TempDir::new().unwrap();
        let unrelated = dir.path().join("out.tmp");
        fs::write(&unrelated, "keep").unwrap();
        write_file_atomic(&dir.path().join("out.yaml"), b"a: 1\n", false).unwrap();
        assert_eq!(fs::read_to_string(&unrelated).unwrap(), "keep");
    }

    #[test]
    fn test_write_file_atomic_failure_leaves_no_temp() {
        let dir = TempDir::new().unwrap();
        // Renaming a file over a non-empty directory fails.
        let target = dir.path().join("occupied");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("inner"), "x").unwrap();
        assert!(write_file_atomic(&target, b"a: 1\n", false).is_err());
        assert!(!temp_path(&target).exists());
    }

    #[test]
    fn test_write_file_atomic_compressed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.yaml.gz");
        write_file_atomic(&path, b"a: 1\n", true).unwrap();

        let mut decoder = GzDecoder::new(fs::File::open(&path).unwrap());
        let mut content = String::new();
        decoder.read_to_string(&mut content).unwrap();
        assert_eq!(content, "a: 1\n");
    }

    #[test]
    fn test_create_backup_copies_original() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.yaml");
        fs::write(&path, "old: true\n").unwrap();
        let backup = create_backup(&path).unwrap();
        assert_eq!(backup, dir.path().join("doc.yaml.bak"));
        assert_eq!(fs::read_to_string(backup).unwrap(), "old: true\n");
    }

    #[test]
    fn test_save_uses_configured_indent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.yaml");
        let doc = parse_yaml("a:\n b: c\n").unwrap();
        let config = Config {
            indent_size: 2,
            ..Config::default()
        };
        save_yaml_file(&path, &doc, &config).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a:\n  b: c\n");
    }

    #[test]
    fn test_save_documents_keeps_every_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("multi.yaml");
        let docs = parse_yaml_documents("a: 1\n---\nb: 2\n").unwrap();
        save_yaml_documents(&path, &docs, &Config::default()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a: 1\n---\nb: 2\n");
    }
}
