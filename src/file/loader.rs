//! YAML file loading functionality.
//!
//! This module loads YAML documents from files or stdin and parses them into
//! `YamlNode` trees. Gzip input is detected from the `.gz` extension for files
//! and from the magic bytes for stdin.

use crate::document::node::YamlNode;
use crate::document::parser::{parse_yaml, parse_yaml_documents};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Loads and parses a YAML file from the filesystem.
///
/// Files ending in `.gz` are decompressed first. Only the first document of a
/// multi-document stream is returned.
///
/// # Examples
///
/// ```no_run
/// use yptr::file::loader::load_yaml_file;
///
/// let doc = load_yaml_file("deployment.yaml").unwrap();
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be read, is corrupted gzip, or does not
/// contain valid YAML.
pub fn load_yaml_file<P: AsRef<Path>>(path: P) -> Result<YamlNode> {
    let path = path.as_ref();
    let content = read_file_text(path)?;
    parse_yaml(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Loads every document of a YAML stream from the filesystem.
///
/// Use this when the documents will be written back, so that none of them
/// are lost.
pub fn load_yaml_stream_file<P: AsRef<Path>>(path: P) -> Result<Vec<YamlNode>> {
    let path = path.as_ref();
    let content = read_file_text(path)?;
    parse_yaml_documents(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn read_file_text(path: &Path) -> Result<String> {
    let is_gzipped = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path)?
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path.display()))?
    };

    log::info!("loaded {} ({} bytes)", path.display(), content.len());
    Ok(content)
}

/// Reads YAML from stdin, decompressing it if it starts with the gzip magic bytes.
///
/// # Errors
///
/// Returns an error if reading from stdin fails or the input is not valid YAML.
pub fn load_yaml_from_stdin() -> Result<YamlNode> {
    let content = read_stdin_text()?;
    parse_yaml(&content).context("Failed to parse YAML from stdin")
}

fn read_stdin_text() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;
    decode_bytes(buffer)
}

/// Loads from stdin when `source` is `-`, otherwise from the named file.
pub fn load_yaml_source(source: &str) -> Result<YamlNode> {
    if source == "-" {
        load_yaml_from_stdin()
    } else {
        load_yaml_file(source)
    }
}

/// Like `load_yaml_source`, but keeps every document of the stream.
pub fn load_yaml_stream_source(source: &str) -> Result<Vec<YamlNode>> {
    if source == "-" {
        let content = read_stdin_text()?;
        parse_yaml_documents(&content).context("Failed to parse YAML from stdin")
    } else {
        load_yaml_stream_file(source)
    }
}

/// Turns raw input bytes into text, decompressing gzip data.
fn decode_bytes(buffer: Vec<u8>) -> Result<String> {
    if buffer.starts_with(&GZIP_MAGIC) {
        decompress_gzip_bytes(&buffer)
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in input")
    }
}

fn read_gzipped_file(path: &Path) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped input")?;
    Ok(content)
}
