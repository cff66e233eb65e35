//! Zip export of the current file set.
//!
//! Entry order equals the order files were added, and the modification
//! timestamp is pinned so that exporting an unchanged file set twice yields
//! byte-identical archives.

use std::io::{Cursor, Write};

use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use atelier_types::builder::GeneratedFile;

/// Errors from the export path.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Export requested outside `Ready`, or with no files.
    #[error("nothing to export")]
    NotReady,

    /// Archive assembly failed.
    #[error("archive packaging failed: {0}")]
    Packaging(String),
}

/// Package the files into a zip archive, in order, preserving the
/// directory structure implied by `/`-separated paths.
pub fn archive(files: &[GeneratedFile]) -> Result<Vec<u8>, ExportError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    for file in files {
        writer
            .start_file(file.path.as_str(), options)
            .map_err(|e| ExportError::Packaging(e.to_string()))?;
        writer
            .write_all(file.content.as_bytes())
            .map_err(|e| ExportError::Packaging(e.to_string()))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| ExportError::Packaging(e.to_string()))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use zip::ZipArchive;

    use super::*;

    fn sample_files() -> Vec<GeneratedFile> {
        vec![
            GeneratedFile::new("README.md", "# Project"),
            GeneratedFile::new("src/main.js", "console.log('hi')"),
            GeneratedFile::new("index.html", "<html></html>"),
        ]
    }

    #[test]
    fn entries_keep_insertion_order_and_content() {
        let bytes = archive(&sample_files()).unwrap();
        let mut zip = ZipArchive::new(Cursor::new(bytes)).unwrap();

        assert_eq!(zip.len(), 3);
        let expected = ["README.md", "src/main.js", "index.html"];
        for (i, name) in expected.iter().enumerate() {
            let mut entry = zip.by_index(i).unwrap();
            assert_eq!(entry.name(), *name);
            let mut content = String::new();
            entry.read_to_string(&mut content).unwrap();
            assert_eq!(content, sample_files()[i].content);
        }
    }

    #[test]
    fn repeated_export_is_byte_identical() {
        let files = sample_files();
        let first = archive(&files).unwrap();
        let second = archive(&files).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_set_archives_to_an_empty_zip() {
        let bytes = archive(&[]).unwrap();
        let zip = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(zip.len(), 0);
    }

    #[test]
    fn nested_paths_survive_as_directory_structure() {
        let files = vec![GeneratedFile::new("a/b/c.txt", "deep")];
        let bytes = archive(&files).unwrap();
        let mut zip = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let entry = zip.by_index(0).unwrap();
        assert_eq!(entry.name(), "a/b/c.txt");
    }
}
