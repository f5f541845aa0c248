//! Document loading utilities
//!
//! Finds already-extracted drawing text on disk and wraps each file as a
//! [`SourceDocument`] named after its file name.

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::estimator::SourceDocument;

/// Extensions picked up when scanning a directory
pub const TEXT_EXTENSIONS: &[&str] = &["txt"];

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| {
            TEXT_EXTENSIONS
                .iter()
                .any(|ext| e.eq_ignore_ascii_case(ext))
        })
}

/// Resolve input paths to document files
///
/// Files given explicitly are always included. Directories are walked
/// recursively for text files, sorted by path for stable output.
pub fn discover(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, LoadError> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
        } else if input.is_dir() {
            let mut found: Vec<PathBuf> = walkdir::WalkDir::new(input)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .filter(|p| is_text_file(p))
                .collect();
            found.sort();
            tracing::debug!(dir = %input.display(), count = found.len(), "scanned directory");
            files.extend(found);
        } else {
            return Err(LoadError::NotFound(input.clone()));
        }
    }

    if files.is_empty() {
        return Err(LoadError::NoDocuments(inputs.to_vec()));
    }
    Ok(files)
}

/// Read one document
pub fn load_document(path: &Path) -> Result<SourceDocument, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    // extracted text is not always clean UTF-8
    let text = String::from_utf8_lossy(&bytes).into_owned();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SourceDocument { name, text })
}

/// Discover and read all documents under the given inputs
pub fn load_documents(inputs: &[PathBuf]) -> Result<Vec<SourceDocument>, LoadError> {
    discover(inputs)?
        .iter()
        .map(|path| load_document(path))
        .collect()
}

/// Errors raised while locating or reading input documents
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("input path not found: {0:?}")]
    #[diagnostic(code(mto::load::not_found))]
    NotFound(PathBuf),

    #[error("no text documents found in {0:?}")]
    #[diagnostic(
        code(mto::load::empty),
        help("extract drawing text to .txt files and pass the files or their folder")
    )]
    NoDocuments(Vec<PathBuf>),

    #[error("failed to read {path:?}")]
    #[diagnostic(code(mto::load::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_discover_directory_filters_and_sorts() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "x").unwrap();
        fs::write(dir.path().join("a.TXT"), "x").unwrap();
        fs::write(dir.path().join("drawing.pdf"), "x").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/c.txt"), "x").unwrap();

        let files = discover(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.TXT", "b.txt", "c.txt"]);
    }

    #[test]
    fn test_explicit_file_any_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ISO-001.extract");
        fs::write(&path, "<1> 1000 50").unwrap();

        let files = discover(&[path.clone()]).unwrap();
        assert_eq!(files, vec![path]);
    }

    #[test]
    fn test_discover_missing_path() {
        let err = discover(&[PathBuf::from("/nonexistent/drawings")]).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn test_discover_empty_dir() {
        let dir = tempdir().unwrap();
        let err = discover(&[dir.path().to_path_buf()]).unwrap_err();
        assert!(matches!(err, LoadError::NoDocuments(_)));
    }

    #[test]
    fn test_load_document_uses_file_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ISO-001.txt");
        fs::write(&path, b"WN FLANGE 100\n\xff").unwrap();

        let doc = load_document(&path).unwrap();
        assert_eq!(doc.name, "ISO-001.txt");
        assert!(doc.text.starts_with("WN FLANGE 100"));
    }
}
