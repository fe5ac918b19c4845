//! Load timetable documents from a data directory.
//!
//! The expected layout is one subdirectory per source unit, each holding a
//! document with a fixed name:
//!
//! ```text
//! data/
//!   AP/edt.cru
//!   BC/edt.cru
//! ```
//!
//! Every document is parsed and merged into a single [`SessionSet`];
//! sessions repeated across units are kept once.

use std::fs;
use std::path::{Path, PathBuf};

use crate::collection::SessionSet;
use crate::error::{CruError, Result};
use crate::parser::parse_document_into;

/// Default document name inside each unit directory.
pub const DEFAULT_FILE_NAME: &str = "edt.cru";

/// Document paths under `data_dir`, one per subdirectory that has `file_name`,
/// sorted for a stable load order.
///
/// # Errors
/// [`CruError::SourceUnavailable`] when `data_dir` does not exist, and
/// [`CruError::Io`] when it cannot be listed.
pub fn discover_documents(data_dir: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
    if !data_dir.is_dir() {
        return Err(CruError::SourceUnavailable(format!(
            "data directory {} does not exist; import CRU files first",
            data_dir.display()
        )));
    }

    let io_err = |source| CruError::Io {
        path: data_dir.to_path_buf(),
        source,
    };

    let mut documents = Vec::new();
    for entry in fs::read_dir(data_dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let candidate = entry.path().join(file_name);
        if entry.path().is_dir() && candidate.is_file() {
            documents.push(candidate);
        }
    }
    documents.sort();

    Ok(documents)
}

/// Read and parse every document under `data_dir` into one set.
///
/// # Errors
/// - [`CruError::SourceUnavailable`] when the directory is missing, holds no
///   document, or the documents contain no session at all.
/// - [`CruError::Io`] when a document exists but cannot be read.
pub fn load_directory(data_dir: &Path, file_name: &str) -> Result<SessionSet> {
    let documents = discover_documents(data_dir, file_name)?;
    if documents.is_empty() {
        return Err(CruError::SourceUnavailable(format!(
            "no {} file found in the subdirectories of {}",
            file_name,
            data_dir.display()
        )));
    }

    let mut sessions = SessionSet::new();
    for path in &documents {
        let text = fs::read_to_string(path).map_err(|source| CruError::Io {
            path: path.clone(),
            source,
        })?;
        let added = parse_document_into(&text, &mut sessions);
        tracing::debug!(path = %path.display(), added, "parsed document");
    }

    if sessions.is_empty() {
        return Err(CruError::SourceUnavailable(format!(
            "no session found in the CRU files under {}",
            data_dir.display()
        )));
    }

    tracing::info!(
        documents = documents.len(),
        sessions = sessions.len(),
        "loaded timetable"
    );
    Ok(sessions)
}
