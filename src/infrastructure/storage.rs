use std::path::Path;

use crate::domain::candidate::{DatasetKind, FileInput};
use crate::domain::error::{AnalysisError, Result};

/// Reads a file from disk the way a browser file picker would hand it over:
/// base name, size from metadata and a MIME type guessed from the extension
/// (empty when unknown, so selection decides).
pub async fn read_file_input(path: &Path) -> Result<FileInput> {
    let metadata = tokio::fs::metadata(path).await.map_err(|e| AnalysisError::Io {
        reason: format!("{}: {}", path.display(), e),
    })?;
    if !metadata.is_file() {
        return Err(AnalysisError::Io {
            reason: format!("{} is not a file", path.display()),
        });
    }

    let content = tokio::fs::read(path).await.map_err(|e| AnalysisError::Io {
        reason: format!("{}: {}", path.display(), e),
    })?;

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = DatasetKind::from_file_name(&name)
        .map(|kind| kind.mime_type().to_string())
        .unwrap_or_default();

    Ok(FileInput::new(name, metadata.len(), mime_type, content))
}
