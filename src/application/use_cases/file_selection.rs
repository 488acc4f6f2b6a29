use crate::domain::candidate::{Candidate, DatasetKind, FileInput};
use crate::domain::error::{AnalysisError, Result, NO_FILE, UNSUPPORTED_TYPE};
use tracing::debug;

const OCTET_STREAM: &str = "application/octet-stream";

/// Validates an offered selection and builds the `Candidate`.
///
/// Only the first file is considered; any others are dropped without error.
/// Size is not limited here, the analysis service enforces its own ceiling.
pub fn select(inputs: impl IntoIterator<Item = FileInput>) -> Result<Candidate> {
    let mut inputs = inputs.into_iter();
    let input = inputs
        .next()
        .ok_or_else(|| AnalysisError::validation(NO_FILE))?;

    let discarded = inputs.count();
    if discarded > 0 {
        debug!(file = %input.name, discarded, "Multiple files offered, keeping the first");
    }

    let kind = detect_kind(&input).ok_or_else(|| {
        debug!(file = %input.name, mime_type = %input.mime_type, "Rejected unsupported file type");
        AnalysisError::validation(UNSUPPORTED_TYPE)
    })?;

    Ok(Candidate::new(input, kind))
}

/// The reported MIME type decides; when the host could not tell
/// (empty or generic binary) the extension is used instead.
fn detect_kind(input: &FileInput) -> Option<DatasetKind> {
    let mime = input.mime_type.trim();
    if mime.is_empty() || mime.eq_ignore_ascii_case(OCTET_STREAM) {
        return DatasetKind::from_file_name(&input.name);
    }
    DatasetKind::from_mime(mime)
}
