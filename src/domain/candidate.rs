use bytes::Bytes;
use serde::Serialize;
use std::fmt;

pub const CSV_MIME: &str = "text/csv";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A file as offered by the host (picker, drag and drop, CLI argument).
#[derive(Debug, Clone)]
pub struct FileInput {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl FileInput {
    pub fn new(
        name: impl Into<String>,
        size_bytes: u64,
        mime_type: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            mime_type: mime_type.into(),
            content,
        }
    }
}

/// Dataset formats the analysis service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Csv,
    Xlsx,
}

impl DatasetKind {
    pub fn mime_type(&self) -> &'static str {
        match self {
            DatasetKind::Csv => CSV_MIME,
            DatasetKind::Xlsx => XLSX_MIME,
        }
    }

    pub fn from_mime(mime_type: &str) -> Option<Self> {
        let essence = mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            CSV_MIME => Some(DatasetKind::Csv),
            XLSX_MIME => Some(DatasetKind::Xlsx),
            _ => None,
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, extension) = name.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Some(DatasetKind::Csv),
            "xlsx" => Some(DatasetKind::Xlsx),
            _ => None,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetKind::Csv => write!(f, "CSV"),
            DatasetKind::Xlsx => write!(f, "XLSX"),
        }
    }
}

/// A validated file waiting to be submitted. Immutable once built; the raw
/// bytes are reference-counted, so clones and uploads never copy the file.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    name: String,
    size_bytes: u64,
    mime_type: String,
    kind: DatasetKind,
    #[serde(skip)]
    content: Bytes,
}

impl Candidate {
    pub(crate) fn new(input: FileInput, kind: DatasetKind) -> Self {
        Self {
            name: input.name,
            size_bytes: input.size_bytes,
            mime_type: kind.mime_type().to_string(),
            kind,
            content: Bytes::from(input.content),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Shared handle to the raw bytes.
    pub fn content_bytes(&self) -> Bytes {
        self.content.clone()
    }

    /// Size for display, e.g. `12.0 KB`.
    pub fn display_size(&self) -> String {
        const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
        if self.size_bytes < 1024 {
            return format!("{} B", self.size_bytes);
        }
        let mut size = self.size_bytes as f64;
        let mut unit = 0;
        while size >= 1024.0 && unit < UNITS.len() - 1 {
            size /= 1024.0;
            unit += 1;
        }
        format!("{:.1} {}", size, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(size_bytes: u64) -> Candidate {
        Candidate::new(
            FileInput::new("sales.csv", size_bytes, CSV_MIME, Vec::new()),
            DatasetKind::Csv,
        )
    }

    #[test]
    fn test_kind_from_mime_ignores_case_and_parameters() {
        assert_eq!(
            DatasetKind::from_mime("Text/CSV; charset=utf-8"),
            Some(DatasetKind::Csv)
        );
        assert_eq!(DatasetKind::from_mime(XLSX_MIME), Some(DatasetKind::Xlsx));
        assert_eq!(DatasetKind::from_mime("application/pdf"), None);
        assert_eq!(DatasetKind::from_mime(""), None);
    }

    #[test]
    fn test_kind_from_file_name() {
        assert_eq!(DatasetKind::from_file_name("a.CSV"), Some(DatasetKind::Csv));
        assert_eq!(
            DatasetKind::from_file_name("q3.report.xlsx"),
            Some(DatasetKind::Xlsx)
        );
        assert_eq!(DatasetKind::from_file_name("book.xls"), None);
        assert_eq!(DatasetKind::from_file_name("csv"), None);
    }

    #[test]
    fn test_clones_share_content() {
        let candidate = Candidate::new(
            FileInput::new("sales.csv", 4, CSV_MIME, b"a,b\n".to_vec()),
            DatasetKind::Csv,
        );
        let copy = candidate.clone();
        assert_eq!(copy.content().as_ptr(), candidate.content().as_ptr());
        assert_eq!(candidate.content_bytes().as_ptr(), candidate.content().as_ptr());
    }

    #[test]
    fn test_display_size() {
        assert_eq!(candidate(512).display_size(), "512 B");
        assert_eq!(candidate(12 * 1024).display_size(), "12.0 KB");
        assert_eq!(candidate(3 * 1024 * 1024 / 2).display_size(), "1.5 MB");
    }
}
