use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File types offered by the open dialog. Drops are not filtered.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["pdf", "png", "jpg", "jpeg"];

/// Size limit shown to the user. Advisory only, never enforced.
pub const ADVISED_MAX_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionMode {
    Ai,
    Standard,
}

impl ConversionMode {
    pub fn endpoint_path(self) -> &'static str {
        match self {
            ConversionMode::Ai => "/api/llm-convert",
            ConversionMode::Standard => "/api/normal-convert",
        }
    }

    /// Only the AI backend takes column hints.
    pub fn supports_columns(self) -> bool {
        matches!(self, ConversionMode::Ai)
    }

    pub fn title(self) -> &'static str {
        match self {
            ConversionMode::Ai => "AI-Powered Conversion",
            ConversionMode::Standard => "Fast Standard Conversion",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ConversionMode::Ai => {
                "Advanced AI for complex documents, handwritten text, and maximum accuracy. \
                 Perfect for bank statements and financial documents."
            }
            ConversionMode::Standard => {
                "Quick processing for standard documents and typed text. \
                 Ideal for invoices, receipts, and straightforward tables."
            }
        }
    }
}

impl std::fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionMode::Ai => write!(f, "ai"),
            ConversionMode::Standard => write!(f, "standard"),
        }
    }
}

/// Where the bytes of a selected file come from.
#[derive(Debug, Clone)]
pub enum FileSource {
    Path(PathBuf),
    /// Contents already in memory (some platforms deliver dropped files this way).
    Bytes(Arc<[u8]>),
}

/// A user-chosen file. Contents are read lazily when the request is sent.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub source: FileSource,
    pub size: Option<u64>,
}

impl SelectedFile {
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let size = std::fs::metadata(&path).ok().map(|m| m.len());
        Self {
            name,
            source: FileSource::Path(path),
            size,
        }
    }

    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes: Arc<[u8]> = bytes.into();
        Self {
            name: name.into(),
            size: Some(bytes.len() as u64),
            source: FileSource::Bytes(bytes),
        }
    }

    /// Build from a drag-and-drop entry; `None` when it carries neither path nor bytes.
    pub fn from_dropped(
        name: &str,
        path: Option<PathBuf>,
        bytes: Option<Arc<[u8]>>,
    ) -> Option<Self> {
        match (path, bytes) {
            (Some(path), _) => Some(Self::from_path(path)),
            (None, Some(bytes)) => Some(Self::from_bytes(name, bytes)),
            (None, None) => None,
        }
    }

    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }

    pub fn has_accepted_extension(&self) -> bool {
        self.extension()
            .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    pub fn exceeds_advised_size(&self) -> bool {
        self.size.map(|s| s > ADVISED_MAX_BYTES).unwrap_or(false)
    }

    pub fn mime_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("pdf") => "application/pdf",
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            _ => "application/octet-stream",
        }
    }
}

/// Derived view of an upload session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Uploading,
    Succeeded,
    Failed,
}

/// What a convert endpoint sent back. Both variants keep the body as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertPayload {
    Csv(String),
    DownloadUrl { body: String, url: String },
}

impl ConvertPayload {
    /// A `text/uri-list` body yields its first non-comment line as the link.
    /// Any other body counts as a link only when it is a single http(s) line.
    /// Everything else is taken as CSV text.
    pub fn classify(body: String, content_type: Option<&str>) -> Self {
        let is_uri_list = content_type
            .map(|ct| ct.trim().to_ascii_lowercase().starts_with("text/uri-list"))
            .unwrap_or(false);

        let link = if is_uri_list {
            body.lines()
                .map(str::trim)
                .find(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string)
        } else {
            let trimmed = body.trim();
            let single_link = !trimmed.contains(char::is_whitespace)
                && (trimmed.starts_with("http://") || trimmed.starts_with("https://"));
            single_link.then(|| trimmed.to_string())
        };

        match link {
            Some(url) => ConvertPayload::DownloadUrl { body, url },
            None => ConvertPayload::Csv(body),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ConvertPayload::Csv(text) | ConvertPayload::DownloadUrl { body: text, .. } => text,
        }
    }
}

/// Everything needed to send one conversion.
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub mode: ConversionMode,
    pub file: SelectedFile,
    /// Empty unless the mode supports column hints and the user supplied some.
    pub columns: Vec<String>,
}
