/// A file known to the backend. Only the name is stored; the display
/// category is derived on render and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
}

impl FileEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn kind(&self) -> FileKind {
        FileKind::of_name(&self.name)
    }
}

/// Display category for an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Word,
    Text,
    Markdown,
    Unknown,
}

impl FileKind {
    /// Pure function of the lowercase filename extension.
    pub fn of_name(filename: &str) -> Self {
        let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();
        match ext.as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Word,
            "txt" => Self::Text,
            "md" => Self::Markdown,
            _ => Self::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pdf => "PDF Document",
            Self::Word => "Word Document",
            Self::Text => "Text File",
            Self::Markdown => "Markdown Document",
            Self::Unknown => "Unknown Document",
        }
    }
}
