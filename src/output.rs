use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::info;

use crate::error::ScrapeError;

/// Output formats the CLI accepts. DOCX is recognized so the request reaches
/// the output boundary, but binary DOCX writing is out of scope and saving
/// one reports `UnsupportedFormat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Txt,
    Docx,
}

impl Format {
    pub fn ext(self) -> &'static str {
        match self {
            Format::Txt => "txt",
            Format::Docx => "docx",
        }
    }
}

impl FromStr for Format {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "txt" => Ok(Format::Txt),
            "docx" => Ok(Format::Docx),
            other => Err(ScrapeError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Create (if needed) and return the per-book output directory.
pub fn create_book_dir(books_dir: &Path, book_id: u64) -> io::Result<PathBuf> {
    let dir = books_dir.join(book_id.to_string());
    fs::create_dir_all(&dir)?;
    info!("Directory created: {}", dir.display());
    Ok(dir)
}

/// Write one chapter's text as `{title}.{ext}` inside the book directory.
pub fn save_chunk(dir: &Path, title: &str, text: &str, format: Format) -> Result<(), ScrapeError> {
    let path = dir.join(format!("{}.{}", sanitize_filename(title), format.ext()));
    match format {
        Format::Txt => {
            fs::write(&path, text)?;
            info!("TXT file saved: {}", path.display());
            Ok(())
        }
        Format::Docx => Err(ScrapeError::UnsupportedFormat("docx".to_string())),
    }
}

/// Chapter titles become filenames; path separators (and NUL) must not leak
/// into the path.
fn sanitize_filename(title: &str) -> String {
    title.replace(['/', '\\', '\0'], "-")
}
