use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// All retry attempts for one content page failed.
    #[error("failed to fetch page {page} after {attempts} attempts")]
    PageFetch {
        page: u32,
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    /// The navigation block was missing or held no titles; without a TOC
    /// there are no chapter boundaries and the run cannot start.
    #[error("no chapter titles found in the book's table of contents")]
    EmptyToc,

    /// Asked to persist in a format the output boundary does not write.
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
