use std::path::PathBuf;
use std::time::Duration;

pub const BASE_URL: &str = "https://shamela.ws/book";
pub const BOOKS_DIR: &str = "books";
pub const DEFAULT_RETRIES: u32 = 5;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 2;
pub const FETCH_TIMEOUT_SECS: u64 = 10;

/// Run settings, threaded explicitly through the driver.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub books_dir: PathBuf,
    pub retries: u32,
    pub retry_delay: Duration,
    pub max_pages: Option<u32>,
}

impl Config {
    pub fn new(retries: u32, delay_secs: u64, max_pages: Option<u32>, books_dir: PathBuf) -> Self {
        Config {
            base_url: BASE_URL.to_string(),
            books_dir,
            retries,
            retry_delay: Duration::from_secs(delay_secs),
            max_pages,
        }
    }

    /// URL of one content page. Page 1 doubles as the TOC page.
    pub fn page_url(&self, book_id: u64, page_number: u32) -> String {
        format!("{}/{}/{}", self.base_url, book_id, page_number)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(
            DEFAULT_RETRIES,
            DEFAULT_RETRY_DELAY_SECS,
            None,
            PathBuf::from(BOOKS_DIR),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_url_shape() {
        let cfg = Config::default();
        assert_eq!(cfg.page_url(8183, 1), "https://shamela.ws/book/8183/1");
        assert_eq!(cfg.page_url(8183, 412), "https://shamela.ws/book/8183/412");
    }
}
