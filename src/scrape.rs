use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

use crate::chunk::{Chunk, Chunker};
use crate::config::Config;
use crate::error::ScrapeError;
use crate::fetch;
use crate::output::{self, Format};
use crate::page;
use crate::toc;

/// Run totals returned after completion.
pub struct ScrapeStats {
    pub pages: u32,
    pub chapters: usize,
}

/// Scrape one book page by page and flush a file per detected chapter.
///
/// Strictly sequential: the chapter cursor only advances correctly when pages
/// are scanned in order, so one fetch is awaited at a time. The TOC gates the
/// run; pages end at the first one without a content block.
pub async fn scrape_book(cfg: &Config, book_id: u64, format: Format) -> Result<ScrapeStats> {
    let client = fetch::build_client().context("Failed to build HTTP client")?;

    let titles = toc::fetch_toc(&client, &cfg.page_url(book_id, 1)).await;
    if titles.is_empty() {
        return Err(ScrapeError::EmptyToc.into());
    }
    info!("Book {}: {} chapter titles in TOC", book_id, titles.len());

    let dir = output::create_book_dir(&cfg.books_dir, book_id)
        .with_context(|| format!("Failed to create directory for book {book_id}"))?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} page {msg}")?);

    let mut chunker = Chunker::new(titles);
    let mut page_number: u32 = 1;
    let mut pages: u32 = 0;
    let mut chapters = 0usize;

    loop {
        pb.set_message(page_number.to_string());

        let url = cfg.page_url(book_id, page_number);
        let html = fetch::fetch_html(&client, &url, cfg.retries, cfg.retry_delay)
            .await
            .map_err(|e| ScrapeError::PageFetch {
                page: page_number,
                attempts: cfg.retries,
                source: e,
            })?;

        let Some(scan) = page::scan_page(&html, chunker.titles(), chunker.index()) else {
            info!("Text div not found on page {}; end of book.", page_number);
            break;
        };
        pages += 1;

        if let Some(chunk) = chunker.push_page(&scan) {
            save(&dir, &chunk, format, &mut chapters)?;
        }

        if let Some(max) = cfg.max_pages {
            if page_number >= max {
                info!("Reached maximum pages limit: {}", max);
                break;
            }
        }
        page_number += 1;
    }
    pb.finish_and_clear();

    if let Some(chunk) = chunker.finish() {
        save(&dir, &chunk, format, &mut chapters)?;
    }

    info!("Scraped {} pages into {} chapter files", pages, chapters);
    Ok(ScrapeStats { pages, chapters })
}

/// Persist one chapter. An unsupported format is reported and skipped without
/// touching chunk state; IO failures abort the run (already-flushed chapter
/// files stay on disk).
fn save(dir: &Path, chunk: &Chunk, format: Format, chapters: &mut usize) -> Result<()> {
    match output::save_chunk(dir, &chunk.title, &chunk.text, format) {
        Ok(()) => {
            *chapters += 1;
            Ok(())
        }
        Err(ScrapeError::UnsupportedFormat(f)) => {
            error!("Unsupported file format: {}", f);
            Ok(())
        }
        Err(e) => {
            Err(e).with_context(|| format!("Failed to save chapter \"{}\"", chunk.title))
        }
    }
}
