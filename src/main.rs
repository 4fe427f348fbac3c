mod chunk;
mod config;
mod error;
mod fetch;
mod output;
mod page;
mod scrape;
mod text;
mod toc;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::output::Format;

#[derive(Parser)]
#[command(
    name = "shamela_scraper",
    about = "Chapter-chunking scraper for shamela.ws books"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a book's chapter titles from its table of contents
    Toc {
        /// Shamela book ID
        book_id: u64,
    },
    /// Scrape a book page by page and write one file per chapter
    Scrape {
        /// Shamela book ID
        book_id: u64,
        /// Output format (txt, docx)
        #[arg(short, long, default_value = "txt")]
        format: Format,
        /// Max pages to scrape (default: until end of book)
        #[arg(short = 'n', long)]
        max_pages: Option<u32>,
        /// Retry attempts per page fetch
        #[arg(long, default_value_t = config::DEFAULT_RETRIES)]
        retries: u32,
        /// Delay between retry attempts, in seconds
        #[arg(long, default_value_t = config::DEFAULT_RETRY_DELAY_SECS)]
        delay: u64,
        /// Root directory for book output
        #[arg(long, default_value = config::BOOKS_DIR)]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Toc { book_id } => {
            let cfg = Config::default();
            let client = fetch::build_client()?;
            let titles = toc::fetch_toc(&client, &cfg.page_url(book_id, 1)).await;
            if titles.is_empty() {
                return Err(error::ScrapeError::EmptyToc.into());
            }
            for (i, title) in titles.iter().enumerate() {
                println!("{:>4}  {}", i, title);
            }
            println!("\n{} titles", titles.len());
            Ok(())
        }
        Commands::Scrape {
            book_id,
            format,
            max_pages,
            retries,
            delay,
            out,
        } => {
            let cfg = Config::new(retries, delay, max_pages, out);
            let stats = scrape::scrape_book(&cfg, book_id, format).await?;
            println!(
                "Done: {} pages scraped, {} chapter files written.",
                stats.pages, stats.chapters
            );
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
