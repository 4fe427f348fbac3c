use std::sync::LazyLock;

use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, warn};

static NAV_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.s-nav").unwrap());
static UL_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("ul").unwrap());
static A_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// Extract the ordered chapter titles from the book's landing page.
///
/// Titles come from the first `ul` inside `div.s-nav`, one per direct `li`
/// child. Items that embed a link icon before the real title link carry two
/// anchors; the last anchor is always the title. Returns raw trimmed titles;
/// normalization happens at comparison time.
pub fn extract_titles(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);

    let Some(nav) = doc.select(&NAV_SEL).next() else {
        warn!("s-nav div not found");
        return Vec::new();
    };
    let Some(list) = nav.select(&UL_SEL).next() else {
        warn!("chapter list not found inside s-nav");
        return Vec::new();
    };

    let mut titles = Vec::new();
    for child in list.children() {
        let Some(item) = ElementRef::wrap(child) else {
            continue;
        };
        if item.value().name() != "li" {
            continue;
        }
        let anchors: Vec<ElementRef> = item.select(&A_SEL).collect();
        if let Some(title_link) = anchors.last() {
            titles.push(title_link.text().collect::<String>().trim().to_string());
        }
    }

    info!("Extracted {} chapter titles", titles.len());
    titles
}

/// Fetch the landing page once and extract the TOC. Single attempt by design:
/// the TOC gates the whole run, so a failure here should abort immediately
/// rather than burn the retry budget. Any failure yields an empty list.
pub async fn fetch_toc(client: &Client, url: &str) -> Vec<String> {
    let body = match client.get(url).send().await {
        Ok(response) => match response.error_for_status() {
            Ok(response) => match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!("Error reading TOC page {}: {}", url, e);
                    return Vec::new();
                }
            },
            Err(e) => {
                warn!("Error fetching TOC page {}: {}", url, e);
                return Vec::new();
            }
        },
        Err(e) => {
            warn!("Error fetching TOC page {}: {}", url, e);
            return Vec::new();
        }
    };
    extract_titles(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOC_HTML: &str = r##"
        <html><body>
        <div class="s-nav">
          <ul>
            <li><a href="/book/1/1">مقدمة</a></li>
            <li><a class="icon" href="#"><i></i></a><a href="/book/1/5"> باب الصلاة </a></li>
            <li><a href="/book/1/9">- باب الزكاة</a></li>
          </ul>
        </div>
        </body></html>"##;

    #[test]
    fn titles_in_document_order() {
        let titles = extract_titles(TOC_HTML);
        assert_eq!(titles, vec!["مقدمة", "باب الصلاة", "- باب الزكاة"]);
    }

    #[test]
    fn last_anchor_wins_on_icon_items() {
        let titles = extract_titles(TOC_HTML);
        // the second item has an icon anchor first; the title link is last
        assert_eq!(titles[1], "باب الصلاة");
    }

    #[test]
    fn missing_nav_yields_empty() {
        assert!(extract_titles("<html><body><p>no nav here</p></body></html>").is_empty());
    }

    #[test]
    fn nav_without_list_yields_empty() {
        let html = r#"<div class="s-nav"><p>empty</p></div>"#;
        assert!(extract_titles(html).is_empty());
    }

    #[test]
    fn item_without_anchor_is_skipped() {
        let html = r#"<div class="s-nav"><ul><li>bare text</li><li><a>ch</a></li></ul></div>"#;
        assert_eq!(extract_titles(html), vec!["ch"]);
    }
}
