use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};
use tracing::info;

use crate::text::{normalize_title, remove_diacritics};

static CONTENT_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.nass.margin-top-10").unwrap());
static P_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

/// One parsed content page: rendered paragraph strings plus the chapter
/// cursor after scanning them.
#[derive(Debug, Clone)]
pub struct PageScan {
    /// Per-paragraph rendered text, in page order.
    pub paragraphs: Vec<String>,
    /// Cursor after this page; equal to the incoming index when no boundary
    /// was found.
    pub next_index: usize,
    /// Paragraph offset of the last boundary match on this page (0 if none).
    /// Only the last match's offset survives when a page holds several
    /// boundaries; intermediate chapters on such a page are folded together.
    pub split_at: usize,
}

/// Scan one page's HTML for the next expected chapter title.
///
/// Returns `None` when the content block is absent, which is the site-side
/// end-of-book signal, distinct from "no match on this page".
///
/// Span runs are the only boundary candidates: their diacritic-stripped text
/// is compared against the normalized next expected title, then appended
/// quote-wrapped so headings stay distinguishable from narrative prose in the
/// output. Non-span runs are stripped and appended as-is. The matched heading
/// paragraph is appended after the match check, so it opens the new chapter's
/// text rather than closing the old one.
pub fn scan_page(html: &str, titles: &[String], index: usize) -> Option<PageScan> {
    let doc = Html::parse_document(html);
    let container = doc.select(&CONTENT_SEL).next()?;

    let mut paragraphs = Vec::new();
    let mut next_index = index;
    let mut split_at = 0;

    for p in container.select(&P_SEL) {
        let mut fragments: Vec<String> = Vec::new();

        for child in p.children() {
            match child.value() {
                Node::Text(t) => {
                    let text = remove_diacritics(t);
                    if !text.is_empty() {
                        fragments.push(text);
                    }
                }
                Node::Element(el) => {
                    let Some(element) = ElementRef::wrap(child) else {
                        continue;
                    };
                    let text = remove_diacritics(&element.text().collect::<String>());
                    if text.is_empty() {
                        continue;
                    }
                    if el.name() == "span" {
                        // Once every title has been matched there is nothing
                        // left to compare against; keep rendering only.
                        if next_index < titles.len() && text == normalize_title(&titles[next_index])
                        {
                            split_at = paragraphs.len();
                            info!("Match found: {} vs \"{}\"", text, titles[next_index]);
                            next_index += 1;
                        }
                        fragments.push(format!("\"{text}\""));
                    } else {
                        fragments.push(text);
                    }
                }
                _ => {}
            }
        }

        paragraphs.push(fragments.join(" "));
    }

    Some(PageScan {
        paragraphs,
        next_index,
        split_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn content(paragraphs: &str) -> String {
        format!(r#"<html><body><div class="nass margin-top-10">{paragraphs}</div></body></html>"#)
    }

    #[test]
    fn missing_content_block_is_end_of_book() {
        let t = titles(&["Book", "One"]);
        assert!(scan_page("<html><body><p>bare</p></body></html>", &t, 1).is_none());
    }

    #[test]
    fn no_match_leaves_cursor_alone() {
        let t = titles(&["Book", "One"]);
        let html = content("<p>prose line</p><p>more prose</p>");
        let scan = scan_page(&html, &t, 1).unwrap();
        assert_eq!(scan.next_index, 1);
        assert_eq!(scan.split_at, 0);
        assert_eq!(scan.paragraphs, vec!["prose line", "more prose"]);
    }

    #[test]
    fn span_match_advances_cursor_and_records_offset() {
        let t = titles(&["Book", "One"]);
        let html = content("<p>before</p><p><span>One</span></p><p>after</p>");
        let scan = scan_page(&html, &t, 1).unwrap();
        assert_eq!(scan.next_index, 2);
        assert_eq!(scan.split_at, 1);
        // the heading paragraph itself is rendered, quoted, after the check
        assert_eq!(scan.paragraphs, vec!["before", "\"One\"", "after"]);
    }

    #[test]
    fn diacritics_and_leading_hyphen_still_match() {
        let t = titles(&["الكتاب", "- بَابُ الصَّلَاةِ"]);
        let html = content("<p><span>باب الصلاة</span></p>");
        let scan = scan_page(&html, &t, 1).unwrap();
        assert_eq!(scan.next_index, 2);
    }

    #[test]
    fn other_character_difference_does_not_match() {
        let t = titles(&["Book", "Chapter One"]);
        let html = content("<p><span>Chapter One!</span></p>");
        let scan = scan_page(&html, &t, 1).unwrap();
        assert_eq!(scan.next_index, 1);
    }

    #[test]
    fn non_span_text_never_matches() {
        let t = titles(&["Book", "One"]);
        let html = content("<p>One</p>");
        let scan = scan_page(&html, &t, 1).unwrap();
        assert_eq!(scan.next_index, 1);
    }

    #[test]
    fn mixed_runs_join_with_spaces() {
        let t = titles(&["Book", "One"]);
        let html = content("<p>said: <span>quoted words</span> then more</p>");
        let scan = scan_page(&html, &t, 1).unwrap();
        assert_eq!(scan.paragraphs, vec!["said: \"quoted words\" then more"]);
    }

    #[test]
    fn last_match_wins_on_multi_boundary_page() {
        let t = titles(&["Book", "One", "Two"]);
        let html = content("<p><span>One</span></p><p>mid</p><p><span>Two</span></p>");
        let scan = scan_page(&html, &t, 1).unwrap();
        assert_eq!(scan.next_index, 3);
        assert_eq!(scan.split_at, 2);
    }

    #[test]
    fn matching_stops_once_titles_exhausted() {
        let t = titles(&["Book", "One"]);
        let html = content("<p><span>One</span></p><p><span>One</span></p>");
        let scan = scan_page(&html, &t, 1).unwrap();
        // second occurrence scans against nothing; no panic, no advance
        assert_eq!(scan.next_index, 2);
        assert_eq!(scan.split_at, 0);
    }

    #[test]
    fn empty_spans_are_dropped() {
        let t = titles(&["Book", "One"]);
        let html = content("<p><span></span>text</p>");
        let scan = scan_page(&html, &t, 1).unwrap();
        assert_eq!(scan.paragraphs, vec!["text"]);
    }
}
