use std::mem;

use crate::page::PageScan;

/// One completed chapter, ready for the output boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub title: String,
    pub text: String,
}

/// Accumulates page text into per-chapter chunks.
///
/// Holds the chapter cursor (1-based; title 0 is the book's own front-matter
/// title, so the first boundary match is against title index 1) and the text
/// buffer for the chapter currently being written. A chunk is emitted exactly
/// when a page moved the cursor, plus one terminal chunk at end of stream.
pub struct Chunker {
    titles: Vec<String>,
    index: usize,
    buffer: String,
}

impl Chunker {
    /// `titles` must be non-empty; the driver aborts on an empty TOC before
    /// constructing a Chunker.
    pub fn new(titles: Vec<String>) -> Self {
        Chunker {
            titles,
            index: 1,
            buffer: String::new(),
        }
    }

    /// Current 1-based chapter cursor.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The full TOC, in canonical chapter order.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Fold one scanned page into the buffer. Returns the completed chapter
    /// when the page carried a boundary.
    ///
    /// On a boundary the pre-split paragraphs close the old chapter and the
    /// remainder (which starts with the matched heading paragraph) seeds the
    /// new one. The remainder carries no trailing newline, so the next page's
    /// first paragraph concatenates directly onto it.
    pub fn push_page(&mut self, scan: &PageScan) -> Option<Chunk> {
        if scan.next_index != self.index {
            self.buffer.push_str(&scan.paragraphs[..scan.split_at].join("\n"));
            self.buffer.push('\n');
            let chunk = Chunk {
                title: self.titles[self.index - 1].clone(),
                text: mem::take(&mut self.buffer),
            };
            self.index = scan.next_index;
            self.buffer = scan.paragraphs[scan.split_at..].join("\n");
            Some(chunk)
        } else {
            self.buffer.push_str(&scan.paragraphs.join("\n"));
            self.buffer.push('\n');
            None
        }
    }

    /// Terminal flush: whatever accumulated since the last boundary belongs
    /// to the last chapter reached.
    pub fn finish(self) -> Option<Chunk> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(Chunk {
                title: self.titles[self.index - 1].clone(),
                text: self.buffer,
            })
        }
    }
}
