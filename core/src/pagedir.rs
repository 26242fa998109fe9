//! The crawler's page directory: a `.crawler` marker plus one file per page
//! named by docID, holding the URL, the crawl depth, then the HTML.

use crate::error::PageDirError;
use crate::postings::DocId;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

const MARKER: &str = ".crawler";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub url: String,
    pub depth: u32,
    pub html: String,
}

/// Resolves a document to its URL.
pub trait PageSource {
    fn url_of(&self, doc_id: DocId) -> Option<String>;
}

#[derive(Debug, Clone)]
pub struct PageDir {
    root: PathBuf,
}

impl PageDir {
    /// Creates `root` if needed and marks it as a crawler directory.
    pub fn init<P: AsRef<Path>>(root: P) -> Result<PageDir, PageDirError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        File::create(root.join(MARKER))?;
        Ok(PageDir { root })
    }

    /// Opens an existing crawler directory.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<PageDir, PageDirError> {
        let root = root.as_ref().to_path_buf();
        if !root.join(MARKER).is_file() {
            return Err(PageDirError::NotCrawlerDirectory(root));
        }
        Ok(PageDir { root })
    }

    pub fn root(&self) -> &Path { &self.root }

    fn page_path(&self, doc_id: DocId) -> PathBuf { self.root.join(doc_id.to_string()) }

    pub fn save_page(&self, doc_id: DocId, page: &Page) -> std::io::Result<()> {
        let mut w = BufWriter::new(File::create(self.page_path(doc_id))?);
        writeln!(w, "{}", page.url)?;
        writeln!(w, "{}", page.depth)?;
        writeln!(w, "{}", page.html)?;
        w.flush()
    }

    /// Loads a page; `Ok(None)` when no file exists for `doc_id`.
    pub fn load_page(&self, doc_id: DocId) -> std::io::Result<Option<Page>> {
        let f = match File::open(self.page_path(doc_id)) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        let mut reader = BufReader::new(f);

        let mut url = String::new();
        reader.read_line(&mut url)?;
        let mut depth_line = String::new();
        reader.read_line(&mut depth_line)?;
        let depth = depth_line.trim().parse::<u32>().map_err(|_| {
            std::io::Error::new(ErrorKind::InvalidData, format!("page {doc_id}: bad depth line {:?}", depth_line.trim()))
        })?;
        let mut html = String::new();
        reader.read_to_string(&mut html)?;
        if html.ends_with('\n') {
            html.pop();
        }

        Ok(Some(Page { url: url.trim_end().to_string(), depth, html }))
    }

    /// Length of the contiguous run of page files starting at docID 1.
    pub fn count_pages(&self) -> DocId {
        let mut n = 0;
        while self.page_path(n + 1).is_file() {
            n += 1;
        }
        n
    }
}

impl PageSource for PageDir {
    fn url_of(&self, doc_id: DocId) -> Option<String> {
        match self.load_page(doc_id) {
            Ok(Some(page)) => Some(page.url),
            Ok(None) => {
                tracing::debug!(doc_id, root = %self.root.display(), "no page file");
                None
            }
            Err(e) => {
                tracing::warn!(doc_id, error = %e, "failed to load page");
                None
            }
        }
    }
}

impl PageSource for HashMap<DocId, String> {
    fn url_of(&self, doc_id: DocId) -> Option<String> {
        self.get(&doc_id).cloned()
    }
}
