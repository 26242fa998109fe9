use crate::pagedir::PageSource;
use crate::postings::{DocId, PostingList};
use serde::Serialize;
use std::io::Write;

/// Shown in place of a URL when a page cannot be loaded.
pub const UNAVAILABLE_URL: &str = "<unavailable>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ranked {
    pub doc_id: DocId,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hit {
    pub doc_id: DocId,
    pub score: u32,
    pub url: String,
}

/// Orders scored documents by score descending, then docID ascending.
/// Zero scores are dropped.
pub fn rank(scores: &PostingList) -> Vec<Ranked> {
    let mut ranked: Vec<Ranked> = scores
        .iter()
        .filter(|&(_, score)| score > 0)
        .map(|(doc_id, score)| Ranked { doc_id, score })
        .collect();
    ranked.sort_unstable_by(|a, b| b.score.cmp(&a.score).then(a.doc_id.cmp(&b.doc_id)));
    ranked
}

/// Attaches a URL to each ranked document. Pages that cannot be loaded get
/// [`UNAVAILABLE_URL`]; resolution never fails as a whole.
pub fn resolve_urls<P: PageSource + ?Sized>(ranked: &[Ranked], pages: &P) -> Vec<Hit> {
    ranked
        .iter()
        .map(|r| {
            let url = pages.url_of(r.doc_id).unwrap_or_else(|| {
                tracing::warn!(doc_id = r.doc_id, "page unavailable");
                UNAVAILABLE_URL.to_string()
            });
            Hit { doc_id: r.doc_id, score: r.score, url }
        })
        .collect()
}

pub fn render<W: Write>(hits: &[Hit], out: &mut W) -> std::io::Result<()> {
    match hits.len() {
        0 => writeln!(out, "Matches 0 documents.")?,
        1 => writeln!(out, "Matches 1 document (ranked):")?,
        n => writeln!(out, "Matches {n} documents (ranked):")?,
    }
    for h in hits {
        writeln!(out, "score {:4} doc {:4}: {}", h.score, h.doc_id, h.url)?;
    }
    Ok(())
}
