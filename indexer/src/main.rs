use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scraper::Html;
use tse_core::tokenizer::page_words;
use tse_core::{DocId, InvertedIndex, Page, PageDir};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build a word -> document index from a crawler page directory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from a crawler page directory
    Build {
        /// Crawler page directory (must contain a .crawler marker)
        #[arg(long)]
        pages: String,
        /// Output index file
        #[arg(long)]
        output: String,
    },
    /// Load an index file and write it back out, to check that it round-trips
    Verify {
        /// Existing index file
        #[arg(long)]
        input: String,
        /// Where to write the reloaded index
        #[arg(long)]
        output: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { pages, output } => build_index(&pages, &output),
        Commands::Verify { input, output } => verify_index(&input, &output),
    }
}

fn build_index(pages: &str, output: &str) -> Result<()> {
    let page_dir = PageDir::open(pages)?;
    let index = index_pages(&page_dir)?;
    index.save(output).with_context(|| format!("writing index to {output}"))?;
    tracing::info!(output, num_words = index.num_words(), "index build complete");
    Ok(())
}

fn verify_index(input: &str, output: &str) -> Result<()> {
    let index = InvertedIndex::load(input)?;
    index.save(output).with_context(|| format!("writing index to {output}"))?;
    tracing::info!(input, output, num_words = index.num_words(), "index rewritten");
    Ok(())
}

fn index_pages(page_dir: &PageDir) -> Result<InvertedIndex> {
    let num_docs = page_dir.count_pages();
    let mut index = InvertedIndex::new();
    for doc_id in 1..=num_docs {
        let page = page_dir
            .load_page(doc_id)
            .with_context(|| format!("loading page {doc_id} from {}", page_dir.root().display()))?;
        match page {
            Some(page) => index_page(&mut index, doc_id, &page),
            None => break,
        }
    }
    tracing::info!(num_docs, num_words = index.num_words(), "ingested pages");
    Ok(index)
}

fn index_page(index: &mut InvertedIndex, doc_id: DocId, page: &Page) {
    let text = visible_text(&page.html);
    let mut n = 0usize;
    for word in page_words(&text) {
        index.insert_occurrence(&word, doc_id);
        n += 1;
    }
    tracing::debug!(doc_id, url = %page.url, words = n, "indexed page");
}

/// Text nodes of the document, each followed by a space so adjacent nodes don't fuse.
fn visible_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let mut text = String::with_capacity(html.len());
    for t in doc.root_element().text() {
        text.push_str(t);
        text.push(' ');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn page(url: &str, html: &str) -> Page {
        Page { url: url.into(), depth: 0, html: html.into() }
    }

    #[test]
    fn text_skips_markup() {
        let t = visible_text("<html><head><title>Cats</title></head><body><p>dog<b>house</b></p></body></html>");
        let words: Vec<String> = page_words(&t).collect();
        assert_eq!(words, vec!["cats", "dog", "house"]);
    }

    #[test]
    fn indexes_every_contiguous_page() {
        let dir = tempdir().unwrap();
        let pd = PageDir::init(dir.path()).unwrap();
        pd.save_page(1, &page("http://a/", "<p>Cat cat dog</p>")).unwrap();
        pd.save_page(2, &page("http://b/", "<p>dog an ox</p>")).unwrap();
        pd.save_page(4, &page("http://d/", "<p>unreachable</p>")).unwrap();

        let idx = index_pages(&pd).unwrap();
        assert_eq!(idx.lookup("cat").unwrap().get(1), 2);
        assert_eq!(idx.lookup("dog").unwrap().get(1), 1);
        assert_eq!(idx.lookup("dog").unwrap().get(2), 1);
        assert!(idx.lookup("an").is_none());
        assert!(idx.lookup("unreachable").is_none());
    }

    #[test]
    fn build_then_verify_round_trips() {
        let dir = tempdir().unwrap();
        let pages = dir.path().join("pages");
        let pd = PageDir::init(&pages).unwrap();
        pd.save_page(1, &page("http://a/", "<body>alpha beta beta</body>")).unwrap();

        let first = dir.path().join("index");
        let second = dir.path().join("index.copy");
        build_index(pages.to_str().unwrap(), first.to_str().unwrap()).unwrap();
        verify_index(first.to_str().unwrap(), second.to_str().unwrap()).unwrap();

        let a = std::fs::read_to_string(&first).unwrap();
        assert_eq!(a, "alpha 1 1\nbeta 1 2\n");
        assert_eq!(a, std::fs::read_to_string(&second).unwrap());
    }

    #[test]
    fn build_rejects_unmarked_directory() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("index");
        assert!(build_index(dir.path().to_str().unwrap(), out.to_str().unwrap()).is_err());
    }
}
