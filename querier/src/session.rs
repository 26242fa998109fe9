//! Line-at-a-time interactive query session.

use std::io::{BufRead, Write};
use tse_core::eval::evaluate_query;
use tse_core::rank::{rank, render, resolve_urls};
use tse_core::{Hit, InvertedIndex, PageSource, Query};

const SEPARATOR: &str = "-----------------------------------------------";

/// What an empty input line does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum EmptyLinePolicy {
    /// Ignore the line and read the next query.
    #[default]
    Skip,
    /// End the session.
    Stop,
}

#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub on_empty: EmptyLinePolicy,
    /// Print a prompt before each query (for terminals).
    pub prompt: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub queries: usize,
    pub rejected: usize,
}

/// Evaluates `query`, returning the number of matching documents and the
/// first `limit` of them (all when `None`) with their URLs.
pub fn search<P: PageSource + ?Sized>(
    index: &InvertedIndex,
    pages: &P,
    query: &Query,
    limit: Option<usize>,
) -> (usize, Vec<Hit>) {
    let mut ranked = rank(&evaluate_query(index, query));
    let total = ranked.len();
    if let Some(k) = limit {
        ranked.truncate(k);
    }
    (total, resolve_urls(&ranked, pages))
}

/// Answers every query line of `input`, writing results to `out` and
/// rejected-query diagnostics to `diag`.
///
/// Malformed queries are reported and skipped; only I/O failures end the
/// session early. Bytes that are not valid UTF-8 are replaced, never fatal.
pub fn run_session<R, W, E, P>(
    index: &InvertedIndex,
    pages: &P,
    mut input: R,
    out: &mut W,
    diag: &mut E,
    config: &SessionConfig,
) -> std::io::Result<SessionStats>
where
    R: BufRead,
    W: Write,
    E: Write,
    P: PageSource + ?Sized,
{
    let mut stats = SessionStats::default();
    let mut buf = Vec::new();
    loop {
        if config.prompt {
            write!(out, "Query? ")?;
            out.flush()?;
        }
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if line.trim().is_empty() {
            match config.on_empty {
                EmptyLinePolicy::Skip => continue,
                EmptyLinePolicy::Stop => break,
            }
        }

        stats.queries += 1;
        let query = match Query::parse(&line) {
            Ok(q) => q,
            Err(e) => {
                stats.rejected += 1;
                tracing::debug!(line = %line.trim_end(), error = %e, "rejected query");
                writeln!(diag, "Error: {e}")?;
                diag.flush()?;
                continue;
            }
        };
        writeln!(out, "Query: {query}")?;
        let (_, hits) = search(index, pages, &query, None);
        render(&hits, out)?;
        writeln!(out, "{}", SEPARATOR)?;
    }
    if config.prompt {
        writeln!(out)?;
    }
    tracing::info!(queries = stats.queries, rejected = stats.rejected, "session finished");
    Ok(stats)
}
