//! Index data model and boolean query engine shared by the indexer and querier.

pub mod error;
pub mod eval;
pub mod index;
pub mod pagedir;
pub mod persist;
pub mod postings;
pub mod query;
pub mod rank;
pub mod tokenizer;

pub use error::{LoadError, PageDirError, QueryError};
pub use index::InvertedIndex;
pub use pagedir::{Page, PageDir, PageSource};
pub use postings::{DocId, PostingList};
pub use query::Query;
pub use rank::{Hit, Ranked};
