//! BM25 lexical search over a prepared tourism/culinary dataset.
//!
//! The ranking core ([`bm25`]) consumes pre-tokenized documents and queries;
//! turning raw text into tokens is the job of the [`normalize`] boundary.
//! [`dataset`] holds the record types and JSON I/O shared by the preparer
//! and the server, and [`present`] turns ranked indices back into display
//! records (relevance filter, highlighting, province grouping).

pub mod bm25;
pub mod dataset;
pub mod normalize;
pub mod present;

pub use bm25::{Bm25, Bm25Params, TermContribution};
pub use dataset::{Category, DocRecord};
pub use normalize::{Normalizer, SnowballNormalizer};
