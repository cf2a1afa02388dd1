pub mod access_path;
pub mod config;
pub mod document;
pub mod errors;
pub mod executor;
pub mod logging;
pub mod ranking;

pub use document::{Chunk, Document, Match, NamedScore};
pub use errors::RankerError;
pub use executor::{dispatch, Executor, Parameters, SEARCH_ENDPOINT};
pub use ranking::{Ranker, RankingPolicy};
