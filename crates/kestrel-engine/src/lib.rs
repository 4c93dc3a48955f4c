//! Search and evaluation for kestrel.

pub mod config;
pub mod error;
pub mod eval;
pub mod search;

pub use config::SearchConfig;
pub use error::SearchError;
pub use eval::{evaluate, evaluate_white};
pub use search::negamax::{INF, MATE_SCORE, MATE_THRESHOLD};
pub use search::{Engine, IterationInfo, SearchResult};
