pub mod error;
pub mod models;
pub mod projection;
pub mod query;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use models::{Article, Ngram, NgramView};
pub use projection::project;
pub use query::{fetch_records, Query, DEFAULT_NGRAM_LIMIT};
pub use storage::RecordStore;
pub use types::{Param, Record, ResultSet};
