use async_trait::async_trait;
use crate::types::{Param, ResultSet};
use crate::Result;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Run `sql` with positional `params` and materialize every row.
    ///
    /// Implementations acquire their connection inside this call and release
    /// it before returning, whether the statement succeeded or not.
    async fn fetch(&self, sql: &str, params: &[Param]) -> Result<ResultSet>;

    /// Short human readable description of where the rows come from.
    fn describe(&self) -> String;
}
