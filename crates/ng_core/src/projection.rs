use crate::types::{Record, ResultSet};

/// Pair every row with the column names, producing one [`Record`] per row.
///
/// Keys keep the column order of the result schema and NULLs stay in place
/// as `Value::Null`. An empty result yields an empty vector.
pub fn project(result: ResultSet) -> Vec<Record> {
    let ResultSet { columns, rows } = result;

    rows.into_iter()
        .map(|row| {
            debug_assert_eq!(columns.len(), row.len(), "row width differs from column count");
            columns.iter().cloned().zip(row).collect()
        })
        .collect()
}
