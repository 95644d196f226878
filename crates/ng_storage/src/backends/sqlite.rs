use async_trait::async_trait;
use ng_core::{Error, Param, RecordStore, Result, ResultSet};
use serde_json::{Number, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Column, ConnectOptions, Connection, Executor, Row, Statement, TypeInfo, ValueRef};
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Read-only access to an SQLite database file.
///
/// No connection is kept between calls: every [`RecordStore::fetch`] opens its
/// own connection and closes it before returning.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn get_db_path(&self) -> &Path {
        &self.db_path
    }

    async fn connect(&self) -> Result<SqliteConnection> {
        SqliteConnectOptions::new()
            .filename(&self.db_path)
            .read_only(true)
            .create_if_missing(false)
            .connect()
            .await
            .map_err(|e| {
                Error::StoreUnavailable(format!(
                    "Failed to open database {}: {}",
                    self.db_path.display(),
                    e
                ))
            })
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn fetch(&self, sql: &str, params: &[Param]) -> Result<ResultSet> {
        let mut conn = self.connect().await.map_err(|e| {
            error!("{}", e);
            e
        })?;

        let result = run_query(&mut conn, sql, params).await;

        if let Err(e) = conn.close().await {
            warn!("Failed to close connection to {}: {}", self.db_path.display(), e);
        }

        match &result {
            Ok(set) => debug!("{} rows from {}", set.len(), self.db_path.display()),
            Err(e) => error!("{}", e),
        }
        result
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.db_path.display())
    }
}

async fn run_query(conn: &mut SqliteConnection, sql: &str, params: &[Param]) -> Result<ResultSet> {
    let statement = (&mut *conn)
        .prepare(sql)
        .await
        .map_err(|e| Error::Query(format!("Failed to prepare query: {}", e)))?;

    let columns = statement
        .columns()
        .iter()
        .map(|column| column.name().to_string())
        .collect::<Vec<_>>();

    let mut query = statement.query();
    for param in params {
        query = match param {
            Param::Null => query.bind(None::<i64>),
            Param::Integer(v) => query.bind(*v),
            Param::Real(v) => query.bind(*v),
            Param::Text(v) => query.bind(v.clone()),
        };
    }

    let rows = query
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| Error::Query(format!("Failed to execute query: {}", e)))?;

    let rows = rows
        .iter()
        .map(|row| (0..columns.len()).map(|i| decode_value(row, i)).collect::<Result<Vec<_>>>())
        .collect::<Result<Vec<Vec<Value>>>>()?;

    Ok(ResultSet::new(columns, rows))
}

/// Convert one cell to JSON according to the storage class of the stored value.
fn decode_value(row: &SqliteRow, index: usize) -> Result<Value> {
    let decode_error = |e: sqlx::Error| Error::Query(format!("Failed to decode column {}: {}", index, e));

    let raw = row.try_get_raw(index).map_err(decode_error)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let storage_class = raw.type_info().name().to_string();

    let value = match storage_class.as_str() {
        "INTEGER" | "BOOLEAN" => Value::from(row.try_get_unchecked::<i64, _>(index).map_err(decode_error)?),
        "REAL" | "NUMERIC" => {
            let v = row.try_get_unchecked::<f64, _>(index).map_err(decode_error)?;
            Number::from_f64(v).map_or(Value::Null, Value::Number)
        }
        "BLOB" => Value::from(row.try_get_unchecked::<Vec<u8>, _>(index).map_err(decode_error)?),
        _ => Value::String(row.try_get_unchecked::<String, _>(index).map_err(decode_error)?),
    };
    Ok(value)
}
