use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use ng_core::{fetch_records, Query, RecordStore, DEFAULT_NGRAM_LIMIT};
use ng_storage::SqliteStore;
use ng_web::{create_app, AppState};
use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn, Level};

mod logging;

#[derive(Parser, Debug)]
#[command(author, version, about = "Serve news articles and their n-grams as JSON", long_about = None)]
pub struct Cli {
    /// Maximum log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    log_level: Level,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct StoreArgs {
    /// SQLite database holding the `articles` and `ngrams` tables
    #[arg(long, default_value = "articles_data.db")]
    database: PathBuf,
    /// Maximum number of rows returned for ngrams
    #[arg(long, default_value_t = DEFAULT_NGRAM_LIMIT)]
    ngram_limit: u32,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[command(flatten)]
        store: StoreArgs,
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:5000")]
        bind: SocketAddr,
    },
    /// Print one dataset as a JSON array and exit
    Dump {
        #[arg(value_enum)]
        dataset: Dataset,
        #[command(flatten)]
        store: StoreArgs,
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Dataset {
    Articles,
    Ngrams,
}

impl Dataset {
    fn query(self, ngram_limit: u32) -> Query {
        match self {
            Dataset::Articles => Query::articles(),
            Dataset::Ngrams => Query::ngrams(ngram_limit),
        }
    }
}

async fn serve(store: StoreArgs, bind: SocketAddr) -> Result<()> {
    if !store.database.exists() {
        warn!("⚠️ Database {} not found, requests will fail until it exists", store.database.display());
    }

    let sqlite = SqliteStore::new(&store.database);
    let source = sqlite.describe();
    let state = AppState::new(Arc::new(sqlite)).with_ngram_limit(store.ngram_limit);

    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    info!("🚀 Serving {} on http://{}", source, listener.local_addr()?);

    ng_web::serve(listener, create_app(state), shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => {
            warn!("Failed to listen for Ctrl-C, running until killed: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

async fn dump(dataset: Dataset, store: &StoreArgs, pretty: bool, out: &mut impl Write) -> Result<()> {
    let sqlite = SqliteStore::new(&store.database);
    let records = fetch_records(&sqlite, &dataset.query(store.ngram_limit))
        .await
        .with_context(|| format!("Failed to read {:?} from {}", dataset, store.database.display()))?;
    info!("📦 {} records", records.len());

    if pretty {
        serde_json::to_writer_pretty(&mut *out, &records)?;
    } else {
        serde_json::to_writer(&mut *out, &records)?;
    }
    writeln!(out)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level);

    match cli.command {
        Commands::Serve { store, bind } => serve(store, bind).await,
        Commands::Dump { dataset, store, pretty } => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            dump(dataset, &store, pretty, &mut out).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ng_storage::fixtures::{self, sample_articles};
    use ng_core::Ngram;
    use tempfile::tempdir;

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["ng", "serve"]).unwrap();
        assert_eq!(cli.log_level, Level::INFO);
        match cli.command {
            Commands::Serve { store, bind } => {
                assert_eq!(store.database, PathBuf::from("articles_data.db"));
                assert_eq!(store.ngram_limit, 500_000);
                assert_eq!(bind, "127.0.0.1:5000".parse::<SocketAddr>().unwrap());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::try_parse_from([
            "ng",
            "serve",
            "--database",
            "/data/news.db",
            "--bind",
            "0.0.0.0:8080",
            "--ngram-limit",
            "1000",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.log_level, Level::DEBUG);
        match cli.command {
            Commands::Serve { store, bind } => {
                assert_eq!(store.database, PathBuf::from("/data/news.db"));
                assert_eq!(store.ngram_limit, 1000);
                assert_eq!(bind.port(), 8080);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_dataset() {
        assert!(Cli::try_parse_from(["ng", "dump", "authors"]).is_err());
        assert!(Cli::try_parse_from(["ng", "serve", "--ngram-limit", "-5"]).is_err());
    }

    #[tokio::test]
    async fn test_dump_writes_json_array() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("news.db");
        let ngrams = vec![Ngram {
            id: 1,
            article_id: 2,
            ngram_type: "unigram".to_string(),
            ngram_text: "storm".to_string(),
        }];
        fixtures::create_database(&db_path, &sample_articles(), &ngrams).await.unwrap();
        let store = StoreArgs {
            database: db_path,
            ngram_limit: DEFAULT_NGRAM_LIMIT,
        };

        let mut out = Vec::new();
        dump(Dataset::Articles, &store, false, &mut out).await.unwrap();
        let articles: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(articles.as_array().unwrap().len(), 2);

        let mut out = Vec::new();
        dump(Dataset::Ngrams, &store, true, &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\n  {"));
        let ngrams: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(ngrams[0]["headline"], "Storm hits coast");
    }

    #[tokio::test]
    async fn test_dump_fails_without_database() {
        let temp_dir = tempdir().unwrap();
        let store = StoreArgs {
            database: temp_dir.path().join("missing.db"),
            ngram_limit: DEFAULT_NGRAM_LIMIT,
        };

        let mut out = Vec::new();
        let err = dump(Dataset::Articles, &store, false, &mut out).await.unwrap_err();

        assert!(out.is_empty());
        assert!(matches!(
            err.downcast_ref::<ng_core::Error>(),
            Some(ng_core::Error::StoreUnavailable(_))
        ));
    }
}
