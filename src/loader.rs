use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use tokio::runtime::Runtime;
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::domain::ETError;
use crate::record::Record;

/// Where the record set is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl FromStr for DataSource {
    type Err = ETError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ETError::InvalidConfig("record source must not be empty".into()));
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            return Ok(DataSource::Url(s.to_string()));
        }
        let expanded = shellexpand::full(s)
            .map_err(|e| ETError::InvalidConfig(format!("cannot expand {s}: {e}")))?;
        Ok(DataSource::File(PathBuf::from(expanded.into_owned())))
    }
}

pub type LoadResult = Result<Vec<Record>, ETError>;

/// Reads the full record set once. Any failure (transport, status, body) fails the whole load.
pub async fn load_records(source: &DataSource) -> LoadResult {
    let start_time = Instant::now();
    let records: Vec<Record> = match source {
        DataSource::Url(url) => {
            debug!("GET {url}");
            reqwest::Client::new()
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .json::<Vec<Record>>()
                .await?
        }
        DataSource::File(path) => {
            debug!("Reading {}", path.display());
            let bytes = tokio::fs::read(path).await?;
            serde_json::from_slice(&bytes)?
        }
    };
    info!(
        "Loaded {} records in {}ms ...",
        records.len(),
        start_time.elapsed().as_millis()
    );
    Ok(records)
}

/// Starts the load in the background; the receiver resolves once it finished.
pub fn spawn_load(runtime: &Runtime, source: DataSource) -> oneshot::Receiver<LoadResult> {
    let (tx, rx) = oneshot::channel();
    runtime.spawn(async move {
        let result = load_records(&source).await;
        // The receiver is gone when the user quit before the load finished.
        let _ = tx.send(result);
    });
    rx
}
