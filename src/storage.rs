use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::leads::repo_types::LeadRecord;

/// Append-only sink for accepted leads. There is no read, update or delete.
#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn append(&self, record: &LeadRecord) -> anyhow::Result<()>;
}

/// One JSON document per line, appended to a local file.
#[derive(Debug, Clone)]
pub struct JsonlFileStore {
    path: PathBuf,
}

impl JsonlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LeadStore for JsonlFileStore {
    async fn append(&self, record: &LeadRecord) -> anyhow::Result<()> {
        let mut line = serde_json::to_vec(record).context("serialize lead")?;
        line.push(b'\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("open {}", self.path.display()))?;
        // single write so concurrent appends interleave per line, not mid-line
        file.write_all(&line)
            .await
            .with_context(|| format!("append to {}", self.path.display()))?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_stores {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemoryStore {
        records: Mutex<Vec<LeadRecord>>,
    }

    impl MemoryStore {
        pub fn records(&self) -> Vec<LeadRecord> {
            self.records.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LeadStore for MemoryStore {
        async fn append(&self, record: &LeadRecord) -> anyhow::Result<()> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    pub struct FailingStore;

    #[async_trait]
    impl LeadStore for FailingStore {
        async fn append(&self, _record: &LeadRecord) -> anyhow::Result<()> {
            anyhow::bail!("store is read-only")
        }
    }
}
