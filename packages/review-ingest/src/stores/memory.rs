//! In-memory dataset sink for testing and development.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::error::{StorageError, StorageResult};
use crate::traits::sink::{DatasetKey, DatasetLocation, DatasetSink};
use crate::types::record::SourceRecord;
use crate::types::request::bank_slug;

/// A dataset held by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDataset {
    pub key: DatasetKey,
    pub location: DatasetLocation,
    pub records: Vec<SourceRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailMode {
    Never,
    Always,
    CampaignOnly,
}

/// In-memory dataset sink.
///
/// Locations look like `memory://bank/{slug}/{n}` and `memory://campaign/{n}`
/// where `n` counts writes. Clones share state. Not suitable for production
/// as data is lost on exit.
#[derive(Clone)]
pub struct MemoryStore {
    datasets: Arc<RwLock<Vec<StoredDataset>>>,
    fail: FailMode,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self {
            datasets: Arc::new(RwLock::new(Vec::new())),
            fail: FailMode::Never,
        }
    }

    /// A store whose every write fails.
    pub fn failing() -> Self {
        Self {
            fail: FailMode::Always,
            ..Self::new()
        }
    }

    /// A store that accepts bank datasets but fails campaign writes.
    pub fn failing_on_campaign() -> Self {
        Self {
            fail: FailMode::CampaignOnly,
            ..Self::new()
        }
    }

    /// All datasets written so far, in write order.
    pub fn datasets(&self) -> Vec<StoredDataset> {
        self.datasets.read().unwrap().clone()
    }

    /// Records stored at `location`.
    pub fn get(&self, location: &DatasetLocation) -> Option<Vec<SourceRecord>> {
        self.datasets
            .read()
            .unwrap()
            .iter()
            .find(|d| &d.location == location)
            .map(|d| d.records.clone())
    }

    /// Get the number of stored datasets.
    pub fn dataset_count(&self) -> usize {
        self.datasets.read().unwrap().len()
    }

    /// Number of stored campaign datasets.
    pub fn campaign_count(&self) -> usize {
        self.datasets
            .read()
            .unwrap()
            .iter()
            .filter(|d| d.key == DatasetKey::Campaign)
            .count()
    }
}

#[async_trait]
impl DatasetSink for MemoryStore {
    async fn persist(
        &self,
        key: &DatasetKey,
        records: &[SourceRecord],
    ) -> StorageResult<DatasetLocation> {
        let refuse = match self.fail {
            FailMode::Never => false,
            FailMode::Always => true,
            FailMode::CampaignOnly => *key == DatasetKey::Campaign,
        };
        if refuse {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "memory store configured to fail",
            )));
        }

        let mut datasets = self.datasets.write().unwrap();
        let n = datasets.len();
        let location = match key {
            DatasetKey::Bank(name) => {
                DatasetLocation::new(format!("memory://bank/{}/{}", bank_slug(name), n))
            }
            DatasetKey::Campaign => DatasetLocation::new(format!("memory://campaign/{}", n)),
        };

        datasets.push(StoredDataset {
            key: key.clone(),
            location: location.clone(),
            records: records.to_vec(),
        });
        Ok(location)
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record::Source;

    #[tokio::test]
    async fn test_persist_and_get() {
        let store = MemoryStore::new();
        let records = vec![SourceRecord::new(Source::Apple).with_bank("NBO")];

        let location = store
            .persist(&DatasetKey::Bank("NBO".into()), &records)
            .await
            .unwrap();

        assert_eq!(location.as_str(), "memory://bank/nbo/0");
        assert_eq!(store.get(&location), Some(records));
        assert_eq!(store.dataset_count(), 1);
        assert_eq!(store.campaign_count(), 0);
    }

    #[tokio::test]
    async fn test_failing_on_campaign() {
        let store = MemoryStore::failing_on_campaign();

        assert!(store.persist(&DatasetKey::Bank("NBO".into()), &[]).await.is_ok());
        assert!(store.persist(&DatasetKey::Campaign, &[]).await.is_err());
        assert_eq!(store.dataset_count(), 1);

        let datasets = store.datasets();
        assert_eq!(datasets[0].key, DatasetKey::Bank("NBO".into()));
        assert_eq!(datasets[0].location.as_str(), "memory://bank/nbo/0");
        assert!(datasets[0].records.is_empty());
    }
}
