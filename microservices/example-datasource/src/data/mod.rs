//! Table data services
//!
//! The request handler only sees the [`DataService`] trait; this module also
//! provides the in-memory services backed by generated sample data.

pub mod generator;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use dvt_core::Result;

use crate::records::Record;

pub use generator::SampleDataGenerator;

/// Paged read access to the records of one table
#[async_trait]
pub trait DataService: Send + Sync {
    /// Up to `limit` records starting at `offset`, in the service's stable order
    async fn get_page(&self, offset: usize, limit: usize) -> Result<Vec<Record>>;

    /// Total number of records in the table
    async fn count(&self) -> Result<u64>;
}

/// Data services keyed by table name
pub type DataServices = HashMap<String, Arc<dyn DataService>>;

/// Data service over a fixed, ordered set of records
#[derive(Debug, Clone)]
pub struct InMemoryDataService {
    records: Arc<Vec<Record>>,
}

impl InMemoryDataService {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }
}

#[async_trait]
impl DataService for InMemoryDataService {
    async fn get_page(&self, offset: usize, limit: usize) -> Result<Vec<Record>> {
        Ok(self.records.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.records.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> InMemoryDataService {
        let data = SampleDataGenerator::new(7).generate(5, 0, 0);
        InMemoryDataService::new(data.users.into_iter().map(Record::from).collect())
    }

    #[tokio::test]
    async fn test_paging() {
        let service = service();

        assert_eq!(service.count().await.unwrap(), 5);
        assert_eq!(service.get_page(0, 2).await.unwrap().len(), 2);
        assert_eq!(service.get_page(4, 10).await.unwrap().len(), 1);
        assert_eq!(service.get_page(0, 0).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_offset_past_end_is_empty() {
        let service = service();
        assert!(service.get_page(5, 10).await.unwrap().is_empty());
        assert!(service.get_page(usize::MAX, usize::MAX).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pages_are_stable() {
        let service = service();
        let whole = service.get_page(0, 5).await.unwrap();
        let tail = service.get_page(2, 3).await.unwrap();
        assert_eq!(&whole[2..], &tail[..]);
        assert_eq!(service.first(), whole.first());
    }
}
