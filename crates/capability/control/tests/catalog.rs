mod common;

use binlight_control::BinCatalog;
use binlight_storage::{BinRecord, BinStore, BinUpdate, StorageError};
use common::Fixture;
use std::sync::Arc;

#[tokio::test]
async fn listing_flags_overlapping_addresses() {
    let fixture = Fixture::new().await;
    fixture.bin("bin-a", "ctrl-1", 0, 4).await;
    fixture.bin("bin-b", "ctrl-1", 0, 5).await;
    fixture.bin("bin-c", "ctrl-2", 0, 4).await;
    fixture
        .store
        .update_bin(
            "bin-b",
            BinUpdate {
                led_index: Some(4),
                ..BinUpdate::default()
            },
        )
        .await
        .expect("update")
        .expect("bin-b");

    let catalog = BinCatalog::new(fixture.store.clone());
    let bins = catalog.list_bins().await.expect("list");
    let overlapping: Vec<&str> = bins
        .iter()
        .filter(|item| item.has_overlap)
        .map(|item| item.bin.bin_id.as_str())
        .collect();
    assert_eq!(overlapping.len(), 2);
    assert!(overlapping.contains(&"bin-a"));
    assert!(overlapping.contains(&"bin-b"));
    assert!(bins.iter().all(|item| !item.is_orphaned));

    let single = catalog
        .find_bin("bin-a")
        .await
        .expect("find")
        .expect("bin-a");
    assert!(!single.has_overlap);
    assert!(catalog.find_bin("missing").await.expect("find").is_none());
}

/// 模拟外部数据不一致：料格引用的控制器已被删除。
struct DanglingBins;

#[async_trait::async_trait]
impl BinStore for DanglingBins {
    async fn list_bins(&self) -> Result<Vec<BinRecord>, StorageError> {
        Ok(vec![
            BinRecord::new("bin-1", "A1", "ctrl-gone", 0, 1),
            BinRecord::new("bin-2", "A2", "ctrl-gone", 0, 1),
        ])
    }

    async fn find_bin(&self, bin_id: &str) -> Result<Option<BinRecord>, StorageError> {
        Ok(Some(BinRecord::new(bin_id, bin_id, "ctrl-gone", 0, 1)))
    }

    async fn create_bin(&self, record: BinRecord) -> Result<BinRecord, StorageError> {
        Ok(record)
    }

    async fn create_bins(&self, records: Vec<BinRecord>) -> Result<Vec<BinRecord>, StorageError> {
        Ok(records)
    }

    async fn update_bin(
        &self,
        _bin_id: &str,
        _update: BinUpdate,
    ) -> Result<Option<BinRecord>, StorageError> {
        Ok(None)
    }

    async fn delete_bin(&self, _bin_id: &str) -> Result<bool, StorageError> {
        Ok(false)
    }

    async fn list_available_bins(&self, _part_id: &str) -> Result<Vec<BinRecord>, StorageError> {
        Ok(Vec::new())
    }

    async fn list_part_names_in_bin(&self, _bin_id: &str) -> Result<Vec<String>, StorageError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn orphans_are_flagged_but_never_overlapping() {
    let catalog = BinCatalog::new(Arc::new(DanglingBins));
    let bins = catalog.list_bins().await.expect("list");
    assert!(bins.iter().all(|item| item.is_orphaned && !item.has_overlap));

    let single = catalog.find_bin("bin-1").await.expect("find").expect("bin");
    assert!(single.is_orphaned);
}
