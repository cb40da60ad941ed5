use binlight_storage::{
    BinRecord, BinStore, BinUpdate, CategoryStore, ControllerRecord, ControllerStore,
    InMemoryInventory, PartLocationRecord, PartLocationStore, PartRecord, PartStore,
    StorageErrorKind,
};

fn part(part_id: &str, name: &str) -> PartRecord {
    PartRecord {
        part_id: part_id.to_string(),
        name: name.to_string(),
        min_stock: 5,
        reorder_point: 10,
        stock_tracking_enabled: true,
    }
}

fn location(location_id: &str, part_id: &str, bin_id: &str, quantity: i64) -> PartLocationRecord {
    PartLocationRecord {
        location_id: location_id.to_string(),
        part_id: part_id.to_string(),
        bin_id: bin_id.to_string(),
        quantity,
    }
}

async fn seeded() -> InMemoryInventory {
    let store = InMemoryInventory::new();
    store
        .create_controller(ControllerRecord::new("ctrl-1", "Rack A", "10.0.0.1"))
        .await
        .expect("controller");
    store
}

#[tokio::test]
async fn bin_name_is_unique_and_controller_must_exist() {
    let store = seeded().await;
    store
        .create_bin(BinRecord::new("bin-1", "A1", "ctrl-1", 0, 0))
        .await
        .expect("bin");
    let err = store
        .create_bin(BinRecord::new("bin-2", "A1", "ctrl-1", 0, 1))
        .await
        .expect_err("duplicate name");
    assert_eq!(err.kind(), StorageErrorKind::UniqueViolation);

    let err = store
        .create_bin(BinRecord::new("bin-3", "A3", "ctrl-9", 0, 1))
        .await
        .expect_err("missing controller");
    assert_eq!(err.kind(), StorageErrorKind::ForeignKeyViolation);

    let err = store
        .create_bin(BinRecord::new("bin-4", "A4", "ctrl-1", 0, -1))
        .await
        .expect_err("negative index");
    assert_eq!(err.kind(), StorageErrorKind::Invalid);
}

#[tokio::test]
async fn bins_list_with_controller_name_in_led_order() {
    let store = seeded().await;
    store
        .create_bin(BinRecord::new("bin-2", "A2", "ctrl-1", 0, 7))
        .await
        .expect("bin-2");
    store
        .create_bin(BinRecord::new("bin-1", "A1", "ctrl-1", 0, 3))
        .await
        .expect("bin-1");
    let bins = store.list_bins().await.expect("list");
    assert_eq!(bins.len(), 2);
    assert_eq!(bins[0].name, "A1");
    assert_eq!(bins[0].controller_name.as_deref(), Some("Rack A"));
}

#[tokio::test]
async fn bulk_create_is_atomic() {
    let store = seeded().await;
    store
        .create_bin(BinRecord::new("bin-x", "B2", "ctrl-1", 1, 99))
        .await
        .expect("existing");

    let records: Vec<BinRecord> = (0..4)
        .map(|i| BinRecord::new(format!("bulk-{i}"), format!("B{i}"), "ctrl-1", 1, i))
        .collect();
    let err = store.create_bins(records).await.expect_err("B2 taken");
    assert!(err.is_unique_violation());
    assert_eq!(store.list_bins().await.expect("list").len(), 1);

    let records: Vec<BinRecord> = (0..3)
        .map(|i| BinRecord::new(format!("bulk-{i}"), format!("C{i}"), "ctrl-1", 2, i))
        .collect();
    let created = store.create_bins(records).await.expect("bulk");
    assert_eq!(created.len(), 3);
    assert_eq!(created[2].name, "C2");
    assert_eq!(created[2].led_index, 2);
    assert_eq!(store.list_bins().await.expect("list").len(), 4);
}

#[tokio::test]
async fn update_bin_rejects_unknown_controller() {
    let store = seeded().await;
    store
        .create_bin(BinRecord::new("bin-1", "A1", "ctrl-1", 0, 0))
        .await
        .expect("bin");
    let err = store
        .update_bin(
            "bin-1",
            BinUpdate {
                controller_id: Some("ctrl-9".to_string()),
                ..BinUpdate::default()
            },
        )
        .await
        .expect_err("missing controller");
    assert!(err.is_foreign_key_violation());

    let updated = store
        .update_bin(
            "bin-1",
            BinUpdate {
                led_index: Some(12),
                ..BinUpdate::default()
            },
        )
        .await
        .expect("update")
        .expect("bin-1");
    assert_eq!(updated.led_index, 12);
    assert!(
        store
            .update_bin("missing", BinUpdate::default())
            .await
            .expect("update")
            .is_none()
    );
}

#[tokio::test]
async fn locations_drive_available_bins_and_part_names() {
    let store = seeded().await;
    store
        .create_bin(BinRecord::new("bin-1", "A1", "ctrl-1", 0, 0))
        .await
        .expect("bin-1");
    store
        .create_bin(BinRecord::new("bin-2", "A2", "ctrl-1", 0, 1))
        .await
        .expect("bin-2");
    store.create_part(part("part-1", "Resistor")).await.expect("part-1");
    store.create_part(part("part-2", "Capacitor")).await.expect("part-2");

    store
        .create_part_location(location("loc-1", "part-1", "bin-1", 4))
        .await
        .expect("loc-1");
    store
        .create_part_location(location("loc-2", "part-2", "bin-1", 0))
        .await
        .expect("loc-2");

    let err = store
        .create_part_location(location("loc-3", "part-1", "bin-1", -1))
        .await
        .expect_err("negative quantity");
    assert_eq!(err.kind(), StorageErrorKind::Invalid);
    let err = store
        .create_part_location(location("loc-4", "part-9", "bin-1", 1))
        .await
        .expect_err("missing part");
    assert!(err.is_foreign_key_violation());

    let available = store.list_available_bins("part-1").await.expect("available");
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].bin_id, "bin-2");

    let names = store.list_part_names_in_bin("bin-1").await.expect("names");
    assert_eq!(names, vec!["Resistor".to_string()]);

    let err = store.delete_bin("bin-1").await.expect_err("bin in use");
    assert!(err.is_foreign_key_violation());

    let updated = store
        .update_part_location_quantity("loc-2", 9)
        .await
        .expect("update")
        .expect("loc-2");
    assert_eq!(updated.quantity, 9);
    assert!(store.delete_part_location("loc-1").await.expect("delete"));
    assert!(store.delete_part_location("loc-2").await.expect("delete"));
    assert!(store.delete_bin("bin-1").await.expect("delete bin"));
}

#[tokio::test]
async fn cleanup_removes_only_unassigned_categories() {
    let store = seeded().await;
    store.create_part(part("part-1", "Resistor")).await.expect("part");
    let used = store.ensure_category("cat-1", "passive").await.expect("used");
    store.ensure_category("cat-2", "spare").await.expect("spare");
    let same = store.ensure_category("cat-3", "passive").await.expect("again");
    assert_eq!(same.category_id, "cat-1");

    store
        .assign_category("part-1", &used.category_id)
        .await
        .expect("assign");
    store
        .assign_category("part-1", &used.category_id)
        .await
        .expect("assign twice");

    let deleted = store.cleanup_orphaned_categories().await.expect("cleanup");
    assert_eq!(deleted, 1);
    let remaining = store.list_categories().await.expect("list");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "passive");

    assert!(store.remove_category("part-1", "cat-1").await.expect("remove"));
    assert_eq!(store.cleanup_orphaned_categories().await.expect("cleanup"), 1);
    assert_eq!(store.cleanup_orphaned_categories().await.expect("cleanup"), 0);
}
