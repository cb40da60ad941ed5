use binlight_storage::{
    AddressQuery, BinRecord, BinStore, ControllerRecord, ControllerStore, InMemoryInventory,
    PartLocationRecord, PartLocationStore, PartRecord, PartStore,
};
use domain::LedAddress;

async fn seeded() -> InMemoryInventory {
    let store = InMemoryInventory::new();
    store
        .create_controller(ControllerRecord::new("ctrl-1", "Rack A", "10.0.0.1"))
        .await
        .expect("controller");
    for (bin_id, name, index) in [("bin-1", "A1", 0), ("bin-2", "A2", 1), ("bin-3", "A3", 2)] {
        store
            .create_bin(BinRecord::new(bin_id, name, "ctrl-1", 0, index))
            .await
            .expect("bin");
    }
    for (part_id, tracked) in [("part-1", true), ("part-2", false)] {
        store
            .create_part(PartRecord {
                part_id: part_id.to_string(),
                name: part_id.to_string(),
                min_stock: 5,
                reorder_point: 10,
                stock_tracking_enabled: tracked,
            })
            .await
            .expect("part");
    }
    for (location_id, part_id, bin_id, quantity) in [
        ("loc-1", "part-1", "bin-1", 3),
        ("loc-2", "part-1", "bin-2", 0),
        ("loc-3", "part-2", "bin-3", 7),
    ] {
        store
            .create_part_location(PartLocationRecord {
                location_id: location_id.to_string(),
                part_id: part_id.to_string(),
                bin_id: bin_id.to_string(),
                quantity,
            })
            .await
            .expect("location");
    }
    store
}

#[tokio::test]
async fn locate_addresses_skip_empty_bins() {
    let store = seeded().await;
    let lit = store.part_addresses("part-1", true).await.expect("locate");
    assert_eq!(lit, vec![LedAddress::new("10.0.0.1", 0, 0)]);

    let all = store.part_addresses("part-1", false).await.expect("stop");
    assert_eq!(all.len(), 2);
    assert!(lit.iter().all(|address| all.contains(address)));

    assert!(store.part_addresses("part-9", false).await.expect("none").is_empty());
}

#[tokio::test]
async fn all_bin_addresses_cover_every_bin() {
    let store = seeded().await;
    let addresses = store.all_bin_addresses().await.expect("all");
    assert_eq!(addresses.len(), 3);
    assert_eq!(addresses[2], LedAddress::new("10.0.0.1", 0, 2));
}

#[tokio::test]
async fn dashboard_rows_only_include_tracked_parts() {
    let store = seeded().await;
    let rows = store.dashboard_rows().await.expect("rows");
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.min_stock == 5 && row.reorder_point == 10));
    assert_eq!(rows[0].quantity, 3);
    assert_eq!(rows[1].address, LedAddress::new("10.0.0.1", 0, 1));
}
