use credence_store::{MemoryStore, StoreError, TabularStore};
use credence_types::TableName;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn header() -> Vec<Value> {
    vec![json!("Id"), json!("Name")]
}

#[test]
fn ensure_table_creates_with_header() {
    let store = MemoryStore::new("m1");
    let t = TableName::new("Providers");
    store.ensure_table(&t, header()).unwrap();
    let grid = store.list_rows(&t).unwrap();
    assert_eq!(grid, vec![header()]);
}

#[test]
fn ensure_table_is_idempotent() {
    let store = MemoryStore::new("m1");
    let t = TableName::new("Providers");
    store.ensure_table(&t, header()).unwrap();
    store.append_row(&t, vec![json!("p1"), json!("Ada")]).unwrap();
    // A second ensure with a different header must not clobber the table.
    store
        .ensure_table(&t, vec![json!("Id"), json!("Other")])
        .unwrap();
    let grid = store.list_rows(&t).unwrap();
    assert_eq!(grid.len(), 2);
    assert_eq!(grid[0], header());
}

#[test]
fn list_missing_table_errors() {
    let store = MemoryStore::new("m1");
    let err = store.list_rows(&TableName::new("Nope")).unwrap_err();
    assert!(matches!(err, StoreError::TableMissing(_)));
}

#[test]
fn append_adds_rows_in_order() {
    let store = MemoryStore::new("m1");
    let t = TableName::new("Providers");
    store.ensure_table(&t, header()).unwrap();
    store.append_row(&t, vec![json!("p1"), json!("Ada")]).unwrap();
    store.append_row(&t, vec![json!("p2"), json!("Grace")]).unwrap();
    let grid = store.list_rows(&t).unwrap();
    assert_eq!(grid[1][0], json!("p1"));
    assert_eq!(grid[2][0], json!("p2"));
}

#[test]
fn update_cells_overwrites_in_place() {
    let store = MemoryStore::new("m1");
    let t = TableName::new("Providers");
    store.ensure_table(&t, header()).unwrap();
    store.append_row(&t, vec![json!("p1"), json!("Ada")]).unwrap();
    store.update_cells(&t, 2, &[(1, json!("Lovelace"))]).unwrap();
    let grid = store.list_rows(&t).unwrap();
    assert_eq!(grid[1], vec![json!("p1"), json!("Lovelace")]);
}

#[test]
fn update_cells_widens_short_rows() {
    let store = MemoryStore::new("m1");
    let t = TableName::new("Providers");
    store.ensure_table(&t, header()).unwrap();
    store.append_row(&t, vec![json!("p1")]).unwrap();
    store.update_cells(&t, 2, &[(3, json!("x"))]).unwrap();
    let grid = store.list_rows(&t).unwrap();
    assert_eq!(grid[1].len(), 4);
    assert_eq!(grid[1][1], json!(""));
    assert_eq!(grid[1][3], json!("x"));
}

#[test]
fn update_cells_out_of_range() {
    let store = MemoryStore::new("m1");
    let t = TableName::new("Providers");
    store.ensure_table(&t, header()).unwrap();
    let err = store.update_cells(&t, 5, &[(0, json!("x"))]).unwrap_err();
    assert!(matches!(err, StoreError::RowOutOfRange { row: 5, .. }));
}

#[test]
fn delete_row_shifts_following_rows_up() {
    let store = MemoryStore::new("m1");
    let t = TableName::new("Providers");
    store.ensure_table(&t, header()).unwrap();
    store.append_row(&t, vec![json!("p1"), json!("Ada")]).unwrap();
    store.append_row(&t, vec![json!("p2"), json!("Grace")]).unwrap();
    store.delete_row(&t, 2).unwrap();
    let grid = store.list_rows(&t).unwrap();
    assert_eq!(grid.len(), 2);
    assert_eq!(grid[1][0], json!("p2"));
}

#[test]
fn delete_row_zero_is_out_of_range() {
    let store = MemoryStore::new("m1");
    let t = TableName::new("Providers");
    store.ensure_table(&t, header()).unwrap();
    let err = store.delete_row(&t, 0).unwrap_err();
    assert!(matches!(err, StoreError::RowOutOfRange { row: 0, .. }));
}

#[test]
fn store_id_is_stable() {
    let store = MemoryStore::new("m1");
    assert_eq!(store.store_id().as_str(), "m1");
}

#[test]
fn table_count_tracks_ensures() {
    let store = MemoryStore::new("m1");
    assert_eq!(store.table_count(), 0);
    store.ensure_table(&TableName::new("A"), header()).unwrap();
    store.ensure_table(&TableName::new("B"), header()).unwrap();
    store.ensure_table(&TableName::new("A"), header()).unwrap();
    assert_eq!(store.table_count(), 2);
}
