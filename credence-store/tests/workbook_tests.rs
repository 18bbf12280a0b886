use credence_store::{StoreError, TabularStore, WorkbookFile};
use credence_types::TableName;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn header() -> Vec<Value> {
    vec![json!("Id"), json!("Name")]
}

#[test]
fn open_missing_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    let store = WorkbookFile::open(&path).unwrap();
    let err = store.list_rows(&TableName::new("Providers")).unwrap_err();
    assert!(matches!(err, StoreError::TableMissing(_)));
}

#[test]
fn mutations_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    let t = TableName::new("Providers");
    {
        let store = WorkbookFile::open(&path).unwrap();
        store.ensure_table(&t, header()).unwrap();
        store.append_row(&t, vec![json!("p1"), json!("Ada")]).unwrap();
        store.update_cells(&t, 2, &[(1, json!("Lovelace"))]).unwrap();
    }
    let store = WorkbookFile::open(&path).unwrap();
    let grid = store.list_rows(&t).unwrap();
    assert_eq!(grid, vec![header(), vec![json!("p1"), json!("Lovelace")]]);
}

#[test]
fn delete_row_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    let t = TableName::new("Providers");
    {
        let store = WorkbookFile::open(&path).unwrap();
        store.ensure_table(&t, header()).unwrap();
        store.append_row(&t, vec![json!("p1"), json!("Ada")]).unwrap();
        store.append_row(&t, vec![json!("p2"), json!("Grace")]).unwrap();
        store.delete_row(&t, 2).unwrap();
    }
    let store = WorkbookFile::open(&path).unwrap();
    let grid = store.list_rows(&t).unwrap();
    assert_eq!(grid.len(), 2);
    assert_eq!(grid[1][0], json!("p2"));
}

#[test]
fn ensure_existing_table_does_not_rewrite_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    let t = TableName::new("Providers");
    let store = WorkbookFile::open(&path).unwrap();
    store.ensure_table(&t, header()).unwrap();
    store
        .ensure_table(&t, vec![json!("Id"), json!("Renamed")])
        .unwrap();
    let grid = store.list_rows(&t).unwrap();
    assert_eq!(grid[0], header());
}

#[test]
fn store_id_derives_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    let store = WorkbookFile::open(&path).unwrap();
    assert!(store.store_id().as_str().ends_with("book.json"));
}

#[test]
fn two_files_have_distinct_store_ids() {
    let dir = tempfile::tempdir().unwrap();
    let a = WorkbookFile::open(dir.path().join("a.json")).unwrap();
    let b = WorkbookFile::open(dir.path().join("b.json")).unwrap();
    assert_ne!(a.store_id(), b.store_id());
}

#[test]
fn failed_persist_rolls_back_the_in_memory_grid() {
    let dir = tempfile::tempdir().unwrap();
    let book_dir = dir.path().join("books");
    std::fs::create_dir(&book_dir).unwrap();
    let t = TableName::new("Providers");
    let store = WorkbookFile::open(book_dir.join("book.json")).unwrap();
    store.ensure_table(&t, header()).unwrap();
    store.append_row(&t, vec![json!("p1"), json!("Ada")]).unwrap();

    // With the parent directory gone the temp-file rename cannot succeed.
    std::fs::remove_dir_all(&book_dir).unwrap();
    let err = store.append_row(&t, vec![json!("p2"), json!("Grace")]);
    assert!(err.is_err());
    assert!(store.delete_row(&t, 2).is_err());
    assert!(store.update_cells(&t, 2, &[(1, json!("Hopper"))]).is_err());

    // Reads still match the last state that reached disk.
    let grid = store.list_rows(&t).unwrap();
    assert_eq!(grid, vec![header(), vec![json!("p1"), json!("Ada")]]);
}

#[test]
fn workbook_file_is_valid_json_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    let t = TableName::new("Providers");
    let store = WorkbookFile::open(&path).unwrap();
    store.ensure_table(&t, header()).unwrap();
    store.append_row(&t, vec![json!("p1"), json!("Ada")]).unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    let doc: Value = serde_json::from_str(&raw).unwrap();
    assert!(doc["tables"]["Providers"].is_array());
}
