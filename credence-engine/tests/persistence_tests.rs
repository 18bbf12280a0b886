//! Engine behavior over the workbook file backend.

use credence_engine::{Engine, EngineConfig};
use credence_registry::Registry;
use credence_store::WorkbookFile;
use serde_json::{json, Map, Value};
use std::sync::Arc;

fn provider_fields(first: &str) -> Map<String, Value> {
    let Value::Object(map) = json!({
        "firstName": first,
        "lastName": "Tester",
        "credentialingStatus": "Pending",
    }) else {
        unreachable!()
    };
    map
}

#[test]
fn records_survive_an_engine_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credence.json");

    let id = {
        let store = Arc::new(WorkbookFile::open(&path).unwrap());
        let engine = Engine::new(store, Registry::standard(), EngineConfig::default()).unwrap();
        let spec = engine.registry().spec("Provider").unwrap().clone();
        engine.create_record(&spec, provider_fields("Ada")).unwrap().to_string()
    };

    let store = Arc::new(WorkbookFile::open(&path).unwrap());
    let engine = Engine::new(store, Registry::standard(), EngineConfig::default()).unwrap();
    let spec = engine.registry().spec("Provider").unwrap();
    let rec = engine.get_record(spec, &id).unwrap();
    assert_eq!(rec["firstName"], json!("Ada"));
    assert_eq!(rec["id"], json!(id));
}

#[test]
fn patch_and_cascade_work_against_the_file_backend() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(WorkbookFile::open(dir.path().join("credence.json")).unwrap());
    let engine = Engine::new(store, Registry::standard(), EngineConfig::default()).unwrap();
    let spec = engine.registry().spec("Provider").unwrap().clone();
    let id = engine.create_record(&spec, provider_fields("Ada")).unwrap().to_string();

    let Value::Object(patch) = json!({"credentialingStatus": "Active"}) else {
        unreachable!()
    };
    let outcome = engine.patch_by_id(&spec, &id, &patch).unwrap();
    assert!(outcome.updated);

    let outcome = engine.delete_entity_cascade("Provider", &id).unwrap();
    assert!(outcome.root_deleted);
    assert!(engine.get_record(&spec, &id).is_err());
}
