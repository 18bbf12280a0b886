//! Shared fixtures for engine integration tests.

#![allow(dead_code)]

use credence_codec::Record;
use credence_engine::{Engine, EngineConfig};
use credence_registry::Registry;
use credence_store::MemoryStore;
use serde_json::{json, Value};
use std::sync::Arc;

/// Engine over a fresh in-memory store with the standard registry.
pub fn engine() -> Engine<MemoryStore> {
    engine_with_config(EngineConfig::default())
}

pub fn engine_with_config(config: EngineConfig) -> Engine<MemoryStore> {
    let store = Arc::new(MemoryStore::new("test-store"));
    Engine::new(store, Registry::standard(), config).unwrap()
}

/// Record builder from JSON object literals.
pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object literal, got {other}"),
    }
}

/// Creates a provider and returns its id as a string.
pub fn create_provider(engine: &Engine<MemoryStore>, first: &str, status: &str) -> String {
    let spec = engine.registry().spec("Provider").unwrap().clone();
    engine
        .create_record(
            &spec,
            record(json!({
                "firstName": first,
                "lastName": "Tester",
                "npi": "1234567890",
                "credentialingStatus": status,
                "specialties": ["cardiology"],
                "isActive": true,
            })),
        )
        .unwrap()
        .to_string()
}

/// Creates a license child row under the given provider.
pub fn create_license(engine: &Engine<MemoryStore>, provider_id: &str, number: &str) -> String {
    let spec = engine.registry().spec("Provider").unwrap().clone();
    let license = spec.children[0].clone();
    engine
        .create_child_record(
            &license,
            provider_id,
            record(json!({
                "licenseNumber": number,
                "state": "CA",
                "expiresAt": "2027-01-01",
                "verified": false,
            })),
        )
        .unwrap()
        .to_string()
}
