// src/tests/router_tests/api_tests.rs

use crate::errors::ServerError;
use crate::pins::{Coordinate, GeocodeStatus};
use crate::router::handle;
use crate::scan::ListingRecord;
use crate::tests::utils::{get, make_listing_dir, make_state, read_body};
use std::fs;
use std::path::PathBuf;

#[test]
fn api_properties_lists_only_matching_files() {
    let dir = make_listing_dir(
        "properties",
        &[
            "For sale_ 1428 Fort St, Victoria, British Columbia V8S1Z1 - 995977 _ REALTOR.ca.mhtml",
            "For sale_ 12 Oak Ave - 1000.mhtml",
            "For sale_ 5 Elm St - 42.mhtml",
            "For rent_ 9 Pine Rd - 7.mhtml",
            "notes.txt",
        ],
    );
    let state = make_state(dir.clone());

    let mut resp = handle(get("/api/properties"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = read_body(&mut resp);
    let records: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(records.len(), 3);

    let addresses: Vec<&str> = records
        .iter()
        .map(|r| r["address"].as_str().unwrap())
        .collect();
    assert!(addresses.contains(&"1428 Fort St, Victoria, British Columbia V8S1Z1"));
    assert!(addresses.contains(&"12 Oak Ave"));
    assert!(addresses.contains(&"5 Elm St"));

    // Every record carries an openable file reference.
    for record in &records {
        assert!(record["file_reference"]
            .as_str()
            .unwrap()
            .starts_with("/files/"));
    }

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn api_properties_unreadable_directory_is_503() {
    let state = make_state(PathBuf::from("/no/such/housepins/dir"));

    let mut resp = handle(get("/api/properties"), &state).unwrap();
    assert_eq!(resp.status(), 503);

    let body = read_body(&mut resp);
    let payload: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(payload["error"].as_str().unwrap().contains("unavailable"));
}

#[test]
fn api_pins_reports_resolved_pins_only() {
    let dir = make_listing_dir("pins", &[]);
    let state = make_state(dir.clone());

    {
        let mut board = state.board.lock().unwrap();

        let resolved = ListingRecord {
            identifier: "For sale_ 12 Oak Ave - 1.mhtml".into(),
            address: "12 Oak Ave".into(),
            file_reference: "/files/For%20sale_%2012%20Oak%20Ave%20-%201.mhtml".into(),
        };
        board.insert_pending(&resolved);
        let pin = board.get_mut(&resolved.identifier).unwrap();
        pin.status = GeocodeStatus::Resolved;
        pin.coordinates = Some(Coordinate {
            lat: 48.4295,
            lon: -123.3537,
        });

        let failed = ListingRecord {
            identifier: "For sale_ nowhere - 2.mhtml".into(),
            address: "nowhere".into(),
            file_reference: "/files/For%20sale_%20nowhere%20-%202.mhtml".into(),
        };
        board.insert_pending(&failed);
        board.get_mut(&failed.identifier).unwrap().status = GeocodeStatus::Failed;
    }

    let mut resp = handle(get("/api/pins"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = read_body(&mut resp);
    let payload: serde_json::Value = serde_json::from_str(&body).unwrap();

    let pins = payload["pins"].as_array().unwrap();
    assert_eq!(pins.len(), 1);
    assert_eq!(pins[0]["address"], "12 Oak Ave");
    assert!((pins[0]["coordinates"]["lat"].as_f64().unwrap() - 48.4295).abs() < 1e-9);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn map_page_renders_with_pin_feed() {
    let dir = make_listing_dir("page", &[]);
    let state = make_state(dir.clone());

    let mut resp = handle(get("/"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = read_body(&mut resp);
    assert!(body.contains("leaflet"));
    assert!(body.contains("/api/pins"));
    assert!(body.contains("POLL_MS = 30000"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn unknown_route_is_not_found() {
    let dir = make_listing_dir("unknown", &[]);
    let state = make_state(dir.clone());

    let result = handle(get("/api/bogus"), &state);
    assert!(matches!(result, Err(ServerError::NotFound)));

    fs::remove_dir_all(&dir).unwrap();
}
