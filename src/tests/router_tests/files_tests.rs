// src/tests/router_tests/files_tests.rs

use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{get, make_listing_dir, make_state, read_body};
use std::fs;

#[test]
fn serves_listing_file_with_sniffed_boundary() {
    let dir = make_listing_dir("serve", &["For sale_ 12 Oak Ave - 1000.mhtml"]);
    let state = make_state(dir.clone());

    let mut resp = handle(
        get("/files/For%20sale_%2012%20Oak%20Ave%20-%201000.mhtml"),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);

    let content_type = resp
        .headers()
        .get("Content-Type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("multipart/related"));
    assert!(content_type.contains("----HousepinsTestBoundary----"));

    let body = read_body(&mut resp);
    assert!(body.ends_with("body"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn path_traversal_is_forbidden() {
    let dir = make_listing_dir("traversal", &[]);
    let state = make_state(dir.clone());

    let result = handle(get("/files/..%2Fsecret.mhtml"), &state);
    assert!(matches!(result, Err(ServerError::Forbidden(_))));

    let result = handle(get("/files/..%5C..%5Cetc"), &state);
    assert!(matches!(result, Err(ServerError::Forbidden(_))));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_file_is_not_found() {
    let dir = make_listing_dir("missing", &[]);
    let state = make_state(dir.clone());

    let result = handle(get("/files/For%20sale_%20gone%20-%201.mhtml"), &state);
    assert!(matches!(result, Err(ServerError::NotFound)));

    fs::remove_dir_all(&dir).unwrap();
}
