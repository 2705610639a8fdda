use crate::errors::ServerError;
use crate::pins::{PinBoard, ResolvedPin};
use crate::responses::{
    html_response, json_error_response, json_response, listing_file_response, ResultResp,
};
use crate::scan::scan_listing_dir;
use crate::templates;
use astra::Request;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub listing_dir: PathBuf,
    pub board: Arc<Mutex<PinBoard>>,
    pub poll_interval: Duration,
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();

    match (method, path) {
        ("GET", "/") => html_response(templates::pages::map_page(state.poll_interval)),
        ("GET", "/api/properties") => api_properties(state),
        ("GET", "/api/pins") => api_pins(state),
        ("GET", p) if p.starts_with("/files/") => {
            listing_file_response(&state.listing_dir, &p["/files/".len()..])
        }
        _ => Err(ServerError::NotFound),
    }
}

/// "List current records": a fresh scan on every call, no parameters,
/// no caching. An unreadable directory is a 503 the poller can retry.
fn api_properties(state: &AppState) -> ResultResp {
    match scan_listing_dir(&state.listing_dir) {
        Ok(records) => json_response(&records),
        Err(e) => json_error_response(503, &e.to_string()),
    }
}

#[derive(Serialize)]
struct PinsPayload {
    last_poll: Option<DateTime<Utc>>,
    pins: Vec<ResolvedPin>,
}

/// The engine's published pin set, as the map page consumes it.
fn api_pins(state: &AppState) -> ResultResp {
    let board = state
        .board
        .lock()
        .map_err(|_| ServerError::InternalError)?;

    json_response(&PinsPayload {
        last_poll: board.last_poll,
        pins: board.resolved(),
    })
}
