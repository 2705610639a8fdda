use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::scan::ListingRecord;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocodeStatus {
    Pending,
    Resolved,
    Failed,
}

/// One pin per known listing identifier. Created when the identifier
/// first shows up in a poll, dropped when it disappears.
#[derive(Debug, Clone)]
pub struct PinState {
    pub identifier: String,
    pub address: String,
    pub file_reference: String,
    pub coordinates: Option<Coordinate>,
    pub status: GeocodeStatus,
}

/// What the map page actually renders: only pins with coordinates.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedPin {
    pub identifier: String,
    pub address: String,
    pub file_reference: String,
    pub coordinates: Coordinate,
}

/// The full pin set, shared between the poll engine and the HTTP layer.
#[derive(Debug, Default)]
pub struct PinBoard {
    pins: HashMap<String, PinState>,
    pub last_poll: Option<DateTime<Utc>>,
}

impl PinBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.pins.contains_key(identifier)
    }

    pub fn get(&self, identifier: &str) -> Option<&PinState> {
        self.pins.get(identifier)
    }

    pub fn get_mut(&mut self, identifier: &str) -> Option<&mut PinState> {
        self.pins.get_mut(identifier)
    }

    pub fn insert_pending(&mut self, record: &ListingRecord) {
        self.pins.insert(
            record.identifier.clone(),
            PinState {
                identifier: record.identifier.clone(),
                address: record.address.clone(),
                file_reference: record.file_reference.clone(),
                coordinates: None,
                status: GeocodeStatus::Pending,
            },
        );
    }

    pub fn remove(&mut self, identifier: &str) -> Option<PinState> {
        self.pins.remove(identifier)
    }

    pub fn identifiers(&self) -> Vec<String> {
        self.pins.keys().cloned().collect()
    }

    /// Snapshot of every resolved pin, for `/api/pins`.
    pub fn resolved(&self) -> Vec<ResolvedPin> {
        self.pins
            .values()
            .filter_map(|pin| {
                let coordinates = pin.coordinates?;
                (pin.status == GeocodeStatus::Resolved).then(|| ResolvedPin {
                    identifier: pin.identifier.clone(),
                    address: pin.address.clone(),
                    file_reference: pin.file_reference.clone(),
                    coordinates,
                })
            })
            .collect()
    }
}
