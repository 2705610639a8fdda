// pins/engine.rs
use crate::pins::{Coordinate, GeocodeError, GeocodeStatus, Geocoder, PinBoard};
use crate::scan::{scan_listing_dir, ListingRecord, ScanError};
use chrono::Utc;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Where poll cycles get their records from.
pub trait ListingSource {
    fn list(&self) -> Result<Vec<ListingRecord>, ScanError>;
}

/// Production source: a fresh directory scan per poll.
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl ListingSource for DirectorySource {
    fn list(&self) -> Result<Vec<ListingRecord>, ScanError> {
        scan_listing_dir(&self.dir)
    }
}

/// The poll/diff/geocode pipeline.
///
/// Each cycle lists the current records, diffs identifiers against the
/// board, geocodes pins it hasn't seen before, and drops pins whose
/// files vanished. A failed listing leaves the board untouched; stale
/// pins beat no pins.
pub struct PinEngine<S, G> {
    source: S,
    geocoder: G,
    board: Arc<Mutex<PinBoard>>,
}

impl<S: ListingSource, G: Geocoder> PinEngine<S, G> {
    pub fn new(source: S, geocoder: G) -> Self {
        Self {
            source,
            geocoder,
            board: Arc::new(Mutex::new(PinBoard::new())),
        }
    }

    /// Handle to the shared board, for the HTTP layer.
    pub fn board(&self) -> Arc<Mutex<PinBoard>> {
        Arc::clone(&self.board)
    }

    fn lock_board(&self) -> MutexGuard<'_, PinBoard> {
        match self.board.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// One poll cycle.
    pub fn poll_once(&self) {
        let records = match self.source.list() {
            Ok(records) => records,
            Err(e) => {
                eprintln!("⚠️ Poll failed, keeping current pins: {e}");
                return;
            }
        };

        let to_geocode = self.apply_diff(records);

        for (identifier, address) in to_geocode {
            let outcome = self.geocoder.geocode(&address);
            self.apply_geocode(&identifier, &address, outcome);
        }
    }

    /// Diff the fresh records against the board. Returns the pins that
    /// need geocoding this cycle. Unchanged identifiers are left alone,
    /// whatever their status: a failed geocode stays failed until the
    /// file goes away and comes back.
    fn apply_diff(&self, records: Vec<ListingRecord>) -> Vec<(String, String)> {
        let fresh: HashMap<String, ListingRecord> = records
            .into_iter()
            .map(|r| (r.identifier.clone(), r))
            .collect();

        let mut board = self.lock_board();

        let gone: Vec<String> = board
            .identifiers()
            .into_iter()
            .filter(|id| !fresh.contains_key(id))
            .collect();
        for identifier in &gone {
            board.remove(identifier);
        }
        if !gone.is_empty() {
            eprintln!("🗑️ Removed {} vanished pin(s)", gone.len());
        }

        let mut to_geocode = Vec::new();
        for (identifier, record) in fresh {
            if board.contains(&identifier) {
                continue;
            }
            board.insert_pending(&record);
            to_geocode.push((identifier, record.address));
        }

        board.last_poll = Some(Utc::now());
        to_geocode
    }

    /// Store a geocode outcome, unless the pin was removed (or replaced)
    /// while the request was in flight.
    fn apply_geocode(
        &self,
        identifier: &str,
        address: &str,
        outcome: Result<Coordinate, GeocodeError>,
    ) {
        let mut board = self.lock_board();

        let Some(pin) = board.get_mut(identifier) else {
            eprintln!("🗑️ Dropping geocode result for removed pin {identifier}");
            return;
        };
        if pin.status != GeocodeStatus::Pending || pin.address != address {
            return;
        }

        match outcome {
            Ok(coordinates) => {
                pin.coordinates = Some(coordinates);
                pin.status = GeocodeStatus::Resolved;
                eprintln!(
                    "📍 {address} -> ({}, {})",
                    coordinates.lat, coordinates.lon
                );
            }
            Err(e) => {
                pin.status = GeocodeStatus::Failed;
                eprintln!("⚠️ Geocode failed for {address}: {e}");
            }
        }
    }

    /// Fixed-period poll loop. Cycles stay on schedule regardless of
    /// how the previous one went.
    pub fn run(self, interval: Duration) {
        eprintln!("🧵 Pin engine polling every {interval:?}");

        loop {
            let started = Instant::now();
            self.poll_once();

            let elapsed = started.elapsed();
            if elapsed < interval {
                std::thread::sleep(interval - elapsed);
            }
        }
    }
}
