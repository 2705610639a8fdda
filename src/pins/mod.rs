mod engine;
mod geocode;
mod state;

pub use engine::{DirectorySource, ListingSource, PinEngine};
pub use geocode::{GeocodeError, Geocoder, NominatimGeocoder};
pub use state::{Coordinate, GeocodeStatus, PinBoard, PinState, ResolvedPin};
