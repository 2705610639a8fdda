mod directory;
mod records;
mod scan_error;

pub use directory::{extract_address, scan_listing_dir, MARKER};
pub use records::ListingRecord;
pub use scan_error::ScanError;
