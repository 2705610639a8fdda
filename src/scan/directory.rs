// scan/directory.rs
use crate::scan::{ListingRecord, ScanError};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::fs;
use std::path::Path;

/// Fixed literal that precedes the address in saved listing filenames,
/// e.g. "For sale_ 1428 Fort St, Victoria, ... - 995977 _ REALTOR.ca.mhtml".
pub const MARKER: &str = "For sale_";

const LISTING_EXT: &str = ".mhtml";

// Characters that cannot appear raw in a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'%')
    .add(b'/');

/// Pull the address out of a listing filename.
///
/// A filename matches iff it contains the marker token with a `-`
/// somewhere after it, and the trimmed text between the marker and that
/// first `-` is non-empty. Anything else is a non-match, never an error.
pub fn extract_address(filename: &str) -> Option<String> {
    let start = filename.find(MARKER)? + MARKER.len();
    let rest = &filename[start..];
    let end = rest.find('-')?;
    let address = rest[..end].trim();

    if address.is_empty() {
        return None;
    }
    Some(address.to_string())
}

/// Scan `dir` for listing files and build a record per match.
///
/// Works on filenames only; file contents are never opened here.
/// Non-matching names are silently skipped.
pub fn scan_listing_dir(dir: &Path) -> Result<Vec<ListingRecord>, ScanError> {
    let entries = fs::read_dir(dir).map_err(|e| {
        ScanError::DirectoryUnavailable(format!("{}: {e}", dir.display()))
    })?;

    let mut records = Vec::new();

    for entry in entries {
        let Ok(entry) = entry else { continue };
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };

        if !name.to_ascii_lowercase().ends_with(LISTING_EXT) {
            continue;
        }
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(true) {
            continue;
        }

        if let Some(address) = extract_address(name) {
            records.push(ListingRecord {
                identifier: name.to_string(),
                address,
                file_reference: file_url(name),
            });
        }
    }

    Ok(records)
}

fn file_url(filename: &str) -> String {
    format!("/files/{}", utf8_percent_encode(filename, PATH_SEGMENT))
}
