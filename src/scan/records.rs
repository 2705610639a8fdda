use serde::Serialize;

/// One matched listing file. Recomputed fresh on every scan,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRecord {
    /// The filename itself. Unique within the directory, stable
    /// across scans as long as the file is not renamed.
    pub identifier: String,

    /// Free text pulled out of the filename, untouched beyond trimming.
    pub address: String,

    /// URL path the browser can open to view the file.
    pub file_reference: String,
}
