// responses/file.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use percent_encoding::percent_decode_str;
use std::fs;
use std::path::Path;

// How much of the file head to search for the MIME boundary.
const SNIFF_LEN: usize = 2048;

/// Serve a raw listing file for browser navigation.
///
/// `encoded_name` is the percent-encoded filename from the URL path.
/// Requests must stay inside the listing directory; anything that
/// tries to climb out is rejected.
pub fn listing_file_response(dir: &Path, encoded_name: &str) -> ResultResp {
    let name = percent_decode_str(encoded_name)
        .decode_utf8()
        .map_err(|e| ServerError::BadRequest(format!("bad file name encoding: {e}")))?;

    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(ServerError::Forbidden("invalid file path".into()));
    }

    let path = dir.join(name.as_ref());
    let bytes = fs::read(&path).map_err(|_| ServerError::NotFound)?;

    let content_type = if name.to_ascii_lowercase().ends_with(".mhtml") {
        mhtml_content_type(&bytes[..bytes.len().min(SNIFF_LEN)])
    } else {
        mime::APPLICATION_OCTET_STREAM.to_string()
    };

    let resp = ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Disposition", "inline")
        .header("X-Content-Type-Options", "nosniff")
        .header("Cache-Control", "no-cache")
        .body(Body::from(bytes))
        .map_err(|_| ServerError::InternalError)?;

    Ok(resp)
}

/// Pull the multipart boundary out of the archive's MIME headers so
/// browsers get `multipart/related; boundary=...` instead of a
/// download prompt.
fn mhtml_content_type(head: &[u8]) -> String {
    let text = String::from_utf8_lossy(head);

    for line in text.lines() {
        let Some(idx) = line.to_ascii_lowercase().find("boundary=") else {
            continue;
        };
        let raw = line[idx + "boundary=".len()..]
            .trim()
            .trim_start_matches(['"', '\'']);
        let boundary: String = raw
            .chars()
            .take_while(|c| !c.is_whitespace() && !matches!(c, '"' | '\'' | ';'))
            .collect();
        if !boundary.is_empty() {
            return format!("multipart/related; boundary=\"{boundary}\"");
        }
    }

    "multipart/related".to_string()
}
