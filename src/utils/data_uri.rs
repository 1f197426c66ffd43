//! Data URI encoding for inlined assets.

use base64::{Engine as _, engine::general_purpose};
use std::path::Path;

use super::mime;

/// Encode asset bytes as a `data:` URI with the MIME type guessed from `path`.
pub fn encode(path: &Path, bytes: &[u8]) -> String {
    encode_with_mime(mime::from_path(path), bytes)
}

/// Encode asset bytes as a `data:` URI with an explicit MIME type.
pub fn encode_with_mime(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", general_purpose::STANDARD.encode(bytes))
}
