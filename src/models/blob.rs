//! Helpers for binary fields transmitted as base64 text.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn decode(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(data)
}

/// Number of bytes a base64 payload decodes to.
pub fn decoded_len(data: &str) -> usize {
    let padding = if data.ends_with("==") {
        2
    } else if data.ends_with('=') {
        1
    } else {
        0
    };
    (data.len() / 4 * 3).saturating_sub(padding)
}

/// Human-readable size label, e.g. `"12 345 bytes"`.
pub fn byte_size(data: &str) -> String {
    let digits = decoded_len(data).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    format!("{} bytes", grouped)
}

pub fn data_uri(content_type: &str, data: &str) -> String {
    format!("data:{};base64,{}", content_type, data)
}

/// Guess an image MIME type from a file extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}
