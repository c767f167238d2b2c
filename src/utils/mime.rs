//! MIME type detection utilities

/// Guess MIME by inspecting bytes (magic numbers)
pub fn guess_mime_from_bytes(bytes: &[u8]) -> Option<String> {
    infer::get(bytes).map(|k| k.mime_type().to_string())
}

/// Guess MIME by file path (extension-based)
pub fn guess_mime_from_path(path: &str) -> Option<String> {
    mime_guess::from_path(path)
        .first_raw()
        .map(|s| s.to_string())
}

/// Combined guess: prefer bytes, fall back to extension.
pub fn guess_mime(bytes: Option<&[u8]>, path: Option<&str>) -> Option<String> {
    if let Some(b) = bytes
        && let Some(m) = guess_mime_from_bytes(b)
    {
        return Some(m);
    }
    path.and_then(guess_mime_from_path)
}

pub fn is_image_mime(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}
