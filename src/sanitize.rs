//! Title to filename mapping.

const RESERVED: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Replaces every character that is illegal in a Windows or Unix filename
/// (`<>:"/\|?*`) with `_`. Everything else, including spaces, is kept.
pub fn sanitize_filename(name: &str) -> String {
    name.chars().map(|c| if RESERVED.contains(&c) { '_' } else { c }).collect()
}
