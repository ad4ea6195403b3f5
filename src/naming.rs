//! Deterministic names for thumbnail variants: `<basename>.<width>x<height>.<ext>`.
//!
//! `photos/cat.jpg` with a 125x125 variant becomes `photos/cat.125x125.jpg`. The same rule
//! applies to URLs. Only the final path segment is searched for the extension dot.
use crate::error::{Error, Result};
use crate::types::TargetSize;

/// Split `name` into `(base, ext)` at the last dot of its final segment.
fn split_extension(name: &str) -> Option<(&str, &str)> {
    let segment_start = name.rfind('/').map_or(0, |i| i + 1);
    let dot = name[segment_start..].rfind('.')? + segment_start;
    Some((&name[..dot], &name[dot + 1..]))
}

/// Extension of `name` without the dot, if any.
pub fn extension_of(name: &str) -> Option<&str> {
    split_extension(name).map(|(_, ext)| ext)
}

/// Storage name of the `size` variant of `name`.
pub fn thumbnail_name(name: &str, size: TargetSize) -> Result<String> {
    let (base, ext) = split_extension(name).ok_or_else(|| Error::MissingExtension {
        name: name.to_string(),
    })?;
    Ok(format!("{}.{}x{}.{}", base, size.width, size.height, ext))
}

/// URL of the `size` variant, derived from the original's URL.
pub fn thumbnail_url(url: &str, size: TargetSize) -> Result<String> {
    thumbnail_name(url, size)
}

/// Append `suffix` to the basename, keeping directory and extension.
pub(crate) fn with_base_suffix(name: &str, suffix: &str) -> String {
    match split_extension(name) {
        Some((base, ext)) => format!("{}{}.{}", base, suffix, ext),
        None => format!("{}{}", name, suffix),
    }
}
