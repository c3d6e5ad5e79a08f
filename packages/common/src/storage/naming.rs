/// Fallback used when nothing of the original name survives sanitising.
const DEFAULT_STEM: &str = "image";

/// Longest sanitised name kept, in bytes. Generated prefixes come on top.
const MAX_NAME_LEN: usize = 128;

/// Reduce an uploaded file name to a flat, URL-safe name.
///
/// Directory components are dropped, characters outside `[A-Za-z0-9._-]`
/// become `_`, and leading dots are stripped so the result is never hidden
/// and never a traversal component.
pub fn sanitize_file_name(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let mut name: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = name.trim_start_matches('.');
    if trimmed.len() != name.len() {
        name = trimmed.to_string();
    }

    if name.len() > MAX_NAME_LEN {
        // Keep the extension when truncating.
        let cut = name.len() - MAX_NAME_LEN;
        name = name[cut..].trim_start_matches('.').to_string();
    }

    if name.is_empty() || name.chars().all(|c| c == '_') {
        return DEFAULT_STEM.to_string();
    }

    name
}

/// Raster image subtypes accepted for upload. Scriptable formats such as
/// `image/svg+xml` are excluded since stored images are served from the API
/// origin.
const RASTER_SUBTYPES: &[&str] = &["png", "jpeg", "gif", "webp"];

/// Whether the file name carries a raster image extension.
pub fn is_image_file(name: &str) -> bool {
    mime_guess::from_path(name).first().is_some_and(|mime| {
        mime.type_() == mime_guess::mime::IMAGE
            && RASTER_SUBTYPES.contains(&mime.subtype().as_str())
    })
}

/// Whether `name` is a single path component that is safe to join onto the
/// store root.
pub(crate) fn is_flat_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
        && !name.chars().any(|c| c.is_ascii_control())
}
