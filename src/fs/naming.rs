//! Filename generation and manipulation.

/// Characters that are not allowed in file names on common filesystems.
const INVALID_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Maximum length (in characters) of a file stem before the extension.
pub const MAX_STEM_LENGTH: usize = 200;

/// Sanitize a name so it can be used as a file or directory name.
///
/// Invalid characters and control characters become `_`, spaces become `_`,
/// and names longer than [`MAX_STEM_LENGTH`] keep only the first
/// [`MAX_STEM_LENGTH`] characters of their stem plus the extension.
/// Applying it to its own output returns the same string.
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            c if INVALID_CHARS.contains(&c) => '_',
            ' ' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.chars().count() <= MAX_STEM_LENGTH {
        return sanitized;
    }

    let (stem, ext) = split_extension(&sanitized);
    let mut truncated: String = stem.chars().take(MAX_STEM_LENGTH).collect();
    // A stem of dots only would not split off `ext` again.
    if !ext.is_empty() && truncated.chars().all(|c| c == '.') {
        truncated.replace_range(..1, "_");
    }
    format!("{}{}", truncated, ext)
}

/// Split a file name into stem and extension (extension keeps its dot).
///
/// Leading dots do not start an extension, so `.hidden` has no extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(pos) if !name[..pos].chars().all(|c| c == '.') => (&name[..pos], &name[pos..]),
        _ => (name, ""),
    }
}

/// Map a MIME type to a file extension, including the leading dot.
///
/// Unknown MIME types yield an empty string.
pub fn get_file_extension(mime_type: &str) -> String {
    let ext = match mime_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "video/mp4" => "mp4",
        "video/quicktime" => "mov",
        "video/webm" => "webm",
        _ => {
            return mime_guess::get_mime_extensions_str(mime_type)
                .and_then(|exts| exts.first())
                .map(|ext| format!(".{}", ext))
                .unwrap_or_default();
        }
    };

    format!(".{}", ext)
}
