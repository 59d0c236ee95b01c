use crate::error::CatalogError;

/// Known aliases and the canonical MIME type they are folded onto.
const MIME_ALIASES: &[(&str, &str)] = &[
    ("audio/x-wav", "audio/wav"),
    ("audio/vnd.wave", "audio/wav"),
    ("image/x-icon", "image/vnd.microsoft.icon"),
    ("image/qoi", "image/x-qoi"),
    ("video/bink", "video/vnd.radgamettools.bink"),
    ("video/binka", "audio/vnd.radgamettools.bink"),
    ("text/x-asciidoc", "text/asciidoc"),
    ("application/asciidoc", "text/asciidoc"),
];

/// Trims a MIME type and folds known aliases onto their canonical spelling.
///
/// ```
/// use convroute::catalog::normalize_mime;
///
/// assert_eq!(normalize_mime(" audio/x-wav "), "audio/wav");
/// assert_eq!(normalize_mime("image/png"), "image/png");
/// ```
pub fn normalize_mime(mime: &str) -> String {
    let trimmed = mime.trim();
    MIME_ALIASES
        .iter()
        .find(|(alias, _)| *alias == trimmed)
        .map_or(trimmed, |&(_, canonical)| canonical)
        .to_string()
}

/// Normalizes the MIME type of a catalog entry, rejecting empty or unparsable values.
pub(crate) fn canonical_mime(
    handler: &str,
    position: usize,
    mime: &str,
) -> Result<String, CatalogError> {
    let normalized = normalize_mime(mime);
    if normalized.is_empty() {
        return Err(CatalogError::MissingMime {
            handler: handler.to_string(),
            position,
        });
    }

    normalized
        .parse::<mime::Mime>()
        .map_err(|_| CatalogError::MalformedMime {
            handler: handler.to_string(),
            position,
            mime: mime.to_string(),
        })?;
    Ok(normalized)
}
