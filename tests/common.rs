//! Common test utilities for building handler catalogs.
use convroute::prelude::*;

/// An entry the handler accepts as input.
#[allow(dead_code)]
pub fn input(mime: &str, categories: &[&str]) -> FormatEntry {
    with_categories(FormatEntry::from_mime(mime), categories).allow_from()
}

/// An entry the handler produces as output.
#[allow(dead_code)]
pub fn output(mime: &str, categories: &[&str], lossless: bool) -> FormatEntry {
    let entry = with_categories(FormatEntry::from_mime(mime), categories).allow_to();
    if lossless { entry.mark_lossless() } else { entry }
}

/// An entry the handler both accepts and produces.
#[allow(dead_code)]
pub fn both(mime: &str, categories: &[&str], lossless: bool) -> FormatEntry {
    output(mime, categories, lossless).allow_from()
}

#[allow(dead_code)]
pub fn with_categories(mut entry: FormatEntry, categories: &[&str]) -> FormatEntry {
    for category in categories {
        entry = entry.with_category(category);
    }
    entry
}

/// The first step of a search: the file as supplied by `handler`.
#[allow(dead_code)]
pub fn origin(handler: &str, mime: &str) -> ConversionStep {
    ConversionStep::new(handler, FormatEntry::from_mime(mime))
}

#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

/// SVG rasterizer (svg -> png, edge cost 4) followed by a JPEG encoder (png -> jpeg, edge cost 2).
#[allow(dead_code)]
pub fn create_svg_jpeg_catalog() -> Catalog {
    Catalog::from_handlers(vec![
        HandlerDescriptor::new(
            "H1",
            vec![
                input("image/svg+xml", &[]),
                output("image/png", &["image"], true),
            ],
        ),
        HandlerDescriptor::new(
            "H2",
            vec![
                input("image/png", &["image"]),
                output("image/jpeg", &["image"], false),
            ],
        ),
    ])
}

/// Two handlers offering gif -> png: `fast` lists gif first, `slow` lists it fourth.
#[allow(dead_code)]
pub fn create_gif_png_catalog() -> Catalog {
    Catalog::from_handlers(vec![
        HandlerDescriptor::new(
            "slow",
            vec![
                input("image/bmp", &["image"]),
                input("image/webp", &["image"]),
                input("image/tiff", &["image"]),
                input("image/gif", &["image"]),
                output("image/png", &["image"], true),
            ],
        ),
        HandlerDescriptor::new(
            "fast",
            vec![
                input("image/gif", &["image"]),
                output("image/png", &["image"], true),
            ],
        ),
    ])
}

/// A <-> B via `ab`, B <-> C via `bc`, C <-> A via `ca`.
#[allow(dead_code)]
pub fn create_cyclic_catalog() -> Catalog {
    Catalog::from_handlers(vec![
        HandlerDescriptor::new(
            "ab",
            vec![
                both("application/x-a", &[], true),
                both("application/x-b", &[], true),
            ],
        ),
        HandlerDescriptor::new(
            "bc",
            vec![
                both("application/x-b", &[], true),
                both("application/x-c", &[], true),
            ],
        ),
        HandlerDescriptor::new(
            "ca",
            vec![
                both("application/x-c", &[], true),
                both("application/x-a", &[], true),
            ],
        ),
    ])
}

/// A small but realistic mix of image, audio, video and document handlers.
#[allow(dead_code)]
pub fn create_mixed_catalog() -> Catalog {
    Catalog::from_handlers(vec![
        HandlerDescriptor::new(
            "canvas",
            vec![
                both("image/png", &["image"], true),
                both("image/jpeg", &["image"], false),
                both("image/webp", &["image"], false),
                input("image/svg+xml", &["image", "vector", "document"]),
                input("image/gif", &["image", "video"]),
            ],
        ),
        HandlerDescriptor::new(
            "magick",
            vec![
                both("image/png", &["image"], true),
                both("image/gif", &["image", "video"], false),
                both("image/bmp", &["image"], true),
                both("image/vnd.microsoft.icon", &["image"], true),
                both("image/tiff", &["image"], true),
            ],
        ),
        HandlerDescriptor::new(
            "ffmpeg",
            vec![
                both("video/mp4", &["video"], false),
                both("video/webm", &["video"], false),
                both("image/gif", &["image", "video"], false),
                both("audio/mpeg", &["audio"], false),
                both("audio/wav", &["audio"], true),
                input("image/png", &["image"]),
            ],
        ),
        HandlerDescriptor::new(
            "spectrogram",
            vec![
                input("audio/wav", &["audio"]),
                output("image/png", &["image"], true),
            ],
        ),
        HandlerDescriptor::new(
            "pandoc",
            vec![
                both("text/markdown", &["document", "text"], true),
                both("text/html", &["document", "text"], true),
                both("text/plain", &["text"], false),
            ],
        ),
        HandlerDescriptor::new(
            "html-render",
            vec![
                input("text/html", &["document", "text"]),
                output("image/svg+xml", &["image", "vector", "document"], true),
            ],
        ),
    ])
}

/// A format cache using both record shapes and both category spellings.
#[allow(dead_code)]
pub const FORMAT_CACHE_JSON: &str = r#"[
    ["svgTrace", [
        {"name": "Portable Network Graphics", "format": "png", "extension": "png",
         "mime": "image/png", "category": "image", "from": true, "to": false, "internal": "png"},
        {"name": "Scalable Vector Graphics", "format": "svg", "extension": "svg",
         "mime": "image/svg+xml", "category": ["image", "vector", "document"],
         "from": false, "to": true, "internal": "svg", "lossless": false}
    ]],
    {"name": "icoWriter", "formats": [
        {"name": "Portable Network Graphics", "format": "png", "extension": "png",
         "mime": "image/png", "category": "image", "from": true, "to": true,
         "internal": "png", "lossless": true},
        {"name": "Windows Icon", "format": "ico", "extension": "ico",
         "mime": "image/x-icon", "category": "image", "from": false, "to": true,
         "internal": "ico", "lossless": true}
    ]}
]"#;
