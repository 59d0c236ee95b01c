use clap::Parser;
use convroute::catalog::{Catalog, FormatEntry, HandlerDescriptor};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::fs;

/// A CLI tool to generate random handler catalogs for stress testing the path finder
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated format cache JSON to
    #[arg(short, long, default_value = "generated_cache.json")]
    output: String,

    /// Number of handlers to generate
    #[arg(long, default_value_t = 40)]
    handlers: usize,

    /// The minimum number of formats per handler
    #[arg(long, default_value_t = 2)]
    min: usize,

    /// The maximum number of formats per handler
    #[arg(long, default_value_t = 12)]
    max: usize,

    /// Seed for reproducible catalogs
    #[arg(long)]
    seed: Option<u64>,
}

/// (name, short name, extension, MIME, categories)
type FormatTemplate = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static [&'static str],
);

const FORMAT_POOL: &[FormatTemplate] = &[
    ("Portable Network Graphics", "png", "png", "image/png", &["image"]),
    ("Joint Photographic Experts Group JFIF", "jpeg", "jpg", "image/jpeg", &["image"]),
    ("WebP", "webp", "webp", "image/webp", &["image"]),
    ("CompuServe Graphics Interchange Format (GIF)", "gif", "gif", "image/gif", &["image", "video"]),
    ("Scalable Vector Graphics", "svg", "svg", "image/svg+xml", &["image", "vector", "document"]),
    ("Windows Bitmap", "bmp", "bmp", "image/bmp", &["image"]),
    ("Windows Icon", "ico", "ico", "image/vnd.microsoft.icon", &["image"]),
    ("Quite OK Image", "qoi", "qoi", "image/x-qoi", &["image"]),
    ("Tagged Image File Format", "tiff", "tiff", "image/tiff", &["image"]),
    ("MPEG-4 Part 14", "mp4", "mp4", "video/mp4", &["video"]),
    ("WebM", "webm", "webm", "video/webm", &["video"]),
    ("MP3 Audio", "mp3", "mp3", "audio/mpeg", &["audio"]),
    ("Waveform Audio File Format", "wav", "wav", "audio/wav", &["audio"]),
    ("Free Lossless Audio Codec", "flac", "flac", "audio/flac", &["audio"]),
    ("Ogg Vorbis", "ogg", "ogg", "audio/ogg", &["audio"]),
    ("Musical Instrument Digital Interface", "midi", "mid", "audio/midi", &["audio"]),
    ("Plain Text", "text", "txt", "text/plain", &["text"]),
    ("Hypertext Markup Language", "html", "html", "text/html", &["document", "text"]),
    ("Markdown Document", "md", "md", "text/markdown", &["document", "text"]),
    ("Portable Document Format", "pdf", "pdf", "application/pdf", &["document"]),
    ("JavaScript Object Notation", "json", "json", "application/json", &["data"]),
    ("ZIP Archive", "zip", "zip", "application/zip", &["archive"]),
    ("Stereolithography", "stl", "stl", "model/stl", &["model"]),
    ("Wavefront OBJ", "obj", "obj", "model/obj", &["model"]),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.min > cli.max {
        eprintln!(
            "Error: --min ({}) cannot be greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!(
        "Generating {} handlers ({} to {} formats each)...",
        cli.handlers, cli.min, cli.max
    );

    let mut catalog = Catalog::new();
    for index in 0..cli.handlers {
        catalog.register(generate_handler(&mut rng, index, cli.min, cli.max));
    }

    let edge_estimate: usize = catalog
        .handlers()
        .iter()
        .map(|h| h.inputs().count() * h.outputs().count())
        .sum();
    println!("-> At most {} conversions across the catalog.", edge_estimate);

    fs::write(&cli.output, catalog.to_json_pretty()?)?;

    println!("Successfully generated and saved catalog to '{}'", cli.output);

    Ok(())
}

/// Generates one handler with a random selection of formats.
fn generate_handler(rng: &mut StdRng, index: usize, min: usize, max: usize) -> HandlerDescriptor {
    let count = rng.random_range(min..=max).min(FORMAT_POOL.len());
    let formats = FORMAT_POOL
        .choose_multiple(rng, count)
        .map(|template| generate_entry(rng, template))
        .collect();
    HandlerDescriptor::new(&format!("handler-{:03}", index), formats)
}

fn generate_entry(rng: &mut StdRng, template: &FormatTemplate) -> FormatEntry {
    let &(name, format, extension, mime, categories) = template;
    let mut entry = FormatEntry::new(name, format, extension, mime);
    for category in categories {
        entry = entry.with_category(category);
    }
    // Every format is usable in at least one direction.
    match rng.random_range(0..3) {
        0 => entry = entry.allow_from(),
        1 => entry = entry.allow_to(),
        _ => entry = entry.allow_from().allow_to(),
    }
    if rng.random_bool(0.3) {
        entry = entry.mark_lossless();
    }
    entry
}
