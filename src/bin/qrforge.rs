//! CLI binary for qrforge.
//!
//! Maps flags onto a form submission and [`SymbolParameters`], then writes the
//! rendered PNG or prints it as a data URI.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use qrforge::input::{normalize, ContentKind, UploadedFile};
use qrforge::{encode, ECLevel, SymbolParameters};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Generate a QR code from a URL, phone number, SMS, email, text or small file.
#[derive(Parser, Debug)]
#[command(name = "qrforge", version, about)]
struct Cli {
    /// Kind of content to encode.
    #[arg(short, long, value_enum)]
    kind: ContentKind,

    /// Form field as NAME=VALUE, e.g. url_data=https://example.com. Repeatable.
    #[arg(short, long = "field", value_name = "NAME=VALUE", value_parser = parse_pair)]
    fields: Vec<(String, String)>,

    /// Uploaded file as NAME=PATH, e.g. pdf_file=./menu.pdf. Repeatable.
    #[arg(long = "file", value_name = "NAME=PATH", value_parser = parse_pair)]
    files: Vec<(String, String)>,

    /// Error correction level.
    #[arg(short, long, value_enum, env = "QRFORGE_EC_LEVEL", default_value = "l")]
    ec_level: ECLevel,

    /// Pixels per module.
    #[arg(long, env = "QRFORGE_MODULE_SIZE", default_value_t = 10)]
    module_size: u32,

    /// Quiet zone width in modules.
    #[arg(long, env = "QRFORGE_BORDER", default_value_t = 4)]
    border: u32,

    /// Smallest symbol version (1-40).
    #[arg(long, env = "QRFORGE_MIN_VERSION", default_value_t = 1)]
    min_version: u8,

    /// Largest accepted upload in bytes.
    #[arg(long, env = "QRFORGE_MAX_UPLOAD_BYTES", default_value_t = 2 * 1024 * 1024)]
    max_upload_bytes: u64,

    /// Where to write the PNG.
    #[arg(short, long, default_value = "qrcode.png", conflicts_with = "data_uri")]
    output: PathBuf,

    /// Print a data:image/png;base64 URI instead of writing a file.
    #[arg(long)]
    data_uri: bool,

    /// Also draw the symbol in the terminal.
    #[arg(long)]
    preview: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got `{s}`")),
    }
}

fn read_upload(path: &Path, max_bytes: u64) -> Result<UploadedFile> {
    let size = std::fs::metadata(path)
        .with_context(|| format!("Failed to read {}", path.display()))?
        .len();
    if size > max_bytes {
        bail!("{} is {size} bytes, larger than the {max_bytes} byte upload limit", path.display());
    }
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let filename = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    Ok(UploadedFile::new(filename, bytes))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let fields = cli.fields.iter().cloned().collect::<HashMap<_, _>>();
    let mut files = HashMap::new();
    for (name, path) in &cli.files {
        files.insert(name.clone(), read_upload(Path::new(path), cli.max_upload_bytes)?);
    }

    let payload = normalize(cli.kind, &fields, &files)?;
    debug!("Normalized {} payload of {} bytes", cli.kind, payload.len());

    let params = SymbolParameters::builder()
        .ec_level(cli.ec_level)
        .module_size(cli.module_size)
        .border(cli.border)
        .min_version(cli.min_version)
        .build()
        .context("Invalid symbol parameters")?;

    let img = encode(&payload, &params).context("Failed to encode QR code")?;

    if cli.preview {
        eprintln!("{}", img.symbol().to_str(1, cli.border as usize));
    }

    if cli.data_uri {
        println!("{}", img.to_data_uri());
    } else {
        std::fs::write(&cli.output, img.as_bytes())
            .with_context(|| format!("Failed to write {}", cli.output.display()))?;
        eprintln!(
            "Wrote {} ({}x{} px, version {}, level {:?}, mask {})",
            cli.output.display(),
            img.width(),
            img.width(),
            *img.version(),
            img.ec_level(),
            *img.mask()
        );
    }

    Ok(())
}
