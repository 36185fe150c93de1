use std::path::Path;

use svgard_core::hash::is_valid_hash;
use svgard_core::{content_hash, AppError, LogFormat, TagSet};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Hash an upload is stored under: the one given on the command line
/// (lower-cased), otherwise the SHA-256 of its bytes.
pub fn resolve_hash(explicit: Option<&str>, data: &[u8]) -> Result<String, AppError> {
    match explicit.map(str::trim) {
        Some(hash) if !hash.is_empty() => {
            if !is_valid_hash(hash) {
                return Err(AppError::InvalidInput(format!(
                    "--hash must be 32 to 128 hex characters, got {:?}",
                    hash
                )));
            }
            Ok(hash.to_ascii_lowercase())
        }
        _ => Ok(content_hash(data)),
    }
}

/// Merge repeated `--tags` values; each may hold several whitespace-separated tags.
pub fn parse_tags(values: &[String]) -> TagSet {
    values.iter().flat_map(|v| v.split_whitespace()).collect()
}

/// Final path component, used as the upload's original filename.
pub fn filename_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Initialize tracing for the CLI.
///
/// Logs go to stderr; stdout only carries documents and JSON output.
pub fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
