//! Raw-layer ingest: check the source and leave a `_SUCCESS` marker.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::artifact::verify_written;
use crate::error::{HeritageError, Result};

/// Name of the readiness marker written into the raw-layer directory.
pub const MARKER_FILE_NAME: &str = "_SUCCESS";

/// Default raw-layer directory.
pub const DEFAULT_RAW_DIR: &str = "data/output/raw_parquet";

/// What the marker records about the source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestMarker {
    pub source: PathBuf,
    pub marker: PathBuf,
    pub size_bytes: u64,
    pub content_hash: String,
    pub ingested_at: DateTime<Utc>,
}

impl IngestMarker {
    fn render(&self) -> String {
        format!(
            "OK\nsource found and ready for processing\nsource: {}\nsize: {} ({} bytes)\nhash: {}\ningested_at: {}\n",
            self.source.display(),
            human_size(self.size_bytes),
            self.size_bytes,
            self.content_hash,
            self.ingested_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }
}

/// Format a byte count with binary units and two decimals, e.g. `1.50 KB`.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{:.2} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.2} PB", size)
}

/// SHA-256 of a file's contents as `sha256:<hex>`.
pub fn hash_file(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| HeritageError::io(path, e))?;
    let mut hasher = Sha256::new();
    io::copy(&mut BufReader::new(file), &mut hasher).map_err(|e| HeritageError::io(path, e))?;
    Ok(format!("sha256:{:x}", hasher.finalize()))
}

/// Verify the source exists and write the marker into `raw_dir`.
pub fn ingest(source: &Path, raw_dir: &Path) -> Result<IngestMarker> {
    if !source.is_file() {
        return Err(HeritageError::SourceNotFound {
            path: source.to_path_buf(),
        });
    }
    let size_bytes = fs::metadata(source)
        .map_err(|e| HeritageError::io(source, e))?
        .len();
    let content_hash = hash_file(source)?;

    fs::create_dir_all(raw_dir).map_err(|e| HeritageError::io(raw_dir, e))?;
    let marker = IngestMarker {
        source: source.to_path_buf(),
        marker: raw_dir.join(MARKER_FILE_NAME),
        size_bytes,
        content_hash,
        ingested_at: Utc::now(),
    };
    fs::write(&marker.marker, marker.render()).map_err(|e| HeritageError::io(&marker.marker, e))?;
    verify_written(&marker.marker)?;

    info!(
        "ingested {} ({}), marker at {}",
        source.display(),
        human_size(size_bytes),
        marker.marker.display()
    );
    Ok(marker)
}
