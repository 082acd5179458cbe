//! On-disk artifacts for learned tables.
//!
//! Each table is one JSON document carrying a kind tag and a format version.
//! Paths ending in `.zst` are transparently zstd-compressed.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;

pub const FORMAT_VERSION: u32 = 1;

const ZSTD_LEVEL: i32 = 3;

#[derive(Debug, Serialize, Deserialize)]
struct Artifact<T> {
    kind: String,
    version: u32,
    entries: Vec<T>,
}

pub(crate) fn encode<T: Serialize>(kind: &str, entries: Vec<T>) -> Result<Vec<u8>, StorageError> {
    let artifact = Artifact {
        kind: kind.to_string(),
        version: FORMAT_VERSION,
        entries,
    };
    serde_json::to_vec(&artifact).map_err(StorageError::Encode)
}

pub(crate) fn decode<T: DeserializeOwned>(kind: &str, bytes: &[u8]) -> Result<Vec<T>, StorageError> {
    let artifact: Artifact<T> =
        serde_json::from_slice(bytes).map_err(StorageError::Deserialize)?;
    if artifact.kind != kind {
        return Err(StorageError::Invalid(format!(
            "expected a {} table, found {}",
            kind, artifact.kind
        )));
    }
    if artifact.version != FORMAT_VERSION {
        return Err(StorageError::Invalid(format!(
            "unsupported format version {}",
            artifact.version
        )));
    }
    Ok(artifact.entries)
}

fn is_compressed(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "zst")
}

/// Writes `bytes` to `path`, creating parent directories as needed. The file
/// is written beside the target and renamed into place.
pub fn write_artifact(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let io_err = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let payload = if is_compressed(path) {
        zstd::encode_all(bytes, ZSTD_LEVEL).map_err(|source| StorageError::Compression {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        bytes.to_vec()
    };

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    fs::write(&tmp, payload).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)
}

/// Reads an artifact. A missing file is `Ok(None)`, not an error.
pub fn read_artifact(path: &Path) -> Result<Option<Vec<u8>>, StorageError> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if is_compressed(path) {
        let dec = zstd::decode_all(raw.as_slice()).map_err(|source| StorageError::Compression {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(dec))
    } else {
        Ok(Some(raw))
    }
}
