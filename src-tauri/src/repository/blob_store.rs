//! Blob Store
//!
//! Content-addressed photo storage on disk. Uploads arrive as data URLs;
//! the file name is the blake3 hash of the bytes plus an extension.

use base64::Engine;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::domain::{DomainError, DomainResult};

/// Largest accepted photo, 10 MiB
pub const MAX_BLOB_BYTES: usize = 10 * 1024 * 1024;

fn data_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^data:([A-Za-z0-9.+-]+/[A-Za-z0-9.+-]+);base64,(.*)$")
            .expect("data URL pattern is valid")
    })
}

/// Split a data URL into media type and decoded bytes
pub fn parse_data_url(data_url: &str) -> DomainResult<(String, Vec<u8>)> {
    let caps = data_url_re()
        .captures(data_url)
        .ok_or_else(|| DomainError::InvalidInput("not a base64 data URL".into()))?;
    let media_type = caps[1].to_ascii_lowercase();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&caps[2])
        .map_err(|e| DomainError::InvalidInput(format!("bad base64 payload: {}", e)))?;
    Ok((media_type, bytes))
}

/// Extension from the original file name when it agrees with the media
/// type, else the first one registered for the media type.
fn extension_for(name: &str, media_type: &str) -> String {
    let from_name = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| {
            mime_guess::from_ext(ext)
                .iter()
                .any(|m| m.essence_str() == media_type)
        });
    from_name
        .or_else(|| {
            mime_guess::get_mime_extensions_str(media_type)
                .and_then(|exts| exts.first())
                .map(|e| e.to_string())
        })
        .unwrap_or_else(|| "bin".to_string())
}

pub struct BlobStore {
    dir: PathBuf,
}

impl BlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> DomainResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Decode, check and write a photo. Returns the stored file name;
    /// identical content always maps to the same name.
    pub fn save_data_url(&self, name: &str, data_url: &str) -> DomainResult<String> {
        let (media_type, bytes) = parse_data_url(data_url)?;
        if !media_type.starts_with("image/") {
            return Err(DomainError::InvalidInput(format!("{} is not an image", media_type)));
        }
        if bytes.len() > MAX_BLOB_BYTES {
            return Err(DomainError::InvalidInput(format!(
                "image is {} bytes, limit is {}",
                bytes.len(),
                MAX_BLOB_BYTES
            )));
        }

        let hash = blake3::hash(&bytes).to_hex();
        let file_name = format!("{}.{}", hash, extension_for(name, &media_type));
        let path = self.dir.join(&file_name);
        if !path.exists() {
            fs::write(&path, &bytes)?;
            log::info!("Stored image {} ({} bytes)", file_name, bytes.len());
        }
        Ok(file_name)
    }

    /// Path of a stored file. Only plain names inside the store resolve.
    pub fn resolve(&self, file_name: &str) -> Option<PathBuf> {
        let candidate = Path::new(file_name);
        if candidate.components().count() != 1 || candidate.file_name()?.to_str()? != file_name {
            return None;
        }
        let path = self.dir.join(candidate);
        path.is_file().then_some(path)
    }

    /// Delete files whose names are not in `keep`. Returns how many went.
    pub fn prune(&self, keep: &HashSet<String>) -> DomainResult<usize> {
        let mut removed = 0;
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if entry.path().is_file() && !keep.contains(&name) {
                fs::remove_file(entry.path())?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}
