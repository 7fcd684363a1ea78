//! Backend Configuration
//!
//! Where data lives and how stored images are addressed from the webview.

use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use std::ffi::OsString;
use std::path::PathBuf;

/// Overrides the data directory (database and images)
pub const DATA_DIR_ENV: &str = "MENU_ADMIN_DATA_DIR";
pub const DB_FILE: &str = "menu_admin.db";
pub const IMAGES_DIR: &str = "images";

#[cfg(windows)]
const ASSET_BASE: &str = "http://asset.localhost/";
#[cfg(not(windows))]
const ASSET_BASE: &str = "asset://localhost/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub images_dir: PathBuf,
}

impl AppPaths {
    pub fn from_data_dir(data_dir: PathBuf) -> Self {
        Self {
            db_path: data_dir.join(DB_FILE),
            images_dir: data_dir.join(IMAGES_DIR),
            data_dir,
        }
    }

    /// Paths under `default_dir` unless `override_dir` is set and non-empty
    pub fn resolve_with(override_dir: Option<OsString>, default_dir: PathBuf) -> Self {
        let dir = override_dir
            .filter(|d| !d.is_empty())
            .map(PathBuf::from)
            .unwrap_or(default_dir);
        Self::from_data_dir(dir)
    }

    /// Honors `MENU_ADMIN_DATA_DIR`
    pub fn resolve(default_dir: PathBuf) -> Self {
        Self::resolve_with(std::env::var_os(DATA_DIR_ENV), default_dir)
    }

    pub fn ensure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.images_dir)
    }
}

/// URI the webview loads a stored image from
pub fn asset_url(file_name: &str) -> String {
    format!("{}{}", ASSET_BASE, utf8_percent_encode(file_name, NON_ALPHANUMERIC))
}

/// Stored file name addressed by an asset request path or URL
pub fn asset_file_name(uri_or_path: &str) -> Option<String> {
    let rest = uri_or_path.strip_prefix(ASSET_BASE).unwrap_or(uri_or_path);
    let rest = rest.trim_start_matches('/');
    if rest.is_empty() {
        return None;
    }
    Some(percent_decode_str(rest).decode_utf8_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins_when_set() {
        let paths = AppPaths::resolve_with(Some("/tmp/menu".into()), PathBuf::from("/data"));
        assert_eq!(paths.db_path, PathBuf::from("/tmp/menu/menu_admin.db"));
        assert_eq!(paths.images_dir, PathBuf::from("/tmp/menu/images"));

        let paths = AppPaths::resolve_with(Some("".into()), PathBuf::from("/data"));
        assert_eq!(paths.data_dir, PathBuf::from("/data"));
        assert_eq!(AppPaths::resolve_with(None, PathBuf::from("/data")), paths);
    }

    #[test]
    fn test_asset_url_round_trip() {
        let url = asset_url("ab12.png");
        assert_eq!(url, format!("{}ab12%2Epng", ASSET_BASE));
        assert_eq!(asset_file_name(&url).as_deref(), Some("ab12.png"));
        assert_eq!(asset_file_name("/ab12%2Epng").as_deref(), Some("ab12.png"));
        assert_eq!(asset_file_name("/"), None);
    }

    #[test]
    fn test_ensure_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::from_data_dir(dir.path().join("nested"));
        paths.ensure().unwrap();
        assert!(paths.images_dir.is_dir());
    }
}
