//! Image Selection
//!
//! Validation and encoding of a locally selected food photo, plus which
//! source the uploader should display.

use base64::Engine;

use crate::error::ValidationError;

/// Largest accepted photo, 10 MiB
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// A selected file encoded for transport to the blob store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub name: String,
    pub media_type: String,
    /// `data:<media_type>;base64,<payload>`
    pub data_url: String,
}

/// Check media type and size before reading the file at all
pub fn validate_image(media_type: &str, size: u64) -> Result<(), ValidationError> {
    if !media_type.starts_with("image/") {
        return Err(ValidationError::ImageNotAnImage);
    }
    if size > MAX_IMAGE_BYTES {
        return Err(ValidationError::ImageTooLarge);
    }
    Ok(())
}

pub fn encode_data_url(media_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        media_type,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Validate and encode a file's bytes. No partial acceptance: any rule
/// violation rejects the whole selection.
pub fn encode_image(name: &str, media_type: &str, bytes: &[u8]) -> Result<EncodedImage, ValidationError> {
    validate_image(media_type, bytes.len() as u64)?;
    Ok(EncodedImage {
        name: name.to_string(),
        media_type: media_type.to_string(),
        data_url: encode_data_url(media_type, bytes),
    })
}

/// What the image selector currently holds
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageSelection {
    #[default]
    Empty,
    /// Reference already stored with the food (edit mode)
    Existing(String),
    /// Freshly selected file; `preview_url` is a transient object URL
    Selected {
        preview_url: String,
        encoded: EncodedImage,
    },
}

impl ImageSelection {
    pub fn from_existing(uri: &str) -> Self {
        if uri.is_empty() {
            ImageSelection::Empty
        } else {
            ImageSelection::Existing(uri.to_string())
        }
    }

    /// Source to render, or None for the "add a photo" prompt
    pub fn display_src(&self) -> Option<&str> {
        match self {
            ImageSelection::Empty => None,
            ImageSelection::Existing(uri) => Some(uri),
            ImageSelection::Selected { preview_url, .. } => Some(preview_url),
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, ImageSelection::Empty)
    }

    pub fn existing(&self) -> Option<&str> {
        match self {
            ImageSelection::Existing(uri) => Some(uri),
            _ => None,
        }
    }

    pub fn pending_upload(&self) -> Option<&EncodedImage> {
        match self {
            ImageSelection::Selected { encoded, .. } => Some(encoded),
            _ => None,
        }
    }

    fn preview_url(&self) -> Option<&str> {
        match self {
            ImageSelection::Selected { preview_url, .. } => Some(preview_url),
            _ => None,
        }
    }

    /// Take a new file. Returns the superseded preview URL, which the caller
    /// must release.
    pub fn select(&mut self, preview_url: String, encoded: EncodedImage) -> Option<String> {
        let released = self.preview_url().map(str::to_string);
        *self = ImageSelection::Selected { preview_url, encoded };
        released
    }

    /// Drop back to an existing reference (or nothing). Returns the preview
    /// URL to release, if one was held.
    pub fn reset(&mut self, existing: Option<&str>) -> Option<String> {
        let released = self.preview_url().map(str::to_string);
        *self = existing.map(Self::from_existing).unwrap_or_default();
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str) -> EncodedImage {
        encode_image(name, "image/png", &[0x89, b'P', b'N', b'G']).unwrap()
    }

    #[test]
    fn test_rejects_non_images() {
        assert_eq!(
            encode_image("notes.pdf", "application/pdf", b"%PDF"),
            Err(ValidationError::ImageNotAnImage)
        );
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert_eq!(validate_image("image/jpeg", MAX_IMAGE_BYTES), Ok(()));
        assert_eq!(
            validate_image("image/jpeg", MAX_IMAGE_BYTES + 1),
            Err(ValidationError::ImageTooLarge)
        );
    }

    #[test]
    fn test_data_url_encoding() {
        assert_eq!(encode_data_url("image/gif", b"GIF8"), "data:image/gif;base64,R0lGOA==");
    }

    #[test]
    fn test_existing_reference_is_displayed() {
        let selection = ImageSelection::from_existing("asset://localhost/food.png");
        assert_eq!(selection.display_src(), Some("asset://localhost/food.png"));
        assert!(selection.pending_upload().is_none());
        assert_eq!(ImageSelection::from_existing("").display_src(), None);
    }

    #[test]
    fn test_new_selection_supersedes_and_releases_preview() {
        let mut selection = ImageSelection::from_existing("asset://localhost/old.png");
        assert_eq!(selection.select("blob:1".into(), png("a.png")), None);
        assert_eq!(selection.display_src(), Some("blob:1"));
        assert_eq!(selection.pending_upload().map(|e| e.name.as_str()), Some("a.png"));

        assert_eq!(selection.select("blob:2".into(), png("b.png")), Some("blob:1".to_string()));
        assert_eq!(selection.reset(None), Some("blob:2".to_string()));
        assert_eq!(selection, ImageSelection::Empty);
    }
}
