//! Local decoding of a picked profile image into a displayable preview.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::PreviewError;

use super::model::ProfileImage;

/// Turns a file on the device into a [`ProfileImage`].
#[async_trait]
pub trait PreviewDecoder: Send + Sync {
    async fn decode(&self, path: &Path) -> Result<ProfileImage, PreviewError>;
}

/// Reads the file from disk and checks that it is an image.
#[derive(Debug, Clone)]
pub struct FsPreviewDecoder {
    max_bytes: u64,
}

impl FsPreviewDecoder {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }
}

#[async_trait]
impl PreviewDecoder for FsPreviewDecoder {
    async fn decode(&self, path: &Path) -> Result<ProfileImage, PreviewError> {
        let read_err = |source: std::io::Error| PreviewError::Read {
            path: path.to_path_buf(),
            source,
        };

        let size = tokio::fs::metadata(path).await.map_err(read_err)?.len();
        if size > self.max_bytes {
            return Err(PreviewError::TooLarge {
                path: path.to_path_buf(),
                size,
                max: self.max_bytes,
            });
        }

        let bytes = tokio::fs::read(path).await.map_err(read_err)?;
        let media_type = sniff_media_type(&bytes).ok_or_else(|| PreviewError::NotAnImage {
            path: PathBuf::from(path),
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "profile".to_string());

        tracing::debug!(%file_name, media_type, size = bytes.len(), "Profile image decoded");

        Ok(ProfileImage {
            file_name,
            media_type: media_type.to_string(),
            bytes,
        })
    }
}

/// Identify common image formats by their leading bytes.
pub fn sniff_media_type(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    fn write_temp(name: &str, bytes: &[u8]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(bytes).unwrap();
        (dir, path)
    }

    #[test]
    fn sniffs_known_formats() {
        assert_eq!(sniff_media_type(PNG_HEADER), Some("image/png"));
        assert_eq!(sniff_media_type(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
        assert_eq!(sniff_media_type(b"GIF89a...."), Some("image/gif"));
        assert_eq!(sniff_media_type(b"RIFF\0\0\0\0WEBPVP8 "), Some("image/webp"));
        assert_eq!(sniff_media_type(b"RIFF\0\0\0\0WAVE"), None);
        assert_eq!(sniff_media_type(b"hello"), None);
        assert_eq!(sniff_media_type(&[]), None);
    }

    #[tokio::test]
    async fn decodes_png_from_disk() {
        let (_dir, path) = write_temp("me.png", PNG_HEADER);
        let image = FsPreviewDecoder::new(1024).decode(&path).await.unwrap();
        assert_eq!(image.file_name, "me.png");
        assert_eq!(image.media_type, "image/png");
        assert_eq!(image.bytes, PNG_HEADER);
    }

    #[tokio::test]
    async fn rejects_non_images() {
        let (_dir, path) = write_temp("notes.txt", b"just text");
        let err = FsPreviewDecoder::new(1024).decode(&path).await.unwrap_err();
        assert!(matches!(err, PreviewError::NotAnImage { .. }));
    }

    #[tokio::test]
    async fn rejects_oversized_files() {
        let (_dir, path) = write_temp("big.png", PNG_HEADER);
        let err = FsPreviewDecoder::new(4).decode(&path).await.unwrap_err();
        match err {
            PreviewError::TooLarge { size, max, .. } => {
                assert_eq!(size, PNG_HEADER.len() as u64);
                assert_eq!(max, 4);
            }
            other => panic!("expected TooLarge, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsPreviewDecoder::new(1024)
            .decode(&dir.path().join("gone.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, PreviewError::Read { .. }));
    }
}
