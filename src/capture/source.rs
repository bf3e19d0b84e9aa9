use std::io::Cursor;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use image::{DynamicImage, ImageFormat};

use crate::models::ImageRef;

/// Longest edge, in pixels, of images forwarded for analysis.
pub const MAX_CAPTURE_EDGE: u32 = 1024;

/// Anything that can hand the controller a captured image: the live camera
/// frame posted by the web view or a file picked from disk.
pub trait ImageCaptureSource: Send + Sync {
    fn capture(&self) -> Result<ImageRef>;
}

/// A frame the web view already encoded as a data URL.
pub struct DataUrlSource {
    data_url: String,
}

impl DataUrlSource {
    pub fn new(data_url: impl Into<String>) -> Self {
        Self {
            data_url: data_url.into(),
        }
    }
}

impl ImageCaptureSource for DataUrlSource {
    fn capture(&self) -> Result<ImageRef> {
        if self.data_url.trim().is_empty() {
            bail!("no frame was captured");
        }
        Ok(ImageRef::from_data_url(self.data_url.clone()))
    }
}

/// File picker: decodes the file, shrinks it to [`MAX_CAPTURE_EDGE`] and
/// re-encodes it as JPEG.
pub struct FileCaptureSource {
    path: PathBuf,
    max_edge: u32,
}

impl FileCaptureSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_edge: MAX_CAPTURE_EDGE,
        }
    }

    pub fn with_max_edge(mut self, max_edge: u32) -> Self {
        self.max_edge = max_edge.max(1);
        self
    }
}

impl ImageCaptureSource for FileCaptureSource {
    fn capture(&self) -> Result<ImageRef> {
        let decoded = image::open(&self.path)
            .with_context(|| format!("failed to decode image {}", self.path.display()))?;

        let resized = if decoded.width() > self.max_edge || decoded.height() > self.max_edge {
            decoded.thumbnail(self.max_edge, self.max_edge)
        } else {
            decoded
        };

        // JPEG has no alpha channel.
        let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());
        let mut encoded = Cursor::new(Vec::new());
        rgb.write_to(&mut encoded, ImageFormat::Jpeg)
            .context("failed to encode captured image as JPEG")?;

        Ok(ImageRef::from_bytes("image/jpeg", encoded.get_ref()))
    }
}
