mod session;
mod source;

pub use session::CaptureSession;
pub use source::{DataUrlSource, FileCaptureSource, ImageCaptureSource, MAX_CAPTURE_EDGE};
