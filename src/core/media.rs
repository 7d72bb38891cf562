//! Video file checks.

use std::path::Path;

use crate::error::{Result, SelectorError};

pub const VIDEO_MIME: &str = "video/mp4";

/// Accept only files whose extension maps to `video/mp4`.
pub fn ensure_mp4(path: &Path) -> Result<()> {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.essence_str() == VIDEO_MIME {
        Ok(())
    } else {
        Err(SelectorError::WrongFileType {
            mime: mime.essence_str().to_string(),
        })
    }
}
