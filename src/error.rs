//! Error taxonomy for the interval selector.

use thiserror::Error;

/// Everything that can go wrong while building or driving a selector.
#[derive(Debug, Error)]
pub enum SelectorError {
    /// Construction without a container to render into.
    #[error("a container id must be provided")]
    MissingContainer,

    /// Construction without a video source.
    #[error("a video source must be provided")]
    MissingSource,

    /// The configured interval does not fit in the loaded video.
    #[error("video is too short ({duration:.2}s) for a {interval:.2}s interval")]
    VideoTooShort { interval: f64, duration: f64 },

    /// Pixel/time mapping against a track with no usable width.
    #[error("timeline track has no width ({width}px)")]
    ZeroWidthTrack { width: f64 },

    /// The host reported a duration that cannot anchor a timeline.
    #[error("invalid video duration: {duration}")]
    InvalidDuration { duration: f64 },

    /// Interval must be a finite, positive number of seconds.
    #[error("invalid time interval: {interval}")]
    InvalidInterval { interval: f64 },

    /// Only MP4 files can be loaded.
    #[error("Wrong file type, must be video/mp4 (got {mime})")]
    WrongFileType { mime: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SelectorError>;
