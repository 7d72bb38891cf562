//! Local file streaming for the webview.
//!
//! Videos are served through the `vis` custom protocol so the `<video>`
//! element can load arbitrary paths. Range requests are honoured because
//! the webview seeks by requesting byte ranges.

use std::borrow::Cow;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use http::{header, Request, Response, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};

pub const MEDIA_PROTOCOL: &str = "vis";

/// Largest body returned for a single response; longer ranges are shortened.
const MAX_CHUNK_BYTES: u64 = 4 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum MediaServeError {
    #[error("not found: {0}")]
    NotFound(PathBuf),
    #[error("range not satisfiable for {len} bytes")]
    RangeNotSatisfiable { len: u64 },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Http(#[from] http::Error),
}

/// URL for a local file that resolves through [`MEDIA_PROTOCOL`].
pub fn media_url(path: &Path) -> String {
    let path = path.to_string_lossy().replace('\\', "/");
    let encoded = urlencoding::encode(&path);
    if cfg!(windows) {
        format!("http://{MEDIA_PROTOCOL}.localhost/{encoded}")
    } else {
        format!("{MEDIA_PROTOCOL}://localhost/{encoded}")
    }
}

/// Inclusive byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    /// `start..=end`, shortened to at most [`MAX_CHUNK_BYTES`].
    fn capped(start: u64, end: u64) -> Self {
        Self {
            start,
            end: end.min(start.saturating_add(MAX_CHUNK_BYTES - 1)),
        }
    }

    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Parse a `Range` header against a file of `len` bytes.
///
/// Only the first range of a multi-range request is used, and no range is
/// longer than [`MAX_CHUNK_BYTES`]. `Ok(None)` means the header is absent or
/// not a byte range.
pub fn parse_range(value: Option<&str>, len: u64) -> Result<Option<ByteRange>, MediaServeError> {
    let Some(spec) = value.and_then(|value| value.trim().strip_prefix("bytes=")) else {
        return Ok(None);
    };
    let first = spec.split(',').next().unwrap_or_default().trim();
    let Some((start, end)) = first.split_once('-') else {
        return Ok(None);
    };
    let unsatisfiable = MediaServeError::RangeNotSatisfiable { len };

    let range = match (start.trim(), end.trim()) {
        ("", "") => return Ok(None),
        ("", suffix) => {
            let suffix: u64 = suffix.parse().map_err(|_| unsatisfiable)?;
            if suffix == 0 || len == 0 {
                return Err(MediaServeError::RangeNotSatisfiable { len });
            }
            ByteRange::capped(len.saturating_sub(suffix), len - 1)
        }
        (start, end) => {
            let start: u64 = match start.parse() {
                Ok(start) => start,
                Err(_) => return Err(unsatisfiable),
            };
            if start >= len {
                return Err(unsatisfiable);
            }
            let end = if end.is_empty() {
                len - 1
            } else {
                match end.parse::<u64>() {
                    Ok(end) if end >= start => end.min(len - 1),
                    _ => return Err(unsatisfiable),
                }
            };
            ByteRange::capped(start, end)
        }
    };
    Ok(Some(range))
}

/// File path encoded in a protocol request.
pub fn request_path(request: &Request<Vec<u8>>) -> PathBuf {
    let raw = request.uri().path().trim_start_matches('/');
    let decoded = urlencoding::decode(raw)
        .map(|path| path.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    // Unix absolute paths lose their leading slash to the URL path.
    if cfg!(windows) || decoded.starts_with('/') {
        PathBuf::from(decoded)
    } else {
        PathBuf::from(format!("/{decoded}"))
    }
}

/// Custom protocol handler. Never fails; errors become status codes.
pub fn serve(request: &Request<Vec<u8>>) -> Response<Cow<'static, [u8]>> {
    let path = request_path(request);
    match try_serve(request, &path) {
        Ok(response) => response,
        Err(err) => {
            let status = match &err {
                MediaServeError::NotFound(_) => StatusCode::NOT_FOUND,
                MediaServeError::RangeNotSatisfiable { .. } => StatusCode::RANGE_NOT_SATISFIABLE,
                MediaServeError::Io(_) | MediaServeError::Http(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            warn!(path = %path.display(), %err, "media request failed");
            error_response(status, &err)
        }
    }
}

fn try_serve(
    request: &Request<Vec<u8>>,
    path: &Path,
) -> Result<Response<Cow<'static, [u8]>>, MediaServeError> {
    if !path.is_file() {
        return Err(MediaServeError::NotFound(path.to_path_buf()));
    }
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let range_header = request
        .headers()
        .get(header::RANGE)
        .and_then(|value| value.to_str().ok());

    // Files too large for one body are answered in chunks even without a Range.
    let range = match parse_range(range_header, len)? {
        None if len > MAX_CHUNK_BYTES => Some(ByteRange::capped(0, len - 1)),
        range => range,
    };

    let response = match range {
        Some(range) => {
            debug!(path = %path.display(), start = range.start, end = range.end, "serving range");
            let mut body = vec![0u8; range.len() as usize];
            file.seek(SeekFrom::Start(range.start))?;
            file.read_exact(&mut body)?;
            Response::builder()
                .status(StatusCode::PARTIAL_CONTENT)
                .header(header::CONTENT_TYPE, mime.as_ref())
                .header(header::ACCEPT_RANGES, "bytes")
                .header(
                    header::CONTENT_RANGE,
                    format!("bytes {}-{}/{}", range.start, range.end, len),
                )
                .header(header::CONTENT_LENGTH, body.len())
                .body(Cow::Owned(body))?
        }
        None => {
            let mut body = Vec::with_capacity(len as usize);
            file.read_to_end(&mut body)?;
            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, mime.as_ref())
                .header(header::ACCEPT_RANGES, "bytes")
                .header(header::CONTENT_LENGTH, body.len())
                .body(Cow::Owned(body))?
        }
    };
    Ok(response)
}

fn error_response(status: StatusCode, err: &MediaServeError) -> Response<Cow<'static, [u8]>> {
    let mut response = Response::new(Cow::Owned(err.to_string().into_bytes()));
    *response.status_mut() = status;
    if let MediaServeError::RangeNotSatisfiable { len } = err {
        if let Ok(value) = header::HeaderValue::from_str(&format!("bytes */{len}")) {
            response.headers_mut().insert(header::CONTENT_RANGE, value);
        }
    }
    response
}
