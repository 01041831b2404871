//! Source image acquisition from remote or local locations

use std::path::{Path, PathBuf};
use std::time::Duration;

use image::RgbaImage;
use log::debug;
use url::Url;

use crate::io::configuration::REQUEST_TIMEOUT_SECS;
use crate::io::error::{Result, acquisition_error};

/// Fallback name for images whose location has no usable file name
const UNNAMED_IMAGE: &str = "image";

/// Where a source image is fetched from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLocation {
    /// `http://` or `https://` URL
    Remote(Url),
    /// `file://` URL or plain file system path
    Local(PathBuf),
}

impl ImageLocation {
    /// Parse a location string
    ///
    /// Strings without a scheme are treated as local paths.
    ///
    /// # Errors
    ///
    /// Returns an acquisition error for malformed URLs, unsupported schemes
    /// and `file://` URLs that do not name a local path
    pub fn parse(location: &str) -> Result<Self> {
        match Url::parse(location) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(Self::Remote(url)),
                "file" => url.to_file_path().map(Self::Local).map_err(|()| {
                    acquisition_error(location, &"file location is not a local path", None)
                }),
                scheme => Err(acquisition_error(
                    location,
                    &format!("unsupported scheme '{scheme}', expected http://, https:// or file://"),
                    None,
                )),
            },
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(Self::Local(PathBuf::from(location)))
            }
            Err(error) => Err(acquisition_error(
                location,
                &"malformed location",
                Some(Box::new(error)),
            )),
        }
    }

    /// Image name derived from the file stem of the last path segment
    pub fn image_name(&self) -> String {
        let segment = match self {
            Self::Remote(url) => url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .map(Path::new),
            Self::Local(path) => Some(path.as_path()),
        };

        segment
            .and_then(Path::file_stem)
            .map(|stem| stem.to_string_lossy().to_string())
            .filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| UNNAMED_IMAGE.to_string())
    }
}

/// Decoded source image with the name used for the puzzle
#[derive(Debug, Clone)]
pub struct AcquiredImage {
    /// Image name
    pub name: String,
    /// Decoded pixels
    pub image: RgbaImage,
}

/// Fetch and decode the image at `location`
///
/// Suspends until the transfer completes or fails.
///
/// # Errors
///
/// Returns an acquisition error on network, file system or decode failure
pub async fn acquire(location: &str) -> Result<AcquiredImage> {
    let parsed = ImageLocation::parse(location)?;
    let bytes = fetch_bytes(&parsed, location).await?;
    let image = decode_image(location, &bytes)?;

    debug!(
        "Acquired {}x{} image from '{location}'",
        image.width(),
        image.height()
    );

    Ok(AcquiredImage {
        name: parsed.image_name(),
        image,
    })
}

/// Retrieve the raw bytes behind a location
///
/// # Errors
///
/// Returns an acquisition error if the transfer fails or the server
/// responds with an error status
pub async fn fetch_bytes(location: &ImageLocation, raw: &str) -> Result<Vec<u8>> {
    match location {
        ImageLocation::Remote(url) => {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .map_err(|error| {
                    acquisition_error(raw, &"could not create HTTP client", Some(Box::new(error)))
                })?;
            let response = client
                .get(url.clone())
                .send()
                .await
                .and_then(reqwest::Response::error_for_status)
                .map_err(|error| {
                    acquisition_error(raw, &"request failed", Some(Box::new(error)))
                })?;
            let bytes = response.bytes().await.map_err(|error| {
                acquisition_error(raw, &"transfer interrupted", Some(Box::new(error)))
            })?;
            Ok(bytes.to_vec())
        }
        ImageLocation::Local(path) => tokio::fs::read(path).await.map_err(|error| {
            acquisition_error(raw, &"could not read file", Some(Box::new(error)))
        }),
    }
}

/// Decode encoded image bytes into RGBA pixels
///
/// # Errors
///
/// Returns an acquisition error if the bytes are not a supported image
pub fn decode_image(location: &str, bytes: &[u8]) -> Result<RgbaImage> {
    image::load_from_memory(bytes)
        .map(|decoded| decoded.to_rgba8())
        .map_err(|error| acquisition_error(location, &"could not decode image", Some(Box::new(error))))
}
