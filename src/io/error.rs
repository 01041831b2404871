//! Error types for acquisition, generation and export

use std::fmt;
use std::path::PathBuf;

/// Boxed underlying error carried by acquisition failures
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for all puzzle operations
#[derive(Debug)]
pub enum PuzzleError {
    /// Source image could not be retrieved or decoded
    ///
    /// No puzzle is produced and no partial state is exposed.
    Acquisition {
        /// Location string the image was requested from
        location: String,
        /// Description of what went wrong
        reason: String,
        /// Underlying transport, file system or decode error
        source: Option<BoxedSource>,
    },

    /// Fault while resolving edges, computing geometry, extracting or masking
    ///
    /// The generation attempt is abandoned; the caller may retry with
    /// different parameters.
    Generation {
        /// Grid cell `(x, y)` being processed, when known
        cell: Option<(usize, usize)>,
        /// Description of the violated condition
        reason: String,
    },

    /// Parameter that cannot be clamped into a usable range
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to load an image from the local file system
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a piece texture to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// JSON file could not be parsed or serialized
    Serialization {
        /// Path of the JSON file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Acquisition {
                location,
                reason,
                source,
            } => match source {
                Some(source) => {
                    write!(f, "Failed to acquire image '{location}': {reason}: {source}")
                }
                None => write!(f, "Failed to acquire image '{location}': {reason}"),
            },
            Self::Generation { cell, reason } => match cell {
                Some((x, y)) => write!(f, "Puzzle generation failed at piece {x}x{y}: {reason}"),
                None => write!(f, "Puzzle generation failed: {reason}"),
            },
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Serialization { path, source } => {
                write!(f, "Invalid JSON in '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for PuzzleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Acquisition {
                source: Some(source),
                ..
            } => Some(source.as_ref()),
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Serialization { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl PuzzleError {
    /// Whether this error came from the acquisition step
    pub const fn is_acquisition(&self) -> bool {
        matches!(self, Self::Acquisition { .. })
    }

    /// Whether this error came from the synchronous generation pipeline
    pub const fn is_generation(&self) -> bool {
        matches!(self, Self::Generation { .. })
    }

    /// Attach the grid cell being processed to a generation error
    ///
    /// Other variants, and generation errors that already name a cell, pass
    /// through unchanged.
    #[must_use]
    pub fn at_cell(self, x: usize, y: usize) -> Self {
        match self {
            Self::Generation { cell: None, reason } => Self::Generation {
                cell: Some((x, y)),
                reason,
            },
            other => other,
        }
    }
}

/// Convenience type alias for puzzle results
pub type Result<T> = std::result::Result<T, PuzzleError>;

impl From<std::io::Error> for PuzzleError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PuzzleError {
    PuzzleError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a generation error not yet tied to a grid cell
pub fn generation_error(reason: &impl ToString) -> PuzzleError {
    PuzzleError::Generation {
        cell: None,
        reason: reason.to_string(),
    }
}

/// Create an acquisition error with an optional underlying cause
pub fn acquisition_error(
    location: &str,
    reason: &impl ToString,
    source: Option<BoxedSource>,
) -> PuzzleError {
    PuzzleError::Acquisition {
        location: location.to_string(),
        reason: reason.to_string(),
        source,
    }
}
