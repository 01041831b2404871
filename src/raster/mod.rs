//! Pixel operations on source images
//!
//! This module contains:
//! - Source image rescaling
//! - Piece region extraction, silhouette masking and pivots

/// Region extraction and silhouette masking
pub mod extract;
/// Source image rescaling
pub mod scale;

pub use extract::{CellLayout, ExtractedPiece, PixelRect};
