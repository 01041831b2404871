/// Source image acquisition from remote or local locations
pub mod acquisition;
/// Command-line interface
pub mod cli;
/// Generation constants and runtime configuration
pub mod configuration;
/// Error types
pub mod error;
/// Piece texture and manifest export
pub mod export;
/// Grid size persistence
pub mod preferences;
/// Command-line progress display
pub mod progress;
