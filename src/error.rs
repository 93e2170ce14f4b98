//! Error types for ribbon construction and picking.

use thiserror::Error;

/// Errors that can occur while building or picking a ribbon.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RibbonError {
    /// The point sequence could not be interpreted as a list of 3D points.
    #[error("Invalid point sequence: {0}")]
    InvalidInput(String),

    /// A picking query needs a vertex attribute that the buffer set does not provide.
    #[error("Missing vertex attribute: {0}")]
    MissingAttribute(&'static str),
}

/// Result alias used throughout the crate.
pub type Result<T, E = RibbonError> = std::result::Result<T, E>;
