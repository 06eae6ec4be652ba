//! Error types for sprite location
//!
//! Only malformed input or parameters are errors. Regions that collapse to a
//! single pixel or fall under the minimum height are dropped silently by the
//! detector and never surface here.

use thiserror::Error;

/// Error type for the detection and sorting passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocateError {
    /// The pixel grid has no pixels
    #[error("sprite sheet has no pixels")]
    EmptyInput,
    /// A negative detection margin was supplied
    #[error("invalid margin {0}, margin must be zero or greater")]
    InvalidMargin(i32),
    /// Row sorting was asked to order an empty sprite list
    #[error("sprite sheet has no sprites to sort")]
    EmptySheet,
}
