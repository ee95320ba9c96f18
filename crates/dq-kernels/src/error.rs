use thiserror::Error;

pub type KernelResult<T> = Result<T, KernelError>;

/// Failures from the raw numeric kernels (shape mismatch, singular matrix,
/// out-of-contract arguments). These propagate through the dispatch layer
/// unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    #[error("Shape mismatch: {what}")]
    ShapeMismatch { what: String },

    #[error("Singular matrix: {what}")]
    Singular { what: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Unsupported operand rank: {what}")]
    UnsupportedRank { what: String },
}
