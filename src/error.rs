//! Error types for the frame solver

use thiserror::Error;

/// Main error type for solver operations
#[derive(Error, Debug)]
pub enum FrameError {
    /// Duplicate or zero-length members, dangling support/load references
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Load definitions that cannot be applied, e.g. a point load located
    /// outside its host member
    #[error("Invalid load: {0}")]
    InvalidLoad(String),

    /// The restrained stiffness submatrix is singular or near-singular,
    /// meaning the structure is kinematically unstable (missing support,
    /// mechanism, or disconnected component)
    #[error("Structure is underconstrained: {0}")]
    Underconstrained(String),

    /// The solve produced a solution that violates global equilibrium
    #[error(
        "Equilibrium check failed: residual {residual:.3e} exceeds tolerance {tolerance:.3e}"
    )]
    NumericalInstability { residual: f64, tolerance: f64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for solver operations
pub type FrameResult<T> = Result<T, FrameError>;
