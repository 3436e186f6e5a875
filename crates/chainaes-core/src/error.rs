//! Error taxonomy for cipher setup and key expansion.

use thiserror::Error;

/// Errors reported before any cipher work runs.
///
/// Every variant is fatal for the current run: the engine either produces one
/// complete ciphertext block or nothing at all.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CipherError {
    /// A run parameter is outside the supported range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// The requested round count needs a round constant past the end of the
    /// fixed table.
    #[error("round count {rounds} exceeds the round-constant table (max {max})")]
    RconExhausted {
        /// The rejected round count.
        rounds: u32,
        /// Largest round count the table supports.
        max: u32,
    },
}

/// Convenience alias for results carrying [`CipherError`].
pub type Result<T> = core::result::Result<T, CipherError>;
