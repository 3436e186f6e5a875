//! AES-128 engine with a configurable round count and a multi-pass chaining driver.
//!
//! This crate follows the FIPS-197 round structure and provides:
//! - Key schedule expansion for an arbitrary round count (up to the fixed
//!   round-constant table).
//! - Single-block encryption.
//! - A chaining driver that re-runs the block cipher over its own output,
//!   folding the original plaintext back in before every pass after the first.
//!
//! The chaining construction is non-standard: there is no initialization
//! vector and the feedback always uses the original plaintext rather than the
//! previous ciphertext. It is provided for behavioral compatibility, not as a
//! recommended mode. The implementation aims for clarity and testability
//! rather than constant-time guarantees; it should not be treated as
//! side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
mod key;
mod round;
mod schedule;
mod tables;

pub use crate::block::Block;
pub use crate::cipher::{encrypt, encrypt_block, CipherContext, RunParameters};
pub use crate::error::{CipherError, Result};
pub use crate::key::CipherKey;
pub use crate::schedule::{KeySchedule, MAX_ROUNDS};
