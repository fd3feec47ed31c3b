//! Error correction code implementations.
//!
//! This module provides:
//! - GF(2) polynomial arithmetic ([`gf2`])
//! - The systematic cyclic (7,4) Hamming code ([`cyclic`]) with two
//!   interchangeable single-error decoders: direct division with a syndrome
//!   table, and a shift register driven by the parity-check polynomial
//!
//! # Error Correction Algorithms
//!
//! Error correction codes are used to detect and correct errors in data
//! transmission and storage, making digital communications more reliable.
//!
//! # Examples
//!
//! ```rust
//! use cyclic_hamming::cs::ecc::{create_cyclic_7_4, ErrorCorrection};
//!
//! let code = create_cyclic_7_4().unwrap();
//! let mut encoded = ErrorCorrection::encode(&code, b"Hi").unwrap();
//! encoded[0] ^= 0x20; // flip one bit of the first block
//! assert_eq!(ErrorCorrection::decode(&code, &encoded).unwrap(), b"Hi");
//! ```

use crate::cs::error::Error;

/// Result type for error correction operations
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for error correction code implementations
pub trait ErrorCorrection {
    /// Encode data with error correction symbols
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decode data and correct errors if possible
    fn decode(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// Polynomial arithmetic over GF(2)
pub mod gf2;

/// Cyclic Hamming codes
pub mod cyclic;
pub use cyclic::{
    build_syndrome_table, create_cyclic, create_cyclic_7_4, cyclic_decode, cyclic_encode,
    CyclicCode, CyclicCodeConfig, DecodeStrategy, Decoded, Outcome, SyndromeDecoder,
    SyndromeTable,
};
