//! Systematic cyclic Hamming code over GF(2).
//!
//! The (7,4) Hamming code is cyclic: its codewords are exactly the multiples of
//! the generator g(x) = x^3 + x + 1 of degree below 7, and every rotation of a
//! codeword is again a codeword because g(x)·h(x) = x^7 + 1 with the
//! parity-check polynomial h(x) = x^4 + x^2 + x + 1.
//!
//! Encoding is systematic. The data word d(x) is shifted up by x^3 and the
//! remainder of that product under g(x) fills the three low-order parity bits:
//!
//! ```text
//! c(x) = x^3·d(x) + (x^3·d(x) mod g(x))
//! ```
//!
//! so the first four bits of a codeword are the data unchanged.
//!
//! Two interchangeable decoders correct a single flipped bit:
//!
//! - [`DirectDivisionDecoder`] divides by g(x) and looks the remainder up in a
//!   precomputed [`SyndromeTable`]
//! - [`LfsrDecoder`] runs a shift register wired from h(x) over the word and
//!   locates the error by free-running the register from a reference state
//!
//! Both are built from one [`CyclicCodeConfig`] by [`CyclicCode::new`], which
//! validates the polynomial pair before any word can be encoded.
//!
//! # Examples
//!
//! ```
//! use cyclic_hamming::cs::ecc::cyclic::{CyclicCode, DecodeStrategy, Outcome};
//! use cyclic_hamming::cs::ecc::gf2::parse_bits;
//!
//! let code = CyclicCode::hamming_7_4().unwrap();
//! let codeword = code.encode(&parse_bits("1011").unwrap()).unwrap();
//! assert_eq!(codeword, parse_bits("1011000").unwrap());
//!
//! let mut received = codeword.clone();
//! received.set(5, true);
//! let decoded = code.decode_with(&received, DecodeStrategy::Lfsr).unwrap();
//! assert_eq!(decoded.outcome, Outcome::Corrected(5));
//! assert_eq!(decoded.corrected, codeword);
//! ```

use crate::cs::ecc::gf2::{self, Bits, BitsRef, DivisionTrace};
use crate::cs::ecc::{ErrorCorrection, Result};
use crate::cs::error::Error;
use bitvec::prelude::*;
use log::debug;
use std::fmt::{Display, Formatter};

pub mod direct;
pub mod lfsr;
pub mod noise;
pub mod syndrome_table;


pub use direct::DirectDivisionDecoder;
pub use lfsr::LfsrDecoder;
pub use noise::{flip_bit, inject_errors, inject_single_error, ErrorPolicy};
pub use syndrome_table::{build_syndrome_table, SyndromeTable};

/// g(x) = x^3 + x + 1
pub const GENERATOR_7_4: [bool; 4] = [true, false, true, true];

/// h(x) = x^4 + x^2 + x + 1
pub const PARITY_CHECK_7_4: [bool; 5] = [true, false, true, true, true];

/// Generator polynomial of the (7,4) code as a bit vector
pub fn generator_7_4() -> Bits {
    GENERATOR_7_4.iter().copied().collect()
}

/// Parity-check polynomial of the (7,4) code as a bit vector
pub fn parity_check_7_4() -> Bits {
    PARITY_CHECK_7_4.iter().copied().collect()
}

/// Which syndrome computation a decode uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DecodeStrategy {
    /// Remainder under g(x) plus syndrome table lookup
    #[default]
    DirectDivision,
    /// Shift register wired from h(x) plus cyclic search
    Lfsr,
}

impl DecodeStrategy {
    pub const ALL: [DecodeStrategy; 2] = [DecodeStrategy::DirectDivision, DecodeStrategy::Lfsr];
}

impl Display for DecodeStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeStrategy::DirectDivision => write!(f, "direct division"),
            DecodeStrategy::Lfsr => write!(f, "lfsr"),
        }
    }
}

/// Terminal state of a decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The received word is a codeword
    NoError,
    /// One bit, at this zero-based position, was flipped back
    Corrected(usize),
    /// Nonzero syndrome that matches no single-bit error; the word is untouched
    Uncorrectable,
}

/// Result of decoding one received word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// The received word with at most one bit flipped
    pub corrected: Bits,
    pub outcome: Outcome,
    /// Syndrome as computed by the strategy that produced this result
    pub syndrome: u32,
}

impl Decoded {
    fn no_error(received: &BitsRef, syndrome: u32) -> Self {
        Decoded {
            corrected: received.to_bitvec(),
            outcome: Outcome::NoError,
            syndrome,
        }
    }

    fn corrected(corrected: Bits, position: usize, syndrome: u32) -> Self {
        Decoded {
            corrected,
            outcome: Outcome::Corrected(position),
            syndrome,
        }
    }

    fn uncorrectable(received: &BitsRef, syndrome: u32) -> Self {
        Decoded {
            corrected: received.to_bitvec(),
            outcome: Outcome::Uncorrectable,
            syndrome,
        }
    }

    /// Whether the decoder ended with a codeword
    pub fn is_resolved(&self) -> bool {
        self.outcome != Outcome::Uncorrectable
    }

    /// Converts an uncorrectable outcome into [`Error::UncorrectableSyndrome`].
    pub fn into_result(self) -> Result<Bits> {
        match self.outcome {
            Outcome::Uncorrectable => Err(Error::UncorrectableSyndrome {
                syndrome: self.syndrome,
            }),
            _ => Ok(self.corrected),
        }
    }
}

/// A syndrome computation plus the error search that goes with it.
pub trait SyndromeDecoder {
    fn strategy(&self) -> DecodeStrategy;

    /// Length of the words this decoder accepts
    fn code_length(&self) -> usize;

    /// Syndrome of a received word; all zeros exactly for codewords
    fn syndrome(&self, received: &BitsRef) -> Result<Bits>;

    /// Corrects at most one flipped bit
    fn decode(&self, received: &BitsRef) -> Result<Decoded>;
}

fn check_length(word: &BitsRef, expected: usize) -> Result<()> {
    if word.len() != expected {
        return Err(Error::InvalidInputLength {
            expected,
            actual: word.len(),
        });
    }
    Ok(())
}

/// Copy of `word` with one bit inverted; `position` is already known to be in range.
fn flip(word: &BitsRef, position: usize) -> Bits {
    let mut flipped = word.to_bitvec();
    flipped.set(position, !word[position]);
    flipped
}

/// Polynomials and decoding preferences of a cyclic code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyclicCodeConfig {
    /// Generator polynomial g(x), MSB first
    pub generator: Bits,
    /// Parity-check polynomial h(x), MSB first
    pub parity_check: Bits,
    /// Codeword length n
    pub code_length: usize,
    /// Strategy used by [`CyclicCode::decode`]
    pub strategy: DecodeStrategy,
}

impl Default for CyclicCodeConfig {
    fn default() -> Self {
        Self::hamming_7_4()
    }
}

impl CyclicCodeConfig {
    /// The (7,4) cyclic Hamming code decoded by direct division
    pub fn hamming_7_4() -> Self {
        CyclicCodeConfig {
            generator: generator_7_4(),
            parity_check: parity_check_7_4(),
            code_length: 7,
            strategy: DecodeStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: DecodeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Checks the shape of both polynomials, that g(x)·h(x) = x^n + 1, and
    /// that h(x) can wire the LFSR decoder for g(x).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] for malformed polynomials, a register wider than
    /// a syndrome value, or a generator that does not divide the reciprocal of
    /// h(x); [`Error::SyndromeTableConstructionFault`] if the pair does not
    /// multiply to x^n + 1
    pub fn validate(&self) -> Result<()> {
        let n = self.code_length;
        if n < 2 {
            return Err(Error::invalid_input("Code length must be at least 2"));
        }
        if self.generator.len() < 2 || !self.generator[0] {
            return Err(Error::invalid_input(
                "Generator polynomial must have degree of at least 1 and a leading coefficient of 1",
            ));
        }
        let parity_bits = self.generator.len() - 1;
        if parity_bits >= n {
            return Err(Error::invalid_input(format!(
                "Generator degree ({}) must be less than code length ({})",
                parity_bits, n
            )));
        }
        if self.parity_check.is_empty() || !self.parity_check[0] {
            return Err(Error::invalid_input(
                "Parity-check polynomial must have a leading coefficient of 1",
            ));
        }
        if self.parity_check.len() - 1 != n - parity_bits {
            return Err(Error::invalid_input(format!(
                "Parity-check degree must be {}, got {}",
                n - parity_bits,
                self.parity_check.len() - 1
            )));
        }
        if gf2::multiply(&self.generator, &self.parity_check) != gf2::monomial_plus_one(n) {
            return Err(Error::construction_fault(format!(
                "g(x)·h(x) is not x^{} + 1",
                n
            )));
        }
        lfsr::drive_polynomial(&self.parity_check, &self.generator)?;
        Ok(())
    }
}

/// A validated cyclic code with both decoders ready.
///
/// Immutable once built; share it by reference across threads.
#[derive(Debug, Clone)]
pub struct CyclicCode {
    config: CyclicCodeConfig,
    data_length: usize,
    direct: DirectDivisionDecoder,
    lfsr: LfsrDecoder,
}

impl CyclicCode {
    /// Validates the configuration and derives the syndrome table and the
    /// LFSR reference syndrome.
    ///
    /// # Returns
    ///
    /// The code, [`Error::InvalidInput`] for malformed polynomials, or
    /// [`Error::SyndromeTableConstructionFault`] when the pair cannot correct
    /// every single-bit error
    pub fn new(config: CyclicCodeConfig) -> Result<Self> {
        config.validate()?;

        let n = config.code_length;
        let direct = DirectDivisionDecoder::new(&config.generator, n)?;
        let lfsr = LfsrDecoder::new(&config.parity_check, &config.generator, n)?;
        let data_length = n - (config.generator.len() - 1);

        debug!(
            "Cyclic ({}, {}) code with g = {}, h = {}, decoding by {}",
            n,
            data_length,
            gf2::to_bit_string(&config.generator),
            gf2::to_bit_string(&config.parity_check),
            config.strategy
        );

        Ok(CyclicCode {
            config,
            data_length,
            direct,
            lfsr,
        })
    }

    /// Creates the standard (7,4) code
    pub fn hamming_7_4() -> Result<Self> {
        Self::new(CyclicCodeConfig::hamming_7_4())
    }

    pub fn config(&self) -> &CyclicCodeConfig {
        &self.config
    }

    /// Codeword length (n)
    pub fn code_length(&self) -> usize {
        self.config.code_length
    }

    /// Data length (k)
    pub fn data_length(&self) -> usize {
        self.data_length
    }

    /// Number of parity bits (n - k)
    pub fn parity_length(&self) -> usize {
        self.code_length() - self.data_length
    }

    pub fn generator(&self) -> &BitsRef {
        &self.config.generator
    }

    pub fn parity_check(&self) -> &BitsRef {
        &self.config.parity_check
    }

    pub fn strategy(&self) -> DecodeStrategy {
        self.config.strategy
    }

    pub fn syndrome_table(&self) -> &SyndromeTable {
        self.direct.table()
    }

    pub fn direct(&self) -> &DirectDivisionDecoder {
        &self.direct
    }

    pub fn lfsr(&self) -> &LfsrDecoder {
        &self.lfsr
    }

    /// The decoder implementing `strategy`
    pub fn decoder(&self, strategy: DecodeStrategy) -> &dyn SyndromeDecoder {
        match strategy {
            DecodeStrategy::DirectDivision => &self.direct as &dyn SyndromeDecoder,
            DecodeStrategy::Lfsr => &self.lfsr,
        }
    }

    /// Encodes `k` data bits into an `n`-bit systematic codeword.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInputLength`] unless `data` is exactly `k` bits
    pub fn encode(&self, data: &BitsRef) -> Result<Bits> {
        check_length(data, self.data_length)?;

        let mut shifted = data.to_bitvec();
        shifted.resize(self.code_length(), false);

        let parity = gf2::remainder_padded(&shifted, self.generator())?;
        let mut codeword = shifted;
        for (i, bit) in parity.iter().by_vals().enumerate() {
            let position = self.data_length + i;
            let value = codeword[position] ^ bit;
            codeword.set(position, value);
        }
        Ok(codeword)
    }

    /// Encodes a string such as `"1011"`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInputAlphabet`] for anything but `0`/`1`, then
    /// [`Error::InvalidInputLength`] for the wrong number of bits
    pub fn encode_str(&self, text: &str) -> Result<Bits> {
        self.encode(&gf2::parse_bits(text)?)
    }

    /// Encodes digits such as `[1, 0, 1, 1]`.
    pub fn encode_digits(&self, digits: &[u8]) -> Result<Bits> {
        self.encode(&gf2::bits_from_digits(digits)?)
    }

    /// The data bits carried by a codeword (its first `k` bits)
    pub fn extract_data(&self, codeword: &BitsRef) -> Result<Bits> {
        check_length(codeword, self.code_length())?;
        Ok(codeword[..self.data_length].to_bitvec())
    }

    /// Whether `word` is divisible by the generator
    pub fn is_codeword(&self, word: &BitsRef) -> Result<bool> {
        self.direct.syndrome(word).map(|syndrome| gf2::is_zero(&syndrome))
    }

    /// Decodes with the configured strategy.
    pub fn decode(&self, received: &BitsRef) -> Result<Decoded> {
        self.decode_with(received, self.config.strategy)
    }

    /// Decodes with an explicit strategy.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInputLength`] unless `received` is exactly `n` bits.
    /// An uncorrectable word is not an error; see [`Outcome::Uncorrectable`].
    pub fn decode_with(&self, received: &BitsRef, strategy: DecodeStrategy) -> Result<Decoded> {
        self.decoder(strategy).decode(received)
    }

    /// Records the division of `received` by the generator step by step.
    pub fn trace_syndrome(&self, received: &BitsRef) -> Result<DivisionTrace> {
        check_length(received, self.code_length())?;
        gf2::remainder_traced(received, self.generator()).map(|(_, trace)| trace)
    }
}

/// Bytes are split into 4-bit blocks, high nibble first, and each block is
/// encoded into `n` bits. Blocks are packed MSB first; the last byte is padded
/// with zeros.
impl ErrorCorrection for CyclicCode {
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.is_empty() {
            return Ok(Vec::new());
        }
        if self.data_length != 4 {
            return Err(Error::invalid_input(
                "Byte streams require a code with 4 data bits per block",
            ));
        }

        let data_bits = data.view_bits::<Msb0>();
        let n = self.code_length();
        let blocks = data_bits.len() / self.data_length;
        let mut encoded = bitvec![u8, Msb0; 0; blocks * n];

        for (block, chunk) in data_bits.chunks(self.data_length).enumerate() {
            let codeword = CyclicCode::encode(self, chunk)?;
            encoded[block * n..(block + 1) * n].copy_from_bitslice(&codeword);
        }

        Ok(encoded.as_raw_slice().to_vec())
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.is_empty() {
            return Ok(Vec::new());
        }
        if self.data_length != 4 {
            return Err(Error::invalid_input(
                "Byte streams require a code with 4 data bits per block",
            ));
        }

        let encoded_bits = data.view_bits::<Msb0>();
        let n = self.code_length();
        let blocks = encoded_bits.len() / n;
        if blocks % 2 != 0 {
            return Err(Error::invalid_input(format!(
                "Encoded data holds {} blocks, expected an even number",
                blocks
            )));
        }

        let mut decoded = bitvec![u8, Msb0; 0; blocks * self.data_length];
        for block in 0..blocks {
            let received = &encoded_bits[block * n..(block + 1) * n];
            let corrected = CyclicCode::decode(self, received)?.into_result()?;
            decoded[block * self.data_length..(block + 1) * self.data_length]
                .copy_from_bitslice(&corrected[..self.data_length]);
        }

        Ok(decoded.as_raw_slice().to_vec())
    }
}

/// Creates the standard (7,4) cyclic Hamming code
pub fn create_cyclic_7_4() -> Result<CyclicCode> {
    CyclicCode::hamming_7_4()
}

/// Creates a cyclic code from an explicit configuration
pub fn create_cyclic(config: CyclicCodeConfig) -> Result<CyclicCode> {
    CyclicCode::new(config)
}

/// Encodes 4 data bits with the standard (7,4) code
pub fn cyclic_encode(data: &BitsRef) -> Result<Bits> {
    let code = create_cyclic_7_4()?;
    code.encode(data)
}

/// Decodes a 7-bit word with the standard (7,4) code
pub fn cyclic_decode(received: &BitsRef, strategy: DecodeStrategy) -> Result<Decoded> {
    let code = create_cyclic_7_4()?;
    code.decode_with(received, strategy)
}
