//! Decoding by direct polynomial division.
//!
//! The syndrome of a received word is its remainder under the generator. A
//! zero remainder means the word is a codeword; any other value is looked up in
//! the [`SyndromeTable`] and the bit it names is flipped. Syndromes that are
//! not in the table are reported as uncorrectable and the word is left alone.

use crate::cs::ecc::gf2::{self, Bits, BitsRef};
use crate::cs::error::Result;
use log::{trace, warn};

use super::syndrome_table::SyndromeTable;
use super::{check_length, flip, DecodeStrategy, Decoded, SyndromeDecoder};

/// Syndrome-table decoder for a cyclic code.
#[derive(Debug, Clone)]
pub struct DirectDivisionDecoder {
    generator: Bits,
    code_length: usize,
    table: SyndromeTable,
}

impl DirectDivisionDecoder {
    /// Creates the decoder and builds its syndrome table.
    ///
    /// Fails with a construction fault when the generator cannot correct every
    /// single-bit error at this length.
    pub fn new(generator: &BitsRef, code_length: usize) -> Result<Self> {
        let table = SyndromeTable::build(generator, code_length)?;
        Ok(DirectDivisionDecoder {
            generator: generator.to_bitvec(),
            code_length,
            table,
        })
    }

    pub fn table(&self) -> &SyndromeTable {
        &self.table
    }

    /// Syndrome of `received` as an unsigned integer
    pub fn syndrome_value(&self, received: &BitsRef) -> Result<u32> {
        self.syndrome(received).map(|bits| gf2::to_value(&bits))
    }
}

impl SyndromeDecoder for DirectDivisionDecoder {
    fn strategy(&self) -> DecodeStrategy {
        DecodeStrategy::DirectDivision
    }

    fn code_length(&self) -> usize {
        self.code_length
    }

    fn syndrome(&self, received: &BitsRef) -> Result<Bits> {
        check_length(received, self.code_length)?;
        gf2::remainder_padded(received, &self.generator)
    }

    fn decode(&self, received: &BitsRef) -> Result<Decoded> {
        let syndrome = self.syndrome_value(received)?;

        if syndrome == 0 {
            trace!("direct: no error");
            return Ok(Decoded::no_error(received, syndrome));
        }

        match self.table.position(syndrome) {
            Some(position) => {
                trace!("direct: syndrome {:#b} -> position {}", syndrome, position);
                Ok(Decoded::corrected(flip(received, position), position, syndrome))
            }
            None => {
                warn!("direct: syndrome {:#b} is not correctable", syndrome);
                Ok(Decoded::uncorrectable(received, syndrome))
            }
        }
    }
}
