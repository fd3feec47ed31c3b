//! Lookup table from division syndromes to single-bit error positions.
//!
//! For a code that corrects one error, every position `p` of an `n`-bit word
//! must produce its own nonzero syndrome `x^(n-1-p) mod g(x)`. The table is
//! built once from the generator and checked for that bijection; a generator
//! that fails the check cannot be used for single-error correction and
//! construction stops with [`Error::SyndromeTableConstructionFault`].

use crate::cs::ecc::gf2::{self, BitsRef};
use crate::cs::error::{Error, Result};
use log::debug;
use std::collections::BTreeMap;

use super::generator_7_4;

/// Syndrome values wider than this cannot be read into a `u32`
pub(crate) const MAX_SYNDROME_WIDTH: usize = 32;

/// Immutable mapping `syndrome value -> zero-based error position`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyndromeTable {
    /// Number of bits in a syndrome (`deg g`)
    syndrome_width: usize,
    entries: BTreeMap<u32, usize>,
}

impl SyndromeTable {
    /// Builds the table for `code_length`-bit words divided by `generator`.
    ///
    /// # Arguments
    ///
    /// * `generator` - Generator polynomial, MSB first, leading coefficient 1
    /// * `code_length` - Codeword length n
    ///
    /// # Returns
    ///
    /// The table, or [`Error::SyndromeTableConstructionFault`] if two positions
    /// share a syndrome or a position has the zero syndrome
    pub fn build(generator: &BitsRef, code_length: usize) -> Result<Self> {
        if generator.len() < 2 {
            return Err(Error::invalid_input(
                "Generator polynomial must have degree of at least 1",
            ));
        }
        let syndrome_width = generator.len() - 1;
        if syndrome_width > MAX_SYNDROME_WIDTH {
            return Err(Error::invalid_input(format!(
                "Syndrome width {} exceeds the maximum of {}",
                syndrome_width, MAX_SYNDROME_WIDTH
            )));
        }

        let mut entries = BTreeMap::new();
        for position in 0..code_length {
            let error = gf2::unit_vector(code_length, position);
            let syndrome = gf2::to_value(&gf2::remainder_padded(&error, generator)?);

            if syndrome == 0 {
                return Err(Error::construction_fault(format!(
                    "error at position {} has a zero syndrome",
                    position
                )));
            }
            if let Some(previous) = entries.insert(syndrome, position) {
                return Err(Error::construction_fault(format!(
                    "positions {} and {} share syndrome {:#b}",
                    previous, position, syndrome
                )));
            }
        }

        let table = SyndromeTable {
            syndrome_width,
            entries,
        };
        table.verify_bijection(code_length)?;

        debug!(
            "Built syndrome table for n={} with {} entries",
            code_length,
            table.len()
        );
        Ok(table)
    }

    fn verify_bijection(&self, code_length: usize) -> Result<()> {
        if self.entries.len() != code_length {
            return Err(Error::construction_fault(format!(
                "expected {} entries, found {}",
                code_length,
                self.entries.len()
            )));
        }
        let mut seen = vec![false; code_length];
        for &position in self.entries.values() {
            if position >= code_length || seen[position] {
                return Err(Error::construction_fault(format!(
                    "position {} is out of range or repeated",
                    position
                )));
            }
            seen[position] = true;
        }
        Ok(())
    }

    /// Error position for a syndrome value, if it is one of the table's keys
    pub fn position(&self, syndrome: u32) -> Option<usize> {
        self.entries.get(&syndrome).copied()
    }

    /// Syndrome value produced by a single error at `position`
    pub fn syndrome_for(&self, position: usize) -> Option<u32> {
        self.entries
            .iter()
            .find(|&(_, &p)| p == position)
            .map(|(&syndrome, _)| syndrome)
    }

    pub fn syndrome_width(&self) -> usize {
        self.syndrome_width
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(syndrome, position)` pairs in ascending syndrome order
    pub fn iter(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        self.entries.iter().map(|(&syndrome, &position)| (syndrome, position))
    }
}

/// Builds the syndrome table of the standard (7,4) cyclic Hamming code.
pub fn build_syndrome_table() -> Result<SyndromeTable> {
    SyndromeTable::build(&generator_7_4(), 7)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::ecc::gf2::parse_bits;
    use std::collections::BTreeSet;

    #[test]
    fn test_standard_table_is_bijective() {
        let table = build_syndrome_table().unwrap();
        assert_eq!(table.len(), 7);
        assert_eq!(table.syndrome_width(), 3);

        let positions: BTreeSet<usize> = table.iter().map(|(_, p)| p).collect();
        assert_eq!(positions, (0..7).collect());

        let syndromes: BTreeSet<u32> = table.iter().map(|(s, _)| s).collect();
        assert_eq!(syndromes, (1..8).collect());
    }

    #[test]
    fn test_standard_table_entries() {
        let table = build_syndrome_table().unwrap();
        // x^0 .. x^2 map to themselves
        assert_eq!(table.position(0b001), Some(6));
        assert_eq!(table.position(0b010), Some(5));
        assert_eq!(table.position(0b100), Some(4));
        // x^3 = x + 1, x^4 = x^2 + x, x^5 = x^2 + x + 1, x^6 = x^2 + 1
        assert_eq!(table.position(0b011), Some(3));
        assert_eq!(table.position(0b110), Some(2));
        assert_eq!(table.position(0b111), Some(1));
        assert_eq!(table.position(0b101), Some(0));

        assert_eq!(table.position(0), None);
        assert_eq!(table.syndrome_for(5), Some(0b010));
        assert_eq!(table.syndrome_for(7), None);
    }

    #[test]
    fn test_colliding_generator_is_a_fault() {
        // x^3 + 1 only has period 3, so positions 0 and 3 collide
        let result = SyndromeTable::build(&parse_bits("1001").unwrap(), 7);
        assert!(matches!(
            result,
            Err(Error::SyndromeTableConstructionFault(_))
        ));

        // x + 1 has a single nonzero syndrome
        let result = SyndromeTable::build(&parse_bits("11").unwrap(), 7);
        assert!(matches!(
            result,
            Err(Error::SyndromeTableConstructionFault(_))
        ));
    }

    #[test]
    fn test_zero_syndrome_is_a_fault() {
        // x^3 divides the high-order unit errors
        let result = SyndromeTable::build(&parse_bits("1000").unwrap(), 7);
        assert!(matches!(
            result,
            Err(Error::SyndromeTableConstructionFault(_))
        ));
    }

    #[test]
    fn test_too_long_for_generator_is_a_fault() {
        // A degree-3 generator has only 7 nonzero syndromes
        let result = SyndromeTable::build(&generator_7_4(), 8);
        assert!(matches!(
            result,
            Err(Error::SyndromeTableConstructionFault(_))
        ));
    }

    #[test]
    fn test_invalid_generator_shape() {
        assert!(matches!(
            SyndromeTable::build(&parse_bits("1").unwrap(), 7),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            SyndromeTable::build(&parse_bits("0101").unwrap(), 7),
            Err(Error::InvalidInput(_))
        ));
    }
}
