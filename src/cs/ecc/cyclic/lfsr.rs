//! Decoding with a shift register driven by the parity-check polynomial.
//!
//! The register has `deg h` stages. One clock with input bit `b` computes
//! `feedback = b ^ r[0]`, shifts every stage one place towards the front,
//! XORs the feedback into each stage whose tap in `h` is set, and loads the
//! last stage with the feedback gated by the constant coefficient of `h`.
//!
//! The register is not fed the received word itself. The word is first
//! multiplied by the drive polynomial `q(x) = h*(x) / g(x)` modulo x^n + 1,
//! where `h*` is the reciprocal of `h`, and the product is consumed
//! least-significant bit first. Read backwards, the register divides by `h*`,
//! so the final state is `q·(c mod g)` up to a change of basis and is zero
//! exactly for codewords. For the (7,4) code q(x) = x + 1, which drives each
//! clock with the XOR of a bit and its cyclic successor.
//!
//! The construction needs `g` to divide `h*`. Every cyclic Hamming code of
//! length 7 or more satisfies this, because its primitive generator is not its
//! own reciprocal.
//!
//! Errors are located without a table. A lone error in the lowest-order bit
//! produces the *reference* state. Moving that error one place towards the
//! front of the word corresponds to one free-running clock (input 0), so an
//! error at index `(n - 1 + s) mod n` leaves the reference advanced by `s`
//! clocks. The decoder free-runs the reference at most `n` times looking for
//! the observed state.

use crate::cs::ecc::gf2::{self, Bits, BitsRef};
use crate::cs::error::{Error, Result};
use bitvec::prelude::*;
use log::{debug, trace, warn};

use super::syndrome_table::MAX_SYNDROME_WIDTH;
use super::{check_length, flip, DecodeStrategy, Decoded, SyndromeDecoder};

/// Checks that `h` can wire a register for `g` and returns the drive
/// polynomial `h*(x) / g(x)`.
///
/// # Errors
///
/// [`Error::InvalidInput`] if `h` is malformed, has more stages than a
/// syndrome value holds, or `g` does not divide the reciprocal of `h`
pub(crate) fn drive_polynomial(parity_check: &BitsRef, generator: &BitsRef) -> Result<Bits> {
    if parity_check.len() < 2 || !parity_check[0] {
        return Err(Error::invalid_input(
            "Parity-check polynomial must have degree of at least 1 and a leading coefficient of 1",
        ));
    }
    let stages = parity_check.len() - 1;
    if stages > MAX_SYNDROME_WIDTH {
        return Err(Error::invalid_input(format!(
            "Register of {} stages exceeds the maximum syndrome width of {}",
            stages, MAX_SYNDROME_WIDTH
        )));
    }

    let (drive, rem) = gf2::div_rem(&gf2::reciprocal(parity_check), generator)?;
    if !gf2::is_zero(&rem) || drive.is_empty() {
        return Err(Error::invalid_input(format!(
            "Register decoding needs g(x) = {} to divide the reciprocal of h(x) = {}",
            gf2::to_bit_string(generator),
            gf2::to_bit_string(parity_check)
        )));
    }
    Ok(drive)
}

/// Shift-register decoder for a cyclic code.
#[derive(Debug, Clone)]
pub struct LfsrDecoder {
    /// Parity-check polynomial h, MSB first
    taps: Bits,
    /// h*(x) / g(x), multiplied into the word before it reaches the register
    drive: Bits,
    code_length: usize,
    /// State left by a single error in the lowest-order bit
    reference: Bits,
}

impl LfsrDecoder {
    /// Creates the decoder and derives its reference syndrome.
    ///
    /// # Arguments
    ///
    /// * `parity_check` - Parity-check polynomial h, leading coefficient 1
    /// * `generator` - Generator polynomial g, used to derive the drive and check the register
    /// * `code_length` - Codeword length n
    ///
    /// # Returns
    ///
    /// The decoder, [`Error::InvalidInput`] if the pair cannot wire a
    /// register (see [`drive_polynomial`]), or
    /// [`Error::SyndromeTableConstructionFault`] if the register does not
    /// vanish on the generator's shifts or its reference orbit does not single
    /// out every error position
    pub fn new(parity_check: &BitsRef, generator: &BitsRef, code_length: usize) -> Result<Self> {
        if code_length < 2 {
            return Err(Error::invalid_input("Code length must be at least 2"));
        }
        let drive = drive_polynomial(parity_check, generator)?;

        let mut decoder = LfsrDecoder {
            taps: parity_check.to_bitvec(),
            drive,
            code_length,
            reference: Bits::new(),
        };
        decoder.reference =
            decoder.register_state(&gf2::unit_vector(code_length, code_length - 1))?;

        decoder.verify_codewords(generator)?;
        decoder.verify_orbit()?;

        debug!(
            "LFSR decoder ready: {} stages, drive {}, reference {}",
            decoder.stages(),
            gf2::to_bit_string(&decoder.drive),
            gf2::to_bit_string(&decoder.reference)
        );
        Ok(decoder)
    }

    /// Every shift x^i·g(x) that fits in the word must leave the register at zero.
    fn verify_codewords(&self, generator: &BitsRef) -> Result<()> {
        if generator.is_empty() || generator.len() > self.code_length {
            return Err(Error::invalid_input(
                "Generator polynomial does not fit in the code length",
            ));
        }
        for shift in 0..=(self.code_length - generator.len()) {
            let mut word = bitvec![u8, Msb0; 0; self.code_length];
            word[shift..shift + generator.len()].copy_from_bitslice(generator);
            if !gf2::is_zero(&self.register_state(&word)?) {
                return Err(Error::construction_fault(format!(
                    "register does not vanish on codeword {}",
                    gf2::to_bit_string(&word)
                )));
            }
        }
        Ok(())
    }

    /// Free-running the reference must visit one distinct nonzero state per
    /// error position, in the order the search relies on.
    fn verify_orbit(&self) -> Result<()> {
        let mut probe = self.reference.clone();
        let mut visited: Vec<Bits> = Vec::with_capacity(self.code_length);
        for step in 0..self.code_length {
            let position = self.position_after(step);
            let expected = self.register_state(&gf2::unit_vector(self.code_length, position))?;

            if gf2::is_zero(&probe) || probe != expected || visited.contains(&probe) {
                return Err(Error::construction_fault(format!(
                    "register orbit does not identify error position {}",
                    position
                )));
            }
            visited.push(probe.clone());
            self.shift(&mut probe, false);
        }
        Ok(())
    }

    /// Number of register stages (`deg h`)
    pub fn stages(&self) -> usize {
        self.taps.len() - 1
    }

    /// Drive polynomial h*(x) / g(x)
    pub fn drive(&self) -> &BitsRef {
        &self.drive
    }

    /// Reference syndrome: the state left by an error in the lowest-order bit
    pub fn reference(&self) -> &BitsRef {
        &self.reference
    }

    /// Advances `state` by one clock with the given input bit.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInputLength`] unless `state` has one bit per stage
    pub fn clock(&self, state: &mut BitsRef, input: bool) -> Result<()> {
        check_length(state, self.stages())?;
        self.shift(state, input);
        Ok(())
    }

    /// One clock on a state already known to be `stages()` long.
    fn shift(&self, state: &mut BitsRef, input: bool) {
        let stages = self.stages();
        let feedback = input ^ state[0];
        for i in 0..stages - 1 {
            let value = state[i + 1] ^ (feedback & self.taps[i + 1]);
            state.set(i, value);
        }
        state.set(stages - 1, feedback & self.taps[stages]);
    }

    fn register_state(&self, word: &BitsRef) -> Result<Bits> {
        let driven = gf2::cyclic_product(word, &self.drive, word.len())?;
        let mut state = bitvec![u8, Msb0; 0; self.stages()];
        for i in (0..driven.len()).rev() {
            self.shift(&mut state, driven[i]);
        }
        Ok(state)
    }

    /// Index of the error whose state is the reference advanced `steps` clocks
    fn position_after(&self, steps: usize) -> usize {
        (self.code_length - 1 + steps) % self.code_length
    }

    /// Cyclic search for the observed state along the reference orbit.
    fn locate(&self, syndrome: &BitsRef) -> Option<usize> {
        if syndrome.len() != self.stages() {
            return None;
        }
        let mut probe = self.reference.clone();
        for step in 0..self.code_length {
            if probe.as_bitslice() == syndrome {
                return Some(self.position_after(step));
            }
            self.shift(&mut probe, false);
        }
        None
    }
}

impl SyndromeDecoder for LfsrDecoder {
    fn strategy(&self) -> DecodeStrategy {
        DecodeStrategy::Lfsr
    }

    fn code_length(&self) -> usize {
        self.code_length
    }

    fn syndrome(&self, received: &BitsRef) -> Result<Bits> {
        check_length(received, self.code_length)?;
        self.register_state(received)
    }

    fn decode(&self, received: &BitsRef) -> Result<Decoded> {
        let state = self.syndrome(received)?;
        // At most MAX_SYNDROME_WIDTH stages, so the value is exact
        let syndrome = gf2::to_value(&state);

        if gf2::is_zero(&state) {
            trace!("lfsr: no error");
            return Ok(Decoded::no_error(received, syndrome));
        }

        match self.locate(&state) {
            Some(position) => {
                trace!("lfsr: state {:#b} -> position {}", syndrome, position);
                Ok(Decoded::corrected(flip(received, position), position, syndrome))
            }
            None => {
                warn!("lfsr: state {:#b} is not on the reference orbit", syndrome);
                Ok(Decoded::uncorrectable(received, syndrome))
            }
        }
    }
}
