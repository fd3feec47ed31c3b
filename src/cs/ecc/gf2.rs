//! Polynomial arithmetic over GF(2).
//!
//! Polynomials are stored as MSB-first bit vectors: the first bit is the
//! coefficient of the highest power and the length of the vector minus one is
//! its nominal degree. `[1, 0, 1, 1]` is therefore x^3 + x + 1.
//!
//! Addition is XOR and multiplication is AND, so long division reduces to
//! repeatedly XOR-ing the divisor into the high-order window of the dividend.
//! The remainder is available in two shapes:
//!
//! - [`remainder`] trims leading zeros (the zero polynomial is empty)
//! - [`remainder_padded`] left-pads to `divisor.len() - 1` bits, the natural
//!   width of a syndrome
//!
//! [`remainder_traced`] additionally records every step of the division as a
//! [`DivisionTrace`] that can be replayed or rendered by a caller.

use crate::cs::error::{Error, Result};
use bitvec::prelude::*;
use std::fmt::{Display, Formatter};

/// Owned MSB-first bit vector
pub type Bits = BitVec<u8, Msb0>;

/// Borrowed MSB-first bit vector
pub type BitsRef = BitSlice<u8, Msb0>;

/// One step of the long division.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivisionStep {
    /// Number of leading coefficients already consumed when the step began
    pub offset: usize,
    /// Leading bit of the working dividend; the divisor is only XOR-ed in when it is set
    pub leading_bit: bool,
    /// Working dividend before the step
    pub before: Bits,
    /// Working dividend after the XOR and the shift
    pub after: Bits,
}

/// Ordered record of a GF(2) long division.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivisionTrace {
    dividend: Bits,
    divisor: Bits,
    steps: Vec<DivisionStep>,
}

impl DivisionTrace {
    /// The dividend the trace started from
    pub fn dividend(&self) -> &BitsRef {
        &self.dividend
    }

    /// The divisor used at every step
    pub fn divisor(&self) -> &BitsRef {
        &self.divisor
    }

    /// Steps in execution order
    pub fn steps(&self) -> &[DivisionStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Final working dividend, i.e. the untrimmed remainder
    pub fn remainder(&self) -> Bits {
        self.steps
            .last()
            .map(|step| step.after.clone())
            .unwrap_or_else(|| self.dividend.clone())
    }

    /// Re-executes the recorded steps from the dividend and checks that every
    /// recorded state matches what the arithmetic produces.
    ///
    /// # Returns
    ///
    /// The untrimmed remainder, or an error naming the first step that diverges
    pub fn replay(&self) -> Result<Bits> {
        let mut work = self.dividend.clone();
        for (index, step) in self.steps.iter().enumerate() {
            if step.before != work || step.leading_bit != work[0] {
                return Err(Error::invalid_input(format!(
                    "division trace diverges before step {}",
                    index
                )));
            }
            reduce_once(&mut work, &self.divisor);
            if step.after != work {
                return Err(Error::invalid_input(format!(
                    "division trace diverges after step {}",
                    index
                )));
            }
        }
        if work.len() >= self.divisor.len() {
            return Err(Error::invalid_input("division trace is incomplete"));
        }
        Ok(work)
    }
}

impl Display for DivisionTrace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} / {}",
            to_bit_string(&self.dividend),
            to_bit_string(&self.divisor)
        )?;
        for step in &self.steps {
            writeln!(
                f,
                "{:>3}: {} {} -> {}",
                step.offset,
                u8::from(step.leading_bit),
                to_bit_string(&step.before),
                to_bit_string(&step.after)
            )?;
        }
        Ok(())
    }
}

/// Computes `dividend mod divisor` with leading zeros removed.
///
/// A zero remainder is returned as an empty vector, and a dividend shorter than
/// the divisor comes back unchanged apart from trimming.
///
/// # Errors
///
/// [`Error::InvalidInput`] if the divisor is empty or its leading coefficient is 0
pub fn remainder(dividend: &BitsRef, divisor: &BitsRef) -> Result<Bits> {
    divide(dividend, divisor, None).map(|work| trim(&work))
}

/// Computes `dividend mod divisor` left-padded to exactly `divisor.len() - 1` bits.
///
/// # Errors
///
/// [`Error::InvalidInput`] if the divisor is empty or its leading coefficient is 0
pub fn remainder_padded(dividend: &BitsRef, divisor: &BitsRef) -> Result<Bits> {
    let work = divide(dividend, divisor, None)?;
    Ok(pad_left(&work, divisor.len() - 1))
}

/// Same as [`remainder_padded`] but also returns the step-by-step trace.
///
/// The remainder is identical to the untraced call.
pub fn remainder_traced(dividend: &BitsRef, divisor: &BitsRef) -> Result<(Bits, DivisionTrace)> {
    let mut steps = Vec::new();
    let work = divide(dividend, divisor, Some(&mut steps))?;
    let trace = DivisionTrace {
        dividend: dividend.to_bitvec(),
        divisor: divisor.to_bitvec(),
        steps,
    };
    Ok((pad_left(&work, divisor.len() - 1), trace))
}

fn check_divisor(divisor: &BitsRef) -> Result<()> {
    if divisor.is_empty() {
        return Err(Error::invalid_input("Divisor must not be empty"));
    }
    if !divisor[0] {
        return Err(Error::invalid_input(
            "Divisor must have a leading coefficient of 1",
        ));
    }
    Ok(())
}

fn divide(
    dividend: &BitsRef,
    divisor: &BitsRef,
    mut trace: Option<&mut Vec<DivisionStep>>,
) -> Result<Bits> {
    check_divisor(divisor)?;

    let mut work = dividend.to_bitvec();
    let mut offset = 0;
    while work.len() >= divisor.len() {
        let leading_bit = work[0];
        let before = trace.as_ref().map(|_| work.clone());

        reduce_once(&mut work, divisor);

        if let (Some(steps), Some(before)) = (trace.as_mut(), before) {
            steps.push(DivisionStep {
                offset,
                leading_bit,
                before,
                after: work.clone(),
            });
        }
        offset += 1;
    }
    Ok(work)
}

/// XOR the divisor into the leading window if the leading bit is set, then
/// drop the leading coefficient.
fn reduce_once(work: &mut Bits, divisor: &BitsRef) {
    if work[0] {
        for (i, coefficient) in divisor.iter().by_vals().enumerate() {
            let value = work[i] ^ coefficient;
            work.set(i, value);
        }
    }
    work.remove(0);
}

/// Quotient and padded remainder of `dividend / divisor`.
///
/// The quotient has its leading zeros removed, so a dividend of lower degree
/// than the divisor gives an empty quotient.
///
/// # Errors
///
/// [`Error::InvalidInput`] if the divisor is empty or its leading coefficient is 0
pub fn div_rem(dividend: &BitsRef, divisor: &BitsRef) -> Result<(Bits, Bits)> {
    check_divisor(divisor)?;

    let mut work = dividend.to_bitvec();
    let mut quotient = Bits::new();
    while work.len() >= divisor.len() {
        quotient.push(work[0]);
        reduce_once(&mut work, divisor);
    }
    Ok((trim(&quotient), pad_left(&work, divisor.len() - 1)))
}

/// x^deg · p(1/x): the coefficients in reverse order, leading zeros removed.
pub fn reciprocal(bits: &BitsRef) -> Bits {
    let mut reversed = bits.to_bitvec();
    reversed.reverse();
    trim(&reversed)
}

/// `a(x)·b(x) mod (x^n + 1)` as exactly `n` bits.
pub fn cyclic_product(a: &BitsRef, b: &BitsRef, n: usize) -> Result<Bits> {
    remainder_padded(&multiply(a, b), &monomial_plus_one(n))
}

/// Carry-less product of two polynomials.
///
/// An empty operand yields an empty product.
pub fn multiply(a: &BitsRef, b: &BitsRef) -> Bits {
    if a.is_empty() || b.is_empty() {
        return Bits::new();
    }
    let mut product = bitvec![u8, Msb0; 0; a.len() + b.len() - 1];
    for i in a.iter_ones() {
        for j in b.iter_ones() {
            let value = product[i + j];
            product.set(i + j, !value);
        }
    }
    product
}

/// Removes leading zero coefficients.
pub fn trim(bits: &BitsRef) -> Bits {
    match bits.first_one() {
        Some(first) => bits[first..].to_bitvec(),
        None => Bits::new(),
    }
}

/// Left-pads with zeros to `width`. Wider inputs are returned unchanged.
pub fn pad_left(bits: &BitsRef, width: usize) -> Bits {
    if bits.len() >= width {
        return bits.to_bitvec();
    }
    let mut padded = bitvec![u8, Msb0; 0; width - bits.len()];
    padded.extend_from_bitslice(bits);
    padded
}

pub fn is_zero(bits: &BitsRef) -> bool {
    bits.not_any()
}

/// Reads the bits as an unsigned integer, MSB first.
///
/// Only the last 32 coefficients contribute.
pub fn to_value(bits: &BitsRef) -> u32 {
    bits.iter()
        .by_vals()
        .fold(0u32, |acc, bit| (acc << 1) | u32::from(bit))
}

/// Writes the low `width` bits of `value`, MSB first.
pub fn from_value(value: u32, width: usize) -> Bits {
    (0..width)
        .rev()
        .map(|shift| shift < 32 && (value >> shift) & 1 == 1)
        .collect()
}

/// A vector of `length` zeros with a single 1 at `position`.
pub fn unit_vector(length: usize, position: usize) -> Bits {
    let mut bits = bitvec![u8, Msb0; 0; length];
    if position < length {
        bits.set(position, true);
    }
    bits
}

/// x^degree + 1
pub fn monomial_plus_one(degree: usize) -> Bits {
    let mut bits = bitvec![u8, Msb0; 0; degree + 1];
    bits.set(0, true);
    let last = bits.len() - 1;
    let value = !bits[last];
    bits.set(last, value);
    bits
}

/// Parses a string of `0`/`1` characters. Surrounding whitespace is ignored.
///
/// # Errors
///
/// [`Error::InvalidInputAlphabet`] on the first character that is not a binary digit
pub fn parse_bits(text: &str) -> Result<Bits> {
    text.trim()
        .chars()
        .enumerate()
        .map(|(index, c)| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            found => Err(Error::InvalidInputAlphabet { index, found }),
        })
        .collect()
}

/// Builds a bit vector from digits that must each be 0 or 1.
pub fn bits_from_digits(digits: &[u8]) -> Result<Bits> {
    digits
        .iter()
        .enumerate()
        .map(|(index, &digit)| match digit {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(Error::InvalidInputAlphabet {
                index,
                found: char::from_digit(u32::from(other), 36).unwrap_or('?'),
            }),
        })
        .collect()
}

/// Renders the bits as a string of `0`/`1` characters.
pub fn to_bit_string(bits: &BitsRef) -> String {
    bits.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}
