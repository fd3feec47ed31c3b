//! Channel noise for exercising the decoders.
//!
//! Nothing in the encoder or the decoders flips bits on its own; corruption is
//! always requested explicitly through this module, and any randomness comes
//! from the caller's [`Rng`] so runs can be made reproducible with a seeded
//! generator.

use crate::cs::ecc::gf2::{Bits, BitsRef};
use crate::cs::error::{Error, Result};
use rand::seq::index;
use rand::Rng;

/// Which bits to flip.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Leave the word untouched
    #[default]
    None,
    /// Flip exactly these zero-based positions
    Positions(Vec<usize>),
    /// Flip `count` distinct positions chosen by the random source
    Random { count: usize },
}

/// Returns a copy of `word` with the bit at `position` inverted.
pub fn flip_bit(word: &BitsRef, position: usize) -> Result<Bits> {
    if position >= word.len() {
        return Err(Error::invalid_input(format!(
            "Bit position {} is out of range for a {}-bit word",
            position,
            word.len()
        )));
    }
    let mut flipped = word.to_bitvec();
    flipped.set(position, !word[position]);
    Ok(flipped)
}

/// Applies `policy` to a copy of `word`.
///
/// # Returns
///
/// The corrupted word and the flipped positions in ascending order
pub fn inject_errors<R: Rng + ?Sized>(
    word: &BitsRef,
    policy: &ErrorPolicy,
    rng: &mut R,
) -> Result<(Bits, Vec<usize>)> {
    let mut positions = match policy {
        ErrorPolicy::None => Vec::new(),
        ErrorPolicy::Positions(positions) => positions.clone(),
        ErrorPolicy::Random { count } => {
            if *count > word.len() {
                return Err(Error::invalid_input(format!(
                    "Cannot flip {} distinct bits of a {}-bit word",
                    count,
                    word.len()
                )));
            }
            index::sample(rng, word.len(), *count).into_vec()
        }
    };
    positions.sort_unstable();

    if positions.windows(2).any(|pair| pair[0] == pair[1]) {
        return Err(Error::invalid_input("Error positions must be distinct"));
    }

    let mut corrupted = word.to_bitvec();
    for &position in &positions {
        corrupted = flip_bit(&corrupted, position)?;
    }
    Ok((corrupted, positions))
}

/// Flips one position chosen uniformly by `rng`.
pub fn inject_single_error<R: Rng + ?Sized>(word: &BitsRef, rng: &mut R) -> Result<(Bits, usize)> {
    let (corrupted, positions) = inject_errors(word, &ErrorPolicy::Random { count: 1 }, rng)?;
    let position = positions
        .first()
        .copied()
        .ok_or_else(|| Error::invalid_input("Cannot flip a bit of an empty word"))?;
    Ok((corrupted, position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::ecc::gf2::parse_bits;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn distance(a: &BitsRef, b: &BitsRef) -> usize {
        a.iter()
            .by_vals()
            .zip(b.iter().by_vals())
            .filter(|(x, y)| x != y)
            .count()
    }

    #[test]
    fn test_flip_bit() {
        let word = parse_bits("1011000").unwrap();
        assert_eq!(flip_bit(&word, 5).unwrap(), parse_bits("1011010").unwrap());
        assert_eq!(flip_bit(&word, 0).unwrap(), parse_bits("0011000").unwrap());
        assert!(flip_bit(&word, 7).is_err());
    }

    #[test]
    fn test_no_errors() {
        let word = parse_bits("1011000").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let (corrupted, positions) = inject_errors(&word, &ErrorPolicy::None, &mut rng).unwrap();
        assert_eq!(corrupted, word);
        assert!(positions.is_empty());
    }

    #[test]
    fn test_fixed_positions() {
        let word = parse_bits("1011000").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let (corrupted, positions) =
            inject_errors(&word, &ErrorPolicy::Positions(vec![3, 0]), &mut rng).unwrap();
        assert_eq!(corrupted, parse_bits("0010000").unwrap());
        assert_eq!(positions, vec![0, 3]);

        assert!(inject_errors(&word, &ErrorPolicy::Positions(vec![2, 2]), &mut rng).is_err());
        assert!(inject_errors(&word, &ErrorPolicy::Positions(vec![9]), &mut rng).is_err());
    }

    #[test]
    fn test_random_positions_are_distinct() {
        let word = parse_bits("0000000").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for count in 0..=7 {
            let (corrupted, positions) =
                inject_errors(&word, &ErrorPolicy::Random { count }, &mut rng).unwrap();
            assert_eq!(positions.len(), count);
            assert_eq!(distance(&word, &corrupted), count);
            assert!(positions.iter().all(|&p| p < 7));
        }
        assert!(inject_errors(&word, &ErrorPolicy::Random { count: 8 }, &mut rng).is_err());
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let word = parse_bits("1011000").unwrap();
        let mut first = ChaCha8Rng::seed_from_u64(7);
        let mut second = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(
                inject_single_error(&word, &mut first).unwrap(),
                inject_single_error(&word, &mut second).unwrap()
            );
        }
    }

    #[test]
    fn test_single_error() {
        let word = parse_bits("1011000").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let (corrupted, position) = inject_single_error(&word, &mut rng).unwrap();
        assert!(position < 7);
        assert_eq!(flip_bit(&corrupted, position).unwrap(), word);
        assert!(inject_single_error(&Bits::new(), &mut rng).is_err());
    }
}
