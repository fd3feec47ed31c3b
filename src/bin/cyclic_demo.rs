use cyclic_hamming::cs::ecc::cyclic::{inject_single_error, CyclicCode, DecodeStrategy};
use cyclic_hamming::cs::ecc::gf2::to_bit_string;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(data) = args.next() else {
        eprintln!("usage: cyclic_demo <4 bits> [seed]");
        std::process::exit(2);
    };
    let mut rng = match args.next() {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed.parse()?),
        None => ChaCha8Rng::from_entropy(),
    };

    let code = CyclicCode::hamming_7_4()?;
    let codeword = code.encode_str(&data)?;
    println!("Cyclic Hamming codeword: {}", to_bit_string(&codeword));

    let (received, position) = inject_single_error(&codeword, &mut rng)?;
    println!("Introduced error at bit {}", position + 1);
    println!("Codeword with error:     {}", to_bit_string(&received));

    for strategy in DecodeStrategy::ALL {
        let decoded = code.decode_with(&received, strategy)?;
        println!(
            "{:<16} {:?} -> {}",
            strategy.to_string(),
            decoded.outcome,
            to_bit_string(&decoded.corrected)
        );
    }

    Ok(())
}
