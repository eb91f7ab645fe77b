use crate::bch::BchCode;
use crate::bits::BitVector;
use crate::code::BlockCode;
use crate::hamming::HammingCode;
use crate::random::{seeded_rng, Seed};
use crate::scheme::McEliece;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::Rng;
use serde::Serialize;
use std::{
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf},
    time::Instant,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeFamily {
    /// (15, 11) Hamming, 1 correctable error per block
    Hamming,
    /// (15, 7) BCH, 2 correctable errors per block
    Bch,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, value_enum, default_value_t = CodeFamily::Bch, help = "Base code family")]
    family: CodeFamily,
    #[arg(short = 'L', long, default_value_t = 4, help = "Number of concatenated blocks")]
    blocks: usize,
    #[arg(short, long, help = "Errors injected per block [default: code capacity]")]
    errors_per_block: Option<usize>,
    #[arg(short = 'N', long, default_value_t = 100, help = "Number of encrypt/decrypt roundtrips")]
    number: usize,
    #[arg(short, long, help = "PRNG seed as 64 hex digits [default: from entropy]")]
    seed: Option<String>,
    #[arg(short, long, help = "Output file for the JSON report [default: stdout]")]
    output: Option<PathBuf>,
}

/// One keygen plus a batch of roundtrips, with key sizes and wall-clock times.
#[derive(Clone, Debug, Serialize)]
pub struct TrialReport {
    family: CodeFamily,
    blocks: usize,
    errors_per_block: usize,
    n: usize,
    k: usize,
    seed: Seed,
    trials: usize,
    successes: usize,
    public_key_bytes: usize,
    private_key_bytes: usize,
    keygen_ms: f64,
    roundtrip_ms: f64,
    /// Last message and ciphertext of the batch, packed and hex-encoded.
    sample_message: String,
    sample_ciphertext: String,
}

pub fn run(args: Args) -> Result<()> {
    let seed = args
        .seed
        .clone()
        .map(Seed::try_from)
        .transpose()
        .context("Seed must be 64 hex digits")?;
    let (seed, mut rng) = seeded_rng(seed);
    let report = match args.family {
        CodeFamily::Hamming => run_trials(HammingCode::new(), &args, seed, &mut rng)?,
        CodeFamily::Bch => run_trials(BchCode::new(), &args, seed, &mut rng)?,
    };
    write_json(args.output.as_deref(), &report)
}

fn run_trials<C, R>(code: C, args: &Args, seed: Seed, rng: &mut R) -> Result<TrialReport>
where
    C: BlockCode,
    R: Rng + ?Sized,
{
    let errors_per_block = args.errors_per_block.unwrap_or(C::T);
    let scheme = McEliece::new(code, args.blocks, errors_per_block)?;
    let start = Instant::now();
    let (public, private) = scheme.keygen(rng);
    let keygen_ms = start.elapsed().as_secs_f64() * 1e3;
    let start = Instant::now();
    let mut successes = 0;
    let mut sample = (BitVector::zero(0), BitVector::zero(0));
    for _ in 0..args.number {
        let message = BitVector::random(scheme.message_length(), rng);
        let ciphertext = scheme.encrypt(&message, &public, rng)?;
        let (decrypted, ok) = scheme.decrypt(&ciphertext, &public, &private)?;
        if ok && decrypted == message {
            successes += 1;
        }
        sample = (message, ciphertext);
    }
    let roundtrip_ms = start.elapsed().as_secs_f64() * 1e3;
    Ok(TrialReport {
        family: args.family,
        blocks: args.blocks,
        errors_per_block,
        n: scheme.ciphertext_length(),
        k: scheme.message_length(),
        seed,
        trials: args.number,
        successes,
        public_key_bytes: public.serialize_size(),
        private_key_bytes: private.serialize_size(),
        keygen_ms,
        roundtrip_ms,
        sample_message: hex::encode(sample.0.pack_bytes()),
        sample_ciphertext: hex::encode(sample.1.pack_bytes()),
    })
}

/// Serializes data in JSON format to the specified path, or to standard
/// output if no path is provided.
pub fn write_json(output: Option<&Path>, data: &impl Serialize) -> Result<()> {
    if let Some(filename) = output {
        let file = File::create(filename).context("Should be able to create output file")?;
        serde_json::to_writer(&file, data)
            .context("Should be able to serialize data to output file as JSON")?;
        writeln!(&file)?;
    } else {
        serde_json::to_writer(io::stdout(), data)
            .context("Should be able to serialize data to standard output as JSON")?;
        io::stdout().write_all(b"\n")?;
    }
    Ok(())
}
