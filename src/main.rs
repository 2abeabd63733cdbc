use std::io::{self, BufRead, Write};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use knapsack_crypto::{decrypt, encrypt, generate_keypair};

#[derive(Parser)]
#[command(name = "knapsack")]
#[command(about = "Generate a Merkle-Hellman knapsack key pair and round-trip a message")]
#[command(version)]
struct Args {
    /// Number of elements in the easy key (prompted for when omitted)
    #[arg(short = 'n', long)]
    size: Option<usize>,

    /// Message to encrypt (prompted for when omitted)
    #[arg(short, long)]
    message: Option<String>,

    /// Random seed for deterministic key generation (optional)
    #[arg(long)]
    seed: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let n = match args.size {
        Some(n) => n,
        None => prompt("Enter the number of random integers to be generated: ")?
            .trim()
            .parse()
            .context("key size must be a positive integer")?,
    };

    let mut rng: Box<dyn RngCore> = match args.seed {
        Some(seed) => {
            debug!(seed, "using seeded ChaCha20 generator");
            Box::new(ChaCha20Rng::seed_from_u64(seed))
        }
        None => Box::new(rand::thread_rng()),
    };

    let keypair = generate_keypair(n, rng.as_mut()).context("failed to generate key pair")?;
    println!("Public key: {}", keypair.public_key);
    println!("Private key: {}", keypair.private_key);

    let plaintext = match args.message {
        Some(message) => message,
        None => prompt("Enter the message: ")?
            .trim_end_matches(['\r', '\n'])
            .to_string(),
    };

    let ciphertext = encrypt(&plaintext, &keypair.public_key).context("failed to encrypt message")?;
    println!("Encrypted message: {:?}", ciphertext);

    let recovered = decrypt(&ciphertext, &keypair.private_key).context("failed to decrypt message")?;
    println!("Decrypted message: {}", recovered);

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line)
}
