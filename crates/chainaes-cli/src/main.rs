//! Command-line interface for the chained AES-128 engine.

#![forbid(unsafe_code)]

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chainaes_core::{encrypt, Block, CipherKey, RunParameters};
use clap::{Parser, Subcommand};

/// Chained AES-128 CLI.
#[derive(Parser)]
#[command(
    name = "chainaes",
    version,
    author,
    about = "AES-128 engine with configurable rounds and multi-pass chaining"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt using a whitespace-delimited parameter file.
    ///
    /// The file holds, in order: iterations, rounds, the key as 32 hex
    /// characters, and the plaintext block as 32 hex characters.
    Run {
        /// Path to the parameter file.
        input: PathBuf,
        /// Print the parsed parameters before encrypting.
        #[arg(long, default_value_t = false)]
        show_params: bool,
    },
    /// Encrypt a single block given directly on the command line.
    Encrypt {
        /// Key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Plaintext block as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        plaintext_hex: String,
        /// Rounds per encryption pass.
        #[arg(long, default_value_t = 10)]
        rounds: u32,
        /// Number of chaining passes.
        #[arg(long, default_value_t = 1)]
        iterations: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run { input, show_params } => cmd_run(&input, show_params),
        Commands::Encrypt {
            key_hex,
            plaintext_hex,
            rounds,
            iterations,
        } => cmd_encrypt(&key_hex, &plaintext_hex, rounds, iterations),
    }
}

struct ParamFile {
    iterations: u32,
    rounds: u32,
    key: CipherKey,
    plaintext: Block,
}

fn cmd_run(input: &PathBuf, show_params: bool) -> Result<()> {
    let text =
        fs::read_to_string(input).with_context(|| format!("read {}", input.display()))?;
    let params = parse_param_file(&text)?;
    if show_params {
        println!("{} iterations", params.iterations);
        println!("{} rounds", params.rounds);
        println!("{} key", hex::encode(params.key.0));
        println!("{} plaintext", hex::encode(params.plaintext));
    }
    let run = RunParameters::new(params.iterations, params.rounds)?;
    let ciphertext = encrypt(&params.key, &params.plaintext, run)?;
    println!("{}", hex::encode(ciphertext));
    Ok(())
}

fn cmd_encrypt(key_hex: &str, plaintext_hex: &str, rounds: u32, iterations: u32) -> Result<()> {
    let key = parse_key_hex(key_hex)?;
    let plaintext = parse_block_hex(plaintext_hex)?;
    let run = RunParameters::new(iterations, rounds)?;
    let ciphertext = encrypt(&key, &plaintext, run)?;
    println!("{}", hex::encode(ciphertext));
    Ok(())
}

fn parse_param_file(text: &str) -> Result<ParamFile> {
    let mut fields = text.split_whitespace();
    let iterations = fields
        .next()
        .context("parameter file is missing the iteration count")?
        .parse::<u32>()
        .context("parse iteration count")?;
    let rounds = fields
        .next()
        .context("parameter file is missing the round count")?
        .parse::<u32>()
        .context("parse round count")?;
    let key = parse_key_hex(
        fields
            .next()
            .context("parameter file is missing the key")?,
    )?;
    let plaintext = parse_block_hex(
        fields
            .next()
            .context("parameter file is missing the plaintext")?,
    )?;
    Ok(ParamFile {
        iterations,
        rounds,
        key,
        plaintext,
    })
}

fn parse_key_hex(hex_str: &str) -> Result<CipherKey> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    if bytes.len() != 16 {
        bail!("key must be 16 bytes (32 hex characters)");
    }
    let mut key = [0u8; 16];
    key.copy_from_slice(&bytes);
    Ok(CipherKey::from(key))
}

fn parse_block_hex(hex_str: &str) -> Result<Block> {
    let bytes = hex::decode(hex_str.trim()).context("decode plaintext hex")?;
    if bytes.len() != 16 {
        bail!("plaintext block must be 16 bytes (32 hex characters)");
    }
    let mut block = [0u8; 16];
    block.copy_from_slice(&bytes);
    Ok(block)
}
