//! Command-line interface for SM3 hashing and SM4-CBC file encryption.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sm4_core::{
    decrypt_block, encrypt_block, expand_key, Block, Cbc, CbcConfig, PaddingPolicy, Sm4Key,
};

/// SM3 / SM4 CLI.
#[derive(Parser)]
#[command(
    name = "gmsym",
    version,
    author,
    about = "SM3 hashing and SM4-CBC encryption"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the SM3 digest of a file or a string.
    Hash {
        /// File to hash.
        #[arg(long, value_name = "FILE", conflicts_with = "text")]
        input: Option<PathBuf>,
        /// UTF-8 string to hash.
        #[arg(long)]
        text: Option<String>,
    },
    /// Pad and encrypt a file with SM4-CBC.
    Enc {
        /// SM4 key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// IV as 32 hex characters; a random IV is generated and printed when omitted.
        #[arg(long, value_name = "HEX")]
        iv_hex: Option<String>,
        /// Plaintext input path.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Ciphertext output path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
        /// Optional RNG seed for reproducible IV generation.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Decrypt an SM4-CBC file and strip its padding.
    Dec {
        /// SM4 key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// IV as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        iv_hex: String,
        /// Ciphertext input path (must be a non-zero multiple of 16 bytes).
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Plaintext output path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
        /// Keep the data as-is when the trailing pad byte is out of range.
        #[arg(long, default_value_t = false)]
        lenient: bool,
    },
    /// Check the standard known-answer vectors and random round trips.
    Selftest {
        /// Number of random CBC round trips.
        #[arg(long, default_value_t = 16)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Hash { input, text } => {
            let digest = cmd_hash(input.as_deref(), text.as_deref())?;
            println!("{digest}");
            Ok(())
        }
        Commands::Enc {
            key_hex,
            iv_hex,
            input,
            output,
            seed,
        } => {
            let iv = cmd_enc(&key_hex, iv_hex.as_deref(), &input, &output, seed)?;
            if iv_hex.is_none() {
                println!("iv: {}", hex::encode(iv));
            }
            Ok(())
        }
        Commands::Dec {
            key_hex,
            iv_hex,
            input,
            output,
            lenient,
        } => cmd_dec(&key_hex, &iv_hex, &input, &output, lenient),
        Commands::Selftest { samples, seed } => {
            cmd_selftest(samples, seed)?;
            println!("selftest passed");
            Ok(())
        }
    }
}

fn cmd_hash(input: Option<&Path>, text: Option<&str>) -> Result<String> {
    let data = match (input, text) {
        (Some(path), _) => fs::read(path).with_context(|| format!("read {}", path.display()))?,
        (None, Some(text)) => text.as_bytes().to_vec(),
        (None, None) => bail!("either --input or --text is required"),
    };
    let digest = sm3_core::digest(&data);
    info!("hashed {} bytes", data.len());
    Ok(hex::encode(digest))
}

fn cmd_enc(
    key_hex: &str,
    iv_hex: Option<&str>,
    input_path: &Path,
    output_path: &Path,
    seed: Option<u64>,
) -> Result<Block> {
    let key = parse_key_hex(key_hex)?;
    let iv = match iv_hex {
        Some(hex_str) => parse_iv_hex(hex_str)?,
        None => {
            let mut iv = [0u8; 16];
            seeded_rng(seed).fill_bytes(&mut iv);
            debug!("generated iv {}", hex::encode(iv));
            iv
        }
    };
    let data = fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    let ciphertext = Cbc::new(&key, iv).encrypt(&data);
    fs::write(output_path, &ciphertext)
        .with_context(|| format!("write {}", output_path.display()))?;
    info!(
        "encrypted {} bytes into {} bytes",
        data.len(),
        ciphertext.len()
    );
    Ok(iv)
}

fn cmd_dec(
    key_hex: &str,
    iv_hex: &str,
    input_path: &Path,
    output_path: &Path,
    lenient: bool,
) -> Result<()> {
    let key = parse_key_hex(key_hex)?;
    let iv = parse_iv_hex(iv_hex)?;
    let padding = if lenient {
        warn!("lenient padding: corrupted ciphertext may decrypt without error");
        PaddingPolicy::Lenient
    } else {
        PaddingPolicy::Strict
    };
    debug!("decrypting with {padding:?} padding");

    let data = fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    let plaintext = Cbc::with_config(&key, iv, CbcConfig { padding })
        .decrypt(&data)
        .with_context(|| format!("decrypt {}", input_path.display()))?;
    fs::write(output_path, &plaintext)
        .with_context(|| format!("write {}", output_path.display()))?;
    info!("decrypted {} bytes into {} bytes", data.len(), plaintext.len());
    Ok(())
}

const SM4_KEY: &str = "0123456789abcdeffedcba9876543210";
const SM4_CIPHER: &str = "681edf34d206965e86b3e94f536e4246";
const SM3_ABC: &str = "66c7f0f462eeedd9d1f2d46bdc10e4e24167c4875cf2f7a2297da02b8f4ba8e0";

fn cmd_selftest(samples: usize, seed: Option<u64>) -> Result<()> {
    let key = parse_key_hex(SM4_KEY)?;
    let round_keys = expand_key(&key);
    let ct = encrypt_block(&key.0, &round_keys);
    if hex::encode(ct) != SM4_CIPHER {
        bail!("SM4 known-answer mismatch: {}", hex::encode(ct));
    }
    if decrypt_block(&ct, &round_keys) != key.0 {
        bail!("SM4 decryption does not invert encryption");
    }
    debug!("SM4 known-answer ok");

    let digest = hex::encode(sm3_core::digest(b"abc"));
    if digest != SM3_ABC {
        bail!("SM3 known-answer mismatch: {digest}");
    }
    debug!("SM3 known-answer ok");

    let mut rng = seeded_rng(seed);
    for i in 0..samples {
        let mut key_bytes = [0u8; 16];
        let mut iv = [0u8; 16];
        rng.fill_bytes(&mut key_bytes);
        rng.fill_bytes(&mut iv);
        let mut plaintext = vec![0u8; (rng.next_u32() % 256) as usize];
        rng.fill_bytes(&mut plaintext);

        let cbc = Cbc::new(&Sm4Key::from(key_bytes), iv);
        let decrypted = cbc
            .decrypt(&cbc.encrypt(&plaintext))
            .with_context(|| format!("round trip sample {i}"))?;
        if decrypted != plaintext {
            bail!("CBC round trip sample {i} mismatch");
        }
    }
    info!("selftest passed with {samples} round trips");
    Ok(())
}

fn parse_key_hex(hex_str: &str) -> Result<Sm4Key> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    Sm4Key::try_from(bytes.as_slice()).context("SM4 key must be 16 bytes (32 hex characters)")
}

fn parse_iv_hex(hex_str: &str) -> Result<Block> {
    let bytes = hex::decode(hex_str.trim()).context("decode iv hex")?;
    if bytes.len() != 16 {
        bail!("IV must be 16 bytes (32 hex characters)");
    }
    let mut iv = [0u8; 16];
    iv.copy_from_slice(&bytes);
    Ok(iv)
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
