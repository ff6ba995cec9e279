//! MEDCASE Confidential Case Registry: Demo CLI
//!
//! Runs one or all of the three clinic scenarios against the reference
//! authorities. Authority key material comes from the embedded
//! configuration unless `--config` points at another TOML file.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- end-to-end
//!   cargo run -p demo -- concurrent-intake
//!   cargo run -p demo -- --config my-authority.toml tampered-attestation

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use medcase_attest::AuthorityConfig;
use medcase_contracts::error::RegistryResult;
use medcase_ref_clinic::{
    scenarios::{concurrent_intake, end_to_end, tampered_attestation},
    Clinic,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// MEDCASE: confidential medical case registry demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "MEDCASE confidential case registry demo",
    long_about = "Runs MEDCASE clinic scenarios showing encrypted intake, public disclosure,\n\
                  threshold-attested verification, and audit chain integrity."
)]
struct Cli {
    /// Authority configuration file (TOML). Defaults to the embedded one.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three scenarios in sequence.
    RunAll,
    /// Scenario 1: intake, disclosure, and attested verification.
    EndToEnd,
    /// Scenario 2: racing creators and racing reviewers.
    ConcurrentIntake,
    /// Scenario 3: lifted, rewritten, and stripped proofs.
    TamperedAttestation,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = load_config(cli.config.as_ref()).and_then(|config| match cli.command {
        Command::RunAll => run_all(&config),
        Command::EndToEnd => end_to_end::run_scenario(&config),
        Command::ConcurrentIntake => concurrent_intake::run_scenario(&config),
        Command::TamperedAttestation => tampered_attestation::run_scenario(&config),
    });

    match result {
        Ok(()) => {
            println!("All selected scenarios completed successfully.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> RegistryResult<AuthorityConfig> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading authority configuration");
            AuthorityConfig::from_file(path)
        }
        None => Clinic::default_config(),
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

fn run_all(config: &AuthorityConfig) -> RegistryResult<()> {
    end_to_end::run_scenario(config)?;
    concurrent_intake::run_scenario(config)?;
    tampered_attestation::run_scenario(config)?;
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("MEDCASE: Confidential Case Registry");
    println!("Clinic Reference Demo");
    println!("====================================");
    println!();
    println!("Lifecycle of every case:");
    println!("  [1] Diagnosis encrypted off-registry; input proof binds it to (registry, author)");
    println!("  [2] Registry admits the ciphertext, stores the handle, marks it disclosable");
    println!("  [3] Anyone requests public decryption from the co-processor");
    println!("  [4] Threshold of signers attests (handle, cleartext); registry verifies once");
    println!("  [5] Every state change is appended to a SHA-256 audit chain");
    println!();
}
