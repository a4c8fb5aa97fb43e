use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::SeedableRng;
use secret_recovery::deal::{split_secret, DealParams};
use secret_recovery::process_batch;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "secret-recovery")]
#[command(about = "Recover a polynomial's constant term from base-encoded shares", long_about = None)]
struct Cli {
    /// Log filter directive, e.g. "info" or "secret_recovery=debug"
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Debug)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Recover the secret of every share file, in order
    Recover {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Write a share file for a random integer polynomial
    Deal {
        #[arg(long)]
        n: u64,
        #[arg(long)]
        k: u64,
        /// Constant term, in decimal
        #[arg(long)]
        secret: String,
        #[arg(long, value_delimiter = ',', default_value = "10")]
        bases: Vec<u32>,
        #[arg(long, default_value = "64")]
        coefficient_bits: u64,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn install_tracing(filter: &str) -> Result<()> {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{
        fmt::{self},
        EnvFilter,
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);
    let filter_layer = EnvFilter::try_new(filter)?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    install_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Recover { files, format } => {
            let outcomes = process_batch(&files);
            let mut failures = 0;

            for (path, outcome) in files.iter().zip(outcomes) {
                match outcome {
                    Ok(recovery) => match format {
                        Format::Text => {
                            println!("=== {} ===", path.display());
                            println!("{}\n", recovery);
                        }
                        Format::Json => {
                            let report = serde_json::json!({
                                "document": path.display().to_string(),
                                "recovery": recovery,
                            });
                            println!("{}", serde_json::to_string(&report)?);
                        }
                    },
                    Err(e) => {
                        failures += 1;
                        eprintln!("error [{}] {}", e.source.kind(), e);
                    }
                }
            }

            if failures > 0 {
                return Err(anyhow!(
                    "{} of {} share documents failed",
                    failures,
                    files.len()
                ));
            }
        }

        Commands::Deal {
            n,
            k,
            secret,
            bases,
            coefficient_bits,
            seed,
            out,
        } => {
            let secret: BigUint = secret
                .parse()
                .map_err(|e| anyhow!("Invalid secret '{}': {}", secret, e))?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let params = DealParams {
                n,
                k,
                bases,
                coefficient_bits,
            };

            let doc = split_secret(&secret, &params, &mut rng)?;
            let json = doc.to_json_pretty()?;
            match out {
                Some(path) => {
                    fs::write(&path, json)?;
                    eprintln!("Dealt {} shares (k = {}) to '{}'", n, k, path.display());
                }
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}
