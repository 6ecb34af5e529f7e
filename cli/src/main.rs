//! veraz command-line fact checker.
//!
//! Sends a claim and/or an image to the verification client and prints the
//! verdict, the analysis and the web sources backing it. Every verdict is
//! counted towards the user's badges.
//!
//! Usage:
//!   API_KEY=... veraz verify --claim "El agua hierve a 90 grados"
//!   API_KEY=... veraz verify --image captura.png --json
//!   veraz progress

mod render;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use veraz_contracts::{error::VerazError, request::VerificationRequest, result::VerificationResult};
use veraz_core::{ingest, ClientConfig};
use veraz_progress::{ProgressStore, ProgressTracker};

/// Where progress is kept when `--progress` is not given.
const DEFAULT_PROGRESS_FILE: &str = "veraz-progress.json";

/// Exit code when the verification itself came back as an error result.
const EXIT_VERIFICATION_FAILED: i32 = 3;

// ── Errors ────────────────────────────────────────────────────────────────────

/// Failures of a CLI command, each with its own exit code.
#[derive(Debug, Error)]
enum CliError {
    /// Neither a claim nor an image was given.
    #[error("Por favor, ingresa un texto o sube una imagen para verificar.")]
    EmptyInput,

    #[error(transparent)]
    Veraz(#[from] VerazError),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            Self::EmptyInput => 2,
            Self::Veraz(_) => 1,
        }
    }
}

type CliResult<T> = Result<T, CliError>;

// ── CLI definition ────────────────────────────────────────────────────────────

/// veraz: AI-assisted fact checking with web sources.
#[derive(Parser)]
#[command(
    name = "veraz",
    about = "Verifica afirmaciones e imágenes con IA y búsqueda web",
    long_about = "Sends a claim and/or an image to a generative AI service with web search\n\
                  enabled and prints a verdict, an analysis and the sources consulted."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Verify a claim, an image, or both.
    Verify {
        /// Text of the claim to verify.
        #[arg(long)]
        claim: Option<String>,
        /// Image to verify (png, jpg, gif, webp, heic, heif; up to 4 MB).
        #[arg(long)]
        image: Option<PathBuf>,
        /// TOML configuration file. Without it, defaults plus API_KEY are used.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
        /// Progress file to update.
        #[arg(long, default_value = DEFAULT_PROGRESS_FILE)]
        progress: PathBuf,
    },
    /// Show the current badge and progress towards the next one.
    Progress {
        /// Progress file to read.
        #[arg(long, default_value = DEFAULT_PROGRESS_FILE)]
        progress: PathBuf,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Verify {
            claim,
            image,
            config,
            json,
            progress,
        } => {
            run_verify(
                claim.unwrap_or_default(),
                image.as_deref(),
                config.as_deref(),
                json,
                &progress,
            )
            .await
        }
        Command::Progress { progress } => run_progress(&progress).map(|()| 0),
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("veraz: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

async fn run_verify(
    claim: String,
    image: Option<&Path>,
    config: Option<&Path>,
    json: bool,
    progress_path: &Path,
) -> CliResult<i32> {
    check_input(&claim, image)?;

    let config = match config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::from_env()?,
    };

    let mut request = VerificationRequest::text(claim);
    if let Some(path) = image {
        request = request.with_image(ingest::load_image(path)?);
    }

    let client = veraz_gemini::build_client(&config)?;
    let result = client.verify(&request).await;

    if json {
        let body = serde_json::to_string_pretty(&result).map_err(|e| VerazError::Output {
            reason: format!("failed to serialize result: {e}"),
        })?;
        println!("{body}");
    } else {
        print!("{}", render::result_block(&result, std::io::stdout().is_terminal()));
    }

    let store = ProgressStore::new(progress_path);
    let mut tracker = ProgressTracker::new(store.load()?);
    if let Some(badge) = tracker.record(&result) {
        if !json {
            println!();
            println!("{}", render::badge_announcement(badge));
        }
    }
    store.save(tracker.snapshot())?;
    debug!(
        verification_count = tracker.snapshot().verification_count,
        "progress updated"
    );

    Ok(exit_code_for(&result))
}

fn run_progress(progress_path: &Path) -> CliResult<()> {
    let tracker = ProgressTracker::new(ProgressStore::new(progress_path).load()?);
    print!(
        "{}",
        render::progress_block(tracker.snapshot().verification_count, &tracker.progress())
    );
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn check_input(claim: &str, image: Option<&Path>) -> CliResult<()> {
    if claim.trim().is_empty() && image.is_none() {
        return Err(CliError::EmptyInput);
    }
    Ok(())
}

/// Process exit code for a completed verification.
fn exit_code_for(result: &VerificationResult) -> i32 {
    if result.is_error() {
        EXIT_VERIFICATION_FAILED
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use veraz_contracts::{
        error::{ServiceError, VerazError},
        result::VerificationResult,
    };

    use super::{check_input, exit_code_for, CliError};

    #[test]
    fn empty_input_is_refused_with_exit_code_two() {
        let err = check_input("   ", None).unwrap_err();
        assert!(matches!(err, CliError::EmptyInput));
        assert_eq!(err.exit_code(), 2);
        assert_eq!(
            err.to_string(),
            "Por favor, ingresa un texto o sube una imagen para verificar."
        );
    }

    #[test]
    fn claim_or_image_alone_is_enough() {
        assert!(check_input("La Luna es de queso", None).is_ok());
        assert!(check_input("", Some(Path::new("captura.png"))).is_ok());
    }

    #[test]
    fn library_errors_exit_with_one() {
        let err = CliError::from(VerazError::ConfigError {
            reason: "API_KEY environment variable not set".to_string(),
        });
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("API_KEY"));
    }

    #[test]
    fn error_verdict_gives_non_zero_exit() {
        let failed = VerificationResult::from_error(&ServiceError::InvalidCredential);
        assert_eq!(exit_code_for(&failed), 3);

        let verdict = VerificationResult {
            verdict: "Falso".to_string(),
            analysis: String::new(),
            sources: vec![],
        };
        assert_eq!(exit_code_for(&verdict), 0);
    }
}
