//! # veraz-core
//!
//! The verification client for veraz.
//!
//! This crate provides:
//! - The two seams (`GenerativeService`, `Sleeper`) the client is built on
//! - The instruction template and the response parser that reads it back
//! - A transport-independent `RetryPolicy` with exponential backoff and jitter
//! - The `VerificationClient` that wires them together
//! - Configuration loading and image ingestion for hosting applications
//!
//! ## Usage
//!
//! ```rust,ignore
//! use veraz_core::{VerificationClient, RetryPolicy};
//! use veraz_contracts::request::VerificationRequest;
//!
//! let client = VerificationClient::new(Box::new(service), RetryPolicy::default());
//! let result = client.verify(&VerificationRequest::text("La Tierra es plana")).await;
//! ```

pub mod client;
pub mod config;
pub mod ingest;
pub mod parser;
pub mod prompt;
pub mod retry;
pub mod traits;

pub use client::VerificationClient;
pub use config::ClientConfig;
pub use retry::RetryPolicy;
