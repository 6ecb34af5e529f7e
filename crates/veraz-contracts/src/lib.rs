//! # veraz-contracts
//!
//! Shared types, verdict vocabulary, and error contracts for the veraz
//! fact-checking client.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate; only data definitions, error types, and their rendering.

pub mod error;
pub mod generation;
pub mod request;
pub mod result;
pub mod verdict;
