//! Common error handling utilities for the receivables aging engine
//!
//! This crate provides the error type shared by every workspace member,
//! a set of stable error codes for machine-readable reporting, and a small
//! context builder used to attach document and customer identifiers to a
//! failure without formatting them into the message itself.
//!
//! # Error Categories
//!
//! - **Validation**: ledger documents that violate a domain rule
//! - **Input**: documents that could not be read or decoded
//! - **Config**: configuration that could not be loaded or is invalid
//! - **Io**: file system failures
//!
//! # Example
//!
//! ```rust
//! use error_common::{codes, EngineError, ErrorContext};
//!
//! fn check_amount(id: &str, amount: i64) -> error_common::Result<()> {
//!     if amount < 0 {
//!         let context = ErrorContext::new().with_document_id(id);
//!         return Err(EngineError::validation(
//!             codes::validation::NEGATIVE_AMOUNT,
//!             "document amount must not be negative",
//!             context,
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_amount("INV-1", -5).is_err());
//! ```

pub mod codes;
pub mod context;
pub mod types;

pub use context::*;
pub use types::*;
