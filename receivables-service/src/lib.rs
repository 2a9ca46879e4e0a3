//! Receivables Aging Service
//!
//! Ages customer receivables from the documents a retail back office keeps:
//! - Credit sales invoices, sales returns, receipt and payment vouchers
//! - FIFO settlement of receipts against the opening balance and invoices
//! - Returns applied to the newest invoices first
//! - Unpaid balances bucketed into 0-30 / 31-60 / 61-90 / 90+ day windows
//! - Payment speed bucketed by the gap between invoice and receipt
//!
//! Every report run is a pure computation over a [`LedgerSnapshot`]; nothing
//! is cached between runs.

pub mod aging;
pub mod error;
pub mod ledger;
pub mod models;
pub mod normalize;
pub mod receivables;
pub mod reporting;
pub mod service;
pub mod source;

pub use aging::*;
pub use error::*;
pub use ledger::*;
pub use models::*;
pub use receivables::*;
pub use reporting::*;
pub use service::*;
pub use source::*;

use rust_decimal::{Decimal, RoundingStrategy};

/// Round a money amount to `dp` places, halves away from zero
pub fn round_money(amount: Decimal, dp: u32) -> Decimal {
    amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
