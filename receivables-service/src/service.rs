use crate::error::{ReceivablesError, ReceivablesResult};
use crate::ledger::{CustomerLedger, LedgerIndex};
use crate::models::LedgerSnapshot;
use crate::reporting::{compute_customer_aging, AgingReport, CustomerAging, ReportOptions};
use crate::source::LedgerSource;
use chrono::NaiveDate;
use config_engine::ReportConfig;
use logger_redacted::PiiRedactor;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Receivables aging service
pub struct ReceivablesService<S> {
    source: S,
    config: ReportConfig,
    redactor: PiiRedactor,
}

impl<S: LedgerSource> ReceivablesService<S> {
    /// Create a new receivables service
    pub fn new(source: S, config: ReportConfig) -> Self {
        Self {
            source,
            config,
            redactor: PiiRedactor::default(),
        }
    }

    /// Replace the redactor applied to customer names in logs
    #[must_use]
    pub fn with_redactor(mut self, redactor: PiiRedactor) -> Self {
        self.redactor = redactor;
        self
    }

    /// Report options seeded from the service configuration
    pub fn options(&self, as_of: NaiveDate) -> ReportOptions {
        ReportOptions::from_config(as_of, &self.config)
    }

    /// Load a fresh snapshot and build the aging report
    ///
    /// # Errors
    ///
    /// Fails when the source cannot be loaded or the snapshot is invalid.
    pub fn aging_report(&self, options: &ReportOptions) -> ReceivablesResult<AgingReport> {
        let snapshot = self.load_snapshot()?;
        let report = AgingReport::build(&snapshot, options);

        for row in &report.rows {
            tracing::debug!(
                customer = %self.redactor.redact_name(&row.name),
                code = %row.code,
                current_balance = %row.current_balance,
                total_balance = %row.total_balance,
                unapplied_credit = %row.unapplied_credit,
                "Customer aged"
            );
        }

        Ok(report)
    }

    /// Aging of one customer, whatever its balance.
    /// `None` when the customer does not exist.
    ///
    /// # Errors
    ///
    /// Fails when the source cannot be loaded or the snapshot is invalid.
    pub fn customer_aging(
        &self,
        customer_id: &str,
        as_of: NaiveDate,
    ) -> ReceivablesResult<Option<CustomerAging>> {
        let snapshot = self.load_snapshot()?;
        let Some(customer) = snapshot.customers.iter().find(|c| c.id == customer_id) else {
            return Ok(None);
        };

        let index = LedgerIndex::build(&snapshot, &self.config.customer_entity_type);
        let empty = CustomerLedger::default();
        let ledger = index.get(customer_id).unwrap_or(&empty);

        Ok(Some(compute_customer_aging(
            customer,
            ledger,
            as_of,
            self.config.rounding_dp,
        )))
    }

    fn load_snapshot(&self) -> ReceivablesResult<LedgerSnapshot> {
        let snapshot = self.source.load()?;
        validate_snapshot(&snapshot)?;
        tracing::debug!(
            source = %self.source.describe(),
            customers = snapshot.customers.len(),
            invoices = snapshot.sales_invoices.len(),
            returns = snapshot.sales_returns.len(),
            receipts = snapshot.receipt_vouchers.len(),
            refunds = snapshot.payment_vouchers.len(),
            "Ledger snapshot loaded"
        );
        Ok(snapshot)
    }
}

/// Reject snapshots the allocator cannot settle meaningfully.
///
/// # Errors
///
/// Duplicate customer ids, or a negative amount on any document.
pub fn validate_snapshot(snapshot: &LedgerSnapshot) -> ReceivablesResult<()> {
    let mut seen = HashSet::new();
    for customer in &snapshot.customers {
        if !seen.insert(customer.id.as_str()) {
            return Err(ReceivablesError::DuplicateCustomer(customer.id.clone()));
        }
    }

    let amounts = snapshot
        .sales_invoices
        .iter()
        .map(|i| ("sales invoice", &i.id, i.net_amount))
        .chain(snapshot.sales_returns.iter().map(|r| ("sales return", &r.id, r.net_amount)))
        .chain(snapshot.receipt_vouchers.iter().map(|v| ("receipt voucher", &v.id, v.amount)))
        .chain(snapshot.payment_vouchers.iter().map(|v| ("payment voucher", &v.id, v.amount)));

    for (kind, id, amount) in amounts {
        if amount < Decimal::ZERO {
            return Err(ReceivablesError::NegativeAmount {
                kind,
                document_id: id.clone(),
                amount,
            });
        }
    }

    Ok(())
}
