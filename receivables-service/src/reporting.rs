use crate::aging::{age_in_days, payment_buckets, unpaid_buckets, AgingBucket, AgingBuckets};
use crate::ledger::{CustomerLedger, LedgerIndex};
use crate::models::{Customer, LedgerSnapshot};
use crate::receivables::allocate;
use crate::round_money;
use chrono::NaiveDate;
use config_engine::ReportConfig;
use rust_decimal::Decimal;
use serde::Serialize;

/// Options for a single report run
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Date unpaid balances are aged against
    pub as_of: NaiveDate,
    /// Case-insensitive substring matched against customer names
    pub search: Option<String>,
    pub inclusion_threshold: Decimal,
    pub rounding_dp: u32,
    pub customer_entity_type: String,
}

impl ReportOptions {
    pub fn new(as_of: NaiveDate) -> Self {
        Self::from_config(as_of, &ReportConfig::default())
    }

    pub fn from_config(as_of: NaiveDate, config: &ReportConfig) -> Self {
        Self {
            as_of,
            search: None,
            inclusion_threshold: config.inclusion_threshold,
            rounding_dp: config.rounding_dp,
            customer_entity_type: config.customer_entity_type.clone(),
        }
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    fn matches(&self, name: &str) -> bool {
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => name.to_lowercase().contains(&needle.to_lowercase()),
        }
    }
}

/// Unpaid remainder of one credit invoice
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceAging {
    pub invoice_id: String,
    pub date: Option<NaiveDate>,
    pub net_amount: Decimal,
    pub unpaid_amount: Decimal,
    pub age_days: Option<i64>,
    pub bucket: AgingBucket,
}

/// Aging of a single customer's account
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAging {
    pub customer_id: String,
    pub code: String,
    pub name: String,
    pub opening_balance: Decimal,
    pub total_credit_sales: Decimal,
    pub total_receipts: Decimal,
    pub total_returns: Decimal,
    pub total_refunds: Decimal,
    /// Ledger balance after allocation, rounded; decides report inclusion
    pub current_balance: Decimal,
    /// Sum of the unpaid buckets
    pub total_balance: Decimal,
    /// `total_balance - current_balance`: opening credit left over after
    /// allocation, which belongs to no bucket, plus the sub-unit difference
    /// between rounding each bucket and rounding the whole balance
    pub unapplied_credit: Decimal,
    pub unapplied_receipts: Decimal,
    pub unapplied_returns: Decimal,
    pub buckets: AgingBuckets,
    pub payment_buckets: AgingBuckets,
    pub last_invoice_date: Option<NaiveDate>,
    pub last_payment_date: Option<NaiveDate>,
    /// Credit invoices that are still (partly) unpaid, oldest first
    pub invoices: Vec<InvoiceAging>,
}

impl CustomerAging {
    /// Balance implied by the raw document totals
    pub fn ledger_balance(&self) -> Decimal {
        self.opening_balance + self.total_credit_sales + self.total_refunds
            - self.total_returns
            - self.total_receipts
    }
}

/// Age one customer's account as of `as_of`.
pub fn compute_customer_aging(
    customer: &Customer,
    ledger: &CustomerLedger<'_>,
    as_of: NaiveDate,
    rounding_dp: u32,
) -> CustomerAging {
    let allocation = allocate(customer.opening_balance, ledger);
    let buckets = unpaid_buckets(&allocation, as_of);

    let invoices = allocation
        .invoice_balances
        .iter()
        .filter(|b| b.unpaid_amount > Decimal::ZERO)
        .map(|b| {
            let age_days = age_in_days(b.invoice.date, Some(as_of));
            InvoiceAging {
                invoice_id: b.invoice.id.clone(),
                date: b.invoice.date,
                net_amount: b.invoice.net_amount,
                unpaid_amount: b.unpaid_amount,
                age_days,
                bucket: AgingBucket::for_age(age_days),
            }
        })
        .collect();

    // Buckets are rounded one by one; the total is their sum so the columns add up.
    let rounded_buckets = buckets.round_dp(rounding_dp);
    let total_balance = rounded_buckets.total();
    let current_balance = round_money(allocation.current_balance(), rounding_dp);

    CustomerAging {
        customer_id: customer.id.clone(),
        code: customer.code.clone(),
        name: customer.name.clone(),
        opening_balance: customer.opening_balance,
        total_credit_sales: ledger.total_credit_sales(),
        total_receipts: ledger.total_receipts(),
        total_returns: ledger.total_returns(),
        total_refunds: ledger.total_refunds(),
        current_balance,
        total_balance,
        unapplied_credit: total_balance - current_balance,
        unapplied_receipts: round_money(allocation.unapplied_receipts, rounding_dp),
        unapplied_returns: round_money(allocation.unapplied_returns, rounding_dp),
        buckets: rounded_buckets,
        payment_buckets: payment_buckets(ledger).round_dp(rounding_dp),
        last_invoice_date: ledger.last_invoice_date(),
        last_payment_date: ledger.last_payment_date(),
        invoices,
    }
}

/// Totals across the rows of a report
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgingSummary {
    pub customers: usize,
    pub total_balance: Decimal,
    pub current_balance: Decimal,
    pub buckets: AgingBuckets,
    pub payment_buckets: AgingBuckets,
}

impl AgingSummary {
    fn add(&mut self, row: &CustomerAging) {
        self.customers += 1;
        self.total_balance += row.total_balance;
        self.current_balance += row.current_balance;
        self.buckets.merge(&row.buckets);
        self.payment_buckets.merge(&row.payment_buckets);
    }
}

/// Customer aging report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgingReport {
    pub as_of: NaiveDate,
    /// Customers that owe money, largest total balance first
    pub rows: Vec<CustomerAging>,
    pub summary: AgingSummary,
}

impl AgingReport {
    /// Build the report from a snapshot. Pure; the snapshot is not modified.
    ///
    /// A customer is listed when its current balance is above the inclusion
    /// threshold and its name matches the search. Rows are ordered by
    /// descending total balance, then by code and id.
    pub fn build(snapshot: &LedgerSnapshot, options: &ReportOptions) -> Self {
        let index = LedgerIndex::build(snapshot, &options.customer_entity_type);
        let empty = CustomerLedger::default();

        let mut rows: Vec<CustomerAging> = snapshot
            .customers
            .iter()
            .filter(|customer| options.matches(&customer.name))
            .map(|customer| {
                let ledger = index.get(&customer.id).unwrap_or(&empty);
                compute_customer_aging(customer, ledger, options.as_of, options.rounding_dp)
            })
            .filter(|row| row.current_balance > options.inclusion_threshold)
            .collect();

        rows.sort_by(|a, b| {
            b.total_balance
                .cmp(&a.total_balance)
                .then_with(|| a.code.cmp(&b.code))
                .then_with(|| a.customer_id.cmp(&b.customer_id))
        });

        let mut summary = AgingSummary::default();
        for row in &rows {
            summary.add(row);
        }

        tracing::info!(
            as_of = %options.as_of,
            customers = snapshot.customers.len(),
            rows = rows.len(),
            total_balance = %summary.total_balance,
            "Aging report built"
        );

        Self {
            as_of: options.as_of,
            rows,
            summary,
        }
    }
}
