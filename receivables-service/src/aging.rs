//! Aging windows for unpaid balances and for payments.

use crate::ledger::CustomerLedger;
use crate::receivables::Allocation;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed aging window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgingBucket {
    #[serde(rename = "0-30")]
    Current,
    #[serde(rename = "31-60")]
    Days31To60,
    #[serde(rename = "61-90")]
    Days61To90,
    #[serde(rename = "90+")]
    Over90,
}

impl AgingBucket {
    pub const ALL: [AgingBucket; 4] = [
        AgingBucket::Current,
        AgingBucket::Days31To60,
        AgingBucket::Days61To90,
        AgingBucket::Over90,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Current => "0-30",
            Self::Days31To60 => "31-60",
            Self::Days61To90 => "61-90",
            Self::Over90 => "90+",
        }
    }

    /// Bucket for an age in days. An unknown age counts as the oldest debt.
    pub fn for_age(days: Option<i64>) -> Self {
        match days {
            Some(d) if d <= 30 => Self::Current,
            Some(d) if d <= 60 => Self::Days31To60,
            Some(d) if d <= 90 => Self::Days61To90,
            _ => Self::Over90,
        }
    }
}

impl fmt::Display for AgingBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whole days between two dates, in either direction.
/// `None` when either date is unknown.
pub fn age_in_days(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Option<i64> {
    let (from, to) = (from?, to?);
    Some((to - from).num_days().abs())
}

/// Money accumulated per aging window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingBuckets {
    #[serde(rename = "0-30")]
    pub current: Decimal,
    #[serde(rename = "31-60")]
    pub days_31_60: Decimal,
    #[serde(rename = "61-90")]
    pub days_61_90: Decimal,
    #[serde(rename = "90+")]
    pub over_90: Decimal,
}

impl AgingBuckets {
    pub fn get(&self, bucket: AgingBucket) -> Decimal {
        match bucket {
            AgingBucket::Current => self.current,
            AgingBucket::Days31To60 => self.days_31_60,
            AgingBucket::Days61To90 => self.days_61_90,
            AgingBucket::Over90 => self.over_90,
        }
    }

    pub fn add(&mut self, bucket: AgingBucket, amount: Decimal) {
        let slot = match bucket {
            AgingBucket::Current => &mut self.current,
            AgingBucket::Days31To60 => &mut self.days_31_60,
            AgingBucket::Days61To90 => &mut self.days_61_90,
            AgingBucket::Over90 => &mut self.over_90,
        };
        *slot += amount;
    }

    /// Add every window of `other` into `self`
    pub fn merge(&mut self, other: &AgingBuckets) {
        for bucket in AgingBucket::ALL {
            self.add(bucket, other.get(bucket));
        }
    }

    pub fn total(&self) -> Decimal {
        self.current + self.days_31_60 + self.days_61_90 + self.over_90
    }

    pub fn iter(&self) -> impl Iterator<Item = (AgingBucket, Decimal)> + '_ {
        AgingBucket::ALL.into_iter().map(|bucket| (bucket, self.get(bucket)))
    }

    pub fn round_dp(&self, dp: u32) -> Self {
        let mut rounded = Self::default();
        for (bucket, amount) in self.iter() {
            rounded.add(bucket, crate::round_money(amount, dp));
        }
        rounded
    }
}

/// Age what the customer still owes.
///
/// Each invoice's unpaid remainder is aged from its invoice date to
/// `as_of`. A positive remaining opening balance predates every invoice and
/// goes to `90+` in full.
pub fn unpaid_buckets(allocation: &Allocation<'_>, as_of: NaiveDate) -> AgingBuckets {
    let mut buckets = AgingBuckets::default();

    for balance in &allocation.invoice_balances {
        if balance.unpaid_amount > Decimal::ZERO {
            let age = age_in_days(balance.invoice.date, Some(as_of));
            buckets.add(AgingBucket::for_age(age), balance.unpaid_amount);
        }
    }

    if allocation.remaining_opening_balance > Decimal::ZERO {
        buckets.add(AgingBucket::Over90, allocation.remaining_opening_balance);
    }

    buckets
}

/// Age how quickly the customer paid.
///
/// Independent FIFO pass: receipts in date order settle invoices oldest
/// first against their original net amounts, and every settled portion is
/// aged from the invoice date to the receipt date. The opening balance is
/// not part of this pass, and receipts beyond the invoiced total are not
/// bucketed.
pub fn payment_buckets(ledger: &CustomerLedger<'_>) -> AgingBuckets {
    let mut buckets = AgingBuckets::default();
    let mut open: Vec<Decimal> = ledger.credit_invoices.iter().map(|i| i.net_amount).collect();
    let mut cursor = 0;

    for receipt in &ledger.receipts {
        let mut available = receipt.amount;

        while available > Decimal::ZERO {
            let Some((invoice, remaining)) = ledger
                .credit_invoices
                .get(cursor)
                .zip(open.get_mut(cursor))
            else {
                break;
            };

            let applied = available.min(*remaining).max(Decimal::ZERO);
            if applied > Decimal::ZERO {
                let age = age_in_days(invoice.date, receipt.date);
                buckets.add(AgingBucket::for_age(age), applied);
                *remaining -= applied;
                available -= applied;
            }

            if *remaining <= Decimal::ZERO {
                cursor += 1;
            }
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaymentMethod, SalesInvoice, Voucher, VoucherEntity};
    use crate::receivables::allocate;
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invoice(id: &str, date: Option<NaiveDate>, amount: Decimal) -> SalesInvoice {
        SalesInvoice {
            id: id.to_string(),
            date,
            customer_id: "C1".to_string(),
            net_amount: amount,
            payment_method: PaymentMethod::Credit,
        }
    }

    fn receipt(id: &str, date: Option<NaiveDate>, amount: Decimal) -> Voucher {
        Voucher {
            id: id.to_string(),
            date,
            entity: VoucherEntity {
                entity_type: "customer".to_string(),
                id: "C1".to_string(),
            },
            amount,
        }
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(AgingBucket::for_age(Some(0)), AgingBucket::Current);
        assert_eq!(AgingBucket::for_age(Some(30)), AgingBucket::Current);
        assert_eq!(AgingBucket::for_age(Some(31)), AgingBucket::Days31To60);
        assert_eq!(AgingBucket::for_age(Some(60)), AgingBucket::Days31To60);
        assert_eq!(AgingBucket::for_age(Some(61)), AgingBucket::Days61To90);
        assert_eq!(AgingBucket::for_age(Some(90)), AgingBucket::Days61To90);
        assert_eq!(AgingBucket::for_age(Some(91)), AgingBucket::Over90);
        assert_eq!(AgingBucket::for_age(None), AgingBucket::Over90);
    }

    #[test]
    fn test_age_is_absolute() {
        let a = Some(day(2024, 3, 1));
        let b = Some(day(2024, 3, 31));
        assert_eq!(age_in_days(a, b), Some(30));
        assert_eq!(age_in_days(b, a), Some(30));
        assert_eq!(age_in_days(None, b), None);
    }

    #[test]
    fn test_unpaid_buckets_by_invoice_age() {
        let as_of = day(2024, 6, 30);
        let thirty = invoice("1", Some(day(2024, 5, 31)), dec!(10));
        let thirty_one = invoice("2", Some(day(2024, 5, 30)), dec!(20));
        let old = invoice("3", Some(day(2024, 1, 1)), dec!(40));
        let undated = invoice("4", None, dec!(5));
        let ledger = CustomerLedger::new(vec![&thirty, &thirty_one, &old, &undated], vec![], vec![], vec![]);

        let buckets = unpaid_buckets(&allocate(dec!(7), &ledger), as_of);

        assert_eq!(buckets.current, dec!(10));
        assert_eq!(buckets.days_31_60, dec!(20));
        assert_eq!(buckets.days_61_90, dec!(0));
        assert_eq!(buckets.over_90, dec!(52));
        assert_eq!(buckets.total(), dec!(82));
    }

    #[test]
    fn test_opening_credit_is_not_bucketed() {
        let as_of = day(2024, 6, 30);
        let recent = invoice("1", Some(day(2024, 6, 20)), dec!(100));
        let ledger = CustomerLedger::new(vec![&recent], vec![], vec![], vec![]);

        let allocation = allocate(dec!(-30), &ledger);
        let buckets = unpaid_buckets(&allocation, as_of);

        assert_eq!(buckets.total(), dec!(100));
        assert_eq!(allocation.current_balance(), dec!(70));
    }

    #[test]
    fn test_payment_buckets_age_by_payment_date() {
        let jan_1 = invoice("1", Some(day(2024, 1, 1)), dec!(100));
        let jan_15 = invoice("2", Some(day(2024, 1, 15)), dec!(50));
        let first = receipt("R1", Some(day(2024, 1, 20)), dec!(60));
        let second = receipt("R2", Some(day(2024, 3, 10)), dec!(70));
        let ledger = CustomerLedger::new(vec![&jan_1, &jan_15], vec![], vec![&second, &first], vec![]);

        let buckets = payment_buckets(&ledger);

        // R1: 60 of INV 1 after 19 days.
        // R2: 40 of INV 1 after 69 days, 30 of INV 2 after 55 days.
        assert_eq!(buckets.current, dec!(60));
        assert_eq!(buckets.days_31_60, dec!(30));
        assert_eq!(buckets.days_61_90, dec!(40));
        assert_eq!(buckets.over_90, dec!(0));
    }

    #[test]
    fn test_payment_buckets_ignore_excess_and_zero_invoices() {
        let free = invoice("1", Some(day(2024, 1, 1)), dec!(0));
        let jan_2 = invoice("2", Some(day(2024, 1, 2)), dec!(10));
        let big = receipt("R1", Some(day(2024, 1, 3)), dec!(500));
        let undated = receipt("R2", None, dec!(5));
        let ledger = CustomerLedger::new(vec![&free, &jan_2], vec![], vec![&big, &undated], vec![]);

        let buckets = payment_buckets(&ledger);

        assert_eq!(buckets.total(), dec!(10));
        assert_eq!(buckets.current, dec!(10));
    }

    #[test]
    fn test_undated_receipt_lands_in_oldest_bucket() {
        let jan_1 = invoice("1", Some(day(2024, 1, 1)), dec!(10));
        let undated = receipt("R1", None, dec!(4));
        let ledger = CustomerLedger::new(vec![&jan_1], vec![], vec![&undated], vec![]);

        assert_eq!(payment_buckets(&ledger).over_90, dec!(4));
    }

    #[test]
    fn test_buckets_serialize_with_labels() {
        let mut buckets = AgingBuckets::default();
        buckets.add(AgingBucket::Over90, dec!(12.5));
        let json = serde_json::to_value(buckets).unwrap();
        assert_eq!(json["90+"], "12.5");
        assert_eq!(json["0-30"], "0");
    }
}
