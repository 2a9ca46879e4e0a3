use crate::models::{LedgerSnapshot, SalesInvoice, SalesReturn, Voucher};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Chronological order used for every FIFO walk.
///
/// Dated documents come first, oldest to newest; undated documents follow.
/// Equal dates fall back to the document id, compared numerically when both
/// ids are integers.
pub fn chronological(
    a_date: Option<NaiveDate>,
    a_id: &str,
    b_date: Option<NaiveDate>,
    b_id: &str,
) -> Ordering {
    let by_date = match (a_date, b_date) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_date.then_with(|| compare_ids(a_id, b_id))
}

fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

/// Documents of a single customer, in allocation order
#[derive(Debug, Clone, Default)]
pub struct CustomerLedger<'a> {
    /// Credit invoices, oldest first
    pub credit_invoices: Vec<&'a SalesInvoice>,
    pub returns: Vec<&'a SalesReturn>,
    /// Receipt vouchers, oldest first
    pub receipts: Vec<&'a Voucher>,
    /// Payment vouchers refunding the customer, oldest first
    pub refunds: Vec<&'a Voucher>,
}

impl<'a> CustomerLedger<'a> {
    /// Build a ledger from unordered documents
    pub fn new(
        mut credit_invoices: Vec<&'a SalesInvoice>,
        mut returns: Vec<&'a SalesReturn>,
        mut receipts: Vec<&'a Voucher>,
        mut refunds: Vec<&'a Voucher>,
    ) -> Self {
        credit_invoices.sort_by(|a, b| chronological(a.date, &a.id, b.date, &b.id));
        returns.sort_by(|a, b| chronological(a.date, &a.id, b.date, &b.id));
        receipts.sort_by(|a, b| chronological(a.date, &a.id, b.date, &b.id));
        refunds.sort_by(|a, b| chronological(a.date, &a.id, b.date, &b.id));
        Self {
            credit_invoices,
            returns,
            receipts,
            refunds,
        }
    }

    pub fn total_credit_sales(&self) -> Decimal {
        self.credit_invoices.iter().map(|i| i.net_amount).sum()
    }

    pub fn total_returns(&self) -> Decimal {
        self.returns.iter().map(|r| r.net_amount).sum()
    }

    pub fn total_receipts(&self) -> Decimal {
        self.receipts.iter().map(|v| v.amount).sum()
    }

    pub fn total_refunds(&self) -> Decimal {
        self.refunds.iter().map(|v| v.amount).sum()
    }

    /// Date of the newest dated credit invoice
    pub fn last_invoice_date(&self) -> Option<NaiveDate> {
        self.credit_invoices.iter().filter_map(|i| i.date).max()
    }

    /// Date of the newest dated receipt
    pub fn last_payment_date(&self) -> Option<NaiveDate> {
        self.receipts.iter().filter_map(|v| v.date).max()
    }
}

/// Snapshot documents grouped by customer id
#[derive(Debug, Default)]
pub struct LedgerIndex<'a> {
    ledgers: HashMap<&'a str, CustomerLedger<'a>>,
}

impl<'a> LedgerIndex<'a> {
    /// Group documents by customer.
    ///
    /// Non-credit invoices are skipped, as are vouchers whose entity type is
    /// not `customer_entity_type`. Documents for ids that are not in the
    /// customer list are skipped as well.
    pub fn build(snapshot: &'a LedgerSnapshot, customer_entity_type: &str) -> Self {
        let mut grouped: HashMap<&'a str, Grouped<'a>> = snapshot
            .customers
            .iter()
            .map(|c| (c.id.as_str(), Grouped::default()))
            .collect();
        let mut orphans = 0usize;

        for invoice in snapshot.sales_invoices.iter().filter(|i| i.payment_method.is_credit()) {
            match grouped.get_mut(invoice.customer_id.as_str()) {
                Some(group) => group.invoices.push(invoice),
                None => orphans += 1,
            }
        }

        for sales_return in &snapshot.sales_returns {
            match grouped.get_mut(sales_return.customer_id.as_str()) {
                Some(group) => group.returns.push(sales_return),
                None => orphans += 1,
            }
        }

        let customer_vouchers = |vouchers: &'a [Voucher]| {
            vouchers.iter().filter(move |v| {
                v.entity.entity_type.eq_ignore_ascii_case(customer_entity_type)
            })
        };

        for receipt in customer_vouchers(&snapshot.receipt_vouchers) {
            match grouped.get_mut(receipt.entity.id.as_str()) {
                Some(group) => group.receipts.push(receipt),
                None => orphans += 1,
            }
        }

        for refund in customer_vouchers(&snapshot.payment_vouchers) {
            match grouped.get_mut(refund.entity.id.as_str()) {
                Some(group) => group.refunds.push(refund),
                None => orphans += 1,
            }
        }

        if orphans > 0 {
            tracing::debug!(orphans, "Skipped documents referring to unknown customers");
        }

        let ledgers = grouped
            .into_iter()
            .map(|(id, g)| (id, CustomerLedger::new(g.invoices, g.returns, g.receipts, g.refunds)))
            .collect();

        Self { ledgers }
    }

    pub fn get(&self, customer_id: &str) -> Option<&CustomerLedger<'a>> {
        self.ledgers.get(customer_id)
    }
}

#[derive(Default)]
struct Grouped<'a> {
    invoices: Vec<&'a SalesInvoice>,
    returns: Vec<&'a SalesReturn>,
    receipts: Vec<&'a Voucher>,
    refunds: Vec<&'a Voucher>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, PaymentMethod, VoucherEntity};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn invoice(id: &str, date: Option<NaiveDate>, customer: &str, amount: Decimal) -> SalesInvoice {
        SalesInvoice {
            id: id.to_string(),
            date,
            customer_id: customer.to_string(),
            net_amount: amount,
            payment_method: PaymentMethod::Credit,
        }
    }

    fn voucher(id: &str, entity_type: &str, customer: &str, amount: Decimal) -> Voucher {
        Voucher {
            id: id.to_string(),
            date: date(2024, 3, 1),
            entity: VoucherEntity {
                entity_type: entity_type.to_string(),
                id: customer.to_string(),
            },
            amount,
        }
    }

    #[test]
    fn test_chronological_tie_breaks() {
        let jan = date(2024, 1, 1);
        assert_eq!(chronological(jan, "b", date(2024, 1, 2), "a"), Ordering::Less);
        assert_eq!(chronological(jan, "9", jan, "10"), Ordering::Less);
        assert_eq!(chronological(jan, "INV-2", jan, "INV-10"), Ordering::Greater);
        assert_eq!(chronological(None, "1", jan, "2"), Ordering::Greater);
        assert_eq!(chronological(None, "1", None, "2"), Ordering::Less);
    }

    #[test]
    fn test_ledger_sorts_documents() {
        let late = invoice("1", date(2024, 2, 1), "C1", dec!(10));
        let undated = invoice("0", None, "C1", dec!(10));
        let early_b = invoice("5", date(2024, 1, 1), "C1", dec!(10));
        let early_a = invoice("4", date(2024, 1, 1), "C1", dec!(10));

        let ledger = CustomerLedger::new(vec![&late, &undated, &early_b, &early_a], vec![], vec![], vec![]);
        let order: Vec<&str> = ledger.credit_invoices.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, ["4", "5", "1", "0"]);
        assert_eq!(ledger.last_invoice_date(), date(2024, 2, 1));
    }

    #[test]
    fn test_index_groups_and_filters() {
        let mut cash = invoice("3", date(2024, 1, 3), "C1", dec!(70));
        cash.payment_method = PaymentMethod::Cash;

        let snapshot = LedgerSnapshot {
            customers: vec![Customer {
                id: "C1".to_string(),
                name: "Noor".to_string(),
                code: "100".to_string(),
                opening_balance: Decimal::ZERO,
            }],
            sales_invoices: vec![
                invoice("1", date(2024, 1, 1), "C1", dec!(100)),
                invoice("2", date(2024, 1, 2), "GHOST", dec!(50)),
                cash,
            ],
            sales_returns: vec![],
            receipt_vouchers: vec![
                voucher("R1", "customer", "C1", dec!(30)),
                voucher("R2", "supplier", "C1", dec!(999)),
            ],
            payment_vouchers: vec![voucher("P1", "Customer", "C1", dec!(5))],
        };

        let index = LedgerIndex::build(&snapshot, "customer");

        let ledger = index.get("C1").unwrap();
        assert_eq!(ledger.credit_invoices.len(), 1);
        assert_eq!(ledger.total_credit_sales(), dec!(100));
        assert_eq!(ledger.total_receipts(), dec!(30));
        assert_eq!(ledger.total_refunds(), dec!(5));
        assert_eq!(ledger.last_payment_date(), date(2024, 3, 1));
        assert!(index.get("GHOST").is_none());
    }
}
