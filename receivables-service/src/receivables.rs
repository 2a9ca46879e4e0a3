//! FIFO settlement of receipts and returns against customer debt.

use crate::ledger::CustomerLedger;
use crate::models::SalesInvoice;
use rust_decimal::Decimal;

/// Outstanding part of a credit invoice after allocation
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceBalance<'a> {
    pub invoice: &'a SalesInvoice,
    pub unpaid_amount: Decimal,
}

/// Result of settling one customer's ledger
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation<'a> {
    /// Invoice balances in FIFO order
    pub invoice_balances: Vec<InvoiceBalance<'a>>,
    /// Opening balance left after receipts, plus refunds paid out.
    /// Negative when the customer started with a credit.
    pub remaining_opening_balance: Decimal,
    /// Receipts that found no debt to settle
    pub unapplied_receipts: Decimal,
    /// Returns that found no invoice to reduce
    pub unapplied_returns: Decimal,
}

impl Allocation<'_> {
    pub fn unpaid_invoices_total(&self) -> Decimal {
        self.invoice_balances.iter().map(|b| b.unpaid_amount).sum()
    }

    /// Unrounded balance owed by the customer
    pub fn current_balance(&self) -> Decimal {
        self.remaining_opening_balance + self.unpaid_invoices_total()
    }
}

/// Settle a customer's ledger.
///
/// Receipts retire the opening balance first and then invoices oldest
/// first. Returns reduce invoices newest first. Refunds paid to the customer
/// are added back onto the opening balance. An opening credit (negative
/// opening balance) is left untouched by receipts.
pub fn allocate<'a>(opening_balance: Decimal, ledger: &CustomerLedger<'a>) -> Allocation<'a> {
    let mut invoice_balances: Vec<InvoiceBalance<'a>> = ledger
        .credit_invoices
        .iter()
        .map(|&invoice| InvoiceBalance {
            invoice,
            unpaid_amount: invoice.net_amount,
        })
        .collect();

    let mut remaining_opening_balance = opening_balance;
    let mut remaining_receipts = ledger.total_receipts();

    if remaining_opening_balance > Decimal::ZERO {
        let to_opening = remaining_receipts.min(remaining_opening_balance);
        remaining_opening_balance -= to_opening;
        remaining_receipts -= to_opening;
    }

    for balance in &mut invoice_balances {
        if remaining_receipts <= Decimal::ZERO {
            break;
        }
        settle(balance, &mut remaining_receipts);
    }

    let mut remaining_returns = ledger.total_returns();
    for balance in invoice_balances.iter_mut().rev() {
        if remaining_returns <= Decimal::ZERO {
            break;
        }
        settle(balance, &mut remaining_returns);
    }

    remaining_opening_balance += ledger.total_refunds();

    Allocation {
        invoice_balances,
        remaining_opening_balance,
        unapplied_receipts: remaining_receipts.max(Decimal::ZERO),
        unapplied_returns: remaining_returns.max(Decimal::ZERO),
    }
}

fn settle(balance: &mut InvoiceBalance<'_>, available: &mut Decimal) {
    let applied = (*available).min(balance.unpaid_amount).max(Decimal::ZERO);
    balance.unpaid_amount -= applied;
    *available -= applied;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaymentMethod, SalesReturn, Voucher, VoucherEntity};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn invoice(id: &str, month: u32, day: u32, amount: Decimal) -> SalesInvoice {
        SalesInvoice {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, month, day),
            customer_id: "C1".to_string(),
            net_amount: amount,
            payment_method: PaymentMethod::Credit,
        }
    }

    fn voucher(id: &str, amount: Decimal) -> Voucher {
        Voucher {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 2, 1),
            entity: VoucherEntity {
                entity_type: "customer".to_string(),
                id: "C1".to_string(),
            },
            amount,
        }
    }

    fn sales_return(amount: Decimal) -> SalesReturn {
        SalesReturn {
            id: "RET-1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 2, 5),
            customer_id: "C1".to_string(),
            net_amount: amount,
        }
    }

    fn unpaid(allocation: &Allocation<'_>) -> Vec<Decimal> {
        allocation.invoice_balances.iter().map(|b| b.unpaid_amount).collect()
    }

    #[test]
    fn test_receipts_settle_oldest_invoice_first() {
        let jan_1 = invoice("1", 1, 1, dec!(100));
        let jan_15 = invoice("2", 1, 15, dec!(50));
        let receipt = voucher("R1", dec!(120));
        let ledger = CustomerLedger::new(vec![&jan_15, &jan_1], vec![], vec![&receipt], vec![]);

        let allocation = allocate(Decimal::ZERO, &ledger);

        assert_eq!(unpaid(&allocation), [dec!(0), dec!(30)]);
        assert_eq!(allocation.current_balance(), dec!(30));
        assert_eq!(allocation.unapplied_receipts, Decimal::ZERO);
    }

    #[test]
    fn test_returns_reduce_newest_invoice_first() {
        let jan_1 = invoice("1", 1, 1, dec!(100));
        let jan_15 = invoice("2", 1, 15, dec!(50));
        let ret = sales_return(dec!(30));
        let ledger = CustomerLedger::new(vec![&jan_1, &jan_15], vec![&ret], vec![], vec![]);

        let allocation = allocate(Decimal::ZERO, &ledger);

        assert_eq!(unpaid(&allocation), [dec!(100), dec!(20)]);
    }

    #[test]
    fn test_returns_spill_into_older_invoices() {
        let jan_1 = invoice("1", 1, 1, dec!(100));
        let jan_15 = invoice("2", 1, 15, dec!(50));
        let ret = sales_return(dec!(80));
        let ledger = CustomerLedger::new(vec![&jan_1, &jan_15], vec![&ret], vec![], vec![]);

        let allocation = allocate(Decimal::ZERO, &ledger);

        assert_eq!(unpaid(&allocation), [dec!(70), dec!(0)]);
    }

    #[test]
    fn test_opening_balance_is_settled_before_invoices() {
        let jan_1 = invoice("1", 1, 1, dec!(100));
        let receipt = voucher("R1", dec!(250));
        let ledger = CustomerLedger::new(vec![&jan_1], vec![], vec![&receipt], vec![]);

        let allocation = allocate(dec!(200), &ledger);

        assert_eq!(allocation.remaining_opening_balance, Decimal::ZERO);
        assert_eq!(unpaid(&allocation), [dec!(50)]);
    }

    #[test]
    fn test_refunds_increase_opening_balance() {
        let receipt = voucher("R1", dec!(40));
        let refund = voucher("P1", dec!(15));
        let ledger = CustomerLedger::new(vec![], vec![], vec![&receipt], vec![&refund]);

        let allocation = allocate(dec!(100), &ledger);

        assert_eq!(allocation.remaining_opening_balance, dec!(75));
        assert_eq!(allocation.current_balance(), dec!(75));
    }

    #[test]
    fn test_opening_credit_is_not_consumed_by_receipts() {
        let jan_1 = invoice("1", 1, 1, dec!(100));
        let receipt = voucher("R1", dec!(60));
        let ledger = CustomerLedger::new(vec![&jan_1], vec![], vec![&receipt], vec![]);

        let allocation = allocate(dec!(-25), &ledger);

        assert_eq!(allocation.remaining_opening_balance, dec!(-25));
        assert_eq!(unpaid(&allocation), [dec!(40)]);
        assert_eq!(allocation.current_balance(), dec!(15));
    }

    #[test]
    fn test_overpayment_is_reported_as_unapplied() {
        let jan_1 = invoice("1", 1, 1, dec!(100));
        let receipt = voucher("R1", dec!(130));
        let ret = sales_return(dec!(10));
        let ledger = CustomerLedger::new(vec![&jan_1], vec![&ret], vec![&receipt], vec![]);

        let allocation = allocate(Decimal::ZERO, &ledger);

        assert_eq!(unpaid(&allocation), [dec!(0)]);
        assert_eq!(allocation.unapplied_receipts, dec!(30));
        assert_eq!(allocation.unapplied_returns, dec!(10));
        assert_eq!(allocation.current_balance(), Decimal::ZERO);
    }

    #[test]
    fn test_zero_amount_invoice_keeps_its_place() {
        let free = invoice("1", 1, 1, dec!(0));
        let jan_2 = invoice("2", 1, 2, dec!(10));
        let receipt = voucher("R1", dec!(4));
        let ledger = CustomerLedger::new(vec![&free, &jan_2], vec![], vec![&receipt], vec![]);

        let allocation = allocate(Decimal::ZERO, &ledger);

        assert_eq!(unpaid(&allocation), [dec!(0), dec!(6)]);
    }
}
