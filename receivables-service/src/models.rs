use crate::normalize::{lenient_date, lenient_id};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Customer account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_id")]
    pub code: String,
    /// Debt carried forward from before the invoice history; positive means the customer owes
    #[serde(default)]
    pub opening_balance: Decimal,
}

/// How a sales invoice was settled at the time of sale
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Credit,
    Other(String),
}

impl PaymentMethod {
    pub fn is_credit(&self) -> bool {
        matches!(self, Self::Credit)
    }
}

impl From<String> for PaymentMethod {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "cash" => Self::Cash,
            "credit" => Self::Credit,
            _ => Self::Other(value),
        }
    }
}

impl From<PaymentMethod> for String {
    fn from(value: PaymentMethod) -> Self {
        match value {
            PaymentMethod::Cash => "cash".to_string(),
            PaymentMethod::Credit => "credit".to_string(),
            PaymentMethod::Other(other) => other,
        }
    }
}

/// Sales invoice; only `credit` invoices create a receivable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesInvoice {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub customer_id: String,
    #[serde(default)]
    pub net_amount: Decimal,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

/// Goods returned by a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReturn {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub customer_id: String,
    #[serde(default)]
    pub net_amount: Decimal,
}

/// Counterpart a voucher is booked against
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherEntity {
    #[serde(rename = "type", default)]
    pub entity_type: String,
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
}

/// Cash voucher. Receipt vouchers record money received from a customer,
/// payment vouchers record refunds paid back to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub entity: VoucherEntity,
    #[serde(default)]
    pub amount: Decimal,
}

pub type ReceiptVoucher = Voucher;
pub type PaymentVoucher = Voucher;

impl Voucher {
    pub fn is_for(&self, entity_type: &str, customer_id: &str) -> bool {
        self.entity.entity_type.eq_ignore_ascii_case(entity_type) && self.entity.id == customer_id
    }
}

/// All collections a report run works from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LedgerSnapshot {
    pub customers: Vec<Customer>,
    pub sales_invoices: Vec<SalesInvoice>,
    pub sales_returns: Vec<SalesReturn>,
    pub receipt_vouchers: Vec<ReceiptVoucher>,
    pub payment_vouchers: Vec<PaymentVoucher>,
}
