use error_common::{codes, EngineError, ErrorContext};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReceivablesError {
    #[error("Failed to read ledger from {source_name}: {message}")]
    Read { source_name: String, message: String },

    #[error("Failed to decode ledger from {source_name}: {message}")]
    Decode { source_name: String, message: String },

    #[error("Duplicate customer id: {0}")]
    DuplicateCustomer(String),

    #[error("Negative amount {amount} on {kind} {document_id}")]
    NegativeAmount {
        kind: &'static str,
        document_id: String,
        amount: rust_decimal::Decimal,
    },
}

pub type ReceivablesResult<T> = Result<T, ReceivablesError>;

impl From<ReceivablesError> for EngineError {
    fn from(error: ReceivablesError) -> Self {
        let message = error.to_string();
        match error {
            ReceivablesError::Read { source_name, .. } => EngineError::input(
                codes::input::READ_FAILED,
                message,
                ErrorContext::new().with_source(source_name),
            ),
            ReceivablesError::Decode { source_name, .. } => EngineError::input(
                codes::input::DECODE_FAILED,
                message,
                ErrorContext::new().with_source(source_name),
            ),
            ReceivablesError::DuplicateCustomer(customer_id) => EngineError::validation(
                codes::validation::DUPLICATE_CUSTOMER,
                message,
                ErrorContext::new().with_customer_id(customer_id),
            ),
            ReceivablesError::NegativeAmount {
                kind, document_id, ..
            } => EngineError::validation(
                codes::validation::NEGATIVE_AMOUNT,
                message,
                ErrorContext::new()
                    .with_document_id(document_id)
                    .add_context("kind", kind),
            ),
        }
    }
}
