use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Error context information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorContext {
    pub customer_id: Option<String>,
    pub document_id: Option<String>,
    pub source: Option<String>,
    pub additional: BTreeMap<String, String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    pub fn with_document_id(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }

    /// Name of the file or collaborator the failing data came from
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn add_context<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.additional.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.customer_id.is_none()
            && self.document_id.is_none()
            && self.source.is_none()
            && self.additional.is_empty()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(source) = &self.source {
            parts.push(format!("source={source}"));
        }
        if let Some(customer_id) = &self.customer_id {
            parts.push(format!("customer={customer_id}"));
        }
        if let Some(document_id) = &self.document_id {
            parts.push(format!("document={document_id}"));
        }
        for (key, value) in &self.additional {
            parts.push(format!("{key}={value}"));
        }
        write!(f, "{}", parts.join(" "))
    }
}
