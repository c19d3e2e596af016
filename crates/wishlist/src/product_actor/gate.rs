//! The shared-secret date check in front of the add-product form.

use super::ProductError;
use crate::config::DEFAULT_GATE_DATE;

/// Accepts a submission only when its date string equals the configured constant.
///
/// Plain string equality: no date parsing, no trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    date: String,
}

impl Gate {
    pub fn new(date: impl Into<String>) -> Self {
        Self { date: date.into() }
    }

    pub fn check(&self, submitted: &str) -> Result<(), ProductError> {
        if submitted == self.date {
            Ok(())
        } else {
            Err(ProductError::GateRejected)
        }
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new(DEFAULT_GATE_DATE)
    }
}
