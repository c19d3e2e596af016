use serde::{Deserialize, Serialize};

/// Operations on a product beyond create/edit/delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductAction {
    /// Single-field update of the purchased flag.
    SetPurchased(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductActionResult {
    /// The flag as stored after the update.
    SetPurchased(bool),
}
