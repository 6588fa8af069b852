use serde::{Deserialize, Serialize};

/// A transfer of value between two addresses. Immutable once created; a
/// transaction has no identity beyond its position in a block.
///
/// Fields are deliberately unvalidated: the ledger records whatever the caller
/// submits, and `amount` may be zero or negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: i64,
}

impl Transaction {
    pub fn new(sender: &str, recipient: &str, amount: i64) -> Self {
        Self {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            amount,
        }
    }
}
