use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown creditor: {0}")]
    MissingCreditor(String),

    #[error("Unknown debtor {debtor} under creditor {creditor}")]
    MissingDebtor { creditor: String, debtor: String },

    #[error("Creditor and debtor must differ: {0}")]
    SelfPair(String),

    #[error("Expense amount must be non-negative, got {0}")]
    InvalidAmount(i64),

    #[error("Malformed ledger text: {0}")]
    Deserialize(String),

    #[error("Ledger serialization failed: {0}")]
    Serialize(String),

    #[error("I/O error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, Error>;
